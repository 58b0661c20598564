//! RookDB - a disk-backed columnar storage engine
//!
//! RookDB stores each column of a table as a packed sequence of fixed-width
//! values in 4 KiB pages, indexed by a per-column B+ tree whose nodes live
//! in pages of the same substrate. A bounded buffer pool with LRU eviction
//! and dirty write-back sits between the engine and the filesystem, so
//! datasets can be much larger than memory.
//!
//! # Example
//!
//! ```no_run
//! use rookdb::{DataType, Database, Value};
//!
//! let db = Database::new("payroll", "./payroll_db").unwrap();
//! let table = db.create_table("employees").unwrap();
//! table.add_column("id", DataType::Int32).unwrap();
//! table.add_column("salary", DataType::Double).unwrap();
//!
//! table.insert_row(
//!     [
//!         ("id".to_string(), Value::Int32(1)),
//!         ("salary".to_string(), Value::Double(50_000.0)),
//!     ]
//!     .into_iter()
//!     .collect(),
//! ).unwrap();
//!
//! let rows = table.indexed_select("id", &Value::Int32(1), None).unwrap();
//! assert_eq!(rows.len(), 1);
//! ```

pub use rookdb_common as common;
pub use rookdb_storage as storage;

pub use rookdb_common::{DataType, Error, Result, Value};
pub use rookdb_storage::{
    BTreeIndex, BufferPool, Column, DiskManager, Page, PageId, RecordId, Row, Table,
    BTREE_ORDER, BUFFER_POOL_SIZE, PAGE_SIZE,
};

use hashbrown::HashMap;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// The main database instance: owns the storage substrate and namespaces
/// tables. All tables share one disk manager and one buffer pool.
pub struct Database {
    name: String,
    path: PathBuf,
    pool: Arc<BufferPool>,
    tables: RwLock<HashMap<String, Arc<Table>>>,
}

impl Database {
    /// Open a database rooted at `db_path`, creating the directory if it
    /// does not exist.
    pub fn new(name: impl Into<String>, db_path: impl AsRef<Path>) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();
        let disk = DiskManager::new(&path)?;
        Ok(Database {
            name: name.into(),
            path,
            pool: Arc::new(BufferPool::new(disk, BUFFER_POOL_SIZE)),
            tables: RwLock::new(HashMap::new()),
        })
    }

    /// Create an empty table
    pub fn create_table(&self, name: &str) -> Result<Arc<Table>> {
        let mut tables = self.tables.write();
        if tables.contains_key(name) {
            return Err(Error::TableAlreadyExists(name.to_string()));
        }
        let table = Arc::new(Table::new(name, self.pool.clone()));
        tables.insert(name.to_string(), table.clone());
        Ok(table)
    }

    /// Get a table by name
    pub fn get_table(&self, name: &str) -> Option<Arc<Table>> {
        self.tables.read().get(name).cloned()
    }

    /// Drop a table from the namespace, returning true if it existed. The
    /// table's files stay on disk.
    pub fn drop_table(&self, name: &str) -> bool {
        self.tables.write().remove(name).is_some()
    }

    /// Write every dirty page back to disk
    pub fn optimize(&self) {
        self.pool.flush_all_pages();
    }

    /// Report table and page statistics to the diagnostic sink
    pub fn print_statistics(&self) {
        let tables = self.tables.read();
        info!(
            database = %self.name,
            tables = tables.len(),
            resident_pages = self.pool.resident_pages(),
            "database statistics"
        );
        for (name, table) in tables.iter() {
            info!(table = %name, rows = table.row_count(), "table statistics");
        }
    }

    /// The database name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The database root directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The shared buffer pool
    pub fn buffer_pool(&self) -> &Arc<BufferPool> {
        &self.pool
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Dirty pages must reach disk before file handles close.
        self.pool.flush_all_pages();
    }
}
