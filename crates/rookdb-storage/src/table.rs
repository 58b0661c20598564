//! Tables - named ordered sets of columns sharing one row count
//!
//! A row-level insert fans out to every column in declared order; columns a
//! row omits receive their type's default so all columns of a table stay the
//! same length. Queries resolve record ids through one column's index and
//! materialize rows by point reads of the projected columns.

use crate::buffer_pool::BufferPool;
use crate::column::Column;
use hashbrown::HashMap;
use parking_lot::RwLock;
use rookdb_common::{DataType, Error, Result, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A materialized query row
pub type Row = std::collections::HashMap<String, Value>;

/// Number of rows between buffer flushes during a bulk insert
const BULK_FLUSH_INTERVAL: u64 = 1000;

/// A disk-backed table
pub struct Table {
    name: String,
    /// Columns by name
    columns: RwLock<HashMap<String, Arc<Column>>>,
    /// Column names in declaration order
    column_order: RwLock<Vec<String>>,
    row_count: AtomicU64,
    pool: Arc<BufferPool>,
}

impl Table {
    pub fn new(name: impl Into<String>, pool: Arc<BufferPool>) -> Self {
        Table {
            name: name.into(),
            columns: RwLock::new(HashMap::new()),
            column_order: RwLock::new(Vec::new()),
            row_count: AtomicU64::new(0),
            pool,
        }
    }

    /// Add a column. A column added to a non-empty table is back-filled
    /// with default values so every column keeps the same length.
    pub fn add_column(&self, name: &str, data_type: DataType) -> Result<()> {
        if self.columns.read().contains_key(name) {
            return Err(Error::ColumnAlreadyExists(name.to_string()));
        }

        let column = Arc::new(Column::new(
            format!("{}/{}", self.name, name),
            data_type,
            self.pool.clone(),
        ));

        for _ in 0..self.row_count.load(Ordering::SeqCst) {
            column.append(data_type.default_value())?;
        }

        self.columns.write().insert(name.to_string(), column);
        self.column_order.write().push(name.to_string());
        Ok(())
    }

    /// Insert one row. Columns absent from `values` receive their default.
    pub fn insert_row(&self, mut values: Row) -> Result<()> {
        let order = self.column_order.read();
        let columns = self.columns.read();
        for name in order.iter() {
            let column = &columns[name];
            let value = values
                .remove(name)
                .unwrap_or_else(|| column.data_type().default_value());
            column.append(value)?;
        }
        self.row_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Insert many rows, flushing the buffer pool every 1000 rows to bound
    /// dirty memory.
    pub fn bulk_insert(&self, rows: Vec<Row>) -> Result<()> {
        for row in rows {
            self.insert_row(row)?;
            if self.row_count.load(Ordering::SeqCst) % BULK_FLUSH_INTERVAL == 0 {
                self.pool.flush_all_pages();
            }
        }
        Ok(())
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<Arc<Column>> {
        self.columns.read().get(name).cloned()
    }

    /// Rows whose `index_column` value equals `value`, materialized over
    /// `projection` (all columns in declared order when `None`).
    pub fn indexed_select(
        &self,
        index_column: &str,
        value: &Value,
        projection: Option<&[&str]>,
    ) -> Result<Vec<Row>> {
        let column = self
            .get_column(index_column)
            .ok_or_else(|| Error::ColumnNotFound(index_column.to_string()))?;
        let record_ids = column.find_records(value);
        self.materialize(&record_ids, projection)
    }

    /// Rows whose `index_column` value lies in the inclusive range
    /// `[start, end]`.
    pub fn range_select(
        &self,
        index_column: &str,
        start: &Value,
        end: &Value,
        projection: Option<&[&str]>,
    ) -> Result<Vec<Row>> {
        let column = self
            .get_column(index_column)
            .ok_or_else(|| Error::ColumnNotFound(index_column.to_string()))?;
        let record_ids = column.find_records_in_range(start, end);
        self.materialize(&record_ids, projection)
    }

    /// Point-read the projected columns at each record id
    fn materialize(&self, record_ids: &[u64], projection: Option<&[&str]>) -> Result<Vec<Row>> {
        let order = self.column_order.read();
        let columns = self.columns.read();
        let projected: Vec<String> = match projection {
            Some(names) => {
                let mut projected = Vec::with_capacity(names.len());
                for name in names {
                    if !columns.contains_key(*name) {
                        return Err(Error::ColumnNotFound(name.to_string()));
                    }
                    projected.push(name.to_string());
                }
                projected
            }
            None => order.clone(),
        };
        let mut rows = Vec::with_capacity(record_ids.len());
        for &record_id in record_ids {
            let mut row = Row::with_capacity(projected.len());
            for name in &projected {
                row.insert(name.clone(), columns[name].get(record_id));
            }
            rows.push(row);
        }
        Ok(rows)
    }

    /// Number of rows inserted so far
    pub fn row_count(&self) -> usize {
        self.row_count.load(Ordering::SeqCst) as usize
    }

    /// Column names in declaration order
    pub fn column_names(&self) -> Vec<String> {
        self.column_order.read().clone()
    }

    /// The table name
    pub fn name(&self) -> &str {
        &self.name
    }
}
