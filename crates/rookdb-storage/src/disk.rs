//! Disk manager - positioned page I/O on files under the database directory
//!
//! Each file is a flat array of `PAGE_SIZE`-byte pages: `[Page0][Page1]...`
//! Files are opened lazily on first access and truncated when opened, so
//! page contents live only as long as the process; the engine above rebuilds
//! its indexes from scratch each run.

use crate::page::{PageId, PAGE_SIZE};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Translates `(file name, page id)` into reads and writes on files rooted
/// at the database directory.
pub struct DiskManager {
    /// Database root directory; all file names are relative to it
    db_path: PathBuf,
    /// Lazily opened file handles, keyed by relative file name
    files: Mutex<HashMap<String, File>>,
}

impl DiskManager {
    /// Create a disk manager rooted at `db_path`, creating the directory if
    /// it does not exist.
    pub fn new(db_path: impl AsRef<Path>) -> std::io::Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        fs::create_dir_all(&db_path)?;
        Ok(DiskManager {
            db_path,
            files: Mutex::new(HashMap::new()),
        })
    }

    /// The database root directory.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Write exactly one page at `page_id * PAGE_SIZE`. A failed write is
    /// retried once; a second failure is reported to the diagnostic sink and
    /// the page is dropped.
    pub fn write_page(&self, filename: &str, page_id: PageId, data: &[u8; PAGE_SIZE]) {
        let mut files = self.files.lock();
        let file = match self.open_file(&mut files, filename) {
            Ok(file) => file,
            Err(e) => {
                error!(file = filename, "cannot open file for page write: {}", e);
                return;
            }
        };

        let offset = page_id * PAGE_SIZE as u64;
        if let Err(e) = write_at(file, offset, data) {
            warn!(
                file = filename,
                page = page_id,
                "page write failed, retrying: {}",
                e
            );
            if let Err(e) = write_at(file, offset, data) {
                error!(
                    file = filename,
                    page = page_id,
                    "page write failed after retry, data lost: {}",
                    e
                );
            }
        }
    }

    /// Read one page at `page_id * PAGE_SIZE` into `out`. A short or failed
    /// read zero-fills the unread suffix: a page never written yet reads as
    /// all zeros, which the layers above interpret as empty.
    pub fn read_page(&self, filename: &str, page_id: PageId, out: &mut [u8; PAGE_SIZE]) {
        let mut files = self.files.lock();
        let file = match self.open_file(&mut files, filename) {
            Ok(file) => file,
            Err(e) => {
                error!(file = filename, "cannot open file for page read: {}", e);
                out.fill(0);
                return;
            }
        };

        let offset = page_id * PAGE_SIZE as u64;
        let read = match read_at(file, offset, out) {
            Ok(n) => n,
            Err(e) => {
                debug!(
                    file = filename,
                    page = page_id,
                    "page read failed, degrading to zeros: {}",
                    e
                );
                0
            }
        };
        out[read..].fill(0);
    }

    /// Open a file handle, creating it (and any intervening directories) on
    /// first access. The file is truncated when first opened in this process.
    fn open_file<'a>(
        &self,
        files: &'a mut HashMap<String, File>,
        filename: &str,
    ) -> std::io::Result<&'a mut File> {
        if !files.contains_key(filename) {
            let path = self.db_path.join(filename);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(true)
                .open(&path)?;
            files.insert(filename.to_string(), file);
        }
        Ok(files.get_mut(filename).expect("file handle just inserted"))
    }
}

fn write_at(file: &mut File, offset: u64, data: &[u8]) -> std::io::Result<()> {
    file.seek(SeekFrom::Start(offset))?;
    file.write_all(data)?;
    file.flush()
}

/// Read up to `out.len()` bytes at `offset`, returning how many were read.
/// Stops early at end of file.
fn read_at(file: &mut File, offset: u64, out: &mut [u8]) -> std::io::Result<usize> {
    file.seek(SeekFrom::Start(offset))?;
    let mut read = 0;
    while read < out.len() {
        match file.read(&mut out[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(read)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_page() {
        let dir = tempdir().unwrap();
        let disk = DiskManager::new(dir.path()).unwrap();

        let mut page = [0u8; PAGE_SIZE];
        page[0] = 0xDE;
        page[PAGE_SIZE - 1] = 0xAD;
        disk.write_page("t/col.data", 2, &page);

        let mut out = [0xFFu8; PAGE_SIZE];
        disk.read_page("t/col.data", 2, &mut out);
        assert_eq!(out[0], 0xDE);
        assert_eq!(out[PAGE_SIZE - 1], 0xAD);
    }

    #[test]
    fn test_read_unwritten_page_is_zeroed() {
        let dir = tempdir().unwrap();
        let disk = DiskManager::new(dir.path()).unwrap();

        let mut out = [0xFFu8; PAGE_SIZE];
        disk.read_page("missing.data", 7, &mut out);
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pages_land_at_indexed_offsets() {
        let dir = tempdir().unwrap();
        let disk = DiskManager::new(dir.path()).unwrap();

        let mut page = [0u8; PAGE_SIZE];
        page[0] = 1;
        disk.write_page("f.data", 0, &page);
        page[0] = 2;
        disk.write_page("f.data", 1, &page);

        let len = std::fs::metadata(dir.path().join("f.data")).unwrap().len();
        assert_eq!(len, 2 * PAGE_SIZE as u64);

        let mut out = [0u8; PAGE_SIZE];
        disk.read_page("f.data", 0, &mut out);
        assert_eq!(out[0], 1);
        disk.read_page("f.data", 1, &mut out);
        assert_eq!(out[0], 2);
    }

    #[test]
    fn test_nested_directories_created_on_demand() {
        let dir = tempdir().unwrap();
        let disk = DiskManager::new(dir.path()).unwrap();

        let page = [7u8; PAGE_SIZE];
        disk.write_page("employees/salary.data", 0, &page);
        assert!(dir.path().join("employees/salary.data").exists());
    }

    #[test]
    fn test_sparse_write_zero_fills_gap() {
        let dir = tempdir().unwrap();
        let disk = DiskManager::new(dir.path()).unwrap();

        let page = [9u8; PAGE_SIZE];
        disk.write_page("f.data", 3, &page);

        // Pages 0..3 were never written; they read back as zeros.
        let mut out = [0xFFu8; PAGE_SIZE];
        disk.read_page("f.data", 1, &mut out);
        assert!(out.iter().all(|&b| b == 0));
    }
}
