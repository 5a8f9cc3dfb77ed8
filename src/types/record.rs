//! FileRecord - One regular file seen by a scan

use std::path::PathBuf;
use std::time::SystemTime;

/// A regular file found under a tree root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path relative to the scanned root
    pub relative_path: PathBuf,

    /// Last modification time
    pub modified_time: SystemTime,

    /// File size in bytes (reporting only)
    pub size: u64,
}

impl FileRecord {
    /// Create a new FileRecord
    pub fn new(relative_path: PathBuf, modified_time: SystemTime, size: u64) -> Self {
        Self {
            relative_path,
            modified_time,
            size,
        }
    }

    /// True if this record is strictly newer than `other`
    pub fn is_newer_than(&self, other: &FileRecord) -> bool {
        self.modified_time > other.modified_time
    }
}
