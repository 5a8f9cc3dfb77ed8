//! ScanResult - Snapshot of one tree at one instant

use super::FileRecord;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Files and directories found under a root by a single scan
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    /// Map: relative_path → FileRecord
    pub files: HashMap<PathBuf, FileRecord>,

    /// Relative paths of every directory below the root
    pub dirs: BTreeSet<PathBuf>,

    /// Aggregate statistics
    pub total_size: u64,
    pub total_files: usize,

    /// Scan metadata
    pub scan_duration: Duration,
    pub root_path: PathBuf,
}

impl ScanResult {
    /// Create an empty result for `root_path`
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            files: HashMap::new(),
            dirs: BTreeSet::new(),
            total_size: 0,
            total_files: 0,
            scan_duration: Duration::from_secs(0),
            root_path,
        }
    }

    /// Insert a file record, keyed by its relative path
    ///
    /// Replacing an existing path adjusts the statistics instead of double counting.
    pub fn insert(&mut self, record: FileRecord) {
        if let Some(old) = self.files.get(&record.relative_path) {
            self.total_size = self.total_size.saturating_sub(old.size);
            self.total_files = self.total_files.saturating_sub(1);
        }

        self.total_size += record.size;
        self.total_files += 1;
        self.files.insert(record.relative_path.clone(), record);
    }

    /// Record a directory relative path
    pub fn insert_dir(&mut self, relative_path: PathBuf) {
        self.dirs.insert(relative_path);
    }

    pub fn get(&self, path: &Path) -> Option<&FileRecord> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn contains_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    /// Number of file records
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterator over all (path, record) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &FileRecord)> {
        self.files.iter()
    }

    pub fn set_scan_duration(&mut self, duration: Duration) {
        self.scan_duration = duration;
    }
}
