//! Sequential tree walker

use crate::types::{FileRecord, MirrorError, ScanResult};
use ignore::overrides::{Override, OverrideBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One item yielded by a tree walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanItem {
    /// A regular file
    File(FileRecord),
    /// A directory, as a path relative to the root
    Dir(PathBuf),
}

/// Walks one validated tree root
///
/// Opening a scanner checks the root once; every call to [`TreeScanner::records`]
/// then starts a fresh walk, so a scanner can be reused for independent snapshots.
#[derive(Debug, Clone)]
pub struct TreeScanner {
    root: PathBuf,
    overrides: Override,
}

impl TreeScanner {
    /// Validate `root` and compile exclude globs
    ///
    /// # Errors
    /// * `NotFound` - root does not exist
    /// * `Access` - root cannot be read
    /// * `NotADirectory` - root is a file or other non-directory
    /// * `Config` - an exclude glob is invalid
    pub fn open(root: &Path, excludes: &[String]) -> Result<Self, MirrorError> {
        let metadata = fs::metadata(root).map_err(|e| MirrorError::from_io(root, e))?;
        if !metadata.is_dir() {
            return Err(MirrorError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        // Listing fails early on an unreadable root instead of mid-walk.
        fs::read_dir(root).map_err(|e| MirrorError::from_io(root, e))?;

        let overrides = compile_excludes(root, excludes)?;

        Ok(Self {
            root: root.to_path_buf(),
            overrides,
        })
    }

    /// Lazily walk the tree
    ///
    /// Symbolic links are neither followed nor reported, and special files are
    /// skipped. Entries that vanish or cannot be read mid-walk are logged and
    /// skipped.
    pub fn records(&self) -> impl Iterator<Item = ScanItem> + '_ {
        let walker = ignore::WalkBuilder::new(&self.root)
            .standard_filters(false)
            .hidden(false)
            .follow_links(false)
            .overrides(self.overrides.clone())
            .build();

        walker.filter_map(move |result| {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(
                        "Error during directory traversal: {}. Scan will continue with remaining files.",
                        e
                    );
                    return None;
                }
            };

            if entry.depth() == 0 {
                return None;
            }

            let file_type = entry.file_type()?;
            let relative_path = match entry.path().strip_prefix(&self.root) {
                Ok(p) => p.to_path_buf(),
                Err(_) => {
                    tracing::warn!(
                        "Failed to calculate relative path for {}. File will be skipped.",
                        entry.path().display()
                    );
                    return None;
                }
            };

            if file_type.is_dir() {
                return Some(ScanItem::Dir(relative_path));
            }

            // Symlinks, pipes, sockets and devices are not mirrored.
            if !file_type.is_file() {
                tracing::debug!("Skipping non-regular file {}", relative_path.display());
                return None;
            }

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(
                        "Failed to read metadata for {}: {}. The file may have been removed during the scan.",
                        entry.path().display(),
                        e
                    );
                    return None;
                }
            };

            let modified_time = match metadata.modified() {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!(
                        "Failed to get modification time for {}: {}",
                        entry.path().display(),
                        e
                    );
                    return None;
                }
            };

            Some(ScanItem::File(FileRecord::new(
                relative_path,
                modified_time,
                metadata.len(),
            )))
        })
    }

    /// Walk the tree and collect a ScanResult
    pub fn scan(&self) -> ScanResult {
        let start_time = Instant::now();
        let mut result = ScanResult::new(self.root.clone());

        for item in self.records() {
            match item {
                ScanItem::File(record) => result.insert(record),
                ScanItem::Dir(path) => result.insert_dir(path),
            }
        }

        result.set_scan_duration(start_time.elapsed());
        result
    }
}

/// Open `root` and collect one snapshot of it
pub fn scan_tree(root: &Path, excludes: &[String]) -> Result<ScanResult, MirrorError> {
    let scanner = TreeScanner::open(root, excludes)?;
    let result = scanner.scan();
    tracing::debug!(
        "Scanned {}: {} files, {} dirs in {:?}",
        root.display(),
        result.total_files,
        result.dirs.len(),
        result.scan_duration
    );
    Ok(result)
}

fn compile_excludes(root: &Path, excludes: &[String]) -> Result<Override, MirrorError> {
    let mut builder = OverrideBuilder::new(root);

    for pattern in excludes {
        // The ignore crate's OverrideBuilder uses ! for exclusion
        builder.add(&format!("!{}", pattern)).map_err(|e| {
            MirrorError::Config(format!("Invalid exclude pattern '{}': {}", pattern, e))
        })?;
    }

    builder
        .build()
        .map_err(|e| MirrorError::Config(format!("Failed to build exclude overrides: {}", e)))
}
