//! SyncDecision - What a pass does with one source path

use super::FileRecord;
use std::path::{Path, PathBuf};

/// Decision made by the diff engine for one source path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncDecision {
    /// Create a source directory missing at the destination
    CreateDir(PathBuf),

    /// Copy a file missing at the destination
    CopyNew(FileRecord),

    /// Overwrite a destination file older than its source
    Update(FileRecord),

    /// Destination exists and is not older
    Skip(PathBuf),
}

impl SyncDecision {
    /// Relative path this decision applies to
    pub fn path(&self) -> &Path {
        match self {
            SyncDecision::CreateDir(path) | SyncDecision::Skip(path) => path,
            SyncDecision::CopyNew(record) | SyncDecision::Update(record) => &record.relative_path,
        }
    }

    /// Short label used in events and logs
    pub fn action_name(&self) -> &'static str {
        match self {
            SyncDecision::CreateDir(_) => "CreateDir",
            SyncDecision::CopyNew(_) => "Copy",
            SyncDecision::Update(_) => "Update",
            SyncDecision::Skip(_) => "Skip",
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, SyncDecision::Skip(_))
    }
}
