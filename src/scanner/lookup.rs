//! Point lookups of destination counterparts

use crate::types::FileRecord;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Stat `root/relative_path` as the counterpart of a source file
///
/// Symbolic links are followed, so a link to a file stands for that file.
/// Anything that does not resolve to a regular file counts as absent and the
/// copy that follows reports the real problem.
pub fn lookup_file(root: &Path, relative_path: &Path) -> Option<FileRecord> {
    let path = root.join(relative_path);
    let metadata = match fs::metadata(&path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(
                "Failed to read metadata for {}: {}. Treating it as missing.",
                path.display(),
                e
            );
            return None;
        }
    };

    if !metadata.is_file() {
        return None;
    }

    match metadata.modified() {
        Ok(modified_time) => Some(FileRecord::new(
            relative_path.to_path_buf(),
            modified_time,
            metadata.len(),
        )),
        Err(e) => {
            tracing::warn!(
                "Failed to get modification time for {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

/// True when `root/relative_path` resolves to a directory, through links too
pub fn dir_exists(root: &Path, relative_path: &Path) -> bool {
    root.join(relative_path).is_dir()
}
