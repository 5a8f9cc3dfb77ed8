//! File comparison logic

use crate::types::{FileRecord, SyncDecision};

/// Decide what to do with a source file given its destination counterpart
///
/// Newer-wins on modification time only:
///
/// 1. No destination record → `CopyNew`
/// 2. Source strictly newer → `Update`
/// 3. Equal or destination newer → `Skip`
///
/// Sizes are deliberately ignored. A source file moved backward in time is
/// never re-copied, since nothing here remembers earlier passes.
pub fn compare_files(src: &FileRecord, dest: Option<&FileRecord>) -> SyncDecision {
    match dest {
        None => SyncDecision::CopyNew(src.clone()),
        Some(dest) if src.is_newer_than(dest) => SyncDecision::Update(src.clone()),
        Some(_) => SyncDecision::Skip(src.relative_path.clone()),
    }
}
