//! Plan generation from a source scan and the destination on disk

use crate::diff::{compare_files, PassPlan};
use crate::scanner::{dir_exists, lookup_file};
use crate::types::{ScanResult, SyncDecision};
use std::path::Path;

/// Generate a pass plan for a source scan against the destination root
///
/// Every source path is looked up at `destination + relative_path` as it is
/// on disk, following symbolic links. Only source paths are visited:
/// destination-only files and directories never produce a decision. Source
/// directories missing at the destination get a `CreateDir` so empty
/// directories are mirrored as well.
///
/// # Example
/// ```
/// use treemirror::diff::generate_plan;
/// use treemirror::types::{FileRecord, ScanResult};
/// use std::path::{Path, PathBuf};
/// use std::time::{Duration, UNIX_EPOCH};
///
/// let mut src = ScanResult::new(PathBuf::from("src"));
/// src.insert(FileRecord::new(
///     PathBuf::from("new.txt"),
///     UNIX_EPOCH + Duration::from_secs(1_000),
///     4,
/// ));
///
/// // A destination that does not exist yet is empty.
/// let plan = generate_plan(&src, Path::new("no-such-destination"));
/// assert_eq!(plan.stats.copy_count, 1);
/// ```
pub fn generate_plan(src: &ScanResult, destination: &Path) -> PassPlan {
    let mut plan = PassPlan::new();

    for dir in &src.dirs {
        if !dir_exists(destination, dir) {
            plan.add_decision(SyncDecision::CreateDir(dir.clone()));
        }
    }

    for (path, record) in src.iter() {
        let counterpart = lookup_file(destination, path);
        plan.add_decision(compare_files(record, counterpart.as_ref()));
    }

    plan.sort_by_path();
    plan
}
