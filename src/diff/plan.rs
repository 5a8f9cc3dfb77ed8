//! Pass plan types

use crate::types::SyncDecision;

/// Ordered decisions for one pass, with statistics
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PassPlan {
    /// Decisions to execute, sorted by path
    pub decisions: Vec<SyncDecision>,

    /// Aggregate statistics about the plan
    pub stats: PlanStats,
}

impl PassPlan {
    /// Create a new empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a decision and update statistics
    pub fn add_decision(&mut self, decision: SyncDecision) {
        match &decision {
            SyncDecision::CreateDir(_) => {
                self.stats.dir_count += 1;
            }
            SyncDecision::CopyNew(record) => {
                self.stats.copy_count += 1;
                self.stats.total_bytes += record.size;
            }
            SyncDecision::Update(record) => {
                self.stats.update_count += 1;
                self.stats.total_bytes += record.size;
            }
            SyncDecision::Skip(_) => {
                self.stats.skip_count += 1;
            }
        }

        self.decisions.push(decision);
    }

    /// Sort decisions by path so parents come before their children
    pub fn sort_by_path(&mut self) {
        self.decisions.sort_by(|a, b| a.path().cmp(b.path()));
    }

    /// True if anything would be written
    pub fn has_work(&self) -> bool {
        self.decisions.iter().any(|decision| !decision.is_skip())
    }
}

/// Statistics about a pass plan
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanStats {
    /// Directories to create
    pub dir_count: usize,

    /// Files missing at the destination
    pub copy_count: usize,

    /// Files older at the destination
    pub update_count: usize,

    /// Files left untouched
    pub skip_count: usize,

    /// Bytes to transfer (CopyNew + Update)
    pub total_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileRecord;
    use std::path::{Path, PathBuf};
    use std::time::UNIX_EPOCH;

    fn record(name: &str, size: u64) -> FileRecord {
        FileRecord::new(PathBuf::from(name), UNIX_EPOCH, size)
    }

    #[test]
    fn test_add_decision_counts() {
        let mut plan = PassPlan::new();
        plan.add_decision(SyncDecision::CreateDir(PathBuf::from("d")));
        plan.add_decision(SyncDecision::CopyNew(record("d/a.txt", 10)));
        plan.add_decision(SyncDecision::Update(record("b.txt", 5)));
        plan.add_decision(SyncDecision::Skip(PathBuf::from("c.txt")));

        assert_eq!(plan.stats.dir_count, 1);
        assert_eq!(plan.stats.copy_count, 1);
        assert_eq!(plan.stats.update_count, 1);
        assert_eq!(plan.stats.skip_count, 1);
        assert_eq!(plan.stats.total_bytes, 15);
        assert!(plan.has_work());
    }

    #[test]
    fn test_only_skips_has_no_work() {
        let mut plan = PassPlan::new();
        plan.add_decision(SyncDecision::Skip(PathBuf::from("a")));
        plan.add_decision(SyncDecision::Skip(PathBuf::from("b")));

        assert!(!plan.has_work());
        assert!(!PassPlan::new().has_work());
    }

    #[test]
    fn test_sort_puts_parent_dirs_first() {
        let mut plan = PassPlan::new();
        plan.add_decision(SyncDecision::CopyNew(record("a/b/file.txt", 1)));
        plan.add_decision(SyncDecision::CreateDir(PathBuf::from("a/b")));
        plan.add_decision(SyncDecision::CreateDir(PathBuf::from("a")));

        plan.sort_by_path();

        let paths: Vec<&Path> = plan.decisions.iter().map(|d| d.path()).collect();
        assert_eq!(
            paths,
            vec![Path::new("a"), Path::new("a/b"), Path::new("a/b/file.txt")]
        );
    }
}
