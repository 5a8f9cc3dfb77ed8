//! Executor module for file operations

pub mod copy;

use crate::diff::PassPlan;
use crate::types::{MirrorError, SyncDecision};
use std::fs;
use std::path::Path;

pub use copy::{copy_file_atomic, PART_SUFFIX};

/// Execution statistics for one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Number of non-skip decisions attempted.
    pub total_actions: usize,
    /// Directories created.
    pub dirs_created: usize,
    /// Files that were missing at the destination.
    pub files_created: usize,
    /// Files overwritten because the source was newer.
    pub files_updated: usize,
    /// Number of failed actions.
    pub failed_actions: usize,
    /// Aggregate copied bytes.
    pub bytes_copied: u64,
}

/// Events emitted while executing a plan.
#[derive(Debug)]
pub enum ExecutionEvent<'a> {
    /// Action execution started.
    ActionStart {
        index: usize,
        total: usize,
        decision: &'a SyncDecision,
    },
    /// Action execution succeeded.
    ActionSuccess {
        index: usize,
        total: usize,
        decision: &'a SyncDecision,
        bytes_copied: u64,
    },
    /// Action execution failed but executor continued.
    ActionError {
        index: usize,
        total: usize,
        decision: &'a SyncDecision,
        error: &'a MirrorError,
    },
    /// Plan execution completed (with or without errors).
    Complete { stats: &'a ExecutionStats },
}

/// Optional callback used to receive execution events.
///
/// The lifetime lets a callback borrow from the caller's stack.
pub type ExecutionCallback<'a> = dyn Fn(&ExecutionEvent<'_>) + Send + Sync + 'a;

/// Execute a pass plan against `destination`, reading files from `source`
///
/// Actions run sequentially in plan order. A failed action is reported
/// through `on_event` and counted; it never stops the remaining actions.
pub fn execute_plan(
    plan: &PassPlan,
    source: &Path,
    destination: &Path,
    on_event: Option<&ExecutionCallback<'_>>,
) -> ExecutionStats {
    let actions: Vec<&SyncDecision> = plan.decisions.iter().filter(|d| !d.is_skip()).collect();
    let mut stats = ExecutionStats {
        total_actions: actions.len(),
        ..Default::default()
    };

    for (idx, decision) in actions.into_iter().enumerate() {
        let index = idx + 1;
        emit_event(
            on_event,
            &ExecutionEvent::ActionStart {
                index,
                total: stats.total_actions,
                decision,
            },
        );

        match execute_decision(decision, source, destination) {
            Ok(bytes) => {
                match decision {
                    SyncDecision::CreateDir(_) => stats.dirs_created += 1,
                    SyncDecision::CopyNew(_) => stats.files_created += 1,
                    SyncDecision::Update(_) => stats.files_updated += 1,
                    SyncDecision::Skip(_) => {}
                }
                stats.bytes_copied += bytes;

                emit_event(
                    on_event,
                    &ExecutionEvent::ActionSuccess {
                        index,
                        total: stats.total_actions,
                        decision,
                        bytes_copied: bytes,
                    },
                );
            }
            Err(err) => {
                stats.failed_actions += 1;

                emit_event(
                    on_event,
                    &ExecutionEvent::ActionError {
                        index,
                        total: stats.total_actions,
                        decision,
                        error: &err,
                    },
                );
            }
        }
    }

    emit_event(on_event, &ExecutionEvent::Complete { stats: &stats });

    stats
}

fn execute_decision(
    decision: &SyncDecision,
    source: &Path,
    destination: &Path,
) -> Result<u64, MirrorError> {
    match decision {
        SyncDecision::CreateDir(path) => create_dir(&destination.join(path)).map(|_| 0),
        SyncDecision::CopyNew(record) | SyncDecision::Update(record) => copy_file_atomic(
            &source.join(&record.relative_path),
            &destination.join(&record.relative_path),
        ),
        SyncDecision::Skip(_) => Ok(0),
    }
}

fn create_dir(path: &Path) -> Result<(), MirrorError> {
    fs::create_dir_all(path).map_err(|e| MirrorError::from_copy(path, e))
}

fn emit_event(on_event: Option<&ExecutionCallback<'_>>, event: &ExecutionEvent<'_>) {
    if let Some(callback) = on_event {
        callback(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileRecord;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    fn record(path: &str, size: u64) -> FileRecord {
        FileRecord::new(
            PathBuf::from(path),
            UNIX_EPOCH + Duration::from_secs(1_000),
            size,
        )
    }

    #[test]
    fn test_execute_plan_copy_update_skip() {
        let src = TempDir::new().expect("create src tempdir");
        let dst = TempDir::new().expect("create dst tempdir");

        fs::write(src.path().join("new.txt"), b"new-content").expect("write src new");
        fs::write(src.path().join("keep.txt"), b"updated").expect("write src keep");
        fs::write(dst.path().join("keep.txt"), b"old").expect("write dst keep old");

        let mut plan = PassPlan::new();
        plan.add_decision(SyncDecision::CopyNew(record("new.txt", 11)));
        plan.add_decision(SyncDecision::Update(record("keep.txt", 7)));
        plan.add_decision(SyncDecision::Skip(PathBuf::from("same.txt")));

        let stats = execute_plan(&plan, src.path(), dst.path(), None);

        assert_eq!(stats.total_actions, 2);
        assert_eq!(stats.files_created, 1);
        assert_eq!(stats.files_updated, 1);
        assert_eq!(stats.failed_actions, 0);
        assert_eq!(stats.bytes_copied, 18);
        assert_eq!(
            fs::read(dst.path().join("new.txt")).expect("read dst new"),
            b"new-content"
        );
        assert_eq!(
            fs::read(dst.path().join("keep.txt")).expect("read dst keep"),
            b"updated"
        );
    }

    #[test]
    fn test_execute_plan_creates_directories() {
        let src = TempDir::new().expect("create src tempdir");
        let dst = TempDir::new().expect("create dst tempdir");

        let mut plan = PassPlan::new();
        plan.add_decision(SyncDecision::CreateDir(PathBuf::from("empty/inner")));

        let stats = execute_plan(&plan, src.path(), dst.path(), None);

        assert_eq!(stats.dirs_created, 1);
        assert!(dst.path().join("empty/inner").is_dir());
    }

    #[test]
    fn test_execute_plan_continue_on_error() {
        let src = TempDir::new().expect("create src tempdir");
        let dst = TempDir::new().expect("create dst tempdir");

        fs::write(src.path().join("good.txt"), b"good").expect("write src good");

        let mut plan = PassPlan::new();
        plan.add_decision(SyncDecision::CopyNew(record("missing.txt", 10)));
        plan.add_decision(SyncDecision::CopyNew(record("good.txt", 4)));

        let stats = execute_plan(&plan, src.path(), dst.path(), None);

        assert_eq!(stats.failed_actions, 1);
        assert_eq!(stats.files_created, 1);
        assert!(dst.path().join("good.txt").exists());
        assert!(!dst.path().join("missing.txt").exists());
    }

    #[test]
    fn test_execute_plan_emits_events() {
        let src = TempDir::new().expect("create src tempdir");
        let dst = TempDir::new().expect("create dst tempdir");

        fs::write(src.path().join("new.txt"), b"new-content").expect("write src new");
        let mut plan = PassPlan::new();
        plan.add_decision(SyncDecision::CopyNew(record("new.txt", 11)));
        plan.add_decision(SyncDecision::CopyNew(record("gone.txt", 1)));

        let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let events_ref = Arc::clone(&events);
        let callback = move |event: &ExecutionEvent<'_>| {
            let label = match event {
                ExecutionEvent::ActionStart { .. } => "start",
                ExecutionEvent::ActionSuccess { .. } => "success",
                ExecutionEvent::ActionError { .. } => "error",
                ExecutionEvent::Complete { .. } => "complete",
            };
            events_ref
                .lock()
                .expect("lock events")
                .push(label.to_string());
        };

        let stats = execute_plan(&plan, src.path(), dst.path(), Some(&callback));
        assert_eq!(stats.failed_actions, 1);

        let snapshot = events.lock().expect("lock events snapshot").clone();
        assert_eq!(
            snapshot,
            vec!["start", "success", "start", "error", "complete"]
        );
    }
}
