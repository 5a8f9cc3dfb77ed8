//! One synchronization pass

use crate::diff::{generate_plan, PassPlan, PlanStats};
use crate::executor::{execute_plan, ExecutionCallback, ExecutionEvent, ExecutionStats};
use crate::scanner::scan_tree;
use crate::types::{MirrorError, SyncDecision};
use crate::Config;
use indicatif::HumanBytes;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, Instant};

/// Outcome of a pass that got past scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub plan: PlanStats,
    pub execution: ExecutionStats,
    pub dry_run: bool,
    pub duration: Duration,
}

impl PassReport {
    /// True when at least one action failed
    pub fn is_partial(&self) -> bool {
        self.execution.failed_actions > 0
    }

    /// Files written to the destination
    pub fn files_copied(&self) -> usize {
        self.execution.files_created + self.execution.files_updated
    }

    /// One-line summary for the log
    pub fn summary(&self) -> String {
        if self.dry_run {
            return format!(
                "Dry run: {} dir(s) to create, {} new file(s), {} update(s), {} unchanged | {}",
                self.plan.dir_count,
                self.plan.copy_count,
                self.plan.update_count,
                self.plan.skip_count,
                HumanBytes(self.plan.total_bytes)
            );
        }
        format!(
            "{} dir(s) created, {} file(s) created, {} modified, {} unchanged, {} failed | {} in {:.3}s",
            self.execution.dirs_created,
            self.execution.files_created,
            self.execution.files_updated,
            self.plan.skip_count,
            self.execution.failed_actions,
            HumanBytes(self.execution.bytes_copied),
            self.duration.as_secs_f64()
        )
    }
}

/// Run one pass from `config.source` to `config.destination`
///
/// Each source path is compared against `destination + relative_path` as it
/// is on disk, following symbolic links. A source scan failure or an unusable
/// destination root fails the whole pass. Once the plan exists every
/// action is attempted; per-file failures are logged and counted in the
/// report instead of being returned. Nothing under the source is written and
/// nothing at the destination is ever deleted.
pub fn run_pass(
    config: &Config,
    on_event: Option<&ExecutionCallback<'_>>,
) -> Result<PassReport, MirrorError> {
    tracing::debug!("Syncing...");
    let started = Instant::now();

    let src_tree = scan_tree(&config.source, &config.exclude)?;
    check_destination_root(&config.destination)?;

    let plan = generate_plan(&src_tree, &config.destination);
    log_skips(&plan);

    if config.dry_run {
        log_dry_run(&plan);
        return Ok(PassReport {
            plan: plan.stats,
            execution: ExecutionStats::default(),
            dry_run: true,
            duration: started.elapsed(),
        });
    }

    let execution = if plan.has_work() {
        let reporter = |event: &ExecutionEvent<'_>| {
            log_event(event);
            if let Some(callback) = on_event {
                callback(event);
            }
        };
        execute_plan(&plan, &config.source, &config.destination, Some(&reporter))
    } else {
        ExecutionStats::default()
    };

    let duration = started.elapsed();
    tracing::debug!(
        "Syncing completed. Duration: {:.4} seconds.",
        duration.as_secs_f64()
    );

    Ok(PassReport {
        plan: plan.stats,
        execution,
        dry_run: false,
        duration,
    })
}

/// A missing destination is mirrored into as if empty; anything else that is
/// not a directory aborts the pass.
fn check_destination_root(destination: &Path) -> Result<(), MirrorError> {
    match fs::metadata(destination) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(MirrorError::NotADirectory {
            path: destination.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(
                "Destination {} does not exist yet",
                destination.display()
            );
            Ok(())
        }
        Err(e) => Err(MirrorError::from_io(destination, e)),
    }
}

fn log_event(event: &ExecutionEvent<'_>) {
    match event {
        ExecutionEvent::ActionStart {
            index,
            total,
            decision,
        } => {
            tracing::debug!(
                "[{}/{}] {} {}",
                index,
                total,
                decision.action_name(),
                decision.path().display()
            );
        }
        ExecutionEvent::ActionSuccess { decision, .. } => match decision {
            SyncDecision::CreateDir(path) => {
                tracing::info!("Created directory {}", path.display());
            }
            SyncDecision::CopyNew(record) => {
                tracing::info!("Created file {}", record.relative_path.display());
            }
            SyncDecision::Update(record) => {
                tracing::info!("Modified file {}", record.relative_path.display());
            }
            SyncDecision::Skip(_) => {}
        },
        ExecutionEvent::ActionError {
            decision, error, ..
        } => {
            tracing::error!(
                "{} {} failed: {}",
                decision.action_name(),
                decision.path().display(),
                error
            );
        }
        ExecutionEvent::Complete { stats } => {
            tracing::debug!(
                "Executed {} action(s), {} failed",
                stats.total_actions,
                stats.failed_actions
            );
        }
    }
}

fn log_skips(plan: &PassPlan) {
    for decision in plan.decisions.iter().filter(|d| d.is_skip()) {
        tracing::debug!("Unchanged {}", decision.path().display());
    }
}

fn log_dry_run(plan: &PassPlan) {
    for decision in &plan.decisions {
        match decision {
            SyncDecision::CreateDir(path) => {
                tracing::info!("Would create directory {}", path.display());
            }
            SyncDecision::CopyNew(record) => {
                tracing::info!("Would create file {}", record.relative_path.display());
            }
            SyncDecision::Update(record) => {
                tracing::info!("Would modify file {}", record.relative_path.display());
            }
            SyncDecision::Skip(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(failed: usize, dry_run: bool) -> PassReport {
        PassReport {
            plan: PlanStats {
                dir_count: 1,
                copy_count: 2,
                update_count: 1,
                skip_count: 4,
                total_bytes: 2048,
            },
            execution: ExecutionStats {
                total_actions: 4,
                dirs_created: 1,
                files_created: 2,
                files_updated: 1 - failed.min(1),
                failed_actions: failed,
                bytes_copied: 1024,
            },
            dry_run,
            duration: Duration::from_millis(250),
        }
    }

    #[test]
    fn test_partial_report() {
        assert!(!report(0, false).is_partial());
        assert!(report(1, false).is_partial());
        assert_eq!(report(0, false).files_copied(), 3);
        assert_eq!(report(1, false).files_copied(), 2);
    }

    #[test]
    fn test_summary_mentions_counts_and_bytes() {
        let summary = report(1, false).summary();
        assert!(summary.contains("2 file(s) created"));
        assert!(summary.contains("1 failed"));
        assert!(summary.contains("4 unchanged"));
        assert!(summary.contains("1.00 KiB"));
    }

    #[test]
    fn test_pass_logs_every_execution_event() {
        use crate::logging::{build_dispatch, LogConfig};
        use tempfile::TempDir;

        let src = TempDir::new().expect("create src tempdir");
        let dst = TempDir::new().expect("create dst tempdir");
        let logs = TempDir::new().expect("create log tempdir");
        let log_path = logs.path().join("pass.log");
        fs::write(src.path().join("a.txt"), b"a").expect("write source file");

        let dispatch = build_dispatch(LogConfig {
            log_file: Some(&log_path),
            debug: true,
        })
        .expect("dispatch should build");
        let config = Config {
            source: src.path().to_path_buf(),
            destination: dst.path().to_path_buf(),
            ..Config::default()
        };

        let report = tracing::dispatcher::with_default(&dispatch, || run_pass(&config, None))
            .expect("pass should succeed");
        assert_eq!(report.files_copied(), 1);

        let contents = fs::read_to_string(&log_path).expect("read log file");
        assert!(contents.contains("[1/1] Copy a.txt"));
        assert!(contents.contains("Created file a.txt"));
        assert!(contents.contains("Executed 1 action(s), 0 failed"));
    }

    #[test]
    fn test_dry_run_summary_uses_plan() {
        let summary = report(0, true).summary();
        assert!(summary.starts_with("Dry run"));
        assert!(summary.contains("2 new file(s)"));
        assert!(summary.contains("2.00 KiB"));
    }
}
