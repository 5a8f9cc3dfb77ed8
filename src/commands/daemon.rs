//! Periodic mirroring until shutdown

use crate::commands::sync::{run_pass, PassReport};
use crate::schedule::PeriodicTask;
use crate::types::MirrorError;
use crate::Config;
use tokio_util::sync::CancellationToken;

/// Run a single pass and log its outcome
pub fn run_once(config: &Config) -> Result<PassReport, MirrorError> {
    match run_pass(config, None) {
        Ok(report) => {
            log_report(&report);
            Ok(report)
        }
        Err(e) => {
            tracing::error!("Sync pass aborted: {}", e);
            Err(e)
        }
    }
}

/// Mirror every `config.interval` until `token` is cancelled
///
/// A pass that cannot scan a root is logged and retried on the next tick.
/// Returns the number of passes run.
pub async fn run(config: Config, token: CancellationToken) -> usize {
    let task = PeriodicTask::new(config.interval);
    tracing::info!(
        "Mirroring {} -> {} every {}s",
        config.source.display(),
        config.destination.display(),
        task.interval().as_secs()
    );

    let passes = task
        .run(token, move || {
            let _ = run_once(&config);
        })
        .await;

    tracing::info!("Stopped after {} pass(es)", passes);
    passes
}

fn log_report(report: &PassReport) {
    if report.is_partial() {
        tracing::warn!("Sync pass completed with errors: {}", report.summary());
    } else if report.dry_run || report.execution.total_actions > 0 {
        tracing::info!("{}", report.summary());
    } else {
        tracing::debug!("{}", report.summary());
    }
}
