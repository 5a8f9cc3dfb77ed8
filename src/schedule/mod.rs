//! Periodic task runner

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Runs a blocking task, waits, and repeats until cancelled
///
/// Runs never overlap: the wait only starts once the previous run has
/// returned.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicTask {
    interval: Duration,
}

impl PeriodicTask {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run `task` until `token` is cancelled and return how many runs happened
    ///
    /// Cancellation interrupts the wait between runs. A run that has already
    /// started is allowed to finish. A panicking run is logged and the loop
    /// carries on with the next tick.
    pub async fn run<F>(&self, token: CancellationToken, task: F) -> usize
    where
        F: Fn() + Send + Sync + 'static,
    {
        let task = Arc::new(task);
        let mut runs = 0usize;

        loop {
            if token.is_cancelled() {
                break;
            }

            let job = Arc::clone(&task);
            if let Err(e) = tokio::task::spawn_blocking(move || job()).await {
                tracing::error!("Sync pass panicked: {}", e);
            }
            runs += 1;

            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        runs
    }
}
