use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use treemirror::commands::daemon;
use treemirror::config::Cli;
use treemirror::logging::{self, LogConfig};
use treemirror::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::try_from(cli)?;

    logging::init(LogConfig {
        log_file: config.log_file.as_deref(),
        debug: config.debug,
    })
    .context("Failed to initialize logging")?;

    tracing::debug!("treemirror v{}", treemirror::VERSION);

    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        return Err(e).context("Invalid source or destination");
    }

    if config.once {
        let config = config.clone();
        let report = tokio::task::spawn_blocking(move || daemon::run_once(&config)).await??;
        if report.is_partial() {
            anyhow::bail!(
                "Sync pass completed with {} failure(s)",
                report.execution.failed_actions
            );
        }
        return Ok(());
    }

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
            shutdown.cancel();
        }
    });

    daemon::run(config, token).await;
    Ok(())
}
