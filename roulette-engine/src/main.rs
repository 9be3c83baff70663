//! roulette-engine binary entry point.
//!
//! Usage:
//! ```bash
//! roulette-engine --config roulette.toml
//! ```
//!
//! Runs the pairing service with its matcher and persistence tasks.
//! Without a transport adapter attached, emitted notices are drained to
//! the log; the process exits cleanly on Ctrl-C after a final snapshot
//! flush.

use anyhow::Context;
use roulette_engine::{tasks, Config, Engine};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = get_config_path();
    let config = if config_path.exists() {
        Config::from_file(&config_path)
            .with_context(|| format!("loading config from {}", config_path.display()))?
    } else {
        tracing::info!(
            "no config file at {}, using defaults",
            config_path.display()
        );
        Config::default()
    };

    let (engine, mut notices) = Engine::new(config);
    engine
        .restore_from_disk()
        .await
        .context("restoring snapshot")?;

    let matcher = tasks::spawn_matcher_task(engine.clone(), engine.config().matcher.clone());
    let persistence =
        tasks::spawn_persistence_task(engine.clone(), engine.config().persistence.clone());

    // No transport attached: log notices as they are produced.
    let drain = tokio::spawn(async move {
        while let Some(notice) = notices.recv().await {
            tracing::info!(?notice, "notice");
        }
    });

    tracing::info!("roulette-engine v{} running", env!("CARGO_PKG_VERSION"));
    tokio::signal::ctrl_c().await.context("waiting for ctrl-c")?;
    tracing::info!("shutting down");

    matcher.abort();
    persistence.abort();
    drain.abort();

    engine.flush().await.context("final snapshot flush")?;
    Ok(())
}

fn get_config_path() -> PathBuf {
    std::env::args()
        .skip_while(|arg| arg != "--config")
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("roulette.toml"))
}
