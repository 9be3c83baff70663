//! Background tasks: the matcher tick and the periodic snapshot flush.

use crate::config::{MatcherConfig, PersistenceConfig};
use crate::service::Engine;
use std::time::Duration;
use tokio::time::interval;

/// Spawn the matcher tick task.
///
/// Drives timeout expiry and pairing at the configured interval.
/// Returns a handle that can be used to abort the task.
pub fn spawn_matcher_task(engine: Engine, config: MatcherConfig) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let interval_secs = config.tick_interval_secs;
        tracing::info!("Matcher task started (interval: {}s)", interval_secs);

        let mut timer = interval(Duration::from_secs(interval_secs));

        loop {
            timer.tick().await;
            engine.tick().await;
        }
    })
}

/// Spawn the periodic snapshot flush task.
///
/// Returns a handle that can be used to abort the task.
pub fn spawn_persistence_task(
    engine: Engine,
    config: PersistenceConfig,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if !config.enabled {
            tracing::info!("Persistence task disabled");
            return;
        }

        let interval_secs = config.flush_interval_secs;
        tracing::info!(
            "Persistence task started (interval: {}s, path: {})",
            interval_secs,
            config.path.display()
        );

        let mut timer = interval(Duration::from_secs(interval_secs));

        loop {
            timer.tick().await;

            match engine.flush().await {
                Ok(()) => tracing::debug!("snapshot flushed"),
                Err(e) => tracing::error!("snapshot flush error: {}", e),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn persistence_task_disabled() {
        let (engine, _notices) = Engine::new(Config::default());
        let config = PersistenceConfig {
            enabled: false,
            ..PersistenceConfig::default()
        };

        let handle = spawn_persistence_task(engine, config);

        // Task should complete immediately when disabled
        tokio::time::timeout(Duration::from_millis(100), handle)
            .await
            .expect("Task should complete when disabled")
            .expect("Task should not panic");
    }

    #[tokio::test]
    async fn persistence_task_writes_the_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.persistence.path = dir.path().join("state.json");
        config.persistence.flush_interval_secs = 1;

        let (engine, _notices) = Engine::new(config.clone());
        let handle = spawn_persistence_task(engine, config.persistence.clone());

        // First interval tick fires immediately.
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();

        assert!(config.persistence.path.exists());
    }

    #[tokio::test]
    async fn matcher_task_keeps_ticking() {
        let (engine, _notices) = Engine::new(Config::default());
        let handle = spawn_matcher_task(
            engine.clone(),
            MatcherConfig {
                tick_interval_secs: 1,
                search_timeout_secs: 60,
            },
        );

        // Nothing queued; ticks are silent no-ops and the task stays up.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!handle.is_finished());
        handle.abort();
    }
}
