//! Main Engine service coordination.
//!
//! The `Engine` wraps the synchronous core behind a single async mutex
//! and an outbound notice channel. Every entry point follows the same
//! shape: lock, mutate, unlock, then dispatch the notices the mutation
//! produced. Because all mutation happens under the one lock, matching,
//! timeouts, and commands can never interleave halfway.

use crate::config::Config;
use crate::error::Result;
use crate::persistence;
use roulette_core::{EngineCore, EngineStats, RatedParticipant, Snapshot};
use roulette_types::{Command, Notice, ParticipantId};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::{mpsc, Mutex};

/// Current unix time in milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// The async pairing service.
///
/// Cheap to clone; clones share the same engine state and notice
/// channel.
#[derive(Debug, Clone)]
pub struct Engine {
    core: Arc<Mutex<EngineCore>>,
    config: Arc<Config>,
    outbox: mpsc::UnboundedSender<Notice>,
}

impl Engine {
    /// Create an engine from config, returning it together with the
    /// receiving end of the notice channel.
    pub fn new(config: Config) -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let core = EngineCore::new(config.search_timeout_ms(), config.feedback.report_threshold);
        let (outbox, notices) = mpsc::unbounded_channel();
        (
            Self {
                core: Arc::new(Mutex::new(core)),
                config: Arc::new(config),
                outbox,
            },
            notices,
        )
    }

    /// The service configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// First contact from a participant.
    pub async fn contact(&self, id: ParticipantId) {
        let notices = self.core.lock().await.contact(id, now_millis());
        self.dispatch(notices);
    }

    /// A typed command from a participant.
    pub async fn command(&self, id: ParticipantId, command: Command) {
        tracing::debug!(%id, ?command, "command received");
        let notices = self.core.lock().await.command(id, command, now_millis());
        self.dispatch(notices);
    }

    /// Free text from a participant (nickname submission or session
    /// content, depending on their state).
    pub async fn text(&self, id: ParticipantId, text: &str) {
        let notices = self.core.lock().await.text(id, text, now_millis());
        self.dispatch(notices);
    }

    /// An opaque media reference from a participant.
    pub async fn media(&self, id: ParticipantId, media_ref: &str) {
        let notices = self.core.lock().await.media(id, media_ref, now_millis());
        self.dispatch(notices);
    }

    /// Record the transport reference for a shown "searching..." notice
    /// so it can be retracted later.
    pub async fn set_search_notice_ref(&self, id: ParticipantId, notice_ref: u64) {
        self.core
            .lock()
            .await
            .set_search_notice_ref(id, notice_ref);
    }

    /// One matcher tick: expire overdue searches, attempt one match.
    pub async fn tick(&self) {
        let notices = self.core.lock().await.tick(now_millis());
        if !notices.is_empty() {
            tracing::debug!(count = notices.len(), "tick produced notices");
        }
        self.dispatch(notices);
    }

    /// Aggregate counts (admin query).
    pub async fn stats(&self) -> EngineStats {
        self.core.lock().await.stats()
    }

    /// Top-N participants by rating (admin query).
    pub async fn top_rated(&self, n: usize) -> Vec<RatedParticipant> {
        self.core.lock().await.top_rated(n)
    }

    /// Participants at or above the report threshold (admin query).
    pub async fn flagged(&self) -> Vec<(ParticipantId, u32)> {
        self.core.lock().await.flagged()
    }

    /// Snapshot the full engine state.
    pub async fn snapshot(&self) -> Snapshot {
        self.core.lock().await.snapshot()
    }

    /// Flush the current state to the configured snapshot file.
    pub async fn flush(&self) -> Result<()> {
        let snapshot = self.snapshot().await;
        persistence::save(&self.config.persistence.path, &snapshot).await
    }

    /// Load the snapshot file (if any) and restore it into the engine.
    ///
    /// Meant for startup, before any traffic; restored waiting entries
    /// get fresh search deadlines. A missing or unreadable snapshot is
    /// a fresh start, not a startup failure.
    pub async fn restore_from_disk(&self) -> Result<bool> {
        let loaded = match persistence::load(&self.config.persistence.path).await {
            Ok(loaded) => loaded,
            Err(crate::error::ServiceError::Serialization(e)) => {
                tracing::error!(
                    path = %self.config.persistence.path.display(),
                    "corrupt snapshot ignored, starting fresh: {}",
                    e
                );
                return Ok(false);
            }
            Err(e) => return Err(e),
        };
        match loaded {
            Some(snapshot) => {
                let mut core = self.core.lock().await;
                core.restore(snapshot, now_millis());
                let stats = core.stats();
                tracing::info!(
                    profiles = stats.profiles,
                    sessions = stats.active_sessions,
                    waiting = stats.waiting,
                    "state restored from snapshot"
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn dispatch(&self, notices: Vec<Notice>) {
        for notice in notices {
            // Send fails only if the receiver is gone (shutdown).
            if self.outbox.send(notice).is_err() {
                tracing::warn!("notice receiver dropped, discarding notice");
                return;
            }
        }
    }
}
