//! # roulette-core
//!
//! Pure logic for the roulette pairing engine (no I/O, instant tests).
//!
//! This crate implements the waiting pool, the matcher, the session
//! table, the feedback ledger, and the engine facade state machine
//! without any network, disk, or clock access.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input (including
//! the current time as an explicit timestamp) and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about state transitions
//!
//! The actual I/O (timers, persistence, notice delivery) is performed
//! by `roulette-engine`, which owns an [`EngineCore`] behind a single
//! lock and delivers the [`Notice`](roulette_types::Notice) values
//! these methods return.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod feedback;
pub mod matcher;
pub mod pool;
pub mod profile;
pub mod session;
pub mod snapshot;
pub mod state;

pub use engine::{EngineCore, EngineStats, DEFAULT_SEARCH_TIMEOUT_MS};
pub use feedback::{FeedbackLedger, RatedParticipant, RatingAggregate, DEFAULT_REPORT_THRESHOLD};
pub use matcher::find_pair;
pub use pool::{WaitingEntry, WaitingPool};
pub use profile::ProfileStore;
pub use session::SessionTable;
pub use snapshot::Snapshot;
pub use state::ParticipantState;
