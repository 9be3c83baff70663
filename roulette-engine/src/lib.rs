//! # roulette-engine
//!
//! Async anonymous-pairing service.
//!
//! This crate wraps the pure [`roulette_core`] engine in a runnable
//! service that:
//! - Serializes all state changes behind a single async lock
//! - Emits delivery-ready notices over an outbound channel
//! - Drives timeout expiry and matching from a periodic tick task
//! - Flushes a JSON snapshot of the full state to disk
//!
//! ## Architecture
//!
//! ```text
//! Transport ──commands/text──►┌──────────────────┐
//!                             │      Engine      │
//!      ◄───────notices────────│  Mutex<Core>     │
//!                             └───┬──────────┬───┘
//!                          tick task    flush task
//!                                           │
//!                                    roulette.json
//! ```
//!
//! The transport adapter (outward delivery, identity mapping) is out of
//! scope; anything that can feed participant input in and drain the
//! notice channel can drive the service.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod persistence;
pub mod service;
pub mod tasks;

pub use config::{Config, ConfigError};
pub use error::{Result, ServiceError};
pub use service::Engine;
