//! # roulette-types
//!
//! Shared types for the roulette anonymous pairing engine.
//!
//! This crate provides the foundational types used across all roulette
//! crates:
//! - [`ParticipantId`] - Opaque participant identity
//! - [`Gender`], [`GenderPref`], [`Profile`] - Matching attributes
//! - [`Command`] - Typed commands decoded at the transport boundary
//! - [`Notice`], [`RelayBody`] - Events the engine emits for delivery
//! - [`EngineError`] - Error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

mod command;
mod error;
mod ids;
mod notice;
mod profile;

pub use command::Command;
pub use error::EngineError;
pub use ids::ParticipantId;
pub use notice::{Notice, RejectReason, RelayBody};
pub use profile::{Gender, GenderPref, Profile, NICKNAME_MAX_CHARS};
