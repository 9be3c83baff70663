//! Error types for the pairing engine.

use crate::{ParticipantId, NICKNAME_MAX_CHARS};
use thiserror::Error;

/// Errors produced by engine components.
///
/// Three categories, none of them fatal to the engine:
/// - validation errors are reported back to the originating participant;
/// - state conflicts become user-facing no-op messages;
/// - not-found means the operation is already resolved and is treated
///   as an idempotent no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Nickname outside the allowed length range.
    #[error("nickname must be 1-{NICKNAME_MAX_CHARS} characters, got {len}")]
    NicknameLength {
        /// Length of the rejected nickname, in characters.
        len: usize,
    },

    /// Rating score outside 1..=5.
    #[error("score must be 1-5, got {0}")]
    ScoreOutOfRange(u8),

    /// Participant is already waiting in the pool.
    #[error("participant {0} is already searching")]
    AlreadySearching(ParticipantId),

    /// Participant is already in an active session.
    #[error("participant {0} is already in a session")]
    AlreadyInSession(ParticipantId),

    /// Participant is not in the waiting pool.
    #[error("participant {0} is not searching")]
    NotSearching(ParticipantId),

    /// Participant has no active session.
    #[error("participant {0} has no active session")]
    NoSession(ParticipantId),

    /// A participant cannot be paired with itself.
    #[error("cannot pair participant {0} with itself")]
    SelfPairing(ParticipantId),
}

impl EngineError {
    /// Whether this error is a validation failure (bad input, retryable
    /// by the participant).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::NicknameLength { .. } | EngineError::ScoreOutOfRange(_)
        )
    }

    /// Whether this error means the operation targets state that no
    /// longer exists and can be treated as already resolved.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::NotSearching(_) | EngineError::NoSession(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EngineError::ScoreOutOfRange(9);
        assert_eq!(err.to_string(), "score must be 1-5, got 9");

        let err = EngineError::NoSession(ParticipantId::new(7));
        assert_eq!(err.to_string(), "participant 7 has no active session");
    }

    #[test]
    fn categories() {
        assert!(EngineError::NicknameLength { len: 30 }.is_validation());
        assert!(EngineError::ScoreOutOfRange(0).is_validation());
        assert!(!EngineError::AlreadySearching(ParticipantId::new(1)).is_validation());

        assert!(EngineError::NoSession(ParticipantId::new(1)).is_not_found());
        assert!(EngineError::NotSearching(ParticipantId::new(1)).is_not_found());
        assert!(!EngineError::AlreadyInSession(ParticipantId::new(1)).is_not_found());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }
}
