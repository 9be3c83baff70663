//! Per-participant lifecycle states.
//!
//! Exactly one state per known participant at any time. The engine
//! facade keeps the waiting pool and session table consistent with
//! these states: `Searching` if and only if the participant is in the
//! pool, `InSession` if and only if the session table has an entry.
//!
//! The machine is cyclic for the lifetime of the participant; there is
//! no terminal state.

use serde::{Deserialize, Serialize};

/// Onboarding and operational states of one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipantState {
    /// Waiting for a nickname (first contact, or an explicit change).
    AwaitingNickname,
    /// At the main menu, free to search or edit the profile.
    Idle,
    /// Waiting for a gender choice from the gender menu.
    AwaitingGenderChoice,
    /// Waiting for a partner-preference choice before searching.
    AwaitingPreferenceChoice,
    /// Enqueued in the waiting pool.
    Searching,
    /// Paired in an active session.
    InSession,
}

impl ParticipantState {
    /// Whether the participant is waiting in the pool.
    pub fn is_searching(&self) -> bool {
        matches!(self, ParticipantState::Searching)
    }

    /// Whether the participant is in an active session.
    pub fn is_in_session(&self) -> bool {
        matches!(self, ParticipantState::InSession)
    }

    /// Whether the participant is mid-prompt (nickname, gender, or
    /// preference input expected next).
    pub fn is_awaiting_input(&self) -> bool {
        matches!(
            self,
            ParticipantState::AwaitingNickname
                | ParticipantState::AwaitingGenderChoice
                | ParticipantState::AwaitingPreferenceChoice
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_partition_the_states() {
        assert!(ParticipantState::Searching.is_searching());
        assert!(ParticipantState::InSession.is_in_session());
        assert!(ParticipantState::AwaitingNickname.is_awaiting_input());
        assert!(ParticipantState::AwaitingGenderChoice.is_awaiting_input());
        assert!(ParticipantState::AwaitingPreferenceChoice.is_awaiting_input());

        assert!(!ParticipantState::Idle.is_searching());
        assert!(!ParticipantState::Idle.is_in_session());
        assert!(!ParticipantState::Idle.is_awaiting_input());
    }
}
