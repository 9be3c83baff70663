//! Notices emitted by the engine for the transport to deliver.
//!
//! The engine never talks to participants directly. Every state
//! mutation produces zero or more notices; the transport layer turns
//! them into actual messages, menus, and deletions. Dispatch happens
//! after the mutation is committed, so a notice always describes state
//! that really exists.

use crate::ParticipantId;
use serde::{Deserialize, Serialize};

/// Opaque session payload relayed between partners.
///
/// The engine does not inspect content; text and media references are
/// indistinguishable at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayBody {
    /// A text message.
    Text(String),
    /// A transport-level reference to media (photo, audio, ...).
    Media(String),
}

/// Why an operation was rejected as a user-facing no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Submitted nickname is empty or too long.
    NicknameLength,
    /// Rating score outside 1..=5.
    ScoreOutOfRange,
    /// Participant is already waiting in the pool.
    AlreadySearching,
    /// Participant is already in an active chat.
    AlreadyInSession,
    /// Participant asked to stop a search that is not running.
    NotSearching,
    /// Content or a session operation arrived outside a session.
    NotInSession,
    /// The command is not valid in the participant's current state.
    NotExpected,
}

/// A single notice addressed to one or two participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notice {
    /// Two participants were paired into a session.
    Paired {
        /// The earlier-enqueued side of the new pair.
        a: ParticipantId,
        /// The other side.
        b: ParticipantId,
    },
    /// The participant's partner ended the chat or disconnected.
    PartnerLeft {
        /// The participant left behind.
        id: ParticipantId,
    },
    /// A search expired with no partner found.
    SearchTimeout {
        /// The participant whose search timed out.
        id: ParticipantId,
    },
    /// The participant crossed the abuse-report threshold. Fired
    /// exactly once, on the report that crosses it.
    PolicyWarning {
        /// The reported participant.
        id: ParticipantId,
    },
    /// Acknowledge a rating; carries the target's new average.
    RatingAck {
        /// The rater.
        id: ParticipantId,
        /// The target's new running average, rounded to one decimal.
        average: f64,
    },
    /// Acknowledge a report; carries the target's new report count.
    ReportAck {
        /// The reporter.
        id: ParticipantId,
        /// The target's new report count.
        count: u32,
    },
    /// Forward session content to the partner.
    Relay {
        /// Recipient.
        to: ParticipantId,
        /// Author.
        from: ParticipantId,
        /// The payload to forward.
        body: RelayBody,
    },
    /// Ask the participant to rate the partner they just chatted with.
    FeedbackPrompt {
        /// The participant being prompted.
        id: ParticipantId,
        /// The former partner to rate or report.
        about: ParticipantId,
    },
    /// Ask the participant to enter a nickname.
    NicknamePrompt {
        /// The participant being prompted.
        id: ParticipantId,
    },
    /// The submitted nickname was accepted.
    NicknameAccepted {
        /// The participant whose nickname was set.
        id: ParticipantId,
    },
    /// Ask the participant to choose their gender.
    GenderPrompt {
        /// The participant being prompted.
        id: ParticipantId,
    },
    /// Ask the participant to choose a partner-gender preference.
    PreferencePrompt {
        /// The participant being prompted.
        id: ParticipantId,
    },
    /// A profile attribute (gender or preference) was updated.
    ProfileUpdated {
        /// The participant whose profile changed.
        id: ParticipantId,
    },
    /// A search was enqueued.
    SearchStarted {
        /// The participant now searching.
        id: ParticipantId,
        /// Pool size after enqueueing, shown to the user.
        queued: usize,
    },
    /// A search was stopped on request.
    SearchStopped {
        /// The participant who stopped searching.
        id: ParticipantId,
    },
    /// A pending prompt was cancelled.
    Cancelled {
        /// The participant who cancelled.
        id: ParticipantId,
    },
    /// The transport should retract a previously shown notice (the
    /// "searching..." message once the search resolves).
    Retract {
        /// The participant the notice was shown to.
        id: ParticipantId,
        /// The transport's reference for the shown notice.
        notice_ref: u64,
    },
    /// An operation was rejected as a no-op.
    Rejected {
        /// The participant whose operation was rejected.
        id: ParticipantId,
        /// Why it was rejected.
        reason: RejectReason,
    },
}

impl Notice {
    /// The primary recipient of this notice.
    ///
    /// `Paired` addresses both sides; by convention this returns the
    /// earlier-enqueued one and the transport notifies both.
    pub fn recipient(&self) -> ParticipantId {
        match self {
            Notice::Paired { a, .. } => *a,
            Notice::PartnerLeft { id }
            | Notice::SearchTimeout { id }
            | Notice::PolicyWarning { id }
            | Notice::RatingAck { id, .. }
            | Notice::ReportAck { id, .. }
            | Notice::FeedbackPrompt { id, .. }
            | Notice::NicknamePrompt { id }
            | Notice::NicknameAccepted { id }
            | Notice::GenderPrompt { id }
            | Notice::PreferencePrompt { id }
            | Notice::ProfileUpdated { id }
            | Notice::SearchStarted { id, .. }
            | Notice::SearchStopped { id }
            | Notice::Cancelled { id }
            | Notice::Retract { id, .. }
            | Notice::Rejected { id, .. } => *id,
            Notice::Relay { to, .. } => *to,
        }
    }
}
