//! Typed commands accepted by the engine.
//!
//! Commands are decoded once at the transport boundary (button
//! callbacks, slash commands, whatever the transport speaks) and
//! validated before they reach the core. The engine never parses
//! strings.

use crate::{Gender, GenderPref, ParticipantId};
use serde::{Deserialize, Serialize};

/// A command issued by a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Start searching for any compatible partner.
    Search,
    /// Ask to pick a partner-gender preference before searching.
    SearchByGender,
    /// Ask to change the nickname (next text input is the new one).
    ChangeNickname,
    /// Ask to change the declared gender.
    ChangeGender,
    /// A gender choice made from the gender menu.
    ChooseGender(Gender),
    /// A preference choice made from the search-by-gender menu.
    /// Accepting this choice starts a search immediately.
    ChoosePreference(GenderPref),
    /// Cancel the pending nickname/gender/preference prompt.
    Cancel,
    /// End the active chat, or stop an ongoing search.
    End,
    /// Rate a former partner after a chat ended.
    Rate {
        /// The participant being rated.
        target: ParticipantId,
        /// Star score, 1..=5.
        score: u8,
    },
    /// Report a former partner for abuse.
    Report {
        /// The participant being reported.
        target: ParticipantId,
    },
}
