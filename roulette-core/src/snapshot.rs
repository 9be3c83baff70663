//! The persisted snapshot record.
//!
//! A serializable copy of everything the engine would need after a
//! restart: the queue order, active session pairs, all profiles, and
//! all feedback aggregates. The format is an implementation detail,
//! not a wire contract; entries are kept sorted by id so equal engine
//! states produce equal snapshots.

use crate::feedback::RatingAggregate;
use roulette_types::{ParticipantId, Profile};
use serde::{Deserialize, Serialize};

/// One participant's stored profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEntry {
    /// The participant.
    pub id: ParticipantId,
    /// Their profile.
    pub profile: Profile,
}

/// One participant's rating aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEntry {
    /// The rated participant.
    pub id: ParticipantId,
    /// Their running aggregate.
    pub aggregate: RatingAggregate,
}

/// One participant's report count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// The reported participant.
    pub id: ParticipantId,
    /// Their report count.
    pub count: u32,
}

/// A serializable record of the full engine state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Waiting pool ids in insertion order.
    pub queue: Vec<ParticipantId>,
    /// Active session pairs, each reported once.
    pub sessions: Vec<(ParticipantId, ParticipantId)>,
    /// All profiles, sorted by id.
    pub profiles: Vec<ProfileEntry>,
    /// All rating aggregates, sorted by id.
    pub ratings: Vec<RatingEntry>,
    /// All report counts, sorted by id.
    pub reports: Vec<ReportEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use roulette_types::{Gender, GenderPref};

    #[test]
    fn snapshot_json_roundtrip() {
        let snapshot = Snapshot {
            queue: vec![ParticipantId::new(5)],
            sessions: vec![(ParticipantId::new(1), ParticipantId::new(2))],
            profiles: vec![ProfileEntry {
                id: ParticipantId::new(1),
                profile: Profile {
                    nickname: "kestrel".into(),
                    gender: Gender::Female,
                    preferred: GenderPref::Any,
                },
            }],
            ratings: vec![RatingEntry {
                id: ParticipantId::new(2),
                aggregate: RatingAggregate { sum: 12, count: 3 },
            }],
            reports: vec![ReportEntry {
                id: ParticipantId::new(2),
                count: 1,
            }],
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn empty_snapshot_is_default() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"queue":[],"sessions":[],"profiles":[],"ratings":[],"reports":[]}"#,
        )
        .unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }
}
