//! Identity types for the pairing engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for a participant.
///
/// The value is opaque to the engine. The transport layer decides what
/// it means (the reference transport uses its numeric chat user id) and
/// guarantees uniqueness. Ids are never recycled: ratings and reports
/// keyed by an id survive after the participant leaves.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(i64);

impl ParticipantId {
    /// Create a ParticipantId from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value of this ParticipantId.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParticipantId({})", self.0)
    }
}

impl From<i64> for ParticipantId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_roundtrip() {
        let id = ParticipantId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(ParticipantId::from(42), id);
    }

    #[test]
    fn id_serializes_transparently() {
        let id = ParticipantId::new(1234);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "1234");

        let restored: ParticipantId = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, id);
    }

    #[test]
    fn id_ordering() {
        assert!(ParticipantId::new(1) < ParticipantId::new(2));
    }

    #[test]
    fn id_display() {
        assert_eq!(ParticipantId::new(-7).to_string(), "-7");
    }
}
