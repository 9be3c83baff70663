//! The session table: active paired conversations.
//!
//! A session is an unordered pair `{A, B}` stored as two symmetric
//! directed entries `A→B` and `B→A`, so lookup by either side is O(1).
//! Invariant: if `A→B` exists then `B→A` exists and no third entry
//! references A or B.

use roulette_types::{EngineError, ParticipantId};
use std::collections::HashMap;

/// Bidirectional mapping of paired participants.
#[derive(Debug, Default, Clone)]
pub struct SessionTable {
    partners: HashMap<ParticipantId, ParticipantId>,
}

impl SessionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session between two participants.
    ///
    /// Inserts both directed entries atomically. Fails if either side
    /// already has a session, or if both sides are the same id.
    pub fn start(&mut self, a: ParticipantId, b: ParticipantId) -> Result<(), EngineError> {
        if a == b {
            return Err(EngineError::SelfPairing(a));
        }
        if self.partners.contains_key(&a) {
            return Err(EngineError::AlreadyInSession(a));
        }
        if self.partners.contains_key(&b) {
            return Err(EngineError::AlreadyInSession(b));
        }
        self.partners.insert(a, b);
        self.partners.insert(b, a);
        Ok(())
    }

    /// Look up a participant's partner.
    pub fn partner_of(&self, id: ParticipantId) -> Option<ParticipantId> {
        self.partners.get(&id).copied()
    }

    /// Resolve the relay target for session content.
    ///
    /// Content itself is opaque to the engine; the caller forwards the
    /// payload to the returned partner id.
    pub fn relay(&self, from: ParticipantId) -> Result<ParticipantId, EngineError> {
        self.partner_of(from).ok_or(EngineError::NoSession(from))
    }

    /// End a participant's session.
    ///
    /// Removes both directed entries atomically and returns the partner
    /// id so the caller can notify both sides. Ending is idempotent
    /// from the other side's perspective: once A ends, `end(B)` is
    /// `NoSession`, not a second closure.
    pub fn end(&mut self, id: ParticipantId) -> Result<ParticipantId, EngineError> {
        let partner = self
            .partners
            .remove(&id)
            .ok_or(EngineError::NoSession(id))?;
        self.partners.remove(&partner);
        Ok(partner)
    }

    /// Whether a participant is in a session.
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.partners.contains_key(&id)
    }

    /// Number of active sessions (pairs, not directed entries).
    pub fn len(&self) -> usize {
        self.partners.len() / 2
    }

    /// Whether there are no active sessions.
    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    /// All active pairs, each reported once with the smaller id first.
    pub fn pairs(&self) -> Vec<(ParticipantId, ParticipantId)> {
        let mut pairs: Vec<_> = self
            .partners
            .iter()
            .filter(|(a, b)| a < b)
            .map(|(a, b)| (*a, *b))
            .collect();
        pairs.sort();
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(v: i64) -> ParticipantId {
        ParticipantId::new(v)
    }

    #[test]
    fn start_creates_symmetric_entries() {
        let mut table = SessionTable::new();
        table.start(id(1), id(2)).unwrap();

        assert_eq!(table.partner_of(id(1)), Some(id(2)));
        assert_eq!(table.partner_of(id(2)), Some(id(1)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn start_rejects_busy_participants() {
        let mut table = SessionTable::new();
        table.start(id(1), id(2)).unwrap();

        assert_eq!(
            table.start(id(1), id(3)),
            Err(EngineError::AlreadyInSession(id(1)))
        );
        assert_eq!(
            table.start(id(3), id(2)),
            Err(EngineError::AlreadyInSession(id(2)))
        );
        // The failed starts changed nothing.
        assert_eq!(table.len(), 1);
        assert_eq!(table.partner_of(id(3)), None);
    }

    #[test]
    fn start_rejects_self_pairing() {
        let mut table = SessionTable::new();
        assert_eq!(table.start(id(1), id(1)), Err(EngineError::SelfPairing(id(1))));
        assert!(table.is_empty());
    }

    #[test]
    fn relay_resolves_partner() {
        let mut table = SessionTable::new();
        table.start(id(1), id(2)).unwrap();

        assert_eq!(table.relay(id(1)), Ok(id(2)));
        assert_eq!(table.relay(id(2)), Ok(id(1)));
        assert_eq!(table.relay(id(3)), Err(EngineError::NoSession(id(3))));
    }

    #[test]
    fn end_removes_both_sides() {
        let mut table = SessionTable::new();
        table.start(id(1), id(2)).unwrap();

        assert_eq!(table.end(id(1)), Ok(id(2)));
        assert!(table.is_empty());
        assert_eq!(table.partner_of(id(2)), None);
    }

    #[test]
    fn end_is_idempotent_for_the_other_side() {
        let mut table = SessionTable::new();
        table.start(id(1), id(2)).unwrap();

        table.end(id(1)).unwrap();
        // The partner ending afterwards finds nothing to close.
        assert_eq!(table.end(id(2)), Err(EngineError::NoSession(id(2))));
        assert_eq!(table.end(id(1)), Err(EngineError::NoSession(id(1))));
    }

    #[test]
    fn pairs_reports_each_session_once() {
        let mut table = SessionTable::new();
        table.start(id(4), id(3)).unwrap();
        table.start(id(1), id(2)).unwrap();

        assert_eq!(table.pairs(), vec![(id(1), id(2)), (id(3), id(4))]);
    }
}
