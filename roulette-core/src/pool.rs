//! The waiting pool: participants currently seeking a partner.
//!
//! The pool preserves insertion order for fairness - earlier entrants
//! are tried as primary candidates first. Each entry carries an expiry
//! deadline; expiry is polled by the engine tick rather than by
//! independent timers, which makes timeout-versus-match races
//! impossible under the engine's single lock.

use roulette_types::{EngineError, ParticipantId};
use std::collections::VecDeque;

/// A participant waiting to be paired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingEntry {
    /// The waiting participant.
    pub id: ParticipantId,
    /// Unix millis when the participant was enqueued.
    pub enqueued_at: u64,
    /// Unix millis after which the search expires.
    pub deadline: u64,
    /// Transport reference for the "searching..." notice already shown
    /// to the participant, kept so it can be retracted when the search
    /// resolves.
    pub notice_ref: Option<u64>,
}

/// Insertion-ordered collection of waiting participants.
///
/// Invariant: a participant id appears at most once.
#[derive(Debug, Default, Clone)]
pub struct WaitingPool {
    entries: VecDeque<WaitingEntry>,
}

impl WaitingPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a participant with the given search timeout.
    ///
    /// Fails if the participant is already waiting. The caller is
    /// responsible for rejecting participants that are in a session.
    pub fn enqueue(
        &mut self,
        id: ParticipantId,
        now: u64,
        timeout_ms: u64,
    ) -> Result<(), EngineError> {
        if self.contains(id) {
            return Err(EngineError::AlreadySearching(id));
        }
        self.entries.push_back(WaitingEntry {
            id,
            enqueued_at: now,
            deadline: now.saturating_add(timeout_ms),
            notice_ref: None,
        });
        Ok(())
    }

    /// Remove a participant from the pool.
    ///
    /// Returns the removed entry so the caller can retract its shown
    /// notice. Removing an absent id is `NotSearching` - callers that
    /// only need the silent no-op guard can ignore that error.
    pub fn dequeue(&mut self, id: ParticipantId) -> Result<WaitingEntry, EngineError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(EngineError::NotSearching(id))?;
        self.entries
            .remove(index)
            .ok_or(EngineError::NotSearching(id))
    }

    /// Drain every entry whose deadline has passed, in insertion order.
    pub fn expire(&mut self, now: u64) -> Vec<WaitingEntry> {
        let mut expired = Vec::new();
        let mut remaining = VecDeque::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if entry.deadline <= now {
                expired.push(entry);
            } else {
                remaining.push_back(entry);
            }
        }
        self.entries = remaining;
        expired
    }

    /// Record the transport's reference for the notice shown to a
    /// waiting participant. No-op if the participant already left the
    /// pool.
    pub fn set_notice_ref(&mut self, id: ParticipantId, notice_ref: u64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.notice_ref = Some(notice_ref);
        }
    }

    /// Whether a participant is waiting.
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of waiting participants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Waiting participant ids in insertion order.
    pub fn snapshot(&self) -> Vec<ParticipantId> {
        self.entries.iter().map(|e| e.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(v: i64) -> ParticipantId {
        ParticipantId::new(v)
    }

    #[test]
    fn enqueue_preserves_insertion_order() {
        let mut pool = WaitingPool::new();
        pool.enqueue(id(3), 0, 60_000).unwrap();
        pool.enqueue(id(1), 10, 60_000).unwrap();
        pool.enqueue(id(2), 20, 60_000).unwrap();

        assert_eq!(pool.snapshot(), vec![id(3), id(1), id(2)]);
    }

    #[test]
    fn duplicate_enqueue_rejected() {
        let mut pool = WaitingPool::new();
        pool.enqueue(id(1), 0, 60_000).unwrap();

        assert_eq!(
            pool.enqueue(id(1), 5, 60_000),
            Err(EngineError::AlreadySearching(id(1)))
        );
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn dequeue_removes_only_target() {
        let mut pool = WaitingPool::new();
        pool.enqueue(id(1), 0, 60_000).unwrap();
        pool.enqueue(id(2), 0, 60_000).unwrap();
        pool.enqueue(id(3), 0, 60_000).unwrap();

        let entry = pool.dequeue(id(2)).unwrap();
        assert_eq!(entry.id, id(2));
        assert_eq!(pool.snapshot(), vec![id(1), id(3)]);
    }

    #[test]
    fn dequeue_absent_is_not_searching() {
        let mut pool = WaitingPool::new();
        assert_eq!(pool.dequeue(id(9)), Err(EngineError::NotSearching(id(9))));
    }

    #[test]
    fn expire_drains_overdue_entries() {
        let mut pool = WaitingPool::new();
        pool.enqueue(id(1), 0, 1_000).unwrap();
        pool.enqueue(id(2), 0, 5_000).unwrap();
        pool.enqueue(id(3), 500, 1_000).unwrap();

        let expired = pool.expire(1_500);
        let expired_ids: Vec<_> = expired.iter().map(|e| e.id).collect();
        assert_eq!(expired_ids, vec![id(1), id(3)]);
        assert_eq!(pool.snapshot(), vec![id(2)]);
    }

    #[test]
    fn expire_twice_yields_nothing_second_time() {
        let mut pool = WaitingPool::new();
        pool.enqueue(id(1), 0, 1_000).unwrap();

        assert_eq!(pool.expire(2_000).len(), 1);
        assert!(pool.expire(2_000).is_empty());
    }

    #[test]
    fn one_timeout_does_not_cancel_others() {
        let mut pool = WaitingPool::new();
        pool.enqueue(id(1), 0, 1_000).unwrap();
        pool.enqueue(id(2), 900, 1_000).unwrap();

        // id(1) expires at 1000, id(2) keeps its own deadline of 1900.
        assert_eq!(pool.expire(1_000).len(), 1);
        assert!(pool.contains(id(2)));
        assert_eq!(pool.expire(1_900).len(), 1);
    }

    #[test]
    fn notice_ref_travels_with_entry() {
        let mut pool = WaitingPool::new();
        pool.enqueue(id(1), 0, 60_000).unwrap();
        pool.set_notice_ref(id(1), 777);

        let entry = pool.dequeue(id(1)).unwrap();
        assert_eq!(entry.notice_ref, Some(777));
    }

    #[test]
    fn notice_ref_for_absent_id_is_no_op() {
        let mut pool = WaitingPool::new();
        pool.set_notice_ref(id(1), 777);
        assert!(pool.is_empty());
    }
}
