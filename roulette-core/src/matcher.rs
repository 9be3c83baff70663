//! The matcher: greedy compatible-pair search over the waiting pool.
//!
//! The scan is deliberately simple: a double loop over the pool in
//! insertion order, first satisfying pair wins, at most one pair per
//! call. Repeated ticks plus the insertion-order anchor give eventual
//! fairness. This is *not* maximum-cardinality matching and must not be
//! upgraded to it - that would change the observable pairing order.

use crate::profile::ProfileStore;
use roulette_types::ParticipantId;

/// Whether two participants mutually satisfy each other's preference.
///
/// Compatibility is symmetric and evaluated on both sides
/// independently: each side's preference must accept the other's
/// declared gender (or be `Any`).
pub fn compatible(store: &ProfileStore, a: ParticipantId, b: ParticipantId) -> bool {
    if a == b {
        return false;
    }
    let (pa, pb) = match (store.get(a), store.get(b)) {
        (Some(pa), Some(pb)) => (pa, pb),
        // No profile means no declared attributes to satisfy; only
        // `Any` on the other side could match, and we cannot know this
        // side's own preference. Treat as incompatible.
        _ => return false,
    };
    pa.preferred.accepts(pb.gender) && pb.preferred.accepts(pa.gender)
}

/// Find the first mutually-compatible pair in the pool order.
///
/// `order` is the pool snapshot in insertion order. The outer index
/// ascends first, so the earliest-enqueued participant is the tie-break
/// anchor; among its candidates the earliest-enqueued compatible
/// partner wins. Returns at most one pair; the pool is re-scanned on
/// the next tick.
pub fn find_pair(
    order: &[ParticipantId],
    store: &ProfileStore,
) -> Option<(ParticipantId, ParticipantId)> {
    if order.len() < 2 {
        return None;
    }

    for (i, &a) in order.iter().enumerate() {
        for &b in &order[i + 1..] {
            if compatible(store, a, b) {
                return Some((a, b));
            }
        }
    }
    None
}
