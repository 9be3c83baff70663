//! The feedback ledger: ratings and abuse reports.
//!
//! Two independent aggregates keyed by the rated/reported participant.
//! Both persist indefinitely with no decay, and survive the participant
//! leaving. Repeated ratings from the same rater are accepted without
//! deduplication, matching the behavior of the system this replaces.

use roulette_types::{EngineError, ParticipantId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Report count at which a policy warning is issued.
pub const DEFAULT_REPORT_THRESHOLD: u32 = 3;

/// Running star-rating aggregate for one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RatingAggregate {
    /// Sum of all received scores.
    pub sum: u64,
    /// Number of received scores.
    pub count: u64,
}

impl RatingAggregate {
    /// Running mean rounded to one decimal place (display convention).
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = self.sum as f64 / self.count as f64;
        (mean * 10.0).round() / 10.0
    }
}

/// A participant with their rating summary (admin query result).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedParticipant {
    /// The rated participant.
    pub id: ParticipantId,
    /// Average score, rounded to one decimal.
    pub average: f64,
    /// Number of ratings received.
    pub count: u64,
}

/// Aggregated ratings and report counts per participant.
#[derive(Debug, Default, Clone)]
pub struct FeedbackLedger {
    ratings: HashMap<ParticipantId, RatingAggregate>,
    reports: HashMap<ParticipantId, u32>,
}

impl FeedbackLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a star rating for `target` and return the new average.
    ///
    /// The rater is informational only; repeated ratings from the same
    /// rater all count.
    pub fn rate(
        &mut self,
        _rater: ParticipantId,
        target: ParticipantId,
        score: u8,
    ) -> Result<f64, EngineError> {
        if !(1..=5).contains(&score) {
            return Err(EngineError::ScoreOutOfRange(score));
        }
        let aggregate = self.ratings.entry(target).or_default();
        aggregate.sum += u64::from(score);
        aggregate.count += 1;
        Ok(aggregate.average())
    }

    /// Record an abuse report against `target`.
    ///
    /// Returns the new count and whether this report crossed the
    /// threshold. The crossing flag is true exactly once, on the report
    /// that moves the count from `threshold - 1` to `threshold`;
    /// subsequent reports keep counting but never re-fire it.
    pub fn report(&mut self, target: ParticipantId, threshold: u32) -> (u32, bool) {
        let count = self.reports.entry(target).or_insert(0);
        *count += 1;
        (*count, *count == threshold)
    }

    /// Rating aggregate for a participant, if any ratings exist.
    pub fn rating(&self, id: ParticipantId) -> Option<RatingAggregate> {
        self.ratings.get(&id).copied()
    }

    /// Report count for a participant.
    pub fn report_count(&self, id: ParticipantId) -> u32 {
        self.reports.get(&id).copied().unwrap_or(0)
    }

    /// The `n` best-rated participants, highest average first; ties
    /// break toward more ratings, then smaller id for determinism.
    pub fn top_rated(&self, n: usize) -> Vec<RatedParticipant> {
        let mut rated: Vec<RatedParticipant> = self
            .ratings
            .iter()
            .map(|(id, agg)| RatedParticipant {
                id: *id,
                average: agg.average(),
                count: agg.count,
            })
            .collect();
        rated.sort_by(|a, b| {
            b.average
                .partial_cmp(&a.average)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.count.cmp(&a.count))
                .then(a.id.cmp(&b.id))
        });
        rated.truncate(n);
        rated
    }

    /// Participants at or above the report threshold, most reported
    /// first.
    pub fn flagged(&self, threshold: u32) -> Vec<(ParticipantId, u32)> {
        let mut flagged: Vec<_> = self
            .reports
            .iter()
            .filter(|(_, count)| **count >= threshold)
            .map(|(id, count)| (*id, *count))
            .collect();
        flagged.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        flagged
    }

    /// Iterate over all rating aggregates (snapshot building).
    pub fn ratings_iter(&self) -> impl Iterator<Item = (ParticipantId, RatingAggregate)> + '_ {
        self.ratings.iter().map(|(id, agg)| (*id, *agg))
    }

    /// Iterate over all report counts (snapshot building).
    pub fn reports_iter(&self) -> impl Iterator<Item = (ParticipantId, u32)> + '_ {
        self.reports.iter().map(|(id, count)| (*id, *count))
    }

    /// Insert a rating aggregate verbatim (snapshot restore).
    pub fn insert_rating(&mut self, id: ParticipantId, aggregate: RatingAggregate) {
        self.ratings.insert(id, aggregate);
    }

    /// Insert a report count verbatim (snapshot restore).
    pub fn insert_reports(&mut self, id: ParticipantId, count: u32) {
        self.reports.insert(id, count);
    }
}
