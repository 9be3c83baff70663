//! The engine facade: one cohesive state object and its state machine.
//!
//! [`EngineCore`] owns the profile store, waiting pool, session table,
//! feedback ledger, and the per-participant state map. Every operation
//! is synchronous, takes the current time as an explicit unix-millis
//! timestamp, and returns the notices the transport should deliver.
//! Nothing here performs I/O; the service crate serializes calls behind
//! a single lock and dispatches notices after each mutation commits.
//!
//! No operation is fatal: invalid input and state conflicts come back
//! as `Notice::Rejected`, operations on state that no longer exists are
//! idempotent no-ops, and the engine stays serviceable afterwards.

use crate::feedback::{FeedbackLedger, RatedParticipant, DEFAULT_REPORT_THRESHOLD};
use crate::matcher;
use crate::pool::WaitingPool;
use crate::profile::ProfileStore;
use crate::session::SessionTable;
use crate::snapshot::{ProfileEntry, RatingEntry, ReportEntry, Snapshot};
use crate::state::ParticipantState;
use roulette_types::{
    Command, EngineError, Notice, ParticipantId, Profile, RejectReason, RelayBody,
};
use serde::Serialize;
use std::collections::HashMap;

/// Default search timeout: 60 seconds.
pub const DEFAULT_SEARCH_TIMEOUT_MS: u64 = 60_000;

/// Read-only aggregate counts for the admin query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// Total known profiles.
    pub profiles: usize,
    /// Active session pairs.
    pub active_sessions: usize,
    /// Participants currently waiting.
    pub waiting: usize,
}

/// The pairing engine state machine.
#[derive(Debug, Clone)]
pub struct EngineCore {
    profiles: ProfileStore,
    pool: WaitingPool,
    sessions: SessionTable,
    feedback: FeedbackLedger,
    states: HashMap<ParticipantId, ParticipantState>,
    search_timeout_ms: u64,
    report_threshold: u32,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_TIMEOUT_MS, DEFAULT_REPORT_THRESHOLD)
    }
}

impl EngineCore {
    /// Create an empty engine with the given search timeout and report
    /// threshold.
    pub fn new(search_timeout_ms: u64, report_threshold: u32) -> Self {
        Self {
            profiles: ProfileStore::new(),
            pool: WaitingPool::new(),
            sessions: SessionTable::new(),
            feedback: FeedbackLedger::new(),
            states: HashMap::new(),
            search_timeout_ms,
            report_threshold,
        }
    }

    /// First contact (or an explicit restart of onboarding).
    ///
    /// Creates the default profile if needed and prompts for a
    /// nickname. Rejected while searching or in a session - those must
    /// be resolved first.
    pub fn contact(&mut self, id: ParticipantId, _now: u64) -> Vec<Notice> {
        let state = self.ensure_known(id);
        match state {
            ParticipantState::Searching | ParticipantState::InSession => {
                vec![rejected(id, RejectReason::NotExpected)]
            }
            _ => {
                self.states.insert(id, ParticipantState::AwaitingNickname);
                vec![Notice::NicknamePrompt { id }]
            }
        }
    }

    /// Text from a participant.
    ///
    /// While awaiting a nickname this is the nickname submission; in a
    /// session it relays to the partner; anywhere else it is a
    /// "not in a chat" no-op.
    pub fn text(&mut self, id: ParticipantId, text: &str, _now: u64) -> Vec<Notice> {
        let state = self.ensure_known(id);
        match state {
            ParticipantState::AwaitingNickname => match self.profiles.set_nickname(id, text) {
                Ok(()) => {
                    self.states.insert(id, ParticipantState::Idle);
                    vec![Notice::NicknameAccepted { id }]
                }
                // Too long / empty: stay in AwaitingNickname.
                Err(err) => vec![rejected(id, reason_for(&err))],
            },
            ParticipantState::InSession => self.relay(id, RelayBody::Text(text.to_string())),
            _ => vec![rejected(id, RejectReason::NotInSession)],
        }
    }

    /// Media from a participant. Relays in a session, no-op otherwise.
    pub fn media(&mut self, id: ParticipantId, media_ref: &str, _now: u64) -> Vec<Notice> {
        let state = self.ensure_known(id);
        match state {
            ParticipantState::InSession => self.relay(id, RelayBody::Media(media_ref.to_string())),
            _ => vec![rejected(id, RejectReason::NotInSession)],
        }
    }

    /// A typed command from a participant.
    pub fn command(&mut self, id: ParticipantId, command: Command, now: u64) -> Vec<Notice> {
        let state = self.ensure_known(id);
        match command {
            Command::Search => match state {
                ParticipantState::Idle => self.begin_search(id, now),
                ParticipantState::Searching => vec![rejected(id, RejectReason::AlreadySearching)],
                ParticipantState::InSession => vec![rejected(id, RejectReason::AlreadyInSession)],
                _ => vec![rejected(id, RejectReason::NotExpected)],
            },
            Command::SearchByGender => match state {
                ParticipantState::Idle => {
                    self.states
                        .insert(id, ParticipantState::AwaitingPreferenceChoice);
                    vec![Notice::PreferencePrompt { id }]
                }
                ParticipantState::Searching => vec![rejected(id, RejectReason::AlreadySearching)],
                ParticipantState::InSession => vec![rejected(id, RejectReason::AlreadyInSession)],
                _ => vec![rejected(id, RejectReason::NotExpected)],
            },
            Command::ChangeNickname => match state {
                ParticipantState::Idle => {
                    self.states.insert(id, ParticipantState::AwaitingNickname);
                    vec![Notice::NicknamePrompt { id }]
                }
                _ => vec![rejected(id, RejectReason::NotExpected)],
            },
            Command::ChangeGender => match state {
                ParticipantState::Idle => {
                    self.states
                        .insert(id, ParticipantState::AwaitingGenderChoice);
                    vec![Notice::GenderPrompt { id }]
                }
                _ => vec![rejected(id, RejectReason::NotExpected)],
            },
            Command::ChooseGender(gender) => match state {
                ParticipantState::AwaitingGenderChoice => {
                    self.profiles.set_gender(id, gender);
                    self.states.insert(id, ParticipantState::Idle);
                    vec![Notice::ProfileUpdated { id }]
                }
                _ => vec![rejected(id, RejectReason::NotExpected)],
            },
            Command::ChoosePreference(preferred) => match state {
                ParticipantState::AwaitingPreferenceChoice => {
                    self.profiles.set_preferred(id, preferred);
                    self.states.insert(id, ParticipantState::Idle);
                    let mut notices = vec![Notice::ProfileUpdated { id }];
                    // Choosing a preference starts the search directly.
                    notices.extend(self.begin_search(id, now));
                    notices
                }
                _ => vec![rejected(id, RejectReason::NotExpected)],
            },
            Command::Cancel => match state {
                ParticipantState::AwaitingNickname
                | ParticipantState::AwaitingGenderChoice
                | ParticipantState::AwaitingPreferenceChoice => {
                    // Cancelling nickname entry keeps whatever nickname
                    // the profile already has (the deterministic default
                    // for a brand-new participant).
                    self.states.insert(id, ParticipantState::Idle);
                    vec![Notice::Cancelled { id }]
                }
                _ => vec![rejected(id, RejectReason::NotExpected)],
            },
            Command::End => match state {
                ParticipantState::InSession => self.end_session(id),
                ParticipantState::Searching => self.stop_search(id),
                _ => vec![rejected(id, RejectReason::NotInSession)],
            },
            Command::Rate { target, score } => match self.feedback.rate(id, target, score) {
                Ok(average) => vec![Notice::RatingAck { id, average }],
                Err(err) => vec![rejected(id, reason_for(&err))],
            },
            Command::Report { target } => {
                let (count, crossed) = self.feedback.report(target, self.report_threshold);
                let mut notices = vec![Notice::ReportAck { id, count }];
                if crossed {
                    notices.push(Notice::PolicyWarning { id: target });
                }
                notices
            }
        }
    }

    /// Periodic tick: expire overdue searches, then attempt one match.
    ///
    /// At most one new session per tick; the pool is re-scanned next
    /// tick.
    pub fn tick(&mut self, now: u64) -> Vec<Notice> {
        let mut notices = Vec::new();
        for entry in self.pool.expire(now) {
            self.states.insert(entry.id, ParticipantState::Idle);
            if let Some(notice_ref) = entry.notice_ref {
                notices.push(Notice::Retract {
                    id: entry.id,
                    notice_ref,
                });
            }
            notices.push(Notice::SearchTimeout { id: entry.id });
        }
        notices.extend(self.run_match());
        notices
    }

    /// Record the transport's reference for the "searching..." notice
    /// shown to a waiting participant. Silent no-op if the search
    /// already resolved.
    pub fn set_search_notice_ref(&mut self, id: ParticipantId, notice_ref: u64) {
        self.pool.set_notice_ref(id, notice_ref);
    }

    /// Build a serializable snapshot of the full engine state.
    pub fn snapshot(&self) -> Snapshot {
        let mut profiles: Vec<ProfileEntry> = self
            .profiles
            .iter()
            .map(|(id, profile)| ProfileEntry {
                id,
                profile: profile.clone(),
            })
            .collect();
        profiles.sort_by_key(|e| e.id);

        let mut ratings: Vec<RatingEntry> = self
            .feedback
            .ratings_iter()
            .map(|(id, aggregate)| RatingEntry { id, aggregate })
            .collect();
        ratings.sort_by_key(|e| e.id);

        let mut reports: Vec<ReportEntry> = self
            .feedback
            .reports_iter()
            .map(|(id, count)| ReportEntry { id, count })
            .collect();
        reports.sort_by_key(|e| e.id);

        Snapshot {
            queue: self.pool.snapshot(),
            sessions: self.sessions.pairs(),
            profiles,
            ratings,
            reports,
        }
    }

    /// Apply a snapshot onto this (fresh) engine.
    ///
    /// Restored waiting entries get fresh deadlines from `now`.
    /// Participants that were mid-prompt when the snapshot was taken
    /// come back as `Idle`. Entries that would violate the pool/session
    /// disjointness invariant are dropped rather than trusted.
    pub fn restore(&mut self, snapshot: Snapshot, now: u64) {
        for entry in snapshot.profiles {
            self.profiles.insert(entry.id, entry.profile);
            self.states.insert(entry.id, ParticipantState::Idle);
        }
        for (a, b) in snapshot.sessions {
            if self.sessions.start(a, b).is_ok() {
                self.profiles.get_or_create(a);
                self.profiles.get_or_create(b);
                self.states.insert(a, ParticipantState::InSession);
                self.states.insert(b, ParticipantState::InSession);
            }
        }
        for id in snapshot.queue {
            if self.sessions.contains(id) {
                continue;
            }
            if self.pool.enqueue(id, now, self.search_timeout_ms).is_ok() {
                self.profiles.get_or_create(id);
                self.states.insert(id, ParticipantState::Searching);
            }
        }
        for entry in snapshot.ratings {
            self.feedback.insert_rating(entry.id, entry.aggregate);
        }
        for entry in snapshot.reports {
            self.feedback.insert_reports(entry.id, entry.count);
        }
    }

    /// Aggregate counts (admin query, read-only).
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            profiles: self.profiles.len(),
            active_sessions: self.sessions.len(),
            waiting: self.pool.len(),
        }
    }

    /// Top-N participants by rating (admin query, read-only).
    pub fn top_rated(&self, n: usize) -> Vec<RatedParticipant> {
        self.feedback.top_rated(n)
    }

    /// Participants at or above the report threshold (admin query,
    /// read-only).
    pub fn flagged(&self) -> Vec<(ParticipantId, u32)> {
        self.feedback.flagged(self.report_threshold)
    }

    /// A participant's current lifecycle state, if known.
    pub fn state_of(&self, id: ParticipantId) -> Option<ParticipantState> {
        self.states.get(&id).copied()
    }

    /// A participant's profile, if known.
    pub fn profile_of(&self, id: ParticipantId) -> Option<&Profile> {
        self.profiles.get(id)
    }

    /// The waiting pool (read-only, for invariant checks and tests).
    pub fn pool(&self) -> &WaitingPool {
        &self.pool
    }

    /// The session table (read-only, for invariant checks and tests).
    pub fn sessions(&self) -> &SessionTable {
        &self.sessions
    }

    // Make sure the participant has a profile and a state.
    fn ensure_known(&mut self, id: ParticipantId) -> ParticipantState {
        self.profiles.get_or_create(id);
        *self
            .states
            .entry(id)
            .or_insert(ParticipantState::AwaitingNickname)
    }

    fn relay(&mut self, from: ParticipantId, body: RelayBody) -> Vec<Notice> {
        match self.sessions.relay(from) {
            Ok(to) => vec![Notice::Relay { to, from, body }],
            Err(_) => vec![rejected(from, RejectReason::NotInSession)],
        }
    }

    fn begin_search(&mut self, id: ParticipantId, now: u64) -> Vec<Notice> {
        if self.sessions.contains(id) {
            return vec![rejected(id, RejectReason::AlreadyInSession)];
        }
        if let Err(err) = self.pool.enqueue(id, now, self.search_timeout_ms) {
            return vec![rejected(id, reason_for(&err))];
        }
        self.states.insert(id, ParticipantState::Searching);
        let mut notices = vec![Notice::SearchStarted {
            id,
            queued: self.pool.len(),
        }];
        // Try to pair immediately instead of waiting for the next tick.
        // Same scan, same tie-break order.
        notices.extend(self.run_match());
        notices
    }

    fn stop_search(&mut self, id: ParticipantId) -> Vec<Notice> {
        match self.pool.dequeue(id) {
            Ok(entry) => {
                self.states.insert(id, ParticipantState::Idle);
                let mut notices = Vec::new();
                if let Some(notice_ref) = entry.notice_ref {
                    notices.push(Notice::Retract { id, notice_ref });
                }
                notices.push(Notice::SearchStopped { id });
                notices
            }
            Err(_) => vec![rejected(id, RejectReason::NotSearching)],
        }
    }

    fn end_session(&mut self, id: ParticipantId) -> Vec<Notice> {
        match self.sessions.end(id) {
            Ok(partner) => {
                self.states.insert(id, ParticipantState::Idle);
                self.states.insert(partner, ParticipantState::Idle);
                vec![
                    Notice::PartnerLeft { id: partner },
                    Notice::FeedbackPrompt { id, about: partner },
                    Notice::FeedbackPrompt {
                        id: partner,
                        about: id,
                    },
                ]
            }
            Err(_) => vec![rejected(id, RejectReason::NotInSession)],
        }
    }

    // One matcher pass: first compatible pair in insertion order wins.
    // Pool removal, session creation, and state updates commit within
    // this single call; no tick can observe a half-created session.
    fn run_match(&mut self) -> Vec<Notice> {
        let order = self.pool.snapshot();
        let Some((a, b)) = matcher::find_pair(&order, &self.profiles) else {
            return Vec::new();
        };

        if self.sessions.start(a, b).is_err() {
            // Unreachable while pool and session membership stay
            // disjoint; dropping the match keeps state consistent.
            return Vec::new();
        }
        let entry_a = self.pool.dequeue(a);
        let entry_b = self.pool.dequeue(b);
        self.states.insert(a, ParticipantState::InSession);
        self.states.insert(b, ParticipantState::InSession);

        let mut notices = Vec::new();
        for entry in [entry_a, entry_b].into_iter().flatten() {
            if let Some(notice_ref) = entry.notice_ref {
                notices.push(Notice::Retract {
                    id: entry.id,
                    notice_ref,
                });
            }
        }
        notices.push(Notice::Paired { a, b });
        notices
    }
}

fn rejected(id: ParticipantId, reason: RejectReason) -> Notice {
    Notice::Rejected { id, reason }
}

fn reason_for(err: &EngineError) -> RejectReason {
    match err {
        EngineError::NicknameLength { .. } => RejectReason::NicknameLength,
        EngineError::ScoreOutOfRange(_) => RejectReason::ScoreOutOfRange,
        EngineError::AlreadySearching(_) => RejectReason::AlreadySearching,
        EngineError::AlreadyInSession(_) | EngineError::SelfPairing(_) => {
            RejectReason::AlreadyInSession
        }
        EngineError::NotSearching(_) => RejectReason::NotSearching,
        EngineError::NoSession(_) => RejectReason::NotInSession,
    }
}
