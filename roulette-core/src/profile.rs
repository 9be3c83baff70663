//! Profile storage.
//!
//! Profiles are created on first contact with deterministic defaults
//! and mutated by explicit edit operations. They are never deleted:
//! ratings and reports must stay attributable after a participant
//! leaves.

use roulette_types::{EngineError, Gender, GenderPref, ParticipantId, Profile, NICKNAME_MAX_CHARS};
use std::collections::HashMap;

/// In-memory store of participant profiles.
#[derive(Debug, Default, Clone)]
pub struct ProfileStore {
    profiles: HashMap<ParticipantId, Profile>,
}

impl ProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a participant's profile, creating the default one if this is
    /// the first contact.
    pub fn get_or_create(&mut self, id: ParticipantId) -> &Profile {
        self.profiles
            .entry(id)
            .or_insert_with(|| Profile::default_for(id))
    }

    /// Look up a profile without creating it.
    pub fn get(&self, id: ParticipantId) -> Option<&Profile> {
        self.profiles.get(&id)
    }

    /// Set a participant's nickname.
    ///
    /// The nickname is trimmed and must be 1..=20 characters after
    /// trimming.
    pub fn set_nickname(&mut self, id: ParticipantId, nickname: &str) -> Result<(), EngineError> {
        let trimmed = nickname.trim();
        let len = trimmed.chars().count();
        if len == 0 || len > NICKNAME_MAX_CHARS {
            return Err(EngineError::NicknameLength { len });
        }

        let profile = self
            .profiles
            .entry(id)
            .or_insert_with(|| Profile::default_for(id));
        profile.nickname = trimmed.to_string();
        Ok(())
    }

    /// Set a participant's declared gender.
    pub fn set_gender(&mut self, id: ParticipantId, gender: Gender) {
        self.profiles
            .entry(id)
            .or_insert_with(|| Profile::default_for(id))
            .gender = gender;
    }

    /// Set a participant's partner-gender preference.
    pub fn set_preferred(&mut self, id: ParticipantId, preferred: GenderPref) {
        self.profiles
            .entry(id)
            .or_insert_with(|| Profile::default_for(id))
            .preferred = preferred;
    }

    /// Insert a profile verbatim (snapshot restore).
    pub fn insert(&mut self, id: ParticipantId, profile: Profile) {
        self.profiles.insert(id, profile);
    }

    /// Whether a profile exists for this id.
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.profiles.contains_key(&id)
    }

    /// Number of stored profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Iterate over all profiles (snapshot building, admin queries).
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, &Profile)> {
        self.profiles.iter().map(|(id, p)| (*id, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(v: i64) -> ParticipantId {
        ParticipantId::new(v)
    }

    #[test]
    fn first_contact_creates_default() {
        let mut store = ProfileStore::new();
        let profile = store.get_or_create(id(42));

        assert_eq!(profile.nickname, "Anon_42");
        assert_eq!(profile.gender, Gender::Unspecified);
        assert_eq!(profile.preferred, GenderPref::Any);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_or_create_is_idempotent() {
        let mut store = ProfileStore::new();
        store.set_nickname(id(1), "kestrel").unwrap();
        let profile = store.get_or_create(id(1));

        assert_eq!(profile.nickname, "kestrel");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn nickname_is_trimmed() {
        let mut store = ProfileStore::new();
        store.set_nickname(id(1), "  kestrel  ").unwrap();
        assert_eq!(store.get(id(1)).unwrap().nickname, "kestrel");
    }

    #[test]
    fn nickname_too_long_rejected() {
        let mut store = ProfileStore::new();
        let result = store.set_nickname(id(1), &"x".repeat(21));
        assert_eq!(result, Err(EngineError::NicknameLength { len: 21 }));
        // Rejected input creates nothing.
        assert!(store.get(id(1)).is_none());
    }

    #[test]
    fn nickname_exactly_twenty_chars_accepted() {
        let mut store = ProfileStore::new();
        store.set_nickname(id(1), &"x".repeat(20)).unwrap();
        assert_eq!(store.get(id(1)).unwrap().nickname.len(), 20);
    }

    #[test]
    fn empty_nickname_rejected() {
        let mut store = ProfileStore::new();
        assert_eq!(
            store.set_nickname(id(1), "   "),
            Err(EngineError::NicknameLength { len: 0 })
        );
    }

    #[test]
    fn nickname_length_counts_chars_not_bytes() {
        let mut store = ProfileStore::new();
        // 20 multi-byte characters, far more than 20 bytes.
        let name = "я".repeat(20);
        store.set_nickname(id(1), &name).unwrap();
        assert_eq!(store.get(id(1)).unwrap().nickname, name);
    }

    #[test]
    fn gender_edits_apply() {
        let mut store = ProfileStore::new();
        store.set_gender(id(1), Gender::Female);
        store.set_preferred(id(1), GenderPref::Male);

        let profile = store.get(id(1)).unwrap();
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.preferred, GenderPref::Male);
        // Nickname keeps the default.
        assert_eq!(profile.nickname, "Anon_1");
    }
}
