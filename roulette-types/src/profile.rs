//! Participant profiles and matching attributes.

use crate::ParticipantId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum nickname length in characters (not bytes).
pub const NICKNAME_MAX_CHARS: usize = 20;

/// A participant's declared gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    /// Declared male.
    Male,
    /// Declared female.
    Female,
    /// No gender declared (the initial value).
    #[default]
    Unspecified,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Unspecified => write!(f, "unspecified"),
        }
    }
}

/// The gender a participant wants their partner to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GenderPref {
    /// Only match partners who declared male.
    Male,
    /// Only match partners who declared female.
    Female,
    /// Match anyone, including partners with no declared gender.
    #[default]
    Any,
}

impl GenderPref {
    /// Whether a partner with the given declared gender satisfies this
    /// preference.
    ///
    /// `Any` accepts every declared gender including `Unspecified`. A
    /// specific preference only accepts an exact declaration, so it
    /// never accepts `Unspecified`.
    pub fn accepts(&self, gender: Gender) -> bool {
        match self {
            GenderPref::Any => true,
            GenderPref::Male => gender == Gender::Male,
            GenderPref::Female => gender == Gender::Female,
        }
    }
}

impl fmt::Display for GenderPref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderPref::Male => write!(f, "male"),
            GenderPref::Female => write!(f, "female"),
            GenderPref::Any => write!(f, "any"),
        }
    }
}

/// A participant's profile: the attributes the matcher reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name shown to partners (1..=20 characters).
    pub nickname: String,
    /// Declared gender.
    pub gender: Gender,
    /// Desired partner gender.
    pub preferred: GenderPref,
}

impl Profile {
    /// Default profile for a brand-new participant.
    ///
    /// The pseudonym is derived deterministically from the id so two
    /// different ids rarely collide; uniqueness is cosmetic, not a
    /// correctness requirement.
    pub fn default_for(id: ParticipantId) -> Self {
        Self {
            nickname: format!("Anon_{}", id.value().rem_euclid(1000)),
            gender: Gender::Unspecified,
            preferred: GenderPref::Any,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_accepts_everything() {
        assert!(GenderPref::Any.accepts(Gender::Male));
        assert!(GenderPref::Any.accepts(Gender::Female));
        assert!(GenderPref::Any.accepts(Gender::Unspecified));
    }

    #[test]
    fn specific_pref_requires_exact_declaration() {
        assert!(GenderPref::Male.accepts(Gender::Male));
        assert!(!GenderPref::Male.accepts(Gender::Female));
        assert!(!GenderPref::Male.accepts(Gender::Unspecified));

        assert!(GenderPref::Female.accepts(Gender::Female));
        assert!(!GenderPref::Female.accepts(Gender::Male));
        assert!(!GenderPref::Female.accepts(Gender::Unspecified));
    }

    #[test]
    fn default_profile_is_anonymous() {
        let profile = Profile::default_for(ParticipantId::new(4321));
        assert_eq!(profile.nickname, "Anon_321");
        assert_eq!(profile.gender, Gender::Unspecified);
        assert_eq!(profile.preferred, GenderPref::Any);
    }

    #[test]
    fn default_pseudonym_handles_negative_ids() {
        let profile = Profile::default_for(ParticipantId::new(-1));
        assert_eq!(profile.nickname, "Anon_999");
    }

    #[test]
    fn profile_roundtrip() {
        let profile = Profile {
            nickname: "night owl".into(),
            gender: Gender::Female,
            preferred: GenderPref::Male,
        };

        let json = serde_json::to_string(&profile).unwrap();
        let restored: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, profile);
    }
}
