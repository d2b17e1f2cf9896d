//! Ability scores and their three-letter codes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One of the eight character abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityCode {
    /// Agility.
    Agi,
    /// Awareness.
    Awa,
    /// Stamina.
    Sta,
    /// Strength.
    Str,
    /// Willpower.
    Wil,
    /// Presence.
    Pre,
    /// Persuasion.
    Per,
    /// Intellect.
    Int,
}

impl AbilityCode {
    /// Every ability, in sheet order.
    pub const ALL: [Self; 8] = [
        Self::Agi,
        Self::Awa,
        Self::Sta,
        Self::Str,
        Self::Wil,
        Self::Pre,
        Self::Per,
        Self::Int,
    ];

    /// The three-letter code used in labels and formula references.
    pub fn code(self) -> &'static str {
        match self {
            Self::Agi => "agi",
            Self::Awa => "awa",
            Self::Sta => "sta",
            Self::Str => "str",
            Self::Wil => "wil",
            Self::Pre => "pre",
            Self::Per => "per",
            Self::Int => "int",
        }
    }

    /// The English display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Agi => "Agility",
            Self::Awa => "Awareness",
            Self::Sta => "Stamina",
            Self::Str => "Strength",
            Self::Wil => "Willpower",
            Self::Pre => "Presence",
            Self::Per => "Persuasion",
            Self::Int => "Intellect",
        }
    }

    /// Parse an exact three-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.code() == code)
    }
}

impl std::fmt::Display for AbilityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A raw ability value and its modifier.
///
/// The modifier comes from an external rule and is taken as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScore {
    /// Raw score.
    #[serde(default)]
    pub value: i32,
    /// Modifier added to rolls.
    #[serde(default, rename = "mod")]
    pub modifier: i32,
}

impl AbilityScore {
    /// Create a score with the given value and modifier.
    pub fn new(value: i32, modifier: i32) -> Self {
        Self { value, modifier }
    }
}

/// A character's ability scores. Missing abilities read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Abilities(BTreeMap<AbilityCode, AbilityScore>);

impl Abilities {
    /// Get a score, defaulting to zero value and modifier.
    pub fn get(&self, code: AbilityCode) -> AbilityScore {
        self.0.get(&code).copied().unwrap_or_default()
    }

    /// Shorthand for an ability's modifier.
    pub fn modifier(&self, code: AbilityCode) -> i32 {
        self.get(code).modifier
    }

    /// Set a score.
    pub fn set(&mut self, code: AbilityCode, score: AbilityScore) {
        self.0.insert(code, score);
    }

    /// Builder form of [`Abilities::set`].
    pub fn with(mut self, code: AbilityCode, value: i32, modifier: i32) -> Self {
        self.set(code, AbilityScore::new(value, modifier));
        self
    }
}
