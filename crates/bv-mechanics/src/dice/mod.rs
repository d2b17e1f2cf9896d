//! Dice, formulas, and rolled results.
//!
//! A roll starts life as formula text (`1d20+5`), is parsed into a
//! structured [`Formula`], edited (modifiers appended, trailing bonus
//! replaced or stripped), and its dice terms are finally rolled into a
//! [`RollResult`].

pub mod formula;
pub mod roll;

pub use formula::{Formula, Term};
pub use roll::{DieResult, RollResult};

use serde::{Deserialize, Serialize};

/// A die, identified by its number of sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Die(u32);

impl Die {
    /// The check die.
    pub const D20: Self = Self(20);
    /// Common damage die.
    pub const D6: Self = Self(6);
    /// Common damage die.
    pub const D8: Self = Self(8);
    /// Common damage die.
    pub const D4: Self = Self(4);

    /// Most faces a die may have; any face fits in an `i32`.
    pub const MAX_SIDES: u32 = i32::MAX.unsigned_abs();

    /// A die with `sides` faces. Needs at least two and at most
    /// [`Die::MAX_SIDES`].
    pub fn new(sides: u32) -> Option<Self> {
        (2..=Self::MAX_SIDES).contains(&sides).then_some(Self(sides))
    }

    /// Number of faces.
    pub fn sides(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Die {
    type Error = String;

    fn try_from(sides: u32) -> Result<Self, Self::Error> {
        Self::new(sides).ok_or_else(|| format!("a die cannot have {sides} sides"))
    }
}

impl From<Die> for u32 {
    fn from(die: Die) -> Self {
        die.0
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_two_sides() {
        assert_eq!(Die::new(20), Some(Die::D20));
        assert_eq!(Die::new(3).map(Die::sides), Some(3));
        assert_eq!(Die::new(1), None);
        assert_eq!(Die::new(0), None);
        assert_eq!(Die::new(Die::MAX_SIDES).map(Die::sides), Some(Die::MAX_SIDES));
        assert_eq!(Die::new(4_000_000_000), None);
    }

    #[test]
    fn deserialize_checks_sides() {
        assert_eq!(serde_json::from_str::<Die>("20").unwrap(), Die::D20);
        assert!(serde_json::from_str::<Die>("0").is_err());
        assert!(serde_json::from_str::<Die>("4000000000").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Die::D20.to_string(), "d20");
        assert_eq!(Die::new(30).unwrap().to_string(), "d30");
    }
}
