//! Rolled dice and their signed sum.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Die;

/// One rolled die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// Die that was rolled.
    pub die: Die,
    /// Face shown, from 1 to `die.sides()`.
    pub value: u32,
    /// Whether the die is subtracted (`10-1d4`).
    #[serde(default)]
    pub negative: bool,
}

impl DieResult {
    /// The face value with its sign applied.
    pub fn signed(&self) -> i64 {
        let value = i64::from(self.value);
        if self.negative { -value } else { value }
    }
}

/// Every die rolled for a formula, in formula order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Individual dice.
    pub dice: Vec<DieResult>,
}

impl RollResult {
    /// Roll `count` dice and append them.
    pub fn roll<R: Rng>(&mut self, rng: &mut R, die: Die, count: u32, negative: bool) {
        self.dice.extend((0..count).map(|_| DieResult {
            die,
            value: rng.random_range(1..=die.sides()),
            negative,
        }));
    }

    /// Signed sum of the dice. Widened so large pools cannot overflow.
    pub fn total(&self) -> i64 {
        self.dice.iter().map(DieResult::signed).sum()
    }

    /// Number of dice rolled.
    pub fn count(&self) -> usize {
        self.dice.len()
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.dice.iter().map(|d| d.signed().to_string()).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total())
    }
}
