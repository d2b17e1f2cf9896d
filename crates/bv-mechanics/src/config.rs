//! Configuration for roll resolution.

/// Penalty applied to untrained skill checks under the standard rules.
pub const DEFAULT_UNTRAINED_PENALTY: i32 = -3;

/// Configuration for a [`RollResolver`](crate::roll::RollResolver).
#[derive(Debug, Clone)]
pub struct RollConfig {
    /// RNG seed for reproducible rolls.
    pub seed: u64,
    /// Flat modifier that replaces the trained bonus on untrained checks.
    pub untrained_penalty: i32,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            untrained_penalty: DEFAULT_UNTRAINED_PENALTY,
        }
    }
}

impl RollConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the untrained penalty. Positive values are negated.
    pub fn with_untrained_penalty(mut self, penalty: i32) -> Self {
        self.untrained_penalty = -penalty.saturating_abs();
        self
    }
}
