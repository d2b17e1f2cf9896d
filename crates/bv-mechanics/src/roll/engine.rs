//! The randomness engine: turns a resolved formula into a number.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::RollConfig;
use crate::dice::{Formula, RollResult, Term};
use crate::error::{MechError, MechResult};

/// The dice behind a roll and its final total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Every die rolled, in formula order.
    pub dice: RollResult,
    /// Dice and flat modifiers summed with their signs.
    pub total: i32,
}

/// Evaluates formulas. Each call is an independent random draw.
pub trait DiceEngine {
    /// Roll a formula. References must already be resolved.
    fn evaluate(&mut self, formula: &Formula) -> MechResult<Evaluation>;
}

/// A dice engine backed by a seeded standard RNG.
#[derive(Debug, Clone)]
pub struct SeededEngine {
    rng: StdRng,
}

impl SeededEngine {
    /// Create an engine from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create an engine from roll configuration.
    pub fn from_config(config: &RollConfig) -> Self {
        Self::new(config.seed)
    }
}

impl DiceEngine for SeededEngine {
    fn evaluate(&mut self, formula: &Formula) -> MechResult<Evaluation> {
        let mut evaluation = Evaluation::default();
        let mut flat: i64 = 0;

        for term in formula.terms() {
            match term {
                Term::Dice {
                    count,
                    die,
                    negative,
                } => evaluation.dice.roll(&mut self.rng, *die, *count, *negative),
                Term::Flat(n) => flat += i64::from(*n),
                Term::Ref { path, .. } => {
                    return Err(MechError::UnresolvedReference(path.clone()));
                }
            }
        }

        evaluation.total = evaluation
            .dice
            .total()
            .checked_add(flat)
            .and_then(|total| i32::try_from(total).ok())
            .ok_or_else(|| {
                MechError::MalformedFormula(format!("'{formula}' total is out of range"))
            })?;
        Ok(evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_stay_in_range() {
        let mut engine = SeededEngine::new(7);
        let formula = Formula::parse("2d6+3").unwrap();
        for _ in 0..50 {
            let eval = engine.evaluate(&formula).unwrap();
            assert_eq!(eval.dice.count(), 2);
            assert!((5..=15).contains(&eval.total));
            assert_eq!(i64::from(eval.total), eval.dice.total() + 3);
        }
    }

    #[test]
    fn huge_dice_stay_positive() {
        let mut engine = SeededEngine::new(5);
        let formula = Formula::parse("1d2147483647").unwrap();
        for _ in 0..50 {
            assert!(engine.evaluate(&formula).unwrap().total >= 1);
        }
    }

    #[test]
    fn out_of_range_total_is_malformed() {
        let mut engine = SeededEngine::new(5);
        for text in ["1d20+2147483647", "2147483647+2147483647", "-2147483647-2d20"] {
            let formula = Formula::parse(text).unwrap();
            assert!(
                matches!(engine.evaluate(&formula), Err(MechError::MalformedFormula(_))),
                "{text} should overflow"
            );
        }
    }

    #[test]
    fn large_pool_sums() {
        let formula = Formula::parse("1000d6").unwrap();
        let eval = SeededEngine::new(5).evaluate(&formula).unwrap();
        assert_eq!(eval.dice.count(), 1000);
        assert!((1000..=6000).contains(&eval.total));
    }

    #[test]
    fn negative_dice_subtract() {
        let mut engine = SeededEngine::new(7);
        let formula = Formula::parse("10-1d4").unwrap();
        let eval = engine.evaluate(&formula).unwrap();
        assert!((6..=9).contains(&eval.total));
    }

    #[test]
    fn flat_only_formula() {
        let mut engine = SeededEngine::new(1);
        let eval = engine.evaluate(&Formula::parse("4-6").unwrap()).unwrap();
        assert_eq!(eval.total, -2);
        assert_eq!(eval.dice.count(), 0);
    }

    #[test]
    fn same_seed_same_rolls() {
        let formula = Formula::parse("3d20").unwrap();
        let a = SeededEngine::new(99).evaluate(&formula).unwrap();
        let b = SeededEngine::from_config(&RollConfig::default().with_seed(99))
            .evaluate(&formula)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unresolved_refs_are_rejected() {
        let formula = Formula::parse("1d20+@abilities.agi.mod").unwrap();
        assert!(matches!(
            SeededEngine::new(1).evaluate(&formula),
            Err(MechError::UnresolvedReference(_))
        ));
    }
}
