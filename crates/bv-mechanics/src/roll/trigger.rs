//! Roll triggers: what the user clicked, decoded into a closed set of actions.
//!
//! Sheets encode an action as a label such as `SKILL_Stealth` or `agi`.
//! The label is decoded exactly once, here; the resolver only ever sees
//! an [`Action`].

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use crate::sheet::AbilityCode;

/// The kind of roll requested, with the data each kind needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// A skill check; the user picks which ability backs it.
    Skill {
        /// Skill display name.
        name: String,
    },
    /// A weapon attack rolled as-is.
    Attack {
        /// Weapon display name.
        name: String,
    },
    /// A damage roll, optionally adding Strength.
    Damage {
        /// Weapon display name.
        name: String,
    },
    /// Invoking a void method.
    Method {
        /// Display name in the form `<category> - <method>`.
        display_name: String,
    },
    /// Announcing a random phenomenon's table. Never rolls dice.
    Phenomenon {
        /// Phenomenon display name.
        name: String,
        /// Table text to announce.
        table: String,
    },
    /// A raw ability roll with a choice of check type.
    Ability(AbilityCode),
}

impl Action {
    /// Decode a sheet label.
    ///
    /// Category markers are searched in the order `SKILL`, `ATTACK`,
    /// `DAMAGE`, `METHOD`, `PHENOMENON`; the first one found wins and the
    /// display name is the second `_`-separated segment. Otherwise the
    /// label must be exactly an ability code.
    pub fn from_label(label: &str, table: Option<&str>) -> MechResult<Self> {
        if label.contains("SKILL") {
            return Ok(Self::Skill {
                name: label_name(label)?,
            });
        }
        if label.contains("ATTACK") {
            return Ok(Self::Attack {
                name: label_name(label)?,
            });
        }
        if label.contains("DAMAGE") {
            return Ok(Self::Damage {
                name: label_name(label)?,
            });
        }
        if label.contains("METHOD") {
            return Ok(Self::Method {
                display_name: label_name(label)?,
            });
        }
        if label.contains("PHENOMENON") {
            let name = label_name(label)?;
            let table = table.ok_or_else(|| {
                MechError::InvalidTrigger(format!("phenomenon '{name}' has no table text"))
            })?;
            return Ok(Self::Phenomenon {
                name,
                table: table.to_string(),
            });
        }

        AbilityCode::from_code(label)
            .map(Self::Ability)
            .ok_or_else(|| MechError::InvalidTrigger(format!("unrecognised label '{label}'")))
    }

    /// Short category name for logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Skill { .. } => "skill",
            Self::Attack { .. } => "attack",
            Self::Damage { .. } => "damage",
            Self::Method { .. } => "method",
            Self::Phenomenon { .. } => "phenomenon",
            Self::Ability(_) => "ability",
        }
    }
}

/// A single user-initiated roll request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollTrigger {
    /// Formula template, e.g. `1d20+@abilities.agi.mod`.
    pub formula: String,
    /// What kind of roll this is.
    pub action: Action,
}

impl RollTrigger {
    /// Create a trigger from an already-decoded action.
    pub fn new(formula: impl Into<String>, action: Action) -> Self {
        Self {
            formula: formula.into(),
            action,
        }
    }

    /// Create a trigger from a sheet label. `table` is only read by
    /// phenomenon labels.
    pub fn from_label(
        label: &str,
        formula: impl Into<String>,
        table: Option<&str>,
    ) -> MechResult<Self> {
        Ok(Self::new(formula, Action::from_label(label, table)?))
    }
}

fn label_name(label: &str) -> MechResult<String> {
    match label.split('_').nth(1) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(MechError::InvalidTrigger(format!(
            "label '{label}' has no display name"
        ))),
    }
}
