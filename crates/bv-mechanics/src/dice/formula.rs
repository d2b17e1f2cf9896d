//! Structured dice formulas.
//!
//! A formula is an ordered list of signed terms: dice (`2d6`), flat
//! modifiers (`+3`), and references into the character's abilities
//! (`@abilities.agi.mod`). Edits such as appending a modifier or replacing
//! the trailing bonus operate on terms, never on raw text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Die;
use crate::error::{MechError, MechResult};
use crate::sheet::{Abilities, AbilityCode};

/// Most dice a single term may roll.
pub const MAX_DICE: u32 = 1000;

/// A single signed term in a formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// `count` dice of type `die`, added or subtracted.
    Dice {
        /// Number of dice rolled.
        count: u32,
        /// Die type.
        die: Die,
        /// Whether the rolled total is subtracted.
        negative: bool,
    },
    /// A flat modifier carrying its own sign.
    Flat(i32),
    /// A reference to an ability field, substituted before rolling.
    Ref {
        /// Reference path without the leading `@`.
        path: String,
        /// Whether the resolved value is subtracted.
        negative: bool,
    },
}

/// A parsed dice formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    terms: Vec<Term>,
}

impl Formula {
    /// Parse formula text such as `1d20+5` or `2d6-@abilities.str.mod`.
    pub fn parse(text: &str) -> MechResult<Self> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(MechError::MalformedFormula("empty formula".to_string()));
        }

        let mut terms = Vec::new();
        let mut negative = false;
        let mut chunk = String::new();

        for (i, c) in compact.char_indices() {
            if c == '+' || c == '-' {
                if i > 0 {
                    terms.push(parse_term(&chunk, negative, &compact)?);
                    chunk.clear();
                }
                negative = c == '-';
            } else {
                chunk.push(c);
            }
        }
        terms.push(parse_term(&chunk, negative, &compact)?);

        Ok(Self { terms })
    }

    /// The terms of this formula, in order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Append a flat modifier. Negative values join with their own `-`,
    /// everything else with an explicit `+`.
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.terms.push(Term::Flat(modifier));
        self
    }

    /// The trailing flat modifier, if the formula ends in one.
    pub fn trailing_modifier(&self) -> Option<i32> {
        match self.terms.last() {
            Some(Term::Flat(n)) => Some(*n),
            _ => None,
        }
    }

    /// Remove the trailing flat modifier.
    ///
    /// Fails when the formula does not end in a flat modifier, or when the
    /// modifier is its only term.
    pub fn strip_trailing_modifier(mut self) -> MechResult<Self> {
        if self.terms.len() < 2 || self.trailing_modifier().is_none() {
            return Err(MechError::MalformedFormula(format!(
                "'{self}' has no trailing modifier to remove"
            )));
        }
        self.terms.pop();
        Ok(self)
    }

    /// Replace the trailing flat modifier with `penalty`.
    pub fn untrained(self, penalty: i32) -> MechResult<Self> {
        Ok(self.strip_trailing_modifier()?.with_modifier(penalty))
    }

    /// Substitute every `@abilities.<code>.<value|mod>` reference with a flat term.
    pub fn resolve_refs(self, abilities: &Abilities) -> MechResult<Self> {
        let terms = self
            .terms
            .into_iter()
            .map(|term| match term {
                Term::Ref { path, negative } => {
                    let value = lookup_ability(&path, abilities)?;
                    let value = if negative { value.checked_neg() } else { Some(value) };
                    value.map(Term::Flat).ok_or_else(|| {
                        MechError::MalformedFormula(format!("-@{path} is out of range"))
                    })
                }
                other => Ok(other),
            })
            .collect::<MechResult<Vec<_>>>()?;
        Ok(Self { terms })
    }
}

impl FromStr for Formula {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            match term {
                Term::Dice {
                    count,
                    die,
                    negative,
                } => {
                    write_sign(f, i, *negative)?;
                    write!(f, "{count}{die}")?;
                }
                Term::Flat(n) => {
                    if *n < 0 {
                        write!(f, "{n}")?;
                    } else {
                        write_sign(f, i, false)?;
                        write!(f, "{n}")?;
                    }
                }
                Term::Ref { path, negative } => {
                    write_sign(f, i, *negative)?;
                    write!(f, "@{path}")?;
                }
            }
        }
        Ok(())
    }
}

fn write_sign(f: &mut fmt::Formatter<'_>, index: usize, negative: bool) -> fmt::Result {
    if negative {
        write!(f, "-")
    } else if index > 0 {
        write!(f, "+")
    } else {
        Ok(())
    }
}

fn parse_term(chunk: &str, negative: bool, whole: &str) -> MechResult<Term> {
    let malformed = || MechError::MalformedFormula(format!("'{whole}'"));

    if chunk.is_empty() {
        return Err(malformed());
    }

    if let Some(path) = chunk.strip_prefix('@') {
        if path.is_empty() {
            return Err(malformed());
        }
        return Ok(Term::Ref {
            path: path.to_string(),
            negative,
        });
    }

    if let Some((count, sides)) = chunk.split_once(['d', 'D']) {
        let count = if count.is_empty() {
            1
        } else {
            count.parse::<u32>().map_err(|_| malformed())?
        };
        if count > MAX_DICE {
            return Err(MechError::MalformedFormula(format!(
                "'{whole}' rolls more than {MAX_DICE} dice"
            )));
        }
        let die = sides
            .parse::<u32>()
            .ok()
            .and_then(Die::new)
            .ok_or_else(malformed)?;
        return Ok(Term::Dice {
            count,
            die,
            negative,
        });
    }

    let value = chunk.parse::<i32>().map_err(|_| malformed())?;
    Ok(Term::Flat(if negative { -value } else { value }))
}

fn lookup_ability(path: &str, abilities: &Abilities) -> MechResult<i32> {
    let unresolved = || MechError::UnresolvedReference(path.to_string());

    let mut parts = path.split('.');
    let (Some("abilities"), Some(code), Some(field), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(unresolved());
    };

    let code = AbilityCode::from_code(code).ok_or_else(unresolved)?;
    let score = abilities.get(code);
    match field {
        "mod" => Ok(score.modifier),
        "value" => Ok(score.value),
        _ => Err(unresolved()),
    }
}
