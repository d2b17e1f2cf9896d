//! Character sheet mechanics for the Black Void tabletop ruleset.
//!
//! Provides the character sheet model (abilities and possessed items),
//! derivation of defence, speed, hit point and sanity maxima and tab
//! flags, structured dice formulas, and contextual roll resolution that
//! asks the user to disambiguate when an action needs it.

pub mod config;
pub mod derive;
pub mod dice;
pub mod error;
pub mod roll;
pub mod sheet;

pub use config::RollConfig;
pub use derive::{DerivedStats, SheetFlags, SizeProfile, derive};
pub use dice::{Die, Formula, RollResult};
pub use error::{MechError, MechResult};
pub use roll::{
    Action, ChatLog, ChatMessage, ChatSink, ChoiceHost, ChoicePrompt, DiceEngine, Resolution,
    RollOutcome, RollResolver, RollTrigger, ScriptedHost, SeededEngine,
};
pub use sheet::{Abilities, AbilityCode, AbilityScore, CharacterSheet, Item, ItemId, ItemKind};
