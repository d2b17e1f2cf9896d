//! Character sheets: ability scores, possessed items, and rolled pools.
//!
//! A [`CharacterSheet`] is the snapshot every derivation and roll reads
//! from. Derived statistics are never stored here; see [`crate::derive`].

pub mod ability;
pub mod item;

pub use ability::{Abilities, AbilityCode, AbilityScore};
pub use item::{Item, ItemId, ItemKind};

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// A character's raw state within the Black Void rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSheet {
    /// Character name.
    pub name: String,
    /// Ability scores keyed by code.
    #[serde(default)]
    pub abilities: Abilities,
    /// Possessed items in sheet order.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Hit points rolled at creation and advancement.
    #[serde(default)]
    pub rolled_hp: i32,
    /// Hit points granted by other sources.
    #[serde(default)]
    pub bonus_hp: i32,
    /// Sanity rolled at creation and advancement.
    #[serde(default)]
    pub rolled_sanity: i32,
    /// Sanity granted by other sources.
    #[serde(default)]
    pub bonus_sanity: i32,
}

impl CharacterSheet {
    /// Create an empty sheet for a named character.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Read a sheet from its JSON document.
    pub fn from_json(json: &str) -> MechResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the sheet as pretty-printed JSON.
    pub fn to_json(&self) -> MechResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get an ability score, defaulting to zero.
    pub fn ability(&self, code: AbilityCode) -> AbilityScore {
        self.abilities.get(code)
    }

    /// Builder: set an ability score.
    pub fn with_ability(mut self, code: AbilityCode, value: i32, modifier: i32) -> Self {
        self.abilities.set(code, AbilityScore::new(value, modifier));
        self
    }

    /// Builder: append an item.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Append an existing item, returning its id.
    pub fn add_item(&mut self, item: Item) -> ItemId {
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Create a new item of the given kind with its default name ("New Shield").
    pub fn create_item(&mut self, kind: ItemKind) -> ItemId {
        let name = kind.default_item_name();
        self.add_item(Item::new(name, kind))
    }

    /// Look up an item by id.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Remove an item by id, returning it.
    pub fn remove_item(&mut self, id: ItemId) -> MechResult<Item> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| MechError::ItemNotFound(id.to_string()))?;
        Ok(self.items.remove(index))
    }

    /// Find an item id by its full id text or a unique prefix of it.
    pub fn find_item_id(&self, text: &str) -> MechResult<ItemId> {
        let needle = text.trim().to_lowercase();
        let mut matches = self
            .items
            .iter()
            .filter(|i| !needle.is_empty() && i.id.0.to_string().starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(item), None) => Ok(item.id),
            _ => Err(MechError::ItemNotFound(text.to_string())),
        }
    }
}
