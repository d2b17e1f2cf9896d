//! Possessed items and their kinds.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MechError, MechResult};

/// Unique identifier for an item on a character sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Generate a new random item ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The kind of a possessed item, with kind-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    /// Character background (e.g. Voidmarked, Halfblood).
    Background,
    /// A general skill.
    Skill,
    /// A combat skill with trained ranks.
    CombatSkill {
        /// Number of ranks trained.
        #[serde(default)]
        ranks: i32,
    },
    /// A physical attribute (e.g. Large).
    Attribute,
    /// An esoteric attribute.
    EsotericAttribute,
    /// A talent.
    Talent,
    /// A flaw.
    Flaw,
    /// A general inventory item.
    #[serde(rename = "item")]
    General,
    /// A tool.
    Tool,
    /// A weapon.
    Weapon,
    /// Armour.
    Armour,
    /// A shield adding to defence.
    Shield {
        /// Defence bonus granted while carried.
        #[serde(default)]
        defence_mod: i32,
    },
    /// A consumable.
    Consumable,
    /// A void method (e.g. Furore, Mysticism).
    Method,
    /// A sphere of power.
    Sphere,
    /// A random phenomenon with its lookup table text.
    Phenomenon {
        /// Table text announced when the phenomenon is invoked.
        #[serde(default)]
        table: String,
    },
}

impl ItemKind {
    /// Every kind tag, in sheet order.
    pub const TAGS: [&'static str; 16] = [
        "background",
        "skill",
        "combatskill",
        "attribute",
        "esotericattribute",
        "talent",
        "flaw",
        "item",
        "tool",
        "weapon",
        "armour",
        "shield",
        "consumable",
        "method",
        "sphere",
        "phenomenon",
    ];

    /// The lowercase tag identifying this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Skill => "skill",
            Self::CombatSkill { .. } => "combatskill",
            Self::Attribute => "attribute",
            Self::EsotericAttribute => "esotericattribute",
            Self::Talent => "talent",
            Self::Flaw => "flaw",
            Self::General => "item",
            Self::Tool => "tool",
            Self::Weapon => "weapon",
            Self::Armour => "armour",
            Self::Shield { .. } => "shield",
            Self::Consumable => "consumable",
            Self::Method => "method",
            Self::Sphere => "sphere",
            Self::Phenomenon { .. } => "phenomenon",
        }
    }

    /// Parse a kind tag, with default kind-specific data.
    pub fn from_tag(tag: &str) -> MechResult<Self> {
        let kind = match tag.trim().to_lowercase().as_str() {
            "background" => Self::Background,
            "skill" => Self::Skill,
            "combatskill" => Self::CombatSkill { ranks: 0 },
            "attribute" => Self::Attribute,
            "esotericattribute" => Self::EsotericAttribute,
            "talent" => Self::Talent,
            "flaw" => Self::Flaw,
            "item" => Self::General,
            "tool" => Self::Tool,
            "weapon" => Self::Weapon,
            "armour" => Self::Armour,
            "shield" => Self::Shield { defence_mod: 0 },
            "consumable" => Self::Consumable,
            "method" => Self::Method,
            "sphere" => Self::Sphere,
            "phenomenon" => Self::Phenomenon {
                table: String::new(),
            },
            _ => return Err(MechError::InvalidItemKind(tag.to_string())),
        };
        Ok(kind)
    }

    /// Default name for a freshly created item of this kind, e.g. "New Shield".
    pub fn default_item_name(&self) -> String {
        let tag = self.tag();
        let mut chars = tag.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("New {capitalized}")
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// An item possessed by a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Item identifier.
    #[serde(default)]
    pub id: ItemId,
    /// Display name, matched exactly or by substring by derivation rules.
    pub name: String,
    /// Kind and kind-specific data.
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    /// Create an item with a fresh id.
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            kind,
        }
    }

    /// Shorthand for a background item.
    pub fn background(name: impl Into<String>) -> Self {
        Self::new(name, ItemKind::Background)
    }

    /// Shorthand for a method item.
    pub fn method(name: impl Into<String>) -> Self {
        Self::new(name, ItemKind::Method)
    }

    /// Shorthand for an attribute item.
    pub fn attribute(name: impl Into<String>) -> Self {
        Self::new(name, ItemKind::Attribute)
    }

    /// Shorthand for a shield.
    pub fn shield(name: impl Into<String>, defence_mod: i32) -> Self {
        Self::new(name, ItemKind::Shield { defence_mod })
    }

    /// Shorthand for a combat skill.
    pub fn combat_skill(name: impl Into<String>, ranks: i32) -> Self {
        Self::new(name, ItemKind::CombatSkill { ranks })
    }
}
