//! Derived statistics: defence, speed, hit point and sanity maxima, and
//! the feature flags that decide which sheet tabs are shown.
//!
//! Everything here is recomputed from a [`CharacterSheet`] on every pass
//! and never stored back onto it.

use serde::Serialize;

use crate::sheet::{AbilityCode, CharacterSheet, Item, ItemKind};

/// Sanity per point of Willpower, independent of size.
pub const SANITY_FACTOR: i32 = 6;

/// Size-dependent base constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeProfile {
    /// Defence before shields, skills, and Agility.
    pub defence_base: i32,
    /// Speed before Strength.
    pub size_factor: i32,
    /// Hit points per point of Stamina.
    pub hp_factor: i32,
}

impl SizeProfile {
    /// Profile for ordinary characters.
    pub const STANDARD: Self = Self {
        defence_base: 7,
        size_factor: 5,
        hp_factor: 6,
    };

    /// Profile for characters with the "Large" attribute.
    pub const LARGE: Self = Self {
        defence_base: 6,
        size_factor: 6,
        hp_factor: 7,
    };
}

/// Items partitioned by kind, in sheet order.
#[derive(Debug, Clone, Default)]
pub struct ItemBuckets<'a> {
    /// Background items.
    pub backgrounds: Vec<&'a Item>,
    /// Skills.
    pub skills: Vec<&'a Item>,
    /// Combat skills.
    pub combat_skills: Vec<&'a Item>,
    /// Physical attributes.
    pub attributes: Vec<&'a Item>,
    /// Esoteric attributes.
    pub esoteric_attributes: Vec<&'a Item>,
    /// Talents.
    pub talents: Vec<&'a Item>,
    /// Flaws.
    pub flaws: Vec<&'a Item>,
    /// General inventory items.
    pub general_items: Vec<&'a Item>,
    /// Tools.
    pub tools: Vec<&'a Item>,
    /// Weapons.
    pub weapons: Vec<&'a Item>,
    /// Armour.
    pub armour: Vec<&'a Item>,
    /// Shields.
    pub shields: Vec<&'a Item>,
    /// Consumables.
    pub consumables: Vec<&'a Item>,
    /// Methods.
    pub methods: Vec<&'a Item>,
    /// Spheres.
    pub spheres: Vec<&'a Item>,
    /// Phenomena.
    pub phenomena: Vec<&'a Item>,
}

impl<'a> ItemBuckets<'a> {
    /// Partition items by kind in a single pass.
    pub fn partition(items: &'a [Item]) -> Self {
        let mut buckets = Self::default();
        for item in items {
            let bucket = match item.kind {
                ItemKind::Background => &mut buckets.backgrounds,
                ItemKind::Skill => &mut buckets.skills,
                ItemKind::CombatSkill { .. } => &mut buckets.combat_skills,
                ItemKind::Attribute => &mut buckets.attributes,
                ItemKind::EsotericAttribute => &mut buckets.esoteric_attributes,
                ItemKind::Talent => &mut buckets.talents,
                ItemKind::Flaw => &mut buckets.flaws,
                ItemKind::General => &mut buckets.general_items,
                ItemKind::Tool => &mut buckets.tools,
                ItemKind::Weapon => &mut buckets.weapons,
                ItemKind::Armour => &mut buckets.armour,
                ItemKind::Shield { .. } => &mut buckets.shields,
                ItemKind::Consumable => &mut buckets.consumables,
                ItemKind::Method => &mut buckets.methods,
                ItemKind::Sphere => &mut buckets.spheres,
                ItemKind::Phenomenon { .. } => &mut buckets.phenomena,
            };
            bucket.push(item);
        }
        buckets
    }
}

/// Boolean feature and tab-visibility flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SheetFlags {
    /// Character may take physical attributes.
    pub has_attributes: bool,
    /// Character may take esoteric attributes.
    pub has_esoteric_attributes: bool,
    /// Character may wield void powers.
    pub has_powers: bool,
    /// Character knows a Mysticism method.
    pub is_mystic: bool,
    /// Character knows the Bloodletting method.
    pub has_bloodletting: bool,
    /// Character knows the Sacrificial Divination method.
    pub has_sacrificial_divination: bool,

    /// At least one background.
    pub has_backgrounds: bool,
    /// At least one skill.
    pub has_skills: bool,
    /// At least one combat skill.
    pub has_combat_skills: bool,
    /// At least one talent.
    pub has_talents: bool,
    /// At least one flaw.
    pub has_flaws: bool,
    /// At least one general item.
    pub has_general_items: bool,
    /// At least one tool.
    pub has_tools: bool,
    /// At least one weapon.
    pub has_weapons: bool,
    /// At least one piece of armour.
    pub has_armour: bool,
    /// At least one shield.
    pub has_shields: bool,
    /// At least one consumable.
    pub has_consumables: bool,
    /// At least one method.
    pub has_methods: bool,

    /// Inventory tab is visible.
    pub show_inventory_tab: bool,
    /// Talents tab is visible.
    pub show_talents_tab: bool,
    /// Skills tab is visible.
    pub show_skills_tab: bool,
}

/// Statistics derived from a character sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedStats {
    /// Size constants used for this pass.
    pub size: SizeProfile,
    /// Sum of shield defence modifiers.
    pub shield_bonus: i32,
    /// Ranks in the "Defence" combat skill.
    pub skill_bonus: i32,
    /// Defence value.
    pub defence: i32,
    /// Movement speed.
    pub speed: i32,
    /// Maximum hit points.
    pub hit_point_maximum: i32,
    /// Maximum sanity.
    pub sanity_maximum: i32,
    /// Feature and tab flags.
    pub flags: SheetFlags,
}

/// Compute every derived statistic for a sheet.
pub fn derive(sheet: &CharacterSheet) -> DerivedStats {
    let buckets = ItemBuckets::partition(&sheet.items);
    let abilities = &sheet.abilities;

    let size = size_profile(&buckets.attributes);
    let shield_bonus = shield_bonus(&buckets.shields);
    let skill_bonus = defence_skill_bonus(&buckets.combat_skills);

    // Sheet values are unchecked input; every sum saturates.
    let defence = size
        .defence_base
        .saturating_add(shield_bonus)
        .saturating_add(skill_bonus)
        .saturating_add(abilities.modifier(AbilityCode::Agi));
    let speed = size
        .size_factor
        .saturating_add(abilities.modifier(AbilityCode::Str));
    let hit_point_maximum = abilities
        .get(AbilityCode::Sta)
        .value
        .saturating_mul(size.hp_factor)
        .saturating_add(sheet.rolled_hp)
        .saturating_add(sheet.bonus_hp);
    let sanity_maximum = abilities
        .get(AbilityCode::Wil)
        .value
        .saturating_mul(SANITY_FACTOR)
        .saturating_add(sheet.rolled_sanity)
        .saturating_add(sheet.bonus_sanity);

    let flags = sheet_flags(&buckets);

    tracing::debug!(
        character = %sheet.name,
        defence,
        speed,
        hit_point_maximum,
        sanity_maximum,
        "derived statistics"
    );

    DerivedStats {
        size,
        shield_bonus,
        skill_bonus,
        defence,
        speed,
        hit_point_maximum,
        sanity_maximum,
        flags,
    }
}

/// Compute the feature and tab flags from partitioned items.
pub fn sheet_flags(buckets: &ItemBuckets<'_>) -> SheetFlags {
    let voidmarked = has_named(&buckets.backgrounds, "Voidmarked");
    let halfblood = has_named(&buckets.backgrounds, "Halfblood");

    let has_general_items = !buckets.general_items.is_empty();
    let has_tools = !buckets.tools.is_empty();
    let has_weapons = !buckets.weapons.is_empty();
    let has_armour = !buckets.armour.is_empty();
    let has_shields = !buckets.shields.is_empty();
    let has_consumables = !buckets.consumables.is_empty();
    let has_talents = !buckets.talents.is_empty();
    let has_flaws = !buckets.flaws.is_empty();
    let has_skills = !buckets.skills.is_empty();
    let has_combat_skills = !buckets.combat_skills.is_empty();

    SheetFlags {
        has_attributes: voidmarked || halfblood,
        has_esoteric_attributes: voidmarked,
        has_powers: voidmarked,
        is_mystic: has_named_containing(&buckets.methods, "Mysticism"),
        has_bloodletting: has_named_containing(&buckets.methods, "Bloodletting"),
        has_sacrificial_divination: has_named_containing(
            &buckets.methods,
            "Sacrificial Divination",
        ),

        has_backgrounds: !buckets.backgrounds.is_empty(),
        has_skills,
        has_combat_skills,
        has_talents,
        has_flaws,
        has_general_items,
        has_tools,
        has_weapons,
        has_armour,
        has_shields,
        has_consumables,
        has_methods: !buckets.methods.is_empty(),

        show_inventory_tab: has_general_items
            || has_tools
            || has_weapons
            || has_armour
            || has_shields
            || has_consumables,
        show_talents_tab: has_talents || has_flaws,
        show_skills_tab: has_skills || has_combat_skills,
    }
}

/// Large characters trade defence for speed and hit points.
pub fn size_profile(attributes: &[&Item]) -> SizeProfile {
    if has_named(attributes, "Large") {
        SizeProfile::LARGE
    } else {
        SizeProfile::STANDARD
    }
}

/// Sum of `defence_mod` over all shields.
pub fn shield_bonus(shields: &[&Item]) -> i32 {
    shields
        .iter()
        .map(|item| match item.kind {
            ItemKind::Shield { defence_mod } => defence_mod,
            _ => 0,
        })
        .fold(0, i32::saturating_add)
}

/// Sum of ranks over every combat skill named exactly "Defence".
pub fn defence_skill_bonus(combat_skills: &[&Item]) -> i32 {
    combat_skills
        .iter()
        .filter(|item| item.name == "Defence")
        .map(|item| match item.kind {
            ItemKind::CombatSkill { ranks } => ranks,
            _ => 0,
        })
        .fold(0, i32::saturating_add)
}

fn has_named(items: &[&Item], name: &str) -> bool {
    items.iter().any(|item| item.name == name)
}

fn has_named_containing(items: &[&Item], needle: &str) -> bool {
    items.iter().any(|item| item.name.contains(needle))
}
