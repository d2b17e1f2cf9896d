use std::path::Path;

use bv_mechanics::derive::SANITY_FACTOR;
use bv_mechanics::{AbilityCode, CharacterSheet, DerivedStats, derive};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(path: &Path, json: bool) -> Result<(), String> {
    let sheet = super::load_sheet(path)?;
    let stats = derive(&sheet);

    if json {
        let out = serde_json::to_string_pretty(&stats).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    println!("  {}", sheet.name.bold());
    println!();

    let mut abilities = Table::new();
    abilities.set_content_arrangement(ContentArrangement::Dynamic);
    abilities.set_header(vec!["Ability", "Value", "Mod"]);
    for code in AbilityCode::ALL {
        let score = sheet.ability(code);
        abilities.add_row(vec![
            code.name().to_string(),
            score.value.to_string(),
            format!("{:+}", score.modifier),
        ]);
    }
    println!("{abilities}");
    println!();

    println!("{}", stats_table(&sheet, &stats));
    println!();

    let tabs = visible_tabs(&stats);
    if tabs.is_empty() {
        println!("  {} (none)", "Tabs:".dimmed());
    } else {
        println!("  {} {}", "Tabs:".dimmed(), tabs.join(", "));
    }

    let features = features(&stats);
    if !features.is_empty() {
        println!("  {} {}", "Features:".dimmed(), features.join(", "));
    }

    Ok(())
}

fn stats_table(sheet: &CharacterSheet, stats: &DerivedStats) -> Table {
    let abilities = &sheet.abilities;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Statistic", "Value", "Breakdown"]);

    table.add_row(vec![
        "Defence".to_string(),
        stats.defence.to_string(),
        format!(
            "base {} + shields {} + skill {} + agility {}",
            stats.size.defence_base,
            stats.shield_bonus,
            stats.skill_bonus,
            abilities.modifier(AbilityCode::Agi)
        ),
    ]);
    table.add_row(vec![
        "Speed".to_string(),
        stats.speed.to_string(),
        format!(
            "size {} + strength {}",
            stats.size.size_factor,
            abilities.modifier(AbilityCode::Str)
        ),
    ]);
    table.add_row(vec![
        "Hit Points".to_string(),
        stats.hit_point_maximum.to_string(),
        format!(
            "stamina {} x {} + rolled {} + bonus {}",
            abilities.get(AbilityCode::Sta).value,
            stats.size.hp_factor,
            sheet.rolled_hp,
            sheet.bonus_hp
        ),
    ]);
    table.add_row(vec![
        "Sanity".to_string(),
        stats.sanity_maximum.to_string(),
        format!(
            "willpower {} x {} + rolled {} + bonus {}",
            abilities.get(AbilityCode::Wil).value,
            SANITY_FACTOR,
            sheet.rolled_sanity,
            sheet.bonus_sanity
        ),
    ]);
    table
}

fn visible_tabs(stats: &DerivedStats) -> Vec<&'static str> {
    let flags = &stats.flags;
    [
        (flags.show_skills_tab, "Skills"),
        (flags.show_talents_tab, "Talents"),
        (flags.show_inventory_tab, "Inventory"),
    ]
    .into_iter()
    .filter_map(|(shown, name)| shown.then_some(name))
    .collect()
}

fn features(stats: &DerivedStats) -> Vec<&'static str> {
    let flags = &stats.flags;
    [
        (flags.has_attributes, "attributes"),
        (flags.has_esoteric_attributes, "esoteric attributes"),
        (flags.has_powers, "void powers"),
        (flags.is_mystic, "mystic"),
        (flags.has_bloodletting, "bloodletting"),
        (flags.has_sacrificial_divination, "sacrificial divination"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect()
}
