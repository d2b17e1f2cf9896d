use std::path::Path;

use bv_mechanics::{Item, ItemKind};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn list(path: &Path) -> Result<(), String> {
    let sheet = super::load_sheet(path)?;

    if sheet.items.is_empty() {
        println!("  No items.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Kind", "Detail"]);

    for item in &sheet.items {
        table.add_row(vec![
            item.id.to_string(),
            item.name.clone(),
            item.kind.tag().to_string(),
            detail(item),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} items", sheet.items.len());

    Ok(())
}

pub fn add(path: &Path, kind: &str, name: Option<&str>) -> Result<(), String> {
    let mut sheet = super::load_sheet(path)?;
    let kind = ItemKind::from_tag(kind).map_err(|e| e.to_string())?;

    let id = match name {
        Some(name) => sheet.add_item(Item::new(name, kind)),
        None => sheet.create_item(kind),
    };
    super::save_sheet(path, &sheet)?;

    let item = sheet
        .item(id)
        .ok_or_else(|| format!("item {id} vanished after insert"))?;
    println!(
        "  Added {} [{}] {}",
        item.name.bold(),
        item.kind.tag(),
        id.to_string().dimmed()
    );
    Ok(())
}

pub fn remove(path: &Path, id: &str) -> Result<(), String> {
    let mut sheet = super::load_sheet(path)?;
    let id = sheet.find_item_id(id).map_err(|e| e.to_string())?;
    let item = sheet.remove_item(id).map_err(|e| e.to_string())?;
    super::save_sheet(path, &sheet)?;

    println!("  Removed {} [{}]", item.name.bold(), item.kind.tag());
    Ok(())
}

fn detail(item: &Item) -> String {
    match &item.kind {
        ItemKind::CombatSkill { ranks } => format!("ranks {ranks}"),
        ItemKind::Shield { defence_mod } => format!("defence {defence_mod:+}"),
        ItemKind::Phenomenon { table } if !table.is_empty() => {
            let first = table.lines().next().unwrap_or_default();
            if first.chars().count() > 40 {
                format!("{}...", first.chars().take(37).collect::<String>())
            } else {
                first.to_string()
            }
        }
        _ => "-".to_string(),
    }
}
