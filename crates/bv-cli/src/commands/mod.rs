pub mod init;
pub mod item;
pub mod roll;
pub mod sheet;

use std::fs;
use std::path::Path;

use bv_mechanics::CharacterSheet;

/// Read and parse a character sheet file.
fn load_sheet(path: &Path) -> Result<CharacterSheet, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let sheet = CharacterSheet::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), items = sheet.items.len(), "loaded sheet");
    Ok(sheet)
}

/// Write a character sheet back to disk.
fn save_sheet(path: &Path, sheet: &CharacterSheet) -> Result<(), String> {
    let mut json = sheet.to_json().map_err(|e| e.to_string())?;
    json.push('\n');
    fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))
}
