use std::path::Path;

use bv_mechanics::{AbilityCode, CharacterSheet};

pub fn run(path: &Path, name: &str) -> Result<(), String> {
    if path.exists() {
        return Err(format!("'{}' already exists", path.display()));
    }

    let mut sheet = CharacterSheet::new(name);
    for ability in AbilityCode::ALL {
        sheet.abilities.set(ability, Default::default());
    }

    super::save_sheet(path, &sheet)?;

    println!("Created character '{}' in {}", name, path.display());
    println!();
    println!("Get started:");
    println!("  # Edit {} to set ability values and modifiers", path.display());
    println!("  blackvoid item add background --name Voidmarked");
    println!("  blackvoid sheet                # Derived statistics");
    println!("  blackvoid roll agi 1d20+12     # Roll an ability check");

    Ok(())
}
