//! Init command - initialize configuration file.

use assetsplace::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
pub fn run() -> Result<(), CliError> {
    let path = config_file_path();

    if ConfigFile::ensure_exists(&path)? {
        println!("Created configuration file: {}", path.display());
    } else {
        println!("Configuration file already exists: {}", path.display());
    }
    println!();
    println!("Empty paths use platform defaults:");
    println!("  minecraft.mods_path          <.minecraft>/mods");
    println!("  minecraft.resourcepacks_path <.minecraft>/resourcepacks");
    println!("  generic.generic_path         same as downloads.directory");
    println!("  downloads.directory          <Downloads>/TheAssetsPlace");
    println!();
    println!("Use 'assetsplace config set <key> <value>' to change a setting.");
    Ok(())
}
