//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path` commands
//! for viewing and modifying configuration settings from the command line.

use std::path::Path;

use assetsplace::config::{config_file_path, ConfigFile, ConfigKey};
use clap::Subcommand;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., minecraft.mods_path)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., minecraft.mods_path)
        key: String,

        /// Value to set (empty to restore the default)
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    let path = config_file_path();
    match command {
        ConfigCommands::Get { key } => println!("{}", get_value(&path, &key)?),
        ConfigCommands::Set { key, value } => {
            let name = set_value(&path, &key, &value)?;
            println!("Set {} = {}", name, value);
        }
        ConfigCommands::List => print!("{}", render_list(&load_or_default(&path)?)),
        ConfigCommands::Path => println!("{}", path.display()),
    }
    Ok(())
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'assetsplace config list' to see available keys.",
            key
        ))
    })
}

/// Load the file at `path`, or defaults if it does not exist yet.
fn load_or_default(path: &Path) -> Result<ConfigFile, CliError> {
    if path.exists() {
        Ok(ConfigFile::load_from(path)?)
    } else {
        Ok(ConfigFile::default())
    }
}

fn get_value(path: &Path, key: &str) -> Result<String, CliError> {
    let config_key = parse_key(key)?;
    let value = config_key.get(&load_or_default(path)?);

    Ok(if value.is_empty() {
        "(not set)".to_string()
    } else {
        value
    })
}

fn set_value(path: &Path, key: &str, value: &str) -> Result<String, CliError> {
    let config_key = parse_key(key)?;

    let mut config = load_or_default(path)?;
    config_key.set(&mut config, value)?;
    config.save_to(path)?;

    Ok(config_key.name())
}

fn render_list(config: &ConfigFile) -> String {
    let mut out = String::from("Configuration Settings\n======================\n\n");
    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();

        // Section header when section changes
        if section != current_section {
            if !current_section.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n", section));
            current_section = section;
        }

        let value = key.get(config);
        let shown = if value.is_empty() { "(not set)" } else { value.as_str() };
        out.push_str(&format!("  {} = {}\n", key.key_name(), shown));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_then_get() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");

        let name = set_value(&path, "minecraft.mods_path", "/games/mods").unwrap();

        assert_eq!(name, "minecraft.mods_path");
        assert_eq!(get_value(&path, "minecraft.mods_path").unwrap(), "/games/mods");
        assert_eq!(get_value(&path, "generic.generic_path").unwrap(), "(not set)");
    }

    #[test]
    fn test_unknown_key() {
        let temp = TempDir::new().unwrap();
        let err = get_value(&temp.path().join("config.ini"), "minecraft.shaders").unwrap_err();

        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("config list"));
    }

    #[test]
    fn test_invalid_value_not_saved() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");

        assert!(set_value(&path, "catalog.timeout", "never").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_render_list_sections() {
        let rendered = render_list(&ConfigFile::default());

        assert!(rendered.contains("[catalog]"));
        assert!(rendered.contains("[minecraft]"));
        assert!(rendered.contains("  mods_path = (not set)"));
        assert!(rendered.contains("  timeout = 30"));
    }
}
