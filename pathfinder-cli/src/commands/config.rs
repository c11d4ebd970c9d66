//! Configuration management CLI commands.
//!
//! Provides `config init`, `config show`, and `config path` commands for
//! creating and inspecting the configuration file.

use std::path::Path;

use clap::Subcommand;
use pathfinder::config::ConfigFile;

use crate::error::CliError;
use crate::runner::resolve_config_path;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file with defaults
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration settings
    Show,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(config_path: Option<&Path>, command: ConfigCommands) -> Result<(), CliError> {
    let path = resolve_config_path(config_path);

    match command {
        ConfigCommands::Init { force } => run_init(&path, force),
        ConfigCommands::Show => run_show(&path),
        ConfigCommands::Path => run_path(&path),
    }
}

/// Create the configuration file.
fn run_init(path: &Path, force: bool) -> Result<(), CliError> {
    if force {
        ConfigFile::default().save_to(path)?;
        println!("Wrote default configuration to {}", path.display());
    } else if ConfigFile::ensure_exists_at(path)? {
        println!("Created configuration file at {}", path.display());
    } else {
        println!("Configuration file already exists at {}", path.display());
        println!("Use --force to overwrite it with defaults.");
    }
    Ok(())
}

/// List all configuration settings.
fn run_show(path: &Path) -> Result<(), CliError> {
    let config = ConfigFile::load_from(path)?;

    println!("Configuration Settings");
    println!("======================");
    if path.exists() {
        println!("(from {})", path.display());
    } else {
        println!("(defaults, {} does not exist)", path.display());
    }

    for (section, entries) in settings(&config) {
        println!();
        println!("[{}]", section);
        for (key, value) in entries {
            if value.is_empty() {
                println!("  {} = (not set)", key);
            } else {
                println!("  {} = {}", key, value);
            }
        }
    }

    Ok(())
}

/// Show the configuration file path.
fn run_path(path: &Path) -> Result<(), CliError> {
    println!("{}", path.display());
    Ok(())
}

type Section = (&'static str, Vec<(&'static str, String)>);

/// Effective settings grouped by INI section.
fn settings(config: &ConfigFile) -> Vec<Section> {
    let search = &config.search;
    let route = &config.route;
    let logging = &config.logging;

    vec![
        (
            "search",
            vec![
                ("provider", search.provider.to_string()),
                ("endpoint", search.endpoint.clone()),
                (
                    "catalog",
                    search
                        .catalog
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                ),
                ("debounce_ms", search.debounce_ms.to_string()),
                ("timeout_secs", search.timeout_secs.to_string()),
                ("max_results", search.max_results.to_string()),
            ],
        ),
        (
            "route",
            vec![
                ("endpoint", route.endpoint.clone()),
                ("timeout_secs", route.timeout_secs.to_string()),
                ("reroute_distance_m", route.reroute_distance_m.to_string()),
            ],
        ),
        (
            "map",
            vec![("viewport_m", config.map.viewport_m.to_string())],
        ),
        (
            "logging",
            vec![
                ("directory", logging.directory.display().to_string()),
                ("file", logging.file.clone()),
                ("level", logging.level.clone()),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_cover_every_section() {
        let sections: Vec<&str> = settings(&ConfigFile::default())
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(sections, vec!["search", "route", "map", "logging"]);
    }

    #[test]
    fn test_unset_catalog_is_empty() {
        let all = settings(&ConfigFile::default());
        let (_, search) = &all[0];
        let catalog = search.iter().find(|(k, _)| *k == "catalog").unwrap();
        assert!(catalog.1.is_empty());
    }

    #[test]
    fn test_init_creates_then_keeps_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.ini");

        run_init(&path, false).unwrap();
        assert!(path.exists());

        std::fs::write(&path, "[search]\ndebounce_ms = 100\n").unwrap();
        run_init(&path, false).unwrap();
        assert_eq!(ConfigFile::load_from(&path).unwrap().search.debounce_ms, 100);

        run_init(&path, true).unwrap();
        assert_eq!(ConfigFile::load_from(&path).unwrap(), ConfigFile::default());
    }
}
