//! Pathfinder CLI - Command-line interface
//!
//! This binary provides a command-line interface to the Pathfinder library:
//! one-shot place search and routing, plus a full navigation simulation
//! against a replayed location track.

mod commands;
mod error;
mod render;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pathfinder::geo::Coordinate;

use commands::config::ConfigCommands;
use error::CliError;

#[derive(Parser)]
#[command(name = "pathfinder")]
#[command(version)]
#[command(about = "Find places on campus and route to them", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.pathfinder/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for places matching a text
    Search {
        /// Text to search for
        text: String,

        /// Resolve the Nth suggestion (1-based) to a coordinate
        #[arg(long, value_name = "N")]
        resolve: Option<usize>,
    },

    /// Request a driving route between two coordinates
    Route {
        /// Start as LAT,LON
        #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
        from: Coordinate,

        /// Destination as LAT,LON
        #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
        to: Coordinate,
    },

    /// Replay a location track through the navigation coordinator
    Simulate {
        /// Track file with one `lat,lon[,accuracy]` fix per line
        #[arg(long, value_name = "CSV")]
        track: PathBuf,

        /// Query typed into the search field, one character at a time
        #[arg(long)]
        query: String,

        /// Suggestion to pick (1-based)
        #[arg(long, default_value = "1", value_name = "N")]
        pick: usize,

        /// Pan the map manually after N fixes
        #[arg(long, value_name = "N")]
        pan_after: Option<usize>,

        /// Milliseconds between replayed fixes
        #[arg(long, default_value = "1000", value_name = "MS")]
        interval_ms: u64,

        /// Simulate the user refusing location permission
        #[arg(long)]
        deny_permission: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Search { text, resolve } => {
            commands::search::run(config_path, commands::search::SearchArgs { text, resolve })
        }
        Commands::Route { from, to } => {
            commands::route::run(config_path, commands::route::RouteArgs { from, to })
        }
        Commands::Simulate {
            track,
            query,
            pick,
            pan_after,
            interval_ms,
            deny_permission,
        } => commands::simulate::run(
            config_path,
            commands::simulate::SimulateArgs {
                track,
                query,
                pick,
                pan_after,
                interval_ms,
                deny_permission,
            },
        ),
        Commands::Config { command } => commands::config::run(config_path, command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_route_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "pathfinder",
            "route",
            "--from",
            "-33.8688,151.2093",
            "--to",
            "30.6166,-96.3389",
        ])
        .unwrap();

        match cli.command {
            Commands::Route { from, to } => {
                assert_eq!(from, Coordinate::new(-33.8688, 151.2093));
                assert_eq!(to, Coordinate::new(30.6166, -96.3389));
            }
            _ => panic!("expected route command"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["pathfinder", "config", "path", "--config", "/tmp/p.ini"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/p.ini")));
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Path
            }
        ));
    }

    #[test]
    fn test_simulate_defaults() {
        let cli = Cli::try_parse_from([
            "pathfinder",
            "simulate",
            "--track",
            "walk.csv",
            "--query",
            "Library",
        ])
        .unwrap();

        match cli.command {
            Commands::Simulate {
                pick,
                pan_after,
                interval_ms,
                deny_permission,
                ..
            } => {
                assert_eq!(pick, 1);
                assert_eq!(pan_after, None);
                assert_eq!(interval_ms, 1000);
                assert!(!deny_permission);
            }
            _ => panic!("expected simulate command"),
        }
    }

    #[test]
    fn test_bad_coordinate_rejected() {
        let result = Cli::try_parse_from(["pathfinder", "route", "--from", "north", "--to", "1,2"]);
        assert!(result.is_err());
    }
}
