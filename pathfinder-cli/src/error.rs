//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use pathfinder::config::ConfigFileError;
use pathfinder::coordinator::ServiceStopped;
use pathfinder::location::ReplayError;
use pathfinder::provider::ProviderError;
use pathfinder::route::RouteError;
use pathfinder::search::SearchError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to load or write the config file
    ConfigFile(ConfigFileError),
    /// Failed to create a provider
    Provider(ProviderError),
    /// Place search or resolution failed
    Search(SearchError),
    /// Route request failed
    Route(RouteError),
    /// Failed to load a location track
    Track(ReplayError),
    /// Bad command-line argument
    InvalidArgument(String),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// The coordinator stopped before the command finished
    Stopped,
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::ConfigFile(ConfigFileError::InvalidValue { .. })
            | CliError::ConfigFile(ConfigFileError::ReadError(_)) => {
                eprintln!();
                eprintln!("Fix the value in your config file, or write a fresh one with:");
                eprintln!("  pathfinder config init --force");
            }
            CliError::Provider(ProviderError::Configuration(_)) => {
                eprintln!();
                eprintln!("The building catalogue needs a JSON file, for example:");
                eprintln!("  [search]");
                eprintln!("  provider = catalog");
                eprintln!("  catalog = ~/.pathfinder/buildings.json");
            }
            CliError::Search(SearchError::Provider(_)) | CliError::Route(RouteError::Provider(_)) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. No network connection");
                eprintln!("  2. The endpoint in config.ini is wrong or down");
                eprintln!("  3. The public server is rate limiting you (max 1 request/second)");
            }
            CliError::Route(RouteError::NoRoute) => {
                eprintln!();
                eprintln!("The two points are not connected by the road network.");
                eprintln!("Coordinates are LAT,LON; check they are not swapped.");
            }
            CliError::Track(ReplayError::Parse { .. }) => {
                eprintln!();
                eprintln!("Track files hold one fix per line: lat,lon[,accuracy]");
                eprintln!("Blank lines and lines starting with '#' are skipped.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Provider(e) => write!(f, "Failed to create provider: {}", e),
            CliError::Search(e) => write!(f, "{}", e),
            CliError::Route(e) => write!(f, "{}", e),
            CliError::Track(e) => write!(f, "{}", e),
            CliError::InvalidArgument(msg) => write!(f, "{}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Stopped => write!(f, "Navigation coordinator stopped unexpectedly"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Provider(e) => Some(e),
            CliError::Search(e) => Some(e),
            CliError::Route(e) => Some(e),
            CliError::Track(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Provider(e)
    }
}

impl From<SearchError> for CliError {
    fn from(e: SearchError) -> Self {
        CliError::Search(e)
    }
}

impl From<RouteError> for CliError {
    fn from(e: RouteError) -> Self {
        CliError::Route(e)
    }
}

impl From<ReplayError> for CliError {
    fn from(e: ReplayError) -> Self {
        CliError::Track(e)
    }
}

impl From<ServiceStopped> for CliError {
    fn from(_: ServiceStopped) -> Self {
        CliError::Stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            CliError::Config("bad".into()).to_string(),
            "Configuration error: bad"
        );
        assert_eq!(
            CliError::Route(RouteError::NoRoute).to_string(),
            RouteError::NoRoute.to_string()
        );
        assert!(CliError::Stopped.to_string().contains("stopped"));
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;

        let err = CliError::from(SearchError::Timeout(10_000));
        assert!(err.source().is_some());
        assert!(CliError::InvalidArgument("x".into()).source().is_none());
    }
}
