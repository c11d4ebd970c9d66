//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Place search settings
    pub search: SearchSettings,
    /// Routing settings
    pub route: RouteSettings,
    /// Map camera settings
    pub map: MapSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Which place search backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchProviderKind {
    /// OpenStreetMap Nominatim over HTTP.
    #[default]
    Nominatim,
    /// Local JSON building catalogue.
    Catalog,
}

impl SearchProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchProviderKind::Nominatim => "nominatim",
            SearchProviderKind::Catalog => "catalog",
        }
    }
}

impl fmt::Display for SearchProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nominatim" => Ok(SearchProviderKind::Nominatim),
            "catalog" => Ok(SearchProviderKind::Catalog),
            other => Err(format!("unknown search provider '{}'", other)),
        }
    }
}

/// `[search]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    /// Backend used for suggestions and resolution
    pub provider: SearchProviderKind,
    /// Nominatim base URL
    pub endpoint: String,
    /// Building catalogue file (required for the catalog provider)
    pub catalog: Option<PathBuf>,
    /// Quiet window before a query is sent, in milliseconds
    pub debounce_ms: u64,
    /// Provider timeout in seconds
    pub timeout_secs: u64,
    /// Maximum suggestions shown
    pub max_results: usize,
}

/// `[route]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSettings {
    /// OSRM base URL
    pub endpoint: String,
    /// Provider timeout in seconds
    pub timeout_secs: u64,
    /// Drift in meters from the last route source that triggers a refresh
    pub reroute_distance_m: f64,
}

/// `[map]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    /// Edge of the square viewport used for every recenter, in meters
    pub viewport_m: f64,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory for log files
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
    /// Default filter when RUST_LOG is unset
    pub level: String,
}
