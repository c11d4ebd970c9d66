//! Default values and constants for all configuration settings.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;

// =============================================================================
// Search
// =============================================================================

/// Default Nominatim endpoint.
pub const DEFAULT_NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = crate::search::DEFAULT_DEBOUNCE.as_millis() as u64;

/// Default search provider timeout in seconds.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = crate::search::DEFAULT_SEARCH_TIMEOUT.as_secs();

/// Default suggestion cap.
pub const DEFAULT_MAX_RESULTS: usize = crate::search::DEFAULT_MAX_RESULTS;

// =============================================================================
// Route
// =============================================================================

/// Default OSRM endpoint.
pub const DEFAULT_OSRM_ENDPOINT: &str = "https://router.project-osrm.org";

/// Default routing provider timeout in seconds.
pub const DEFAULT_ROUTE_TIMEOUT_SECS: u64 = crate::route::DEFAULT_ROUTE_TIMEOUT.as_secs();

/// Default drift that triggers a route refresh, in meters.
pub const DEFAULT_REROUTE_DISTANCE_M: f64 = crate::coordinator::DEFAULT_REROUTE_DISTANCE_M;

// =============================================================================
// Map and logging
// =============================================================================

/// Default square viewport edge in meters.
pub const DEFAULT_VIEWPORT_M: f64 = crate::camera::DEFAULT_VIEWPORT_M;

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "pathfinder.log";

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log directory (~/.pathfinder/logs).
pub fn default_log_directory() -> PathBuf {
    config_directory().join("logs")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            search: SearchSettings {
                provider: SearchProviderKind::Nominatim,
                endpoint: DEFAULT_NOMINATIM_ENDPOINT.to_string(),
                catalog: None,
                debounce_ms: DEFAULT_DEBOUNCE_MS,
                timeout_secs: DEFAULT_SEARCH_TIMEOUT_SECS,
                max_results: DEFAULT_MAX_RESULTS,
            },
            route: RouteSettings {
                endpoint: DEFAULT_OSRM_ENDPOINT.to_string(),
                timeout_secs: DEFAULT_ROUTE_TIMEOUT_SECS,
                reroute_distance_m: DEFAULT_REROUTE_DISTANCE_M,
            },
            map: MapSettings {
                viewport_m: DEFAULT_VIEWPORT_M,
            },
            logging: LoggingSettings {
                directory: default_log_directory(),
                file: DEFAULT_LOG_FILE.to_string(),
                level: DEFAULT_LOG_LEVEL.to_string(),
            },
        }
    }
}
