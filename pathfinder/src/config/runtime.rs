//! Runtime configuration derived from the config file.

use std::time::Duration;

use super::settings::ConfigFile;
use crate::camera::DEFAULT_VIEWPORT_M;
use crate::coordinator::DEFAULT_REROUTE_DISTANCE_M;
use crate::route::RouteConfig;
use crate::search::PlaceSearchConfig;

/// Everything the coordinator service needs besides its providers.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Debounce, timeout and result cap for place search.
    pub search: PlaceSearchConfig,
    /// Timeout for route requests.
    pub route: RouteConfig,
    /// Square viewport edge used for every recenter, in meters.
    pub viewport_m: f64,
    /// Drift from the last route source that triggers a refresh, in meters.
    pub reroute_distance_m: f64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            search: PlaceSearchConfig::default(),
            route: RouteConfig::default(),
            viewport_m: DEFAULT_VIEWPORT_M,
            reroute_distance_m: DEFAULT_REROUTE_DISTANCE_M,
        }
    }
}

impl CoordinatorConfig {
    /// Translate file settings into runtime values.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            search: PlaceSearchConfig {
                debounce: Duration::from_millis(config.search.debounce_ms),
                timeout: Duration::from_secs(config.search.timeout_secs),
                max_results: config.search.max_results,
            },
            route: RouteConfig {
                timeout: Duration::from_secs(config.route.timeout_secs),
            },
            viewport_m: config.map.viewport_m,
            reroute_distance_m: config.route.reroute_distance_m,
        }
    }

    /// Set the debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.search.debounce = debounce;
        self
    }

    /// Set both provider timeouts.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.search.timeout = timeout;
        self.route.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_default_file() {
        let from_file = CoordinatorConfig::from_config_file(&ConfigFile::default());
        let default = CoordinatorConfig::default();

        assert_eq!(from_file.search.debounce, default.search.debounce);
        assert_eq!(from_file.search.timeout, default.search.timeout);
        assert_eq!(from_file.search.max_results, default.search.max_results);
        assert_eq!(from_file.route.timeout, default.route.timeout);
        assert_eq!(from_file.viewport_m, default.viewport_m);
        assert_eq!(from_file.reroute_distance_m, default.reroute_distance_m);
    }

    #[test]
    fn test_from_config_file_converts_units() {
        let mut file = ConfigFile::default();
        file.search.debounce_ms = 300;
        file.search.timeout_secs = 4;
        file.route.timeout_secs = 7;
        file.map.viewport_m = 800.0;

        let config = CoordinatorConfig::from_config_file(&file);

        assert_eq!(config.search.debounce, Duration::from_millis(300));
        assert_eq!(config.search.timeout, Duration::from_secs(4));
        assert_eq!(config.route.timeout, Duration::from_secs(7));
        assert_eq!(config.viewport_m, 800.0);
    }

    #[test]
    fn test_builders() {
        let config = CoordinatorConfig::default()
            .with_debounce(Duration::from_millis(50))
            .with_timeout(Duration::from_secs(2));

        assert_eq!(config.search.debounce, Duration::from_millis(50));
        assert_eq!(config.route.timeout, Duration::from_secs(2));
    }
}
