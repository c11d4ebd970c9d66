//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let catalog = config
        .search
        .catalog
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();

    format!(
        r#"[search]
; Place search backend:
;   nominatim - OpenStreetMap Nominatim (online, worldwide)
;   catalog   - local JSON building catalogue (offline, requires catalog path)
provider = {}
; Nominatim base URL
endpoint = {}
; Building catalogue file (only used when provider = catalog)
; Example: catalog = ~/.pathfinder/buildings.json
catalog = {}
; Quiet window in milliseconds before a typed query is sent (default: 250)
debounce_ms = {}
; Provider timeout in seconds (default: 10)
timeout_secs = {}
; Maximum number of suggestions shown (default: 8)
max_results = {}

[route]
; OSRM base URL (driving profile)
endpoint = {}
; Provider timeout in seconds (default: 10)
timeout_secs = {}
; Distance in meters the user must move from the last route's start before
; the route is requested again (default: 50)
reroute_distance_m = {}

[map]
; Edge of the square viewport in meters used when the map follows you (default: 1000)
viewport_m = {}

[logging]
; Log directory (default: ~/.pathfinder/logs)
directory = {}
; Log file name, cleared at the start of every session
file = {}
; Default level when RUST_LOG is not set: trace, debug, info, warn, error
level = {}
"#,
        config.search.provider,
        config.search.endpoint,
        catalog,
        config.search.debounce_ms,
        config.search.timeout_secs,
        config.search.max_results,
        config.route.endpoint,
        config.route.timeout_secs,
        config.route.reroute_distance_m,
        config.map.viewport_m,
        path_to_string(&config.logging.directory),
        config.logging.file,
        config.logging.level,
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::super::settings::{ConfigFile, SearchProviderKind};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");

        let mut config = ConfigFile::default();
        config.search.provider = SearchProviderKind::Catalog;
        config.search.catalog = Some(PathBuf::from("/srv/campus/buildings.json"));
        config.search.debounce_ms = 300;
        config.route.reroute_distance_m = 75.0;
        config.map.viewport_m = 1500.0;
        config.logging.level = "debug".to_string();

        config.save_to(&config_path).unwrap();
        let loaded = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_default_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");

        ConfigFile::default().save_to(&config_path).unwrap();
        let content = std::fs::read_to_string(&config_path).unwrap();

        assert!(content.contains("provider = nominatim"));
        assert!(content.contains("catalog = \n"));
        assert_eq!(
            ConfigFile::load_from(&config_path).unwrap(),
            ConfigFile::default()
        );
    }
}
