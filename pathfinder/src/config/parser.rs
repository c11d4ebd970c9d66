//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [search] section
    if let Some(section) = ini.section(Some("search")) {
        if let Some(v) = section.get("provider") {
            config.search.provider = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "search".to_string(),
                key: "provider".to_string(),
                value: v.to_string(),
                reason: "must be one of: nominatim, catalog".to_string(),
            })?;
        }
        if let Some(v) = section.get("endpoint") {
            config.search.endpoint = parse_url("search", "endpoint", v)?;
        }
        if let Some(v) = section.get("catalog") {
            let v = v.trim();
            config.search.catalog = if v.is_empty() {
                None
            } else {
                Some(expand_tilde(v))
            };
        }
        if let Some(v) = section.get("debounce_ms") {
            config.search.debounce_ms =
                parse_number("search", "debounce_ms", v, "must be an integer (milliseconds)")?;
        }
        if let Some(v) = section.get("timeout_secs") {
            config.search.timeout_secs = parse_positive("search", "timeout_secs", v, "seconds")?;
        }
        if let Some(v) = section.get("max_results") {
            config.search.max_results = parse_positive("search", "max_results", v, "suggestions")?;
        }
    }

    // [route] section
    if let Some(section) = ini.section(Some("route")) {
        if let Some(v) = section.get("endpoint") {
            config.route.endpoint = parse_url("route", "endpoint", v)?;
        }
        if let Some(v) = section.get("timeout_secs") {
            config.route.timeout_secs = parse_positive("route", "timeout_secs", v, "seconds")?;
        }
        if let Some(v) = section.get("reroute_distance_m") {
            config.route.reroute_distance_m = parse_meters("route", "reroute_distance_m", v)?;
        }
    }

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = section.get("viewport_m") {
            config.map.viewport_m = parse_meters("map", "viewport_m", v)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
        if let Some(v) = section.get("level") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.level = v.to_string();
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: impl Into<String>) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_number<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, reason))
}

fn parse_positive<T>(section: &str, key: &str, value: &str, unit: &str) -> Result<T, ConfigFileError>
where
    T: FromStr + PartialOrd + Default,
{
    let reason = format!("must be a positive integer ({})", unit);
    let parsed: T = parse_number(section, key, value, &reason)?;
    if parsed <= T::default() {
        return Err(invalid(section, key, value, reason));
    }
    Ok(parsed)
}

fn parse_meters(section: &str, key: &str, value: &str) -> Result<f64, ConfigFileError> {
    let reason = "must be a positive number (meters)";
    let parsed: f64 = parse_number(section, key, value, reason)?;
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err(invalid(section, key, value, reason));
    }
    Ok(parsed)
}

fn parse_url(section: &str, key: &str, value: &str) -> Result<String, ConfigFileError> {
    let v = value.trim().trim_end_matches('/');
    reqwest::Url::parse(v).map_err(|e| invalid(section, key, value, e.to_string()))?;
    Ok(v.to_string())
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use crate::config::SearchProviderKind;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_invalid_provider() {
        let err = load("[search]\nprovider = bing\n").unwrap_err();
        assert!(err.to_string().contains("must be one of:"));
        assert!(err.to_string().contains("search.provider"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = load("[route]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::InvalidValue { ref key, .. } if key == "timeout_secs"
        ));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let err = load("[search]\nendpoint = not a url\n").unwrap_err();
        assert!(err.to_string().contains("search.endpoint"));
    }

    #[test]
    fn test_negative_viewport_rejected() {
        assert!(load("[map]\nviewport_m = -5\n").is_err());
        assert!(load("[map]\nviewport_m = wide\n").is_err());
    }

    #[test]
    fn test_zero_debounce_allowed() {
        let config = load("[search]\ndebounce_ms = 0\n").unwrap();
        assert_eq!(config.search.debounce_ms, 0);
    }

    #[test]
    fn test_partial_config() {
        let config = load(
            r#"
[search]
provider = Catalog
catalog = /srv/campus/buildings.json
max_results = 5

[route]
endpoint = http://localhost:5000/
reroute_distance_m = 25.5
"#,
        )
        .unwrap();

        // Specified values
        assert_eq!(config.search.provider, SearchProviderKind::Catalog);
        assert_eq!(
            config.search.catalog,
            Some(PathBuf::from("/srv/campus/buildings.json"))
        );
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.route.endpoint, "http://localhost:5000");
        assert_eq!(config.route.reroute_distance_m, 25.5);

        // Default values
        assert_eq!(config.search.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert_eq!(config.map.viewport_m, DEFAULT_VIEWPORT_M);
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/campus/buildings.json");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("campus/buildings.json"));
        }

        let path = expand_tilde("/absolute/path");
        assert_eq!(path, PathBuf::from("/absolute/path"));
    }
}
