//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, runtime and provider
//! creation to reduce duplication across command handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use pathfinder::config::{config_file_path, ConfigFile};
use pathfinder::logging::{init_logging, LoggingGuard};
use pathfinder::provider::ProviderFactory;
use pathfinder::route::RouteProvider;
use pathfinder::search::PlaceSearchProvider;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
    /// Where the configuration was loaded from
    config_path: PathBuf,
}

impl CliRunner {
    /// Load config (from `config_path` or the default location) and
    /// initialize logging from its `[logging]` section.
    pub fn new(config_path: Option<&Path>) -> Result<Self, CliError> {
        let config_path = resolve_config_path(config_path);
        let config = ConfigFile::load_from(&config_path)?;

        let logging_guard = init_logging(
            &config.logging.directory,
            &config.logging.file,
            &config.logging.level,
        )
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
            config_path,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("Pathfinder v{}", env!("CARGO_PKG_VERSION"));
        info!(
            config = %self.config_path.display(),
            log = %self.logging_guard.log_path().display(),
            "Pathfinder CLI: {} command",
            command
        );
    }

    /// Build a multi-threaded tokio runtime for the command.
    pub fn runtime(&self) -> Result<tokio::runtime::Runtime, CliError> {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)
    }

    /// Create the configured place search provider.
    pub fn search_provider(&self) -> Result<Arc<dyn PlaceSearchProvider>, CliError> {
        let provider = ProviderFactory::new(&self.config).search_provider()?;
        info!(provider = provider.name(), "Place search provider ready");
        Ok(provider)
    }

    /// Create the configured routing provider.
    pub fn route_provider(&self) -> Result<Arc<dyn RouteProvider>, CliError> {
        let provider = ProviderFactory::new(&self.config).route_provider()?;
        info!(provider = provider.name(), "Routing provider ready");
        Ok(provider)
    }
}

/// The `--config` override, or `~/.pathfinder/config.ini`.
pub fn resolve_config_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path)
}
