//! Configuration for the navigation coordinator.
//!
//! The user-facing INI file (`~/.pathfinder/config.ini`) is loaded into a
//! [`ConfigFile`], which [`CoordinatorConfig::from_config_file`] turns into
//! the runtime values the coordinator and its clients use.
//!
//! # Example
//!
//! ```
//! use pathfinder::config::{ConfigFile, CoordinatorConfig};
//!
//! let file = ConfigFile::default();
//! let config = CoordinatorConfig::from_config_file(&file);
//! assert_eq!(config.search.debounce.as_millis(), 250);
//! ```

mod defaults;
mod file;
mod parser;
mod runtime;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use runtime::CoordinatorConfig;
pub use settings::{
    ConfigFile, LoggingSettings, MapSettings, RouteSettings, SearchProviderKind, SearchSettings,
};
