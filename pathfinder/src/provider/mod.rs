//! Concrete place search and routing providers.
//!
//! Online providers talk HTTP through the [`HttpClient`] abstraction so
//! response parsing is tested against canned bodies. The building catalogue
//! works offline from a JSON file.
//!
//! # Factory Pattern
//!
//! For creating providers from configuration, use the [`ProviderFactory`]:
//!
//! ```ignore
//! use pathfinder::provider::ProviderFactory;
//!
//! let (search, route) = ProviderFactory::new(&config).create()?;
//! ```

mod catalog;
mod factory;
mod http;
mod nominatim;
mod osrm;
mod types;

pub use catalog::{Building, CampusCatalog};
pub use factory::ProviderFactory;
pub use http::{HttpClient, ReqwestClient, DEFAULT_HTTP_TIMEOUT, DEFAULT_USER_AGENT};
pub use nominatim::{NominatimProvider, DEFAULT_NOMINATIM_LIMIT};
pub use osrm::OsrmProvider;
pub use types::ProviderError;

#[cfg(test)]
pub use http::tests::MockHttpClient;
