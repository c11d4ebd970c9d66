//! Provider factory for centralized provider creation.
//!
//! Builds the place search and routing providers named in the config file
//! so the CLI and the coordinator service never construct them by hand.
//!
//! # Example
//!
//! ```ignore
//! use pathfinder::config::ConfigFile;
//! use pathfinder::provider::ProviderFactory;
//!
//! let factory = ProviderFactory::new(&ConfigFile::load()?);
//! let (search, route) = factory.create()?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use super::catalog::CampusCatalog;
use super::http::ReqwestClient;
use super::nominatim::NominatimProvider;
use super::osrm::OsrmProvider;
use super::types::ProviderError;
use crate::config::{ConfigFile, RouteSettings, SearchProviderKind, SearchSettings};
use crate::route::RouteProvider;
use crate::search::PlaceSearchProvider;

/// Creates providers from configuration.
#[derive(Debug, Clone)]
pub struct ProviderFactory {
    search: SearchSettings,
    route: RouteSettings,
}

impl ProviderFactory {
    /// Capture the provider-related sections of `config`.
    pub fn new(config: &ConfigFile) -> Self {
        Self {
            search: config.search.clone(),
            route: config.route.clone(),
        }
    }

    /// Build the configured place search provider.
    pub fn search_provider(&self) -> Result<Arc<dyn PlaceSearchProvider>, ProviderError> {
        match self.search.provider {
            SearchProviderKind::Nominatim => {
                let http = ReqwestClient::with_timeout(Duration::from_secs(self.search.timeout_secs))?;
                let provider = NominatimProvider::new(http, self.search.endpoint.clone())
                    .with_limit(self.search.max_results);
                tracing::debug!(endpoint = %self.search.endpoint, "Using Nominatim place search");
                Ok(Arc::new(provider))
            }
            SearchProviderKind::Catalog => {
                let path = self.search.catalog.as_ref().ok_or_else(|| {
                    ProviderError::Configuration(
                        "search.catalog must be set when search.provider = catalog".to_string(),
                    )
                })?;
                Ok(Arc::new(CampusCatalog::load(path)?))
            }
        }
    }

    /// Build the routing provider.
    pub fn route_provider(&self) -> Result<Arc<dyn RouteProvider>, ProviderError> {
        let http = ReqwestClient::with_timeout(Duration::from_secs(self.route.timeout_secs))?;
        tracing::debug!(endpoint = %self.route.endpoint, "Using OSRM routing");
        Ok(Arc::new(OsrmProvider::new(http, self.route.endpoint.clone())))
    }

    /// Build both providers.
    pub fn create(
        &self,
    ) -> Result<(Arc<dyn PlaceSearchProvider>, Arc<dyn RouteProvider>), ProviderError> {
        Ok((self.search_provider()?, self.route_provider()?))
    }
}
