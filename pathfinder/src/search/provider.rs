//! Place search provider abstraction.

use futures::future::BoxFuture;

use super::types::{Destination, PlaceSuggestion, SearchError};

/// External place-search capability.
///
/// Implementations talk to a geocoding backend (or a local catalogue). They
/// do not debounce, sequence or time out; the client layers that on top.
pub trait PlaceSearchProvider: Send + Sync {
    /// Short provider name for logging.
    fn name(&self) -> &str;

    /// Ordered suggestions for a free-text query.
    fn complete(&self, text: String) -> BoxFuture<'_, Result<Vec<PlaceSuggestion>, SearchError>>;

    /// Resolve a suggestion to a coordinate.
    ///
    /// Fails with [`SearchError::NotFound`] when the handle no longer maps to
    /// a place.
    fn resolve(&self, suggestion: PlaceSuggestion)
        -> BoxFuture<'_, Result<Destination, SearchError>>;
}
