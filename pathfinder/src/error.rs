//! User-visible failure taxonomy.
//!
//! Every variant is recoverable: a failure degrades one sub-feature of the
//! view state (no location, no suggestions, no route) while the rest stays
//! usable. Stale asynchronous results are not errors and never appear here.

use thiserror::Error;

use crate::location::LocationError;
use crate::route::RouteError;
use crate::search::SearchError;

/// Failure surfaced to the presentation layer through the view state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Permission denied or location hardware failure.
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    /// Place search provider error, timeout, or unresolvable suggestion.
    #[error("Search failed: {0}")]
    SearchFailed(String),

    /// No path between the endpoints, or routing provider error.
    #[error("Route unavailable: {0}")]
    RouteUnavailable(String),
}

impl From<LocationError> for NavigationError {
    fn from(e: LocationError) -> Self {
        NavigationError::LocationUnavailable(e.to_string())
    }
}

impl From<SearchError> for NavigationError {
    fn from(e: SearchError) -> Self {
        NavigationError::SearchFailed(e.to_string())
    }
}

impl From<RouteError> for NavigationError {
    fn from(e: RouteError) -> Self {
        NavigationError::RouteUnavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_error_maps_to_unavailable() {
        let err: NavigationError = LocationError::PermissionDenied.into();
        assert!(matches!(err, NavigationError::LocationUnavailable(_)));
        assert!(err.to_string().contains("permission"));
    }

    #[test]
    fn test_route_error_maps_to_route_unavailable() {
        let err: NavigationError = RouteError::NoRoute.into();
        assert!(matches!(err, NavigationError::RouteUnavailable(_)));
    }

    #[test]
    fn test_search_timeout_maps_to_search_failed() {
        let err: NavigationError = SearchError::Timeout(10).into();
        assert!(err.to_string().contains("Search failed"));
        assert!(err.to_string().contains("10"));
    }
}
