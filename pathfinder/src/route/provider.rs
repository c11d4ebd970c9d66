//! Routing provider abstraction.

use futures::future::BoxFuture;

use super::types::{Route, RouteError};
use crate::geo::Coordinate;

/// External turn-by-turn routing capability, used here only for the
/// driving polyline between two points.
pub trait RouteProvider: Send + Sync {
    /// Short provider name for logging.
    fn name(&self) -> &str;

    /// Compute a driving route from `from` to `to`.
    ///
    /// Returns [`RouteError::NoRoute`] when the provider finds no path.
    fn route(&self, from: Coordinate, to: Coordinate) -> BoxFuture<'_, Result<Route, RouteError>>;
}
