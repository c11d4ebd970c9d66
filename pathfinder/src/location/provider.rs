//! Location provider abstraction.

use futures::future::BoxFuture;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::geo::Position;

/// Stream of fixes from a started provider.
///
/// An `Err` item is terminal: the provider stops sending after it. A closed
/// channel means updates ended without a failure.
pub type PositionStream = mpsc::Receiver<Result<Position, LocationError>>;

/// Errors reported by a location provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user refused the location permission prompt.
    #[error("Location permission denied")]
    PermissionDenied,

    /// Hardware or platform failure.
    #[error("Location hardware unavailable: {0}")]
    Unavailable(String),

    /// The provider stopped delivering updates.
    #[error("Location updates ended")]
    Ended,
}

/// Platform location capability.
///
/// Implementations prompt for permission when needed and then deliver a
/// continuous sequence of fixes. No retries happen at this level.
pub trait LocationProvider: Send + Sync {
    /// Request permission and begin continuous updates.
    fn start_updates(&self) -> BoxFuture<'_, Result<PositionStream, LocationError>>;
}
