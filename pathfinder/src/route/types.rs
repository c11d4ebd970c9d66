//! Route data types.

use thiserror::Error;

use crate::geo::{Coordinate, Position};
use crate::search::Destination;

/// Identifies which request a route result belongs to.
///
/// `destination` is the generation of the destination active when the
/// request was issued; `seq` orders requests for the same destination (a
/// refresh after the user moved issues a new `seq`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub destination: u64,
    pub seq: u64,
}

/// A route request issued by the coordinator.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub key: RouteKey,
    pub from: Position,
    pub to: Destination,
}

/// A driving route polyline and the endpoints it was computed for.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Ordered polyline, source first.
    pub coordinates: Vec<Coordinate>,
    /// Source coordinate the route was computed from.
    pub source: Coordinate,
    /// Destination coordinate the route was computed to.
    pub destination: Coordinate,
    /// Total length in meters, when the provider reports it.
    pub distance_m: Option<f64>,
    /// Expected travel time in seconds, when the provider reports it.
    pub duration_s: Option<f64>,
}

impl Route {
    /// Create a route from a polyline.
    pub fn new(coordinates: Vec<Coordinate>, source: Coordinate, destination: Coordinate) -> Self {
        Self {
            coordinates,
            source,
            destination,
            distance_m: None,
            duration_s: None,
        }
    }

    /// Set provider-reported distance and duration.
    pub fn with_summary(mut self, distance_m: f64, duration_s: f64) -> Self {
        self.distance_m = Some(distance_m);
        self.duration_s = Some(duration_s);
        self
    }

    /// Length of the polyline in meters, summed segment by segment.
    pub fn polyline_length_m(&self) -> f64 {
        self.coordinates
            .windows(2)
            .map(|w| w[0].distance_m(&w[1]))
            .sum()
    }
}

/// Route failures. All are recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The provider found no path between the endpoints.
    #[error("No route found")]
    NoRoute,

    /// Provider transport or protocol error.
    #[error("Routing provider error: {0}")]
    Provider(String),

    /// The provider did not answer within the timeout (milliseconds).
    #[error("Route request timed out after {0} ms")]
    Timeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_length() {
        let a = Coordinate::new(30.0, -96.0);
        let b = Coordinate::new(30.001, -96.0);
        let c = Coordinate::new(30.002, -96.0);
        let route = Route::new(vec![a, b, c], a, c);

        let expected = a.distance_m(&c);
        assert!((route.polyline_length_m() - expected).abs() < 0.01);
    }

    #[test]
    fn test_empty_polyline_has_zero_length() {
        let a = Coordinate::new(30.0, -96.0);
        assert_eq!(Route::new(Vec::new(), a, a).polyline_length_m(), 0.0);
    }
}
