//! Geographic primitives shared by every component.
//!
//! Provides the coordinate/position types exchanged between the location,
//! search and routing collaborators, plus the small amount of spherical
//! math the coordinator needs (distance for route refresh, square viewport
//! regions for the map camera).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Meters per degree of latitude (approximately constant).
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// A latitude/longitude pair in degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and inside the valid WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to another coordinate in meters (haversine).
    pub fn distance_m(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}°, {:.5}°", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = String;

    /// Parse `"lat,lon"` (whitespace around either part is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected 'lat,lon', got '{}'", s))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;

        let coord = Coordinate::new(latitude, longitude);
        if !coord.is_valid() {
            return Err(format!("coordinate out of range: {}", s));
        }
        Ok(coord)
    }
}

/// A device position fix.
///
/// Produced by the location tracker and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Where the device is.
    pub coordinate: Coordinate,
    /// Horizontal accuracy radius in meters, when the platform reports one.
    pub accuracy_m: Option<f64>,
    /// When the fix was taken, when the platform reports it.
    pub timestamp: Option<DateTime<Utc>>,
}

impl Position {
    /// Create a position without accuracy or timestamp metadata.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinate: Coordinate::new(latitude, longitude),
            accuracy_m: None,
            timestamp: None,
        }
    }

    /// Set the accuracy radius.
    pub fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.accuracy_m = Some(accuracy_m);
        self
    }

    /// Set the fix timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Stamp the fix with the current wall-clock time.
    pub fn stamped_now(self) -> Self {
        self.with_timestamp(Utc::now())
    }

    /// Distance to another position in meters.
    pub fn distance_m(&self, other: &Position) -> f64 {
        self.coordinate.distance_m(&other.coordinate)
    }
}

/// Visible map region: a center plus its extent in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Center of the region.
    pub center: Coordinate,
    /// North-south extent in meters.
    pub height_m: f64,
    /// East-west extent in meters.
    pub width_m: f64,
}

impl Region {
    /// A square region of `edge_m` meters centered on `center`.
    pub fn square(center: Coordinate, edge_m: f64) -> Self {
        Self {
            center,
            height_m: edge_m,
            width_m: edge_m,
        }
    }

    /// Latitude span in degrees.
    pub fn latitude_delta(&self) -> f64 {
        self.height_m / METERS_PER_DEG_LAT
    }

    /// Longitude span in degrees at the region's latitude.
    pub fn longitude_delta(&self) -> f64 {
        let cos_lat = self.center.latitude.to_radians().cos().abs().max(1e-6);
        self.width_m / (METERS_PER_DEG_LAT * cos_lat)
    }

    /// Whether a coordinate falls inside the region.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        let half_lat = self.latitude_delta() / 2.0;
        let half_lon = self.longitude_delta() / 2.0;
        (coord.latitude - self.center.latitude).abs() <= half_lat
            && (coord.longitude - self.center.longitude).abs() <= half_lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_for_same_point() {
        let a = Coordinate::new(30.6187, -96.3365);
        assert!(a.distance_m(&a).abs() < 1e-6);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let a = Coordinate::new(30.0, -96.0);
        let b = Coordinate::new(31.0, -96.0);
        let d = a.distance_m(&b);
        assert!((d - 111_195.0).abs() < 200.0, "got {}", d);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinate::new(30.6187, -96.3365);
        let b = Coordinate::new(30.6280, -96.3344);
        assert!((a.distance_m(&b) - b.distance_m(&a)).abs() < 1e-9);
    }

    #[test]
    fn test_parse_coordinate() {
        let c: Coordinate = " 30.6187 , -96.3365 ".parse().unwrap();
        assert_eq!(c, Coordinate::new(30.6187, -96.3365));
    }

    #[test]
    fn test_parse_coordinate_rejects_garbage() {
        assert!("30.6".parse::<Coordinate>().is_err());
        assert!("abc,1.0".parse::<Coordinate>().is_err());
        assert!("91.0,0.0".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_square_region_contains_center_and_edges() {
        let center = Coordinate::new(30.6187, -96.3365);
        let region = Region::square(center, 1000.0);

        assert!(region.contains(&center));
        // ~400m north stays inside a 1km box
        assert!(region.contains(&Coordinate::new(30.6223, -96.3365)));
        // ~1km north does not
        assert!(!region.contains(&Coordinate::new(30.6277, -96.3365)));
    }

    #[test]
    fn test_longitude_delta_widens_with_latitude() {
        let equator = Region::square(Coordinate::new(0.0, 0.0), 1000.0);
        let north = Region::square(Coordinate::new(60.0, 0.0), 1000.0);
        assert!(north.longitude_delta() > equator.longitude_delta() * 1.9);
    }

    #[test]
    fn test_position_builders() {
        let p = Position::new(1.0, 2.0).with_accuracy(5.0);
        assert_eq!(p.accuracy_m, Some(5.0));
        assert!(p.timestamp.is_none());
        assert!(p.stamped_now().timestamp.is_some());
    }
}
