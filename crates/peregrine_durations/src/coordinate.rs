use geo::{Bearing, Distance, Haversine};
use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair.
///
/// Equality is exact: two coordinates name the same place only when both
/// fields compare equal, with no tolerance. Use [`Coordinate::key`] where a
/// hashable identity is needed.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `to`, in meters.
    pub fn haversine_distance(&self, to: &Coordinate) -> f64 {
        let haversine = Haversine;

        haversine.distance(self.point(), to.point())
    }

    /// Great-circle distance to `to`, in kilometers.
    pub fn haversine_distance_km(&self, to: &Coordinate) -> f64 {
        self.haversine_distance(to) / 1000.0
    }

    /// Initial bearing towards `dest`, in degrees clockwise from north.
    pub fn bearing(&self, dest: &Coordinate) -> f64 {
        let haversine = Haversine;

        haversine.bearing(self.point(), dest.point())
    }

    /// Identity derived from the bit patterns of both fields.
    pub fn key(&self) -> CoordKey {
        CoordKey {
            latitude_bits: self.latitude.to_bits(),
            longitude_bits: self.longitude.to_bits(),
        }
    }

    fn point(&self) -> geo::Point {
        geo::Point::new(self.longitude, self.latitude)
    }
}

/// Hashable identity of a [`Coordinate`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CoordKey {
    latitude_bits: u64,
    longitude_bits: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_distance_geneva_zurich() {
        let geneva = Coordinate::new(46.2044, 6.1432);
        let zurich = Coordinate::new(47.3769, 8.5417);

        let distance_km = geneva.haversine_distance_km(&zurich);

        assert!((distance_km - 224.0).abs() < 5.0, "got {distance_km} km");
    }

    #[test]
    fn distance_to_self_is_zero() {
        let geneva = Coordinate::new(46.2044, 6.1432);

        assert_eq!(geneva.haversine_distance(&geneva), 0.0);
    }

    #[test]
    fn keys_distinguish_nearby_coordinates() {
        let a = Coordinate::new(46.2044, 6.1432);
        let b = Coordinate::new(46.2044, 6.1433);

        assert_eq!(a.key(), a.key());
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn bearing_points_roughly_north() {
        let from = Coordinate::new(46.0, 6.0);
        let to = Coordinate::new(47.0, 6.0);

        let bearing = from.bearing(&to).rem_euclid(360.0);

        assert!(bearing < 1.0 || bearing > 359.0, "got {bearing}");
    }
}
