//! Parking spots: geographic coordinates with index identity.

use crate::projection::{self, MapPoint};
use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Tolerance, in map units, below which two spots count as the same
/// position along an axis. Used both for tree-duplicate detection and for
/// range-boundary inclusion; GPS noise makes exact equality useless.
pub const SPOT_EPSILON: f64 = 10.0;

/// A parking spot: a geographic coordinate together with its projection
/// onto the map plane.
///
/// `x` and `y` are derived from (lat, long) through [`projection::project`]
/// and are never set independently.
///
/// Identity is deliberately fuzzy: two spots are equal when their projected
/// positions round to the same map unit, so re-reporting a spot from a noisy
/// GPS fix does not create a second entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Spot {
    /// Latitude, degrees.
    pub lat: f64,
    /// Longitude, degrees.
    pub long: f64,
    /// Projected x, map units.
    pub x: f64,
    /// Projected y, map units.
    pub y: f64,
}

impl Spot {
    /// Create a spot from a coordinate (x = longitude, y = latitude).
    pub fn new(coordinate: Point) -> Self {
        let MapPoint { x, y } = projection::project(coordinate);
        Self {
            lat: coordinate.y(),
            long: coordinate.x(),
            x,
            y,
        }
    }

    /// The geographic coordinate of this spot.
    pub fn coordinate(&self) -> Point {
        Point::new(self.long, self.lat)
    }

    /// The projected position of this spot.
    pub fn map_point(&self) -> MapPoint {
        MapPoint::new(self.x, self.y)
    }
}

impl PartialEq for Spot {
    fn eq(&self, other: &Self) -> bool {
        self.x.round() == other.x.round() && self.y.round() == other.y.round()
    }
}

impl Eq for Spot {}

impl Hash for Spot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.x.round() as i64).hash(state);
        (self.y.round() as i64).hash(state);
    }
}

impl fmt::Display for Spot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lat: {}, long: {}", self.lat, self.long)
    }
}
