//! Planar map-point projection.
//!
//! Geographic coordinates are projected onto a square Mercator plane of
//! [`WORLD_SIZE`] map units per side, the coordinate space mobile map kits
//! use for tile math. The projection is a pure function of (lat, long);
//! x grows eastward and y grows northward, so the "upper" corner of a
//! bounding box carries the larger y.

use geo::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Width and height of the projected world, in map units (2^28).
pub const WORLD_SIZE: f64 = 268_435_456.0;

/// Latitude limit of the square Mercator plane, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// A position on the projected plane, in map units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point shifted by the given map-unit offsets.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Project a geographic coordinate (x = longitude, y = latitude, degrees)
/// onto the map plane.
pub fn project(coordinate: Point) -> MapPoint {
    let long = coordinate.x();
    let lat = coordinate.y().clamp(-MAX_LATITUDE, MAX_LATITUDE);

    let x = (long + 180.0) / 360.0 * WORLD_SIZE;
    let merc = (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    let y = (merc / (2.0 * PI) + 0.5) * WORLD_SIZE;
    MapPoint::new(x, y)
}

/// Inverse of [`project`]: map units back to a geographic coordinate.
pub fn unproject(point: MapPoint) -> Point {
    let long = point.x / WORLD_SIZE * 360.0 - 180.0;
    let merc = (point.y / WORLD_SIZE - 0.5) * 2.0 * PI;
    let lat = (2.0 * merc.exp().atan() - FRAC_PI_2).to_degrees();
    Point::new(long, lat)
}
