//! Axis-aligned bounding boxes for range queries.

use geo::{coord, Point, Rect};
use serde::{Deserialize, Serialize};

/// A query rectangle over geographic coordinates.
///
/// Built from two opposite corners in any order; the underlying `geo::Rect`
/// normalizes them per axis, which is what makes corner order (and the
/// inverted sense of "upper" between screen and map coordinates) a non-issue
/// for callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    rect: Rect,
}

impl BoundingBox {
    /// Create a bounding box from two opposite corner coordinates
    /// (x = longitude, y = latitude).
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            rect: Rect::new(
                coord! { x: a.x(), y: a.y() },
                coord! { x: b.x(), y: b.y() },
            ),
        }
    }

    /// The south-west corner (minimum longitude and latitude).
    pub fn south_west(&self) -> Point {
        Point::new(self.rect.min().x, self.rect.min().y)
    }

    /// The north-east corner (maximum longitude and latitude).
    pub fn north_east(&self) -> Point {
        Point::new(self.rect.max().x, self.rect.max().y)
    }

    /// Check whether a coordinate lies within the box, boundaries included.
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x() >= self.rect.min().x
            && point.x() <= self.rect.max().x
            && point.y() >= self.rect.min().y
            && point.y() <= self.rect.max().y
    }
}
