//! The dual-axis spot index.
//!
//! Two balanced trees hold the same spot set: one ordered by projected x,
//! one by projected y. A bounding-box query takes the x-range candidates
//! from the first tree and keeps the y-range hits that also appear among
//! them, giving the rectangle intersection without a dedicated 2-D
//! structure.

use crate::tree::{AvlTree, FuzzyOrd};
use curbmap_types::approx::approx_less_than;
use curbmap_types::bbox::BoundingBox;
use curbmap_types::projection;
use curbmap_types::spot::{Spot, SPOT_EPSILON};
use geo::{Distance, Haversine, Point};
use log::{debug, info};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::mem;

/// A spot viewed through its x axis for tree ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XSpot(pub Spot);

/// A spot viewed through its y axis for tree ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YSpot(pub Spot);

impl YSpot {
    fn as_x(&self) -> XSpot {
        XSpot(self.0)
    }
}

impl FuzzyOrd for XSpot {
    fn fuzzy_cmp(&self, other: &Self) -> Ordering {
        if approx_less_than(self.0.x, other.0.x, SPOT_EPSILON) {
            Ordering::Less
        } else if approx_less_than(other.0.x, self.0.x, SPOT_EPSILON) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl FuzzyOrd for YSpot {
    fn fuzzy_cmp(&self, other: &Self) -> Ordering {
        if approx_less_than(self.0.y, other.0.y, SPOT_EPSILON) {
            Ordering::Less
        } else if approx_less_than(other.0.y, self.0.y, SPOT_EPSILON) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Index of known parking spots, queryable by bounding box.
///
/// Every mutation rewrites both trees before returning, so callers holding
/// the index can never observe one axis reflecting a change the other has
/// not. That guarantee rests on the exclusive `&mut self` borrow; anything
/// sharing an index across threads must wrap the whole index in a mutex so
/// the two-tree update stays a single critical section.
#[derive(Debug, Clone, Default)]
pub struct SpotIndex {
    by_x: AvlTree<XSpot>,
    by_y: AvlTree<YSpot>,
}

impl SpotIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// An index pre-seeded with the Cupertino demo spots.
    pub fn with_default_spots() -> Self {
        let mut index = Self::new();
        for coordinate in [
            Point::new(-122.03118, 37.33182),
            Point::new(-122.0350399, 37.3276574),
            Point::new(-122.0327043, 37.3315193),
        ] {
            index.add_spot(coordinate);
        }
        index
    }

    /// Number of indexed spots.
    pub fn len(&self) -> usize {
        self.by_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_x.is_empty()
    }

    /// Record a spot at the given coordinate (x = longitude, y = latitude).
    ///
    /// Re-adding a coordinate that rounds to an already-indexed map position
    /// leaves the index unchanged.
    pub fn add_spot(&mut self, coordinate: Point) {
        self.by_x = mem::take(&mut self.by_x).insert(XSpot(Spot::new(coordinate)));
        self.by_y = mem::take(&mut self.by_y).insert(YSpot(Spot::new(coordinate)));
    }

    /// All spots within the bounding box, boundaries included (with the
    /// same epsilon tolerance the trees order by).
    pub fn get_spots(&self, bbox: &BoundingBox) -> FxHashSet<Spot> {
        // Projection is monotonic on both axes, so the south-west and
        // north-east corners bound both tree ranges.
        let low = Spot::new(bbox.south_west());
        let high = Spot::new(bbox.north_east());

        let in_x_range = self.by_x.values_between(&XSpot(low), &XSpot(high));
        self.by_y
            .values_between_where(&YSpot(low), &YSpot(high), |spot| {
                in_x_range.contains(&spot.as_x())
            })
            .into_iter()
            .map(|spot| spot.0)
            .collect()
    }

    /// Remove the spot at this coordinate from both trees. A no-op if the
    /// coordinate does not match an indexed spot.
    pub fn remove_spot(&mut self, coordinate: Point) {
        let spot = Spot::new(coordinate);
        self.by_x = mem::take(&mut self.by_x).remove(&XSpot(spot));
        self.by_y = mem::take(&mut self.by_y).remove(&YSpot(spot));
    }

    /// Remove one spot within `radius` of the coordinate, if any qualifies.
    ///
    /// The radius bounds a map-unit box for the candidate query; candidates
    /// are then filtered by true geographic distance in meters. Among
    /// several qualifiers the first one found is removed, not the nearest.
    pub fn remove_spot_near(&mut self, coordinate: Point, radius: f64) {
        let center = projection::project(coordinate);
        let bbox = BoundingBox::from_corners(
            projection::unproject(center.offset(-radius, -radius)),
            projection::unproject(center.offset(radius, radius)),
        );

        let nearby = self.get_spots(&bbox);
        let candidate = nearby
            .iter()
            .find(|spot| Haversine.distance(coordinate, spot.coordinate()) <= radius)
            .copied();

        match candidate {
            Some(spot) => {
                info!("removing spot at {spot}");
                self.remove_spot(spot.coordinate());
            }
            None => debug!(
                "no spot within {radius} of ({}, {})",
                coordinate.y(),
                coordinate.x()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(a: (f64, f64), b: (f64, f64)) -> BoundingBox {
        // (lat, long) pairs, the order the wire format uses.
        BoundingBox::from_corners(Point::new(a.1, a.0), Point::new(b.1, b.0))
    }

    #[test]
    fn test_x_order_uses_epsilon() {
        let base = XSpot(Spot::new(Point::new(-122.0, 37.0)));
        let nudged = XSpot(Spot::new(Point::new(-122.0 + 1e-8, 37.0)));
        let far = XSpot(Spot::new(Point::new(-121.9, 37.0)));
        assert_eq!(base.fuzzy_cmp(&nudged), Ordering::Equal);
        assert_eq!(base.fuzzy_cmp(&far), Ordering::Less);
        assert_eq!(far.fuzzy_cmp(&base), Ordering::Greater);
    }

    #[test]
    fn test_readding_a_spot_does_not_grow_the_index() {
        let mut index = SpotIndex::new();
        index.add_spot(Point::new(-122.03118, 37.33182));
        index.add_spot(Point::new(-122.03118 + 1e-9, 37.33182 + 1e-9));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_x_aligned_spots_are_both_kept() {
        // Same longitude, clearly different latitudes: within epsilon on the
        // x axis but distinct spots.
        let mut index = SpotIndex::new();
        index.add_spot(Point::new(-122.0, 37.0));
        index.add_spot(Point::new(-122.0, 37.001));
        assert_eq!(index.len(), 2);

        let found = index.get_spots(&bbox((36.99, -122.01), (37.01, -121.99)));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_query_intersects_both_axes() {
        let mut index = SpotIndex::new();
        index.add_spot(Point::new(-122.0, 37.0)); // inside
        index.add_spot(Point::new(-122.0, 37.5)); // right x, wrong y
        index.add_spot(Point::new(-121.5, 37.0)); // right y, wrong x

        let found = index.get_spots(&bbox((36.9, -122.1), (37.1, -121.9)));
        assert_eq!(found.len(), 1);
        let spot = found.iter().next().unwrap();
        assert_eq!(spot.lat, 37.0);
        assert_eq!(spot.long, -122.0);
    }

    #[test]
    fn test_query_accepts_corners_in_any_order() {
        let index = SpotIndex::with_default_spots();
        let north_west_first = index.get_spots(&bbox((37.34, -122.04), (37.32, -122.02)));
        let south_east_first = index.get_spots(&bbox((37.32, -122.02), (37.34, -122.04)));
        assert_eq!(north_west_first.len(), 3);
        assert_eq!(north_west_first, south_east_first);
    }

    #[test]
    fn test_remove_spot_near_takes_first_found() {
        // Two candidates inside the radius: exactly one is removed. Which
        // one is unspecified ("first found", not nearest) -- kept as the
        // original behaves, not upgraded to nearest-wins.
        let mut index = SpotIndex::new();
        index.add_spot(Point::new(-122.0, 37.0));
        // ~2 map units west: a distinct spot well inside a 5-unit box.
        index.add_spot(Point::new(-122.000003, 37.0));
        let populated = index.len();
        assert_eq!(populated, 2);

        index.remove_spot_near(Point::new(-122.0, 37.0), 5.0);
        assert_eq!(index.len(), populated - 1);
    }

    #[test]
    fn test_remove_spot_near_misses_out_of_radius() {
        let mut index = SpotIndex::new();
        index.add_spot(Point::new(-122.0, 37.0));
        // ~1.1 km east of the only spot; a 5 m radius finds nothing.
        index.remove_spot_near(Point::new(-121.99, 37.0), 5.0);
        assert_eq!(index.len(), 1);
    }
}
