//! Dual-axis spatial index over 2-D parking spots.
//!
//! Two height-balanced trees hold the same spot set, one ordered by
//! projected x and one by projected y; a bounding-box query intersects the
//! two axis ranges. Comparisons are epsilon-aware throughout, so GPS noise
//! neither duplicates spots nor drops boundary hits.
//!
//! ```rust
//! use curbmap::{BoundingBox, Point, SpotIndex};
//!
//! let mut index = SpotIndex::new();
//! index.add_spot(Point::new(-122.03118, 37.33182));
//!
//! let bbox = BoundingBox::from_corners(
//!     Point::new(-122.04, 37.34),
//!     Point::new(-122.02, 37.32),
//! );
//! assert_eq!(index.get_spots(&bbox).len(), 1);
//! ```

pub mod spots;
pub mod tree;

pub use spots::{SpotIndex, XSpot, YSpot};
pub use tree::{AvlTree, FuzzyOrd};

pub use curbmap_types::bbox::BoundingBox;
pub use curbmap_types::spot::{Spot, SPOT_EPSILON};

pub use geo::Point;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
