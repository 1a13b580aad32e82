//! # curbmap-types
//!
//! Core spatial data types for the curbmap parking-spot index.
//!
//! This crate provides the fundamental types shared by the index engine and
//! the server front end:
//!
//! - **Projection**: lat/long degrees to planar map units and back
//! - **Spots**: [`spot::Spot`], a coordinate plus its projected position,
//!   with GPS-noise-tolerant identity
//! - **Bounding boxes**: [`bbox::BoundingBox`], a query rectangle built from
//!   two opposite corners
//! - **Approximate comparison**: the epsilon comparison kernel in [`approx`]
//!
//! All types are serializable with Serde and built on top of the `geo`
//! crate's geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use curbmap_types::bbox::BoundingBox;
//! use curbmap_types::spot::Spot;
//! use geo::Point;
//!
//! // A parking spot near Cupertino; points are (longitude, latitude).
//! let spot = Spot::new(Point::new(-122.03118, 37.33182));
//!
//! let bbox = BoundingBox::from_corners(
//!     Point::new(-122.04, 37.34),
//!     Point::new(-122.02, 37.32),
//! );
//! assert!(bbox.contains_point(&spot.coordinate()));
//! ```

pub mod approx;
pub mod bbox;
pub mod projection;
pub mod spot;
