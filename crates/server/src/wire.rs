//! The comma-separated coordinate codec.
//!
//! Both directions of the wire format live here: `lat,long,lat,long,...`
//! in request payloads, and the same shape back out in GET response bodies.
//! Latitude comes first on the wire; `geo::Point` stores (x = longitude,
//! y = latitude), so the swap happens at this boundary and nowhere else.

use curbmap_types::spot::Spot;
use geo::Point;
use rustc_hash::FxHashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum WireError {
    #[error("unparseable coordinate value {value:?}")]
    BadNumber { value: String },
    #[error("coordinate list has an odd number of values")]
    OddCount,
}

/// Decode a CSV of alternating latitude and longitude values into points.
pub fn parse_coordinates(payload: &str) -> Result<Vec<Point>, WireError> {
    let values = payload
        .split(',')
        .map(|raw| {
            raw.trim().parse::<f64>().map_err(|_| WireError::BadNumber {
                value: raw.to_string(),
            })
        })
        .collect::<Result<Vec<f64>, WireError>>()?;

    if values.len() % 2 != 0 {
        return Err(WireError::OddCount);
    }

    Ok(values
        .chunks(2)
        .map(|pair| Point::new(pair[1], pair[0]))
        .collect())
}

/// Encode spots as `lat,long` pairs joined by commas. An empty set encodes
/// as the empty string; pair order is unspecified.
pub fn format_spots(spots: &FxHashSet<Spot>) -> String {
    spots
        .iter()
        .map(|spot| format!("{},{}", spot.lat, spot.long))
        .collect::<Vec<String>>()
        .join(",")
}
