//! Request dispatch into the spot index.

use crate::http::{respond, Request, RequestKind};
use crate::socket::Listener;
use crate::wire::{format_spots, parse_coordinates};
use curbmap::{BoundingBox, SpotIndex};
use tracing::{debug, error, info, warn};

/// Removal radius applied to each POST REMOVE coordinate.
pub const REMOVAL_RADIUS: f64 = 5.0;

/// GET: the payload must decode to exactly two coordinates, the opposite
/// corners of the query box. Anything else earns the literal
/// `Invalid Get Request` body rather than a protocol error.
pub fn process_get(payload: &str, spots: &SpotIndex) -> String {
    let corners = match parse_coordinates(payload) {
        Ok(corners) if corners.len() == 2 => corners,
        Ok(_) | Err(_) => return "Invalid Get Request".to_string(),
    };

    let bbox = BoundingBox::from_corners(corners[0], corners[1]);
    format_spots(&spots.get_spots(&bbox))
}

/// POST: `COMMAND,lat,long[,lat,long...]`. ADD inserts every pair; REMOVE
/// clears one spot near each pair. A missing separator, a malformed
/// coordinate list, or an unknown keyword is logged and ignored -- the
/// client still gets a success body.
pub fn process_post(payload: &str, spots: &mut SpotIndex) {
    let Some((command, coordinate_csv)) = payload.split_once(',') else {
        warn!("POST payload {payload:?} has no command separator");
        return;
    };

    let coordinates = match parse_coordinates(coordinate_csv) {
        Ok(coordinates) => coordinates,
        Err(e) => {
            warn!("bad POST coordinate list: {e}");
            return;
        }
    };

    match command {
        "ADD" => {
            for coordinate in coordinates {
                spots.add_spot(coordinate);
            }
        }
        "REMOVE" => {
            for coordinate in coordinates {
                spots.remove_spot_near(coordinate, REMOVAL_RADIUS);
            }
        }
        other => warn!("unrecognized POST command {other:?}"),
    }
}

/// Route a parsed request to its processor and produce the response body.
pub fn dispatch(request: &Request, spots: &mut SpotIndex) -> String {
    match request.kind {
        RequestKind::Invalid => "Invalid request".to_string(),
        RequestKind::Get => process_get(&request.payload, spots),
        RequestKind::Post => {
            process_post(&request.payload, spots);
            "Post successful".to_string()
        }
    }
}

/// Serve one connection start to finish: accept, read, dispatch, respond,
/// close. Per-connection failures are logged and abandoned; the caller's
/// accept loop keeps going.
pub fn handle_connection(listener: &Listener, spots: &mut SpotIndex) {
    let Some(mut conn) = listener.accept() else {
        return;
    };

    match conn.peer_addr() {
        Some(addr) => info!("client connected from {addr}"),
        None => debug!("peer address unavailable"),
    }

    let request = Request::read(&mut conn);
    let body = dispatch(&request, spots);
    if let Err(e) = respond(&mut conn, &body) {
        error!("failed to send response: {e}");
    }
}
