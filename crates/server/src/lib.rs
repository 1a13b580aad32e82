//! curbmap server
//!
//! A deliberately minimal HTTP front end over blocking sockets: one accept
//! loop, one connection at a time, bytes read off the wire one line at a
//! time. No HTTP framework and no async runtime -- the protocol here is
//! four modules deep and small enough to hold in your head.
//!
//! - [`socket`]: listen/accept plus line reads and retried writes
//! - [`http`]: request parsing and the fixed `200 OK` response
//! - [`wire`]: the comma-separated coordinate codec
//! - [`handler`]: GET/POST dispatch into the spot index
//!
//! # Example
//!
//! ```no_run
//! use curbmap::SpotIndex;
//! use curbmap_server::{handle_connection, Listener};
//!
//! # fn main() -> Result<(), curbmap_server::TransportError> {
//! let listener = Listener::bind("0.0.0.0", 3000)?;
//! let mut spots = SpotIndex::with_default_spots();
//! loop {
//!     handle_connection(&listener, &mut spots);
//! }
//! # }
//! ```

pub mod handler;
pub mod http;
pub mod socket;
pub mod wire;

pub use handler::handle_connection;
pub use socket::{Connection, Listener, TransportError};
