//! Blocking socket transport.
//!
//! Thin wrappers around `std::net` that expose exactly what the protocol
//! layer needs: accept, line-oriented reads, whole-buffer writes with
//! partial-write retry, and the peer address for logging. Nothing in here
//! parses HTTP.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("connection closed before the full response was written")]
    Closed,
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),
}

/// A bound, listening server socket.
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Bind and start listening. A failure here is fatal to the caller;
    /// there is no supervisor to recover from a port that will not bind.
    pub fn bind(host: &str, port: u16) -> Result<Self, TransportError> {
        let addr = format!("{host}:{port}");
        let inner =
            TcpListener::bind(&addr).map_err(|source| TransportError::Bind { addr, source })?;
        Ok(Self { inner })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.inner.local_addr().ok()
    }

    /// Block until a client connects. A transient accept failure is logged
    /// and reported as `None`; the accept loop carries on.
    pub fn accept(&self) -> Option<Connection> {
        match self.inner.accept() {
            Ok((stream, _)) => Some(Connection { stream }),
            Err(e) => {
                error!("accept failed: {e}");
                None
            }
        }
    }
}

/// One accepted client connection. Closed on drop.
pub struct Connection {
    stream: TcpStream,
}

impl Connection {
    /// The peer's IP as a numeric string, for logging.
    pub fn peer_addr(&self) -> Option<String> {
        self.stream.peer_addr().ok().map(|addr| addr.ip().to_string())
    }

    /// Read bytes one at a time until a newline, returning the line with
    /// its terminator. `None` on read error or end of stream; a partial
    /// line interrupted by either is dropped, signaling end-of-request.
    pub fn read_line(&mut self) -> Option<String> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match self.stream.read(&mut byte) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {
                    line.push(byte[0]);
                    if byte[0] == b'\n' {
                        break;
                    }
                }
            }
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Write the whole buffer, retrying partial writes by advancing an
    /// offset. A zero-length write means the peer is gone and aborts the
    /// send; there is no backoff and no retry cap.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let mut sent = 0;
        while sent < bytes.len() {
            match self.stream.write(&bytes[sent..]) {
                Ok(0) => return Err(TransportError::Closed),
                Ok(n) => sent += n,
                Err(e) => return Err(TransportError::Write(e)),
            }
        }
        Ok(())
    }
}
