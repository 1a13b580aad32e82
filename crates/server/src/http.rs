//! Hand-rolled HTTP request parsing and response writing.
//!
//! Only the sliver of HTTP this server speaks: a request line, `name:value`
//! headers up to a blank line, and a fixed `200 OK` response. Anything that
//! is not a well-formed GET or POST becomes an `Invalid` request rather
//! than an error; the body tells the client what went wrong.

use crate::socket::{Connection, TransportError};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Get,
    Post,
    Invalid,
}

/// A parsed request: method, command payload, and headers. One per
/// connection, dropped once the response is sent.
#[derive(Debug)]
pub struct Request {
    pub kind: RequestKind,
    /// The request target with surrounding punctuation stripped -- the
    /// coordinate payload for GET, `COMMAND,coords...` for POST.
    pub payload: String,
    /// Header map; a repeated header name keeps the last value.
    pub headers: HashMap<String, String>,
}

impl Request {
    /// Read one request off the connection: lines up to and including the
    /// blank terminator, or until the stream ends.
    pub fn read(conn: &mut Connection) -> Self {
        let mut lines = Vec::new();
        while let Some(line) = conn.read_line() {
            let blank = line.trim_end_matches(['\r', '\n']).is_empty();
            lines.push(line);
            if blank {
                break;
            }
        }
        Self::from_lines(&lines)
    }

    /// Parse raw request lines. A request needs at least its request line
    /// and the blank terminator; anything shorter was cut off by the peer
    /// and is invalid with an empty payload.
    pub fn from_lines(lines: &[String]) -> Self {
        if lines.len() < 2 {
            return Self::invalid();
        }

        let mut parts = lines[0].split_whitespace();
        let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
            return Self::invalid();
        };
        let payload = target
            .trim_matches(|c: char| c.is_ascii_punctuation())
            .to_string();

        let mut headers = HashMap::new();
        for line in &lines[1..] {
            // Lines without a colon are ignored, not rejected.
            if let Some((name, value)) = line.split_once(':') {
                headers.insert(
                    name.trim().to_string(),
                    value.trim_end_matches(['\r', '\n']).trim().to_string(),
                );
            }
        }

        let kind = match method {
            "GET" => RequestKind::Get,
            "POST" => RequestKind::Post,
            other => {
                debug!("unsupported method {other:?}");
                RequestKind::Invalid
            }
        };

        Self {
            kind,
            payload,
            headers,
        }
    }

    fn invalid() -> Self {
        Self {
            kind: RequestKind::Invalid,
            payload: String::new(),
            headers: HashMap::new(),
        }
    }
}

/// Send the response: always `200 OK`, a blank line, then the body. This
/// layer never emits any other status; failures are reported in the body.
pub fn respond(conn: &mut Connection, body: &str) -> Result<(), TransportError> {
    let response = format!("HTTP/1.1 200 OK\n\n{body}");
    conn.write_all(response.as_bytes())
}
