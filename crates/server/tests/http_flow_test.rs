//! Full request/response exchanges over real sockets.

use curbmap::SpotIndex;
use curbmap_server::{handle_connection, Listener};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;

/// Start a server on an ephemeral port that serves exactly `requests`
/// connections, seeded or empty.
fn spawn_server(requests: usize, seed: bool) -> SocketAddr {
    let listener = Listener::bind("127.0.0.1", 0).expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        let mut spots = if seed {
            SpotIndex::with_default_spots()
        } else {
            SpotIndex::new()
        };
        for _ in 0..requests {
            handle_connection(&listener, &mut spots);
        }
    });
    addr
}

/// Send a raw request and return the response body (everything after the
/// first blank line).
fn exchange(addr: SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream.write_all(raw.as_bytes()).expect("send request");

    let mut response = String::new();
    stream.read_to_string(&mut response).expect("read response");
    assert!(
        response.starts_with("HTTP/1.1 200 OK"),
        "unexpected status in {response:?}"
    );
    response
        .split_once("\n\n")
        .map(|(_, body)| body.to_string())
        .unwrap_or_default()
}

fn get(addr: SocketAddr, payload: &str) -> String {
    exchange(
        addr,
        &format!("GET /{payload} HTTP/1.1\r\nHost: localhost\r\n\r\n"),
    )
}

fn post(addr: SocketAddr, payload: &str) -> String {
    exchange(
        addr,
        &format!("POST /{payload} HTTP/1.1\r\nHost: localhost\r\n\r\n"),
    )
}

/// Parse a GET body back into (lat, long) pairs.
fn parse_pairs(body: &str) -> Vec<(f64, f64)> {
    if body.is_empty() {
        return Vec::new();
    }
    let values: Vec<f64> = body
        .split(',')
        .map(|v| v.parse().expect("numeric body value"))
        .collect();
    assert_eq!(values.len() % 2, 0, "odd value count in {body:?}");
    values.chunks(2).map(|pair| (pair[0], pair[1])).collect()
}

#[test]
fn test_get_returns_seeded_spots() {
    let addr = spawn_server(1, true);
    let pairs = parse_pairs(&get(addr, "37.34,-122.04,37.32,-122.02"));
    assert_eq!(pairs.len(), 3);
    assert!(pairs.contains(&(37.33182, -122.03118)));
}

#[test]
fn test_add_query_remove_lifecycle() {
    let addr = spawn_server(4, false);

    assert_eq!(post(addr, "ADD,37.0,-122.0"), "Post successful");

    let pairs = parse_pairs(&get(addr, "37.1,-122.1,36.9,-121.9"));
    assert_eq!(pairs, vec![(37.0, -122.0)]);

    assert_eq!(post(addr, "REMOVE,37.0,-122.0"), "Post successful");

    let pairs = parse_pairs(&get(addr, "37.1,-122.1,36.9,-121.9"));
    assert!(pairs.is_empty());
}

#[test]
fn test_malformed_get_payload() {
    let addr = spawn_server(1, true);
    assert_eq!(get(addr, "37.0,-122.0,36.9"), "Invalid Get Request");
}

#[test]
fn test_unsupported_method() {
    let addr = spawn_server(1, true);
    let body = exchange(addr, "PUT /1,2,3,4 HTTP/1.1\r\n\r\n");
    assert_eq!(body, "Invalid request");
}

#[test]
fn test_unknown_post_command_still_succeeds() {
    let addr = spawn_server(2, true);
    assert_eq!(post(addr, "UPSERT,37.0,-122.0"), "Post successful");
    // The index is untouched: all three seeds still answer.
    let pairs = parse_pairs(&get(addr, "37.34,-122.04,37.32,-122.02"));
    assert_eq!(pairs.len(), 3);
}

#[test]
fn test_truncated_request_is_invalid() {
    let addr = spawn_server(1, true);
    // Request line only; closing the write half ends the stream before a
    // blank line ever arrives.
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .write_all(b"GET /1,2,3,4 HTTP/1.1\r\n")
        .expect("send partial request");
    stream
        .shutdown(std::net::Shutdown::Write)
        .expect("half-close");

    let mut response = String::new();
    stream.read_to_string(&mut response).expect("read response");
    assert!(response.ends_with("Invalid request"));
}
