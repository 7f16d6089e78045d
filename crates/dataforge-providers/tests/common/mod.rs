// crates/dataforge-providers/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared loopback HTTP helpers for provider client tests.
// Purpose: Serve canned responses and capture the requests clients send.
// Dependencies: tiny_http
// ============================================================================

//! ## Overview
//! Spins up single-request loopback servers with canned status codes and
//! bodies, returning the captured request (method, path, headers, body) for
//! assertions.

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::net::TcpListener;
use std::thread;

use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Captured Requests
// ============================================================================

/// A request captured by a loopback server.
pub struct CapturedRequest {
    /// HTTP method.
    pub method: String,
    /// Request path including the query string.
    pub url: String,
    /// Header fields as (name, value) pairs.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: String,
}

impl CapturedRequest {
    /// Returns a header value by case-insensitive field name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

// ============================================================================
// SECTION: Loopback Servers
// ============================================================================

/// Serves exactly one request with the given status and body, returning the
/// base URL and a handle resolving to the captured request.
pub fn serve_once(
    status: u16,
    body: String,
) -> (String, thread::JoinHandle<Option<CapturedRequest>>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let url = format!("http://{addr}");
    let handle = thread::spawn(move || {
        let mut request = server.recv().ok()?;
        let mut content = String::new();
        request.as_reader().read_to_string(&mut content).ok()?;
        let captured = CapturedRequest {
            method: request.method().to_string(),
            url: request.url().to_string(),
            headers: request
                .headers()
                .iter()
                .map(|header| (header.field.to_string(), header.value.to_string()))
                .collect(),
            body: content,
        };
        let response = Response::from_string(body).with_status_code(status);
        let _ = request.respond(response);
        Some(captured)
    });
    (url, handle)
}

/// Returns a base URL nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
