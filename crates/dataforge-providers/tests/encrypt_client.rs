// crates/dataforge-providers/tests/encrypt_client.rs
// ============================================================================
// Module: Encryption Client Tests
// Description: Verifies request shape and fail-closed behavior of the encryptor.
// ============================================================================
//! ## Overview
//! Ensures the client posts the documented request shape, returns the
//! response body verbatim as ciphertext, and resolves unreachable endpoints,
//! non-success statuses, and policy violations to `Unavailable`.

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

mod common;

use dataforge_core::Address;
use dataforge_core::CancelToken;
use dataforge_core::ChainId;
use dataforge_core::EncryptionError;
use dataforge_core::EncryptionRequest;
use dataforge_core::FileEncryptor;
use dataforge_core::NormalizedFile;
use dataforge_providers::EncryptClientConfig;
use dataforge_providers::FileEncryptClient;
use serde_json::Value;

use crate::common::serve_once;
use crate::common::unreachable_url;

/// Creates a client allowed to reach loopback HTTP servers.
fn local_client() -> FileEncryptClient {
    FileEncryptClient::new(EncryptClientConfig {
        allow_http: true,
        timeout_ms: 5_000,
        ..EncryptClientConfig::default()
    })
    .unwrap()
}

/// Representative encryption request.
fn sample_request() -> EncryptionRequest {
    EncryptionRequest {
        nft_address: Address::new("0x1f2e3d4c5b6a79880917263545362718f9e0d1c2"),
        datatoken_address: Address::new("0x9a8b7c6d5e4f30211203f4e5d6c7b8a990817263"),
        files: vec![NormalizedFile {
            kind: "url".to_string(),
            url: "https://data.example.org/air/2024.csv".to_string(),
            method: "GET".to_string(),
        }],
    }
}

#[test]
fn success_returns_the_body_as_ciphertext() {
    let (url, handle) = serve_once(200, "0x04f2aa99cipher".to_string());
    let client = local_client();
    let ciphertext = client
        .encrypt(&sample_request(), ChainId::new(1), &url, &CancelToken::new())
        .unwrap();
    assert_eq!(ciphertext, "0x04f2aa99cipher");

    let captured = handle.join().unwrap().unwrap();
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.url, "/api/services/encrypt?chainId=1");
    let body: Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(
        body.get("nftAddress").and_then(Value::as_str),
        Some("0x1f2e3d4c5b6a79880917263545362718f9e0d1c2")
    );
    assert_eq!(
        body.get("datatokenAddress").and_then(Value::as_str),
        Some("0x9a8b7c6d5e4f30211203f4e5d6c7b8a990817263")
    );
    let files = body.get("files").and_then(Value::as_array).unwrap();
    assert_eq!(files[0].get("type").and_then(Value::as_str), Some("url"));
    assert_eq!(files[0].get("method").and_then(Value::as_str), Some("GET"));
}

#[test]
fn non_success_status_is_unavailable() {
    let (url, handle) = serve_once(503, "maintenance".to_string());
    let client = local_client();
    let err = client
        .encrypt(&sample_request(), ChainId::new(1), &url, &CancelToken::new())
        .unwrap_err();
    handle.join().unwrap();
    assert!(matches!(err, EncryptionError::Unavailable { .. }));
}

#[test]
fn unreachable_endpoint_is_unavailable() {
    let client = local_client();
    let err = client
        .encrypt(&sample_request(), ChainId::new(1), &unreachable_url(), &CancelToken::new())
        .unwrap_err();
    assert!(matches!(err, EncryptionError::Unavailable { .. }));
}

#[test]
fn empty_ciphertext_is_unavailable() {
    let (url, handle) = serve_once(200, "  ".to_string());
    let client = local_client();
    let err = client
        .encrypt(&sample_request(), ChainId::new(1), &url, &CancelToken::new())
        .unwrap_err();
    handle.join().unwrap();
    assert!(matches!(err, EncryptionError::Unavailable { .. }));
}

#[test]
fn cleartext_endpoints_are_blocked_by_default() {
    let client = FileEncryptClient::new(EncryptClientConfig::default()).unwrap();
    let err = client
        .encrypt(
            &sample_request(),
            ChainId::new(1),
            "http://provider.example.org",
            &CancelToken::new(),
        )
        .unwrap_err();
    assert!(matches!(err, EncryptionError::Unavailable { .. }));
}

#[test]
fn cancellation_sends_no_request() {
    let client = local_client();
    let cancel = CancelToken::new();
    cancel.cancel();
    let err = client
        .encrypt(&sample_request(), ChainId::new(1), &unreachable_url(), &cancel)
        .unwrap_err();
    assert!(matches!(err, EncryptionError::Cancelled));
}
