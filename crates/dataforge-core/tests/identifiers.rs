// crates/dataforge-core/tests/identifiers.rs
// ============================================================================
// Module: Identifier Derivation Tests
// Description: Verifies deterministic document and service identifiers.
// ============================================================================
//! ## Overview
//! Ensures DID derivation is a pure function of collection address and chain
//! id, is case-insensitive over the address, and differs across inputs.

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

use dataforge_core::Address;
use dataforge_core::ChainId;
use dataforge_core::DID_PREFIX;
use dataforge_core::Did;
use dataforge_core::PREVIEW_DID;
use dataforge_core::ServiceId;

#[test]
fn did_derivation_is_deterministic() {
    let address = Address::new("0x1f2e3d4c5b6a79880917263545362718f9e0d1c2");
    let chain = ChainId::new(137);
    assert_eq!(Did::derive(&address, chain), Did::derive(&address, chain));
}

#[test]
fn did_derivation_is_case_insensitive_over_the_address() {
    let lower = Address::new("0x1f2e3d4c5b6a79880917263545362718f9e0d1c2");
    let mixed = Address::new("0x1F2E3D4C5B6A79880917263545362718F9E0D1C2");
    let chain = ChainId::new(1);
    assert_eq!(Did::derive(&lower, chain), Did::derive(&mixed, chain));
}

#[test]
fn did_differs_across_addresses_and_chains() {
    let first = Address::new("0x1f2e3d4c5b6a79880917263545362718f9e0d1c2");
    let second = Address::new("0x9a8b7c6d5e4f30211203f4e5d6c7b8a990817263");
    assert_ne!(Did::derive(&first, ChainId::new(1)), Did::derive(&second, ChainId::new(1)));
    assert_ne!(Did::derive(&first, ChainId::new(1)), Did::derive(&first, ChainId::new(137)));
}

#[test]
fn did_carries_the_scheme_prefix() {
    let did = Did::derive(&Address::new("0x1f2e3d4c5b6a79880917263545362718f9e0d1c2"), ChainId::new(1));
    assert!(did.as_str().starts_with(DID_PREFIX));
}

#[test]
fn did_placeholder_matches_preview_constant() {
    assert_eq!(Did::placeholder().as_str(), PREVIEW_DID);
}

#[test]
fn did_matching_is_case_insensitive() {
    let did = Did::derive(&Address::new("0x1f2e3d4c5b6a79880917263545362718f9e0d1c2"), ChainId::new(1));
    let upper = did.as_str().to_ascii_uppercase();
    assert!(did.matches(&upper));
    assert!(!did.matches("did:df:somethingelse"));
}

#[test]
fn service_id_depends_on_datatoken_and_ciphertext() {
    let datatoken = Address::new("0x9a8b7c6d5e4f30211203f4e5d6c7b8a990817263");
    let first = ServiceId::derive(&datatoken, "0xciphertext-a");
    let second = ServiceId::derive(&datatoken, "0xciphertext-b");
    assert_ne!(first, second);
    assert_eq!(first, ServiceId::derive(&datatoken, "0xciphertext-a"));
}
