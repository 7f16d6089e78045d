// crates/dataforge-providers/src/lib.rs
// ============================================================================
// Module: Dataforge Providers
// Description: Network-backed collaborators for the publication pipeline.
// Purpose: Provide the encryption client and compliance registry client.
// Dependencies: dataforge-core, reqwest, serde_json
// ============================================================================

//! ## Overview
//! This crate ships the blocking HTTP implementations of the pipeline's
//! external collaborators: the file reference encryption client and the
//! compliance registry client (sign, store, verify, fetch). Both absorb
//! transport detail into the core's structured error and outcome types.
//! Invariants:
//! - Encryption failures are fatal to a publish and carry no plaintext
//!   fallback.
//! - Compliance failures resolve to negative structured outcomes and are
//!   logged; they never abort publication.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod compliance;
pub mod encrypt;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use compliance::API_VERSION_HEADER;
pub use compliance::ComplianceClient;
pub use compliance::ComplianceClientConfig;
pub use compliance::ComplianceError;
pub use compliance::SignedCredential;
pub use compliance::StoreOutcome;
pub use compliance::VerifyOutcome;
pub use encrypt::EncryptClientConfig;
pub use encrypt::FileEncryptClient;
