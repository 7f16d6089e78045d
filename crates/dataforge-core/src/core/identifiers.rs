// crates/dataforge-core/src/core/identifiers.rs
// ============================================================================
// Module: Dataforge Identifiers
// Description: Canonical opaque identifiers for chains, accounts, and documents.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde, crate::core::hashing
// ============================================================================

//! ## Overview
//! This module defines the canonical identifiers used throughout the
//! publication pipeline. Addresses and transaction hashes are opaque strings
//! supplied by the wallet layer; document identifiers are derived
//! deterministically from the collection address and chain identifier.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::hashing::sha256_hex;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// The all-zero account address used to mark "no restriction" swapper slots.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Scheme prefix for derived document identifiers.
pub const DID_PREFIX: &str = "did:df:";

/// Placeholder document identifier carried by preview documents.
pub const PREVIEW_DID: &str = "0x...";

/// Placeholder service identifier carried by preview documents.
pub const PREVIEW_SERVICE_ID: &str = "preview";

// ============================================================================
// SECTION: Chain Identifier
// ============================================================================

/// Numeric chain identifier of the network an asset is published on.
///
/// # Invariants
/// - Serializes as a bare number on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(u64);

impl ChainId {
    /// Creates a new chain identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw chain identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Account Address
// ============================================================================

/// Opaque account or contract address supplied by the wallet layer.
///
/// # Invariants
/// - Stored verbatim; comparisons that require case-insensitive EVM semantics
///   go through [`Address::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Creates a new address from its string form.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Returns the all-zero address.
    #[must_use]
    pub fn zero() -> Self {
        Self(ZERO_ADDRESS.to_string())
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lower-cased form used for derivations and comparisons.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Transaction Hash
// ============================================================================

/// Opaque transaction reference returned by the token factory.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    /// Creates a new transaction hash.
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Returns the hash as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TxHash {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TxHash {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Document Identifier
// ============================================================================

/// Decentralized document identifier.
///
/// # Invariants
/// - Final documents carry a [`Did::derive`]d value; preview documents carry
///   the [`PREVIEW_DID`] placeholder.
/// - Derivation is a pure function of the collection address and chain id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Did(String);

impl Did {
    /// Derives the document identifier from a collection address and chain id.
    ///
    /// The collection address is lower-cased before hashing so mixed-case
    /// renderings of the same address derive the same identifier.
    #[must_use]
    pub fn derive(collection_address: &Address, chain_id: ChainId) -> Self {
        let seed = format!("{}{}", collection_address.normalized(), chain_id.get());
        Self(format!("{DID_PREFIX}{}", sha256_hex(seed.as_bytes())))
    }

    /// Returns the placeholder identifier used by preview documents.
    #[must_use]
    pub fn placeholder() -> Self {
        Self(PREVIEW_DID.to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the candidate matches this identifier ignoring case.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.eq_ignore_ascii_case(candidate)
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Service Identifier
// ============================================================================

/// Identifier of a service entry inside a document.
///
/// # Invariants
/// - Final services derive the id from the datatoken address and ciphertext;
///   preview services carry the [`PREVIEW_SERVICE_ID`] placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    /// Derives the service identifier from the datatoken address and ciphertext.
    #[must_use]
    pub fn derive(datatoken_address: &Address, ciphertext: &str) -> Self {
        let seed = format!("{}{ciphertext}", datatoken_address.as_str());
        Self(sha256_hex(seed.as_bytes()))
    }

    /// Returns the placeholder identifier used by preview documents.
    #[must_use]
    pub fn placeholder() -> Self {
        Self(PREVIEW_SERVICE_ID.to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
