// crates/dataforge-core/src/core/market.rs
// ============================================================================
// Module: Market Configuration Types
// Description: Injected market-wide constants and per-chain contract addresses.
// Purpose: Keep fee and contract knobs explicit so the pipeline stays reentrant.
// Dependencies: serde, crate::core::identifiers
// ============================================================================

//! ## Overview
//! Fees and contract addresses are process-wide configuration injected into
//! the pricing provisioner, never read from the form: publisher input cannot
//! tamper with them. The structs here are plain data; loading and validation
//! live in the config crate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::Address;
use crate::core::identifiers::ChainId;
use crate::core::identifiers::TxHash;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Supply cap applied to every datatoken, effectively unbounded.
pub const MAX_SUPPLY_CAP: &str = "115792089237316195423570985008687907853269984665640564039457";

/// One whole token in base units (18 decimals).
pub const ONE_TOKEN_BASE_UNITS: &str = "1000000000000000000";

/// Decimals every minted datatoken uses.
pub const DATATOKEN_DECIMALS: u8 = 18;

// ============================================================================
// SECTION: Market Fees
// ============================================================================

/// Marketplace fee parameters injected into datatoken and exchange creation.
///
/// # Invariants
/// - Values come from configuration, never from publisher input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MarketFees {
    /// Address collecting marketplace fees.
    pub fee_address: Address,
    /// Per-order fee charged in the fee token, as a decimal string.
    pub order_fee: String,
    /// Fixed-rate swap fee fraction, as a decimal string.
    pub fixed_swap_fee: String,
    /// Template index used when deploying datatokens.
    pub datatoken_template_index: u64,
}

// ============================================================================
// SECTION: Chain Contracts
// ============================================================================

/// Per-chain addresses of the pricing mechanism contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChainContracts {
    /// Chain these contracts are deployed on.
    pub chain_id: ChainId,
    /// Fixed-rate exchange contract address.
    pub fixed_rate_exchange: Address,
    /// Dispenser contract address.
    pub dispenser: Address,
}

// ============================================================================
// SECTION: Metadata Defaults
// ============================================================================

/// Fallback values applied when the form leaves optional metadata empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MetadataDefaults {
    /// License URL applied when the publisher supplies none.
    pub license_url: String,
    /// Access-terms document URL applied when the publisher supplies none.
    pub access_terms_url: String,
}

// ============================================================================
// SECTION: Container Presets
// ============================================================================

/// Catalog entry describing a curated algorithm container.
///
/// # Invariants
/// - Selecting a preset whose `checksum` is absent is a fatal precondition
///   failure at transform time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerPreset {
    /// Catalog identifier referenced by the form.
    pub id: String,
    /// Image repository reference.
    pub image: String,
    /// Image tag.
    pub tag: String,
    /// Entrypoint command template.
    pub entrypoint: String,
    /// Pinned image checksum, when the catalog has resolved one.
    pub checksum: Option<String>,
}

// ============================================================================
// SECTION: Pricing Receipt
// ============================================================================

/// Result of a successful pricing provisioning run.
///
/// # Invariants
/// - Produced exactly once per publish and immutable once produced.
/// - A receipt only exists when both the token and its exchange mechanism
///   were created; there is no partial form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingReceipt {
    /// Collection (NFT) contract address.
    pub nft_address: Address,
    /// Datatoken contract address.
    pub datatoken_address: Address,
    /// Transaction reference of the creation call.
    pub tx_hash: TxHash,
}
