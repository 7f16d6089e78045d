// crates/dataforge-core/src/interfaces/mod.rs
// ============================================================================
// Module: Pipeline Interfaces
// Description: Collaborator traits, cancellation, and the publish error taxonomy.
// Purpose: Keep external capabilities behind explicit seams so the core stays pure.
// Dependencies: serde, thiserror, crate::core
// ============================================================================

//! ## Overview
//! The pipeline reaches the outside world through two seams: the file
//! reference encryptor and the token factory. Both are traits so hosts can
//! supply network-backed implementations while tests use recording mocks.
//! Every network-facing call receives a [`CancelToken`]; a cancelled publish
//! never persists a partial document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::ddo::NftCreateData;
use crate::core::form::FileEntry;
use crate::core::identifiers::Address;
use crate::core::identifiers::ChainId;
use crate::core::market::PricingReceipt;

// ============================================================================
// SECTION: Cancellation
// ============================================================================

/// Cooperative cancellation token threaded through every external call.
///
/// # Invariants
/// - Once cancelled, a token never reverts to active.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    /// Shared cancellation flag.
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a new, active token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token as cancelled.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns true when the token has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

// ============================================================================
// SECTION: Validation Errors
// ============================================================================

/// Malformed or contradictory form input, detected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The form carries no service draft.
    #[error("form has no service entry")]
    MissingService,
    /// A required field is empty.
    #[error("required field is empty: {0}")]
    EmptyField(&'static str),
    /// Exactly one of the datatoken and collection addresses was supplied.
    #[error("publish mode supplies only one of datatoken and collection address")]
    MixedMode,
    /// Final-mode publication requires at least one valid file reference.
    #[error("no valid file reference to encrypt")]
    NoValidFiles,
    /// The selected container preset is not in the catalog.
    #[error("unknown container preset: {0}")]
    UnknownPreset(String),
    /// The selected container preset has no resolved checksum.
    #[error("container preset has no checksum: {0}")]
    PresetChecksumMissing(String),
    /// The timeout string is not in the accepted vocabulary.
    #[error("unsupported timeout value: {0}")]
    InvalidTimeout(String),
    /// A URL failed parsing or scheme/credential policy.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// The fixed price is not a positive decimal.
    #[error("invalid price: {0}")]
    InvalidPrice(String),
}

// ============================================================================
// SECTION: File Encryption
// ============================================================================

/// Wire form of a single file reference sent to the encryption service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedFile {
    /// Reference kind; always `url` for form-entered references.
    #[serde(rename = "type")]
    pub kind: String,
    /// Plaintext URL of the referenced content.
    pub url: String,
    /// HTTP method the provider uses to fetch the content.
    pub method: String,
}

impl NormalizedFile {
    /// Builds the wire form of a form file entry.
    #[must_use]
    pub fn from_entry(entry: &FileEntry) -> Self {
        Self {
            kind: "url".to_string(),
            url: entry.url.clone(),
            method: "GET".to_string(),
        }
    }
}

/// Request handed to the encryption service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionRequest {
    /// Collection contract address the ciphertext binds to.
    pub nft_address: Address,
    /// Datatoken contract address the ciphertext binds to.
    pub datatoken_address: Address,
    /// File references to encrypt.
    pub files: Vec<NormalizedFile>,
}

/// Errors raised by the file reference encryptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncryptionError {
    /// The encryption client could not be constructed.
    #[error("encryption client build failed: {0}")]
    Client(String),
    /// The provider endpoint was unreachable or returned a non-success status.
    #[error("encryption provider unavailable at {endpoint}: {detail}")]
    Unavailable {
        /// Endpoint the request targeted.
        endpoint: String,
        /// Transport or status detail.
        detail: String,
    },
    /// The publish attempt was cancelled before or during the call.
    #[error("encryption request cancelled")]
    Cancelled,
}

/// Encrypts plaintext file references into an opaque ciphertext blob.
///
/// Implementations perform no server-side mutation, so a failed call is safe
/// to retry by re-submission.
pub trait FileEncryptor {
    /// Encrypts the request against the provider endpoint for the chain.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptionError::Unavailable`] on transport failure or any
    /// non-success status; there is no plaintext fallback.
    fn encrypt(
        &self,
        request: &EncryptionRequest,
        chain_id: ChainId,
        provider_endpoint: &str,
        cancel: &CancelToken,
    ) -> Result<String, EncryptionError>;
}

// ============================================================================
// SECTION: Token Factory
// ============================================================================

/// Datatoken creation parameters handed to the factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatatokenCreateParams {
    /// Deployment template index.
    pub template_index: u64,
    /// Account allowed to mint.
    pub minter: Address,
    /// Account collecting payments.
    pub payment_collector: Address,
    /// Marketplace fee address.
    pub market_fee_address: Address,
    /// Token the order fee is charged in.
    pub fee_token: Address,
    /// Order fee amount, as a decimal string.
    pub fee_amount: String,
    /// Supply cap, as an integer string.
    pub cap: String,
    /// Datatoken name.
    pub name: String,
    /// Datatoken symbol.
    pub symbol: String,
}

/// Fixed-rate exchange creation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedRateParams {
    /// Fixed-rate exchange contract address.
    pub fixed_rate_address: Address,
    /// Base token the rate is quoted in.
    pub base_token_address: Address,
    /// Exchange owner.
    pub owner: Address,
    /// Account collecting the market swap fee.
    pub market_fee_collector: Address,
    /// Base token decimals.
    pub base_token_decimals: u8,
    /// Datatoken decimals.
    pub datatoken_decimals: u8,
    /// Exchange rate, as a decimal string.
    pub fixed_rate: String,
    /// Market swap fee fraction, as a decimal string.
    pub market_fee: String,
    /// Whether the exchange may mint datatokens on demand.
    pub with_mint: bool,
}

/// Dispenser creation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispenserParams {
    /// Dispenser contract address.
    pub dispenser_address: Address,
    /// Maximum tokens dispensed per request, in base units.
    pub max_tokens: String,
    /// Maximum wallet balance before dispensing stops, in base units.
    pub max_balance: String,
    /// Whether the dispenser may mint datatokens on demand.
    pub with_mint: bool,
    /// Account allowed to swap; the zero address means unrestricted.
    pub allowed_swapper: Address,
}

/// Errors raised by the token factory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    /// The underlying creation transaction failed.
    #[error("token factory error: {0}")]
    Factory(String),
    /// The publish attempt was cancelled before or during the call.
    #[error("factory call cancelled")]
    Cancelled,
}

/// Creates the collection token, datatoken, and exchange mechanism in one
/// opaque external operation.
///
/// # Invariants
/// - Each call either produces a complete [`PricingReceipt`] or fails;
///   implementations never expose partially created token state.
pub trait NftFactory {
    /// Creates the collection token, datatoken, and a fixed-rate exchange.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the creation transaction fails.
    fn create_with_fixed_rate(
        &self,
        owner: &Address,
        nft: &NftCreateData,
        datatoken: &DatatokenCreateParams,
        fixed_rate: &FixedRateParams,
        cancel: &CancelToken,
    ) -> Result<PricingReceipt, FactoryError>;

    /// Creates the collection token, datatoken, and a dispenser.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] when the creation transaction fails.
    fn create_with_dispenser(
        &self,
        owner: &Address,
        nft: &NftCreateData,
        datatoken: &DatatokenCreateParams,
        dispenser: &DispenserParams,
        cancel: &CancelToken,
    ) -> Result<PricingReceipt, FactoryError>;
}

// ============================================================================
// SECTION: Pipeline Errors
// ============================================================================

/// Errors raised by the pricing provisioner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisioningError {
    /// Form input failed validation before any factory call.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The factory call failed; no partial token state survives.
    #[error("pricing provisioning failed: {0}")]
    Failed(#[from] FactoryError),
    /// The publish attempt was cancelled before the factory call.
    #[error("pricing provisioning cancelled")]
    Cancelled,
}

/// Errors raised by the metadata transformer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Form input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// File reference encryption failed; the publish is aborted.
    #[error(transparent)]
    Encryption(#[from] EncryptionError),
}

/// Errors raised by the end-to-end publish pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// Form input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Pricing provisioning failed.
    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),
    /// Metadata transformation or encryption failed.
    #[error(transparent)]
    Transform(#[from] TransformError),
    /// The publish attempt was cancelled; nothing was persisted.
    #[error("publish cancelled")]
    Cancelled,
}
