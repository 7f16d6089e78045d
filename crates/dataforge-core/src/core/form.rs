// crates/dataforge-core/src/core/form.rs
// ============================================================================
// Module: Publish Form Snapshot
// Description: Ephemeral publisher form state passed by value into the pipeline.
// Purpose: Provide a typed snapshot where contradictory selections are unrepresentable.
// Dependencies: serde, crate::core
// ============================================================================

//! ## Overview
//! The form snapshot is owned by the UI layer and handed to the pipeline by
//! value. Pricing and container selections are tagged enums so "neither or
//! both" states cannot be expressed; the remaining structural rules are
//! checked by [`FormSnapshot::validate`] before any network call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::credential::CredentialAttachment;
use crate::core::identifiers::Address;
use crate::core::identifiers::ChainId;
use crate::interfaces::ValidationError;

// ============================================================================
// SECTION: Asset and Access Kinds
// ============================================================================

/// Kind of asset being published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// A data asset consumed as-is.
    Dataset,
    /// An algorithm asset executed against datasets.
    Algorithm,
}

impl AssetKind {
    /// Returns true for algorithm assets.
    #[must_use]
    pub const fn is_algorithm(self) -> bool {
        matches!(self, Self::Algorithm)
    }
}

/// Access mode offered by the single published service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    /// Direct download access.
    Access,
    /// Compute-to-data access.
    Compute,
}

// ============================================================================
// SECTION: Publisher Context
// ============================================================================

/// Wallet-derived context of the publishing account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherContext {
    /// Chain the asset is published on.
    pub chain_id: ChainId,
    /// Publishing account address; becomes owner, minter, and fee collector.
    pub account_id: Address,
}

// ============================================================================
// SECTION: File Entries
// ============================================================================

/// A file or link reference entered in the form.
///
/// # Invariants
/// - Entries are only consumed when `valid` is true; validity is established
///   by the UI layer's reachability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Plaintext URL of the referenced content.
    pub url: String,
    /// Whether the UI layer verified the reference.
    pub valid: bool,
}

// ============================================================================
// SECTION: Container Selection
// ============================================================================

/// Source of the container image for an algorithm asset.
///
/// # Invariants
/// - Preset and custom sources are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ContainerSelection {
    /// A named entry from the configured preset catalog.
    Preset {
        /// Catalog identifier of the preset.
        id: String,
    },
    /// Free-text container fields supplied by the publisher.
    Custom {
        /// Image repository reference.
        image: String,
        /// Image tag.
        tag: String,
        /// Entrypoint command template.
        entrypoint: String,
        /// Image checksum, when the publisher supplied one.
        checksum: Option<String>,
    },
}

// ============================================================================
// SECTION: Trust Disclosure
// ============================================================================

/// Trust and compliance fields attached to the asset description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustDisclosure {
    /// Publisher-supplied access terms documents.
    pub terms_and_conditions: Vec<FileEntry>,
    /// Whether the asset contains personally identifiable information.
    #[serde(rename = "containsPII")]
    pub contains_pii: bool,
    /// Free-text description of the contained PII, when any.
    #[serde(rename = "PIIInformation")]
    pub pii_information: Option<String>,
    /// Service credential attached by reference or inline.
    pub service_credential: Option<CredentialAttachment>,
}

// ============================================================================
// SECTION: Collection Template
// ============================================================================

/// Template for the collection token minted for this asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionTemplate {
    /// Collection token name.
    pub name: String,
    /// Collection token symbol.
    pub symbol: String,
    /// Metadata URI baked into the collection token.
    #[serde(rename = "tokenURI")]
    pub token_uri: String,
    /// Whether the collection token is transferable after minting.
    pub transferable: bool,
}

// ============================================================================
// SECTION: Form Metadata
// ============================================================================

/// Descriptive metadata entered by the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormMetadata {
    /// Asset kind.
    #[serde(rename = "type")]
    pub kind: AssetKind,
    /// Asset name.
    pub name: String,
    /// Asset description.
    pub description: String,
    /// Asset author.
    pub author: String,
    /// Free-text tags; absent and empty lists are equivalent.
    pub tags: Option<Vec<String>>,
    /// License reference; falls back to the configured default when absent.
    pub license: Option<String>,
    /// Whether the publisher accepted the marketplace terms.
    pub terms_and_conditions: bool,
    /// Container selection; only meaningful for algorithm assets.
    pub container: Option<ContainerSelection>,
    /// Trust and compliance disclosure.
    pub trust: TrustDisclosure,
    /// Collection token template.
    pub collection: CollectionTemplate,
}

// ============================================================================
// SECTION: Compute Options
// ============================================================================

/// Allow-list entry for a trusted algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedAlgorithm {
    /// Document identifier of the trusted algorithm.
    pub did: String,
    /// Checksum of the algorithm's file references, when pinned.
    pub files_checksum: Option<String>,
    /// Checksum of the algorithm's container section, when pinned.
    pub container_section_checksum: Option<String>,
}

/// Compute resource and trust limits for compute-mode services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeOptions {
    /// Whether raw (unpublished) algorithms may run against the asset.
    pub allow_raw_algorithm: bool,
    /// Whether algorithm jobs may reach the network.
    pub allow_network_access: bool,
    /// Publisher accounts whose algorithms are trusted wholesale.
    pub publisher_trusted_algorithm_publishers: Vec<String>,
    /// Individually trusted algorithms.
    pub publisher_trusted_algorithms: Vec<TrustedAlgorithm>,
}

// ============================================================================
// SECTION: Service Draft
// ============================================================================

/// Draft of the datatoken minted for the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatatokenDraft {
    /// Datatoken name.
    pub name: String,
    /// Datatoken symbol.
    pub symbol: String,
}

/// One service entry drafted in the form.
///
/// # Invariants
/// - Publication consumes exactly the first draft; multi-service publication
///   is unsupported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormService {
    /// Access mode of the service.
    pub access: AccessKind,
    /// File references backing the asset.
    pub files: Vec<FileEntry>,
    /// Sample or documentation links.
    pub links: Vec<FileEntry>,
    /// Endpoint of the provider serving (and encrypting for) this asset.
    pub provider_url: String,
    /// Human timeout string, for example `1 day` or `forever`.
    pub timeout: String,
    /// Datatoken draft for this service.
    pub datatoken: DatatokenDraft,
    /// Compute limits; only consumed for compute access.
    pub compute_options: Option<ComputeOptions>,
}

// ============================================================================
// SECTION: Pricing Selection
// ============================================================================

/// Base token a fixed-rate exchange trades against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseToken {
    /// Base token contract address.
    pub address: Address,
    /// Base token symbol.
    pub symbol: String,
    /// Base token decimals.
    pub decimals: u8,
}

/// Pricing mechanism selected by the publisher.
///
/// # Invariants
/// - Exactly one mechanism is selected by construction; an unrecognized
///   discriminator fails form deserialization before the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PricingSelection {
    /// Fixed-rate exchange against a base token.
    Fixed {
        /// Base token of the exchange.
        #[serde(rename = "baseToken")]
        base_token: BaseToken,
        /// Publisher-entered price in base token units.
        price: String,
    },
    /// Free dispenser with hard anti-abuse caps.
    Free,
}

// ============================================================================
// SECTION: Form Snapshot
// ============================================================================

/// Complete snapshot of the publish form at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    /// Publisher wallet context.
    pub user: PublisherContext,
    /// Descriptive metadata.
    pub metadata: FormMetadata,
    /// Drafted services; exactly the first entry is published.
    pub services: Vec<FormService>,
    /// Selected pricing mechanism.
    pub pricing: PricingSelection,
}

impl FormSnapshot {
    /// Checks structural rules that the tagged enums cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a required field is empty or no
    /// service draft is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.metadata.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        if self.metadata.description.trim().is_empty() {
            return Err(ValidationError::EmptyField("description"));
        }
        if self.metadata.author.trim().is_empty() {
            return Err(ValidationError::EmptyField("author"));
        }
        self.first_service().map(|_| ())
    }

    /// Returns the single service draft consumed by publication.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingService`] when no draft is present.
    pub fn first_service(&self) -> Result<&FormService, ValidationError> {
        self.services.first().ok_or(ValidationError::MissingService)
    }
}
