// crates/dataforge-core/src/core/ddo.rs
// ============================================================================
// Module: Metadata Document Model
// Description: The versioned, persisted document describing a published asset.
// Purpose: Make the preview/final distinction a tagged union with one wire shape each.
// Dependencies: serde, crate::core
// ============================================================================

//! ## Overview
//! A document is either a preview (placeholder id, synthetic datatoken and
//! collection blocks, empty files) or final (derived id, collection address,
//! ciphertext files) and never a mix of the two. [`DdoMode`] carries the
//! mode-specific payload and serde-flattens into the document so each mode
//! has exactly one wire shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::credential::CredentialAttachment;
use crate::core::form::AccessKind;
use crate::core::form::AssetKind;
use crate::core::form::CollectionTemplate;
use crate::core::form::ComputeOptions;
use crate::core::identifiers::Address;
use crate::core::identifiers::ChainId;
use crate::core::identifiers::Did;
use crate::core::identifiers::ServiceId;
use crate::core::timestamp::PublishTimestamp;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Context URI every document declares.
pub const DID_CONTEXT_URI: &str = "https://w3id.org/did/v1";

/// Document schema version; tied to the build, never user-controlled.
pub const METADATA_SCHEMA_VERSION: &str = "4.1.0";

/// Version literal stamped on algorithm metadata blocks.
pub const ALGORITHM_METADATA_VERSION: &str = "0.1";

/// Returns the fixed document context list.
#[must_use]
pub fn default_context() -> Vec<String> {
    vec![DID_CONTEXT_URI.to_string()]
}

// ============================================================================
// SECTION: Algorithm Metadata
// ============================================================================

/// Container image coordinates of an algorithm asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerImage {
    /// Entrypoint command template.
    pub entrypoint: String,
    /// Image repository reference.
    pub image: String,
    /// Image tag.
    pub tag: String,
    /// Image checksum; empty when a custom image was supplied without one.
    pub checksum: String,
}

/// Algorithm-specific metadata block.
///
/// # Invariants
/// - Present only on algorithm assets with a container selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmMetadata {
    /// Language derived from the first valid file's extension; empty when
    /// no valid file exists.
    pub language: String,
    /// Fixed algorithm metadata version.
    pub version: String,
    /// Container image coordinates.
    pub container: ContainerImage,
}

// ============================================================================
// SECTION: Trust Section
// ============================================================================

/// Access-terms document reference inside the trust section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTerms {
    /// URLs of the access-terms documents.
    pub url: Vec<String>,
}

/// Trust and compliance information carried in additional information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustInformation {
    /// Access-terms documents; configured default when the form has none.
    pub terms_and_conditions: Vec<AccessTerms>,
    /// PII flag; datasets only.
    #[serde(rename = "containsPII", skip_serializing_if = "Option::is_none")]
    pub contains_pii: Option<bool>,
    /// PII details; datasets only.
    #[serde(rename = "PIIInformation", skip_serializing_if = "Option::is_none")]
    pub pii_information: Option<String>,
    /// Attached service credential, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_credential: Option<CredentialAttachment>,
}

/// Free-form additional information block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInformation {
    /// Whether the publisher accepted the marketplace terms.
    pub terms_and_conditions: bool,
    /// Trust and compliance information.
    pub trust: TrustInformation,
}

// ============================================================================
// SECTION: Asset Metadata
// ============================================================================

/// Descriptive metadata block of a document.
///
/// # Invariants
/// - `created` and `updated` are equal on a fresh publish and carry no
///   sub-second component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    /// Creation instant.
    pub created: PublishTimestamp,
    /// Last-update instant; equals `created` at publish time.
    pub updated: PublishTimestamp,
    /// Asset kind.
    #[serde(rename = "type")]
    pub kind: AssetKind,
    /// Asset name.
    pub name: String,
    /// Asset description.
    pub description: String,
    /// Normalized tags in input order; absent when the form had none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Asset author.
    pub author: String,
    /// License reference.
    pub license: String,
    /// Sanitized sample links; absent when the form had none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    /// Additional information block.
    pub additional_information: AdditionalInformation,
    /// Algorithm block; algorithm assets with a container selection only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<AlgorithmMetadata>,
}

// ============================================================================
// SECTION: Service Descriptor
// ============================================================================

/// The single service entry of a document.
///
/// # Invariants
/// - `files` holds ciphertext in final documents and the empty string in
///   previews; plaintext never appears outside preview placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    /// Service identifier.
    pub id: ServiceId,
    /// Access mode.
    #[serde(rename = "type")]
    pub access: AccessKind,
    /// Encrypted file references, or empty in preview mode.
    pub files: String,
    /// Datatoken granting access; absent in preview mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatoken_address: Option<Address>,
    /// Provider endpoint serving the asset.
    pub service_endpoint: String,
    /// Access timeout in seconds; zero means no expiry.
    pub timeout: u64,
    /// Compute limits; compute access only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute: Option<ComputeOptions>,
}

// ============================================================================
// SECTION: Mode Payload
// ============================================================================

/// Synthetic datatoken block shown on previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatatokenPreview {
    /// Draft datatoken name.
    pub name: String,
    /// Draft datatoken symbol.
    pub symbol: String,
}

/// Collection token creation data, previewed before minting and handed to
/// the token factory at publish time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftCreateData {
    /// Collection token name.
    pub name: String,
    /// Collection token symbol.
    pub symbol: String,
    /// Metadata URI baked into the collection token.
    #[serde(rename = "tokenURI")]
    pub token_uri: String,
    /// Whether the collection token is transferable after minting.
    pub transferable: bool,
    /// Owner of the minted collection token.
    pub owner: Address,
}

impl NftCreateData {
    /// Builds creation data from the form template and publishing account.
    #[must_use]
    pub fn from_template(template: &CollectionTemplate, owner: &Address) -> Self {
        Self {
            name: template.name.clone(),
            symbol: template.symbol.clone(),
            token_uri: template.token_uri.clone(),
            transferable: template.transferable,
            owner: owner.clone(),
        }
    }
}

/// Mode-specific document payload.
///
/// # Invariants
/// - A document is entirely preview or entirely final; the union flattens
///   into the document so each mode has one wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DdoMode {
    /// Final document payload: the minted collection address.
    Final {
        /// Collection contract address the document id derives from.
        #[serde(rename = "nftAddress")]
        nft_address: Address,
    },
    /// Preview payload: synthetic blocks mirroring what minting will create.
    Preview {
        /// Draft datatokens shown to the publisher.
        datatokens: Vec<DatatokenPreview>,
        /// Collection creation data shown to the publisher.
        nft: NftCreateData,
    },
}

// ============================================================================
// SECTION: Document
// ============================================================================

/// The persisted metadata document.
///
/// # Invariants
/// - `@context` is fixed, `services` always has exactly one entry, and the
///   schema version is a build constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ddo {
    /// Fixed document context.
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    /// Document identifier; derived in final mode, placeholder in preview.
    pub id: Did,
    /// Document schema version.
    pub version: String,
    /// Chain the asset lives on.
    pub chain_id: ChainId,
    /// Descriptive metadata.
    pub metadata: AssetMetadata,
    /// The single service entry.
    pub services: Vec<ServiceDescriptor>,
    /// Mode-specific payload.
    #[serde(flatten)]
    pub mode: DdoMode,
}

impl Ddo {
    /// Returns true when this document is a preview.
    #[must_use]
    pub const fn is_preview(&self) -> bool {
        matches!(self.mode, DdoMode::Preview { .. })
    }

    /// Attaches a service credential to the document's trust section.
    pub fn attach_credential(&mut self, attachment: CredentialAttachment) {
        self.metadata.additional_information.trust.service_credential = Some(attachment);
    }
}
