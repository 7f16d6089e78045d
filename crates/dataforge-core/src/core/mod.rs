// crates/dataforge-core/src/core/mod.rs
// ============================================================================
// Module: Dataforge Core Types
// Description: Canonical form, document, and market data structures.
// Purpose: Provide stable, serializable types for the publication pipeline.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define the publisher form snapshot, the persisted metadata
//! document, market configuration data, and the pure transforms between
//! them. These types are the canonical source of truth for any derived API
//! surfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod credential;
pub mod ddo;
pub mod form;
pub mod hashing;
pub mod identifiers;
pub mod market;
pub mod normalize;
pub mod timestamp;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use credential::CredentialAttachment;
pub use credential::CredentialStatus;
pub use credential::LEGACY_API_VERSION;
pub use credential::LegalName;
pub use credential::SERVICE_OFFERING_TYPE;
pub use credential::declared_contexts;
pub use credential::publisher_legal_name;
pub use credential::select_api_version;
pub use credential::service_offering_subject_id;
pub use ddo::ALGORITHM_METADATA_VERSION;
pub use ddo::AccessTerms;
pub use ddo::AdditionalInformation;
pub use ddo::AlgorithmMetadata;
pub use ddo::AssetMetadata;
pub use ddo::ContainerImage;
pub use ddo::DID_CONTEXT_URI;
pub use ddo::DatatokenPreview;
pub use ddo::Ddo;
pub use ddo::DdoMode;
pub use ddo::METADATA_SCHEMA_VERSION;
pub use ddo::NftCreateData;
pub use ddo::ServiceDescriptor;
pub use ddo::TrustInformation;
pub use ddo::default_context;
pub use form::AccessKind;
pub use form::AssetKind;
pub use form::BaseToken;
pub use form::CollectionTemplate;
pub use form::ComputeOptions;
pub use form::ContainerSelection;
pub use form::DatatokenDraft;
pub use form::FileEntry;
pub use form::FormMetadata;
pub use form::FormService;
pub use form::FormSnapshot;
pub use form::PricingSelection;
pub use form::PublisherContext;
pub use form::TrustDisclosure;
pub use form::TrustedAlgorithm;
pub use hashing::HashError;
pub use hashing::canonical_digest;
pub use hashing::canonical_json_bytes;
pub use hashing::sha256_hex;
pub use identifiers::Address;
pub use identifiers::ChainId;
pub use identifiers::DID_PREFIX;
pub use identifiers::Did;
pub use identifiers::PREVIEW_DID;
pub use identifiers::PREVIEW_SERVICE_ID;
pub use identifiers::ServiceId;
pub use identifiers::TxHash;
pub use identifiers::ZERO_ADDRESS;
pub use market::ChainContracts;
pub use market::ContainerPreset;
pub use market::DATATOKEN_DECIMALS;
pub use market::MAX_SUPPLY_CAP;
pub use market::MarketFees;
pub use market::MetadataDefaults;
pub use market::ONE_TOKEN_BASE_UNITS;
pub use market::PricingReceipt;
pub use normalize::file_extension;
pub use normalize::normalize_tags;
pub use normalize::parse_timeout;
pub use normalize::sanitize_url;
pub use normalize::slugify_tag;
pub use timestamp::PublishTimestamp;
pub use timestamp::TimestampError;
