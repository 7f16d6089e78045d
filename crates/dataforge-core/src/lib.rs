// crates/dataforge-core/src/lib.rs
// ============================================================================
// Module: Dataforge Core Library
// Description: Public API surface for the Dataforge publication pipeline core.
// Purpose: Expose core types, interfaces, and runtime orchestration.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Dataforge core turns a publisher's form snapshot into a versioned,
//! signed-for metadata document, provisions the pricing primitives that make
//! the asset purchasable, and models the trust-credential lifecycle. It is
//! backend-agnostic and reaches external capabilities (file encryption,
//! token creation) through explicit interfaces.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::*;

pub use interfaces::CancelToken;
pub use interfaces::DatatokenCreateParams;
pub use interfaces::DispenserParams;
pub use interfaces::EncryptionError;
pub use interfaces::EncryptionRequest;
pub use interfaces::FactoryError;
pub use interfaces::FileEncryptor;
pub use interfaces::FixedRateParams;
pub use interfaces::NftFactory;
pub use interfaces::NormalizedFile;
pub use interfaces::ProvisioningError;
pub use interfaces::PublishError;
pub use interfaces::TransformError;
pub use interfaces::ValidationError;
pub use runtime::MetadataTransformer;
pub use runtime::PricingProvisioner;
pub use runtime::PublishMode;
pub use runtime::PublishPipeline;
pub use runtime::PublishedAsset;
