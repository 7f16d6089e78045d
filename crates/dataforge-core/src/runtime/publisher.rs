// crates/dataforge-core/src/runtime/publisher.rs
// ============================================================================
// Module: Publish Pipeline
// Description: End-to-end orchestration of a single asset publication.
// Purpose: Sequence validation, provisioning, and final transformation with cancellation.
// Dependencies: tracing, crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! A publish runs strictly in sequence: validate the form, provision pricing,
//! then assemble the final document (which encrypts file references). Each
//! step depends on the previous step's output, so there is no fan-out. The
//! cancel token is checked between steps and handed to every network call;
//! any fatal error or cancellation yields no document at all.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::ddo::Ddo;
use crate::core::form::FormSnapshot;
use crate::core::identifiers::Address;
use crate::core::market::ChainContracts;
use crate::core::market::ContainerPreset;
use crate::core::market::MarketFees;
use crate::core::market::MetadataDefaults;
use crate::core::market::PricingReceipt;
use crate::core::timestamp::PublishTimestamp;
use crate::interfaces::CancelToken;
use crate::interfaces::FileEncryptor;
use crate::interfaces::NftFactory;
use crate::interfaces::PublishError;
use crate::runtime::pricing::PricingProvisioner;
use crate::runtime::transform::MetadataTransformer;
use crate::runtime::transform::PublishMode;

// ============================================================================
// SECTION: Published Asset
// ============================================================================

/// Output of a completed publish: the persisted document and its receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedAsset {
    /// The final metadata document.
    pub ddo: Ddo,
    /// The pricing receipt the document was assembled from.
    pub receipt: PricingReceipt,
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// End-to-end publish pipeline over injected collaborators.
pub struct PublishPipeline<'a> {
    /// Form-to-document transformer.
    transformer: MetadataTransformer<'a>,
    /// Pricing provisioner.
    provisioner: PricingProvisioner<'a>,
    /// File reference encryptor.
    encryptor: &'a dyn FileEncryptor,
    /// Token factory.
    factory: &'a dyn NftFactory,
}

impl<'a> PublishPipeline<'a> {
    /// Creates a pipeline over the given configuration and collaborators.
    #[must_use]
    pub fn new(
        defaults: &'a MetadataDefaults,
        presets: &'a [ContainerPreset],
        fees: &'a MarketFees,
        contracts: &'a ChainContracts,
        encryptor: &'a dyn FileEncryptor,
        factory: &'a dyn NftFactory,
    ) -> Self {
        Self {
            transformer: MetadataTransformer::new(defaults, presets),
            provisioner: PricingProvisioner::new(fees, contracts),
            encryptor,
            factory,
        }
    }

    /// Produces a preview document without touching the network.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Validation`] when the form is structurally
    /// invalid.
    pub fn preview(
        &self,
        form: &FormSnapshot,
        timestamp: &PublishTimestamp,
    ) -> Result<Ddo, PublishError> {
        Ok(self.transformer.preview(form, timestamp)?)
    }

    /// Transforms a form with optional chain addresses, dispatching on the
    /// preview/final distinction.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Validation`] when exactly one address is
    /// supplied or the form is invalid, and propagates encryption failures
    /// in final mode.
    pub fn transform(
        &self,
        form: &FormSnapshot,
        datatoken_address: Option<Address>,
        nft_address: Option<Address>,
        timestamp: &PublishTimestamp,
        cancel: &CancelToken,
    ) -> Result<Ddo, PublishError> {
        match PublishMode::from_addresses(datatoken_address, nft_address)? {
            PublishMode::Preview => Ok(self.transformer.preview(form, timestamp)?),
            PublishMode::Final {
                datatoken_address,
                nft_address,
            } => Ok(self.transformer.finalize(
                form,
                &datatoken_address,
                &nft_address,
                timestamp,
                self.encryptor,
                cancel,
            )?),
        }
    }

    /// Runs the full publication sequence and returns the persisted document
    /// with its pricing receipt.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] on validation, provisioning, encryption, or
    /// cancellation failures; no partial document is produced on any path.
    pub fn publish(
        &self,
        form: &FormSnapshot,
        timestamp: &PublishTimestamp,
        cancel: &CancelToken,
    ) -> Result<PublishedAsset, PublishError> {
        form.validate()?;
        if cancel.is_cancelled() {
            return Err(PublishError::Cancelled);
        }
        let receipt = self.provisioner.provision(form, self.factory, cancel)?;
        if cancel.is_cancelled() {
            return Err(PublishError::Cancelled);
        }
        let ddo = self.transformer.finalize(
            form,
            &receipt.datatoken_address,
            &receipt.nft_address,
            timestamp,
            self.encryptor,
            cancel,
        )?;
        tracing::info!(did = %ddo.id, tx = %receipt.tx_hash, "publish pipeline complete");
        Ok(PublishedAsset {
            ddo,
            receipt,
        })
    }
}
