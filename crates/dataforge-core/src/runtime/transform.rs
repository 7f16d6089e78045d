// crates/dataforge-core/src/runtime/transform.rs
// ============================================================================
// Module: Metadata Transformer
// Description: Deterministic transform from form snapshots to metadata documents.
// Purpose: Produce preview and final documents with one wire shape each.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The transformer is deterministic in its inputs: the form snapshot, the
//! publish mode, and a caller-injected timestamp. Preview documents carry
//! placeholder identifiers and synthetic token blocks and never touch the
//! network; final documents replace plaintext file references with ciphertext
//! from the file reference encryptor before anything is assembled.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ddo::ALGORITHM_METADATA_VERSION;
use crate::core::ddo::AccessTerms;
use crate::core::ddo::AdditionalInformation;
use crate::core::ddo::AlgorithmMetadata;
use crate::core::ddo::AssetMetadata;
use crate::core::ddo::ContainerImage;
use crate::core::ddo::DatatokenPreview;
use crate::core::ddo::Ddo;
use crate::core::ddo::DdoMode;
use crate::core::ddo::METADATA_SCHEMA_VERSION;
use crate::core::ddo::NftCreateData;
use crate::core::ddo::ServiceDescriptor;
use crate::core::ddo::TrustInformation;
use crate::core::ddo::default_context;
use crate::core::form::AccessKind;
use crate::core::form::ComputeOptions;
use crate::core::form::ContainerSelection;
use crate::core::form::FileEntry;
use crate::core::form::FormMetadata;
use crate::core::form::FormService;
use crate::core::form::FormSnapshot;
use crate::core::identifiers::Address;
use crate::core::identifiers::Did;
use crate::core::identifiers::ServiceId;
use crate::core::market::ContainerPreset;
use crate::core::market::MetadataDefaults;
use crate::core::normalize::file_extension;
use crate::core::normalize::normalize_tags;
use crate::core::normalize::parse_timeout;
use crate::core::normalize::sanitize_url;
use crate::core::timestamp::PublishTimestamp;
use crate::interfaces::CancelToken;
use crate::interfaces::EncryptionError;
use crate::interfaces::EncryptionRequest;
use crate::interfaces::FileEncryptor;
use crate::interfaces::NormalizedFile;
use crate::interfaces::TransformError;
use crate::interfaces::ValidationError;

// ============================================================================
// SECTION: Publish Mode
// ============================================================================

/// Mode a transform runs in.
///
/// # Invariants
/// - A transform is entirely preview or entirely final; supplying exactly one
///   of the two chain addresses is a validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishMode {
    /// No chain addresses exist yet; produce a preview document.
    Preview,
    /// Both chain addresses exist; produce the persisted document.
    Final {
        /// Minted datatoken address.
        datatoken_address: Address,
        /// Minted collection address.
        nft_address: Address,
    },
}

impl PublishMode {
    /// Maps optional chain addresses onto a publish mode.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MixedMode`] when exactly one address is
    /// supplied.
    pub fn from_addresses(
        datatoken_address: Option<Address>,
        nft_address: Option<Address>,
    ) -> Result<Self, ValidationError> {
        match (datatoken_address, nft_address) {
            (None, None) => Ok(Self::Preview),
            (Some(datatoken_address), Some(nft_address)) => Ok(Self::Final {
                datatoken_address,
                nft_address,
            }),
            _ => Err(ValidationError::MixedMode),
        }
    }
}

// ============================================================================
// SECTION: Transformer
// ============================================================================

/// Builds metadata documents from form snapshots.
pub struct MetadataTransformer<'a> {
    /// Fallbacks applied when optional metadata is empty.
    defaults: &'a MetadataDefaults,
    /// Curated container preset catalog.
    presets: &'a [ContainerPreset],
}

impl<'a> MetadataTransformer<'a> {
    /// Creates a transformer over the given defaults and preset catalog.
    #[must_use]
    pub const fn new(defaults: &'a MetadataDefaults, presets: &'a [ContainerPreset]) -> Self {
        Self {
            defaults,
            presets,
        }
    }

    /// Produces a preview document: placeholder identifiers, synthetic token
    /// blocks, empty files, and no network traffic.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Validation`] when the form is structurally
    /// invalid.
    pub fn preview(
        &self,
        form: &FormSnapshot,
        timestamp: &PublishTimestamp,
    ) -> Result<Ddo, TransformError> {
        let service = form.first_service()?;
        let files = first_valid_urls(&service.files)?;
        let links = first_valid_urls(&service.links)?;
        let metadata = self.build_metadata(form, files.as_deref(), links, timestamp)?;
        let descriptor = ServiceDescriptor {
            id: ServiceId::placeholder(),
            access: service.access,
            files: String::new(),
            datatoken_address: None,
            service_endpoint: sanitize_url(&service.provider_url)?,
            timeout: parse_timeout(&service.timeout)?,
            compute: compute_options(service),
        };
        Ok(Ddo {
            context: default_context(),
            id: Did::placeholder(),
            version: METADATA_SCHEMA_VERSION.to_string(),
            chain_id: form.user.chain_id,
            metadata,
            services: vec![descriptor],
            mode: DdoMode::Preview {
                datatokens: vec![DatatokenPreview {
                    name: service.datatoken.name.clone(),
                    symbol: service.datatoken.symbol.clone(),
                }],
                nft: NftCreateData::from_template(&form.metadata.collection, &form.user.account_id),
            },
        })
    }

    /// Produces the persisted document for minted chain addresses.
    ///
    /// The plaintext file reference is replaced by ciphertext from the
    /// encryptor before the document is assembled; a document referencing
    /// plaintext files can never leave this function.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Validation`] for structural failures and
    /// [`TransformError::Encryption`] when the encryption provider fails,
    /// both of which abort the publish.
    pub fn finalize(
        &self,
        form: &FormSnapshot,
        datatoken_address: &Address,
        nft_address: &Address,
        timestamp: &PublishTimestamp,
        encryptor: &dyn FileEncryptor,
        cancel: &CancelToken,
    ) -> Result<Ddo, TransformError> {
        form.validate()?;
        let service = form.first_service()?;
        let files = first_valid_urls(&service.files)?;
        let links = first_valid_urls(&service.links)?;
        let Some(file_urls) = files else {
            return Err(ValidationError::NoValidFiles.into());
        };
        let first_entry = service.files.first().ok_or(ValidationError::NoValidFiles)?;
        let endpoint = sanitize_url(&service.provider_url)?;
        if cancel.is_cancelled() {
            return Err(EncryptionError::Cancelled.into());
        }
        let request = EncryptionRequest {
            nft_address: nft_address.clone(),
            datatoken_address: datatoken_address.clone(),
            files: vec![NormalizedFile::from_entry(first_entry)],
        };
        let ciphertext = encryptor.encrypt(&request, form.user.chain_id, &endpoint, cancel)?;
        let metadata = self.build_metadata(form, Some(&file_urls), links, timestamp)?;
        let descriptor = ServiceDescriptor {
            id: ServiceId::derive(datatoken_address, &ciphertext),
            access: service.access,
            files: ciphertext,
            datatoken_address: Some(datatoken_address.clone()),
            service_endpoint: endpoint,
            timeout: parse_timeout(&service.timeout)?,
            compute: compute_options(service),
        };
        Ok(Ddo {
            context: default_context(),
            id: Did::derive(nft_address, form.user.chain_id),
            version: METADATA_SCHEMA_VERSION.to_string(),
            chain_id: form.user.chain_id,
            metadata,
            services: vec![descriptor],
            mode: DdoMode::Final {
                nft_address: nft_address.clone(),
            },
        })
    }

    /// Builds the descriptive metadata block shared by both modes.
    fn build_metadata(
        &self,
        form: &FormSnapshot,
        files: Option<&[String]>,
        links: Option<Vec<String>>,
        timestamp: &PublishTimestamp,
    ) -> Result<AssetMetadata, ValidationError> {
        let metadata = &form.metadata;
        let algorithm = self.algorithm_metadata(metadata, files)?;
        let trust = self.trust_information(metadata)?;
        let license = metadata
            .license
            .clone()
            .filter(|license| !license.trim().is_empty())
            .unwrap_or_else(|| self.defaults.license_url.clone());
        Ok(AssetMetadata {
            created: timestamp.clone(),
            updated: timestamp.clone(),
            kind: metadata.kind,
            name: metadata.name.clone(),
            description: metadata.description.clone(),
            tags: normalize_tags(metadata.tags.as_deref()),
            author: metadata.author.clone(),
            license,
            links,
            additional_information: AdditionalInformation {
                terms_and_conditions: metadata.terms_and_conditions,
                trust,
            },
            algorithm,
        })
    }

    /// Builds the trust section, gating PII fields to dataset assets.
    fn trust_information(
        &self,
        metadata: &FormMetadata,
    ) -> Result<TrustInformation, ValidationError> {
        let terms = first_valid_urls(&metadata.trust.terms_and_conditions)?
            .unwrap_or_else(|| vec![self.defaults.access_terms_url.clone()]);
        let is_dataset = !metadata.kind.is_algorithm();
        Ok(TrustInformation {
            terms_and_conditions: vec![AccessTerms {
                url: terms,
            }],
            contains_pii: is_dataset.then_some(metadata.trust.contains_pii),
            pii_information: if is_dataset { metadata.trust.pii_information.clone() } else { None },
            service_credential: metadata.trust.service_credential.clone(),
        })
    }

    /// Builds the algorithm block for algorithm assets with a container
    /// selection; every other input yields no block.
    fn algorithm_metadata(
        &self,
        metadata: &FormMetadata,
        files: Option<&[String]>,
    ) -> Result<Option<AlgorithmMetadata>, ValidationError> {
        if !metadata.kind.is_algorithm() {
            return Ok(None);
        }
        let Some(selection) = &metadata.container else {
            return Ok(None);
        };
        let container = match selection {
            ContainerSelection::Preset {
                id,
            } => {
                let preset = self
                    .presets
                    .iter()
                    .find(|preset| preset.id == *id)
                    .ok_or_else(|| ValidationError::UnknownPreset(id.clone()))?;
                let checksum = preset
                    .checksum
                    .clone()
                    .ok_or_else(|| ValidationError::PresetChecksumMissing(id.clone()))?;
                ContainerImage {
                    entrypoint: preset.entrypoint.clone(),
                    image: preset.image.clone(),
                    tag: preset.tag.clone(),
                    checksum,
                }
            }
            ContainerSelection::Custom {
                image,
                tag,
                entrypoint,
                checksum,
            } => ContainerImage {
                entrypoint: entrypoint.clone(),
                image: image.clone(),
                tag: tag.clone(),
                checksum: checksum.clone().unwrap_or_default(),
            },
        };
        let language = files
            .and_then(|urls| urls.first())
            .map(|url| file_extension(url).to_string())
            .unwrap_or_default();
        Ok(Some(AlgorithmMetadata {
            language,
            version: ALGORITHM_METADATA_VERSION.to_string(),
            container,
        }))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Sanitizes the first entry of a reference list when it is marked valid.
///
/// Mirrors the single-file publication rule: only the first entry is ever
/// consumed, and an invalid or absent first entry drops the whole list.
fn first_valid_urls(entries: &[FileEntry]) -> Result<Option<Vec<String>>, ValidationError> {
    match entries.first() {
        Some(entry) if entry.valid => Ok(Some(vec![sanitize_url(&entry.url)?])),
        _ => Ok(None),
    }
}

/// Returns compute options only for compute-mode services.
fn compute_options(service: &FormService) -> Option<ComputeOptions> {
    if matches!(service.access, AccessKind::Compute) {
        service.compute_options.clone()
    } else {
        None
    }
}
