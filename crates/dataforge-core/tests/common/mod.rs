// crates/dataforge-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared helpers for dataforge-core tests.
// Purpose: Provide form builders and recording mocks for pipeline tests.
// Dependencies: dataforge-core, time
// ============================================================================

//! ## Overview
//! Provides a representative form snapshot, deterministic timestamps, and
//! recording mock implementations of the encryptor and token factory seams.

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Mutex;

use dataforge_core::AccessKind;
use dataforge_core::Address;
use dataforge_core::AssetKind;
use dataforge_core::BaseToken;
use dataforge_core::CancelToken;
use dataforge_core::ChainContracts;
use dataforge_core::ChainId;
use dataforge_core::CollectionTemplate;
use dataforge_core::ContainerPreset;
use dataforge_core::DatatokenCreateParams;
use dataforge_core::DatatokenDraft;
use dataforge_core::DispenserParams;
use dataforge_core::EncryptionError;
use dataforge_core::EncryptionRequest;
use dataforge_core::FactoryError;
use dataforge_core::FileEncryptor;
use dataforge_core::FileEntry;
use dataforge_core::FixedRateParams;
use dataforge_core::FormMetadata;
use dataforge_core::FormService;
use dataforge_core::FormSnapshot;
use dataforge_core::MarketFees;
use dataforge_core::MetadataDefaults;
use dataforge_core::NftCreateData;
use dataforge_core::NftFactory;
use dataforge_core::PricingReceipt;
use dataforge_core::PricingSelection;
use dataforge_core::PublishTimestamp;
use dataforge_core::PublisherContext;
use dataforge_core::TrustDisclosure;
use time::macros::datetime;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Deterministic timestamp used across document assertions.
pub fn sample_timestamp() -> PublishTimestamp {
    PublishTimestamp::from_instant(datetime!(2024-05-14 09:30:27.250 UTC)).unwrap()
}

/// Metadata fallbacks used across tests.
pub fn sample_defaults() -> MetadataDefaults {
    MetadataDefaults {
        license_url: "https://market.example.org/terms".to_string(),
        access_terms_url: "https://market.example.org/terms/access".to_string(),
    }
}

/// Preset catalog with one complete entry and one missing its checksum.
pub fn sample_presets() -> Vec<ContainerPreset> {
    vec![
        ContainerPreset {
            id: "python-3.11".to_string(),
            image: "python".to_string(),
            tag: "3.11-slim".to_string(),
            entrypoint: "python $ALGO".to_string(),
            checksum: Some(
                "sha256:4f2a9c81d7e3b65028a1c94f7d3e8b160c5a2d9f8e7b3a41d6c05f928e1b7a34"
                    .to_string(),
            ),
        },
        ContainerPreset {
            id: "node-20".to_string(),
            image: "node".to_string(),
            tag: "20-alpine".to_string(),
            entrypoint: "node $ALGO".to_string(),
            checksum: None,
        },
    ]
}

/// Marketplace fees used across pricing assertions.
pub fn sample_fees() -> MarketFees {
    MarketFees {
        fee_address: Address::new("0x4a7f3b21e9c05d8f6a1b2c3d4e5f60718293a4b5"),
        order_fee: "0.03".to_string(),
        fixed_swap_fee: "0.001".to_string(),
        datatoken_template_index: 2,
    }
}

/// Chain contracts used across pricing assertions.
pub fn sample_contracts() -> ChainContracts {
    ChainContracts {
        chain_id: ChainId::new(1),
        fixed_rate_exchange: Address::new("0x7d1e3f0a5c9b2d4e6f8091a2b3c4d5e6f7081920"),
        dispenser: Address::new("0x2c4e6f8a0b1d3f5a7c9e0b2d4f6a8c0e1f3a5b7d"),
    }
}

/// A representative dataset form with one valid file and fixed pricing.
pub fn sample_form() -> FormSnapshot {
    FormSnapshot {
        user: PublisherContext {
            chain_id: ChainId::new(1),
            account_id: Address::new("0x0e8c9f2b3a4d5e6f708192a3b4c5d6e7f8091a2b"),
        },
        metadata: FormMetadata {
            kind: AssetKind::Dataset,
            name: "Urban Air Quality 2024".to_string(),
            description: "Hourly PM2.5 readings from street-level sensors.".to_string(),
            author: "City Sensing Lab".to_string(),
            tags: Some(vec!["Air Quality".to_string(), "Sensor Data".to_string()]),
            license: None,
            terms_and_conditions: true,
            container: None,
            trust: TrustDisclosure {
                terms_and_conditions: vec![],
                contains_pii: false,
                pii_information: None,
                service_credential: None,
            },
            collection: CollectionTemplate {
                name: "Urban Air Quality Collection".to_string(),
                symbol: "AIR-1".to_string(),
                token_uri: "https://market.example.org/nft/air-1".to_string(),
                transferable: true,
            },
        },
        services: vec![FormService {
            access: AccessKind::Access,
            files: vec![FileEntry {
                url: "https://data.example.org/air/2024.csv".to_string(),
                valid: true,
            }],
            links: vec![FileEntry {
                url: "https://data.example.org/air/sample.csv".to_string(),
                valid: true,
            }],
            provider_url: "https://provider.example.org".to_string(),
            timeout: "1 day".to_string(),
            datatoken: DatatokenDraft {
                name: "Air Quality Token".to_string(),
                symbol: "AIRDT".to_string(),
            },
            compute_options: None,
        }],
        pricing: PricingSelection::Fixed {
            base_token: BaseToken {
                address: Address::new("0x6b4c2d1e0f9a8b7c6d5e4f3a2b1c0d9e8f7a6b5c"),
                symbol: "USDX".to_string(),
                decimals: 18,
            },
            price: "12.5".to_string(),
        },
    }
}

/// Same form with free pricing selected.
pub fn sample_free_form() -> FormSnapshot {
    let mut form = sample_form();
    form.pricing = PricingSelection::Free;
    form
}

// ============================================================================
// SECTION: Mock Encryptor
// ============================================================================

/// Recording mock of the file reference encryptor.
pub struct MockEncryptor {
    /// Ciphertext returned on success.
    pub ciphertext: String,
    /// Whether every call fails as unavailable.
    pub fail: bool,
    /// Captured requests in call order.
    pub calls: Mutex<Vec<EncryptionRequest>>,
}

impl MockEncryptor {
    /// Creates a succeeding mock returning the given ciphertext.
    pub fn succeeding(ciphertext: &str) -> Self {
        Self {
            ciphertext: ciphertext.to_string(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock whose every call fails as unavailable.
    pub fn failing() -> Self {
        Self {
            ciphertext: String::new(),
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the number of captured calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl FileEncryptor for MockEncryptor {
    fn encrypt(
        &self,
        request: &EncryptionRequest,
        _chain_id: ChainId,
        provider_endpoint: &str,
        cancel: &CancelToken,
    ) -> Result<String, EncryptionError> {
        if cancel.is_cancelled() {
            return Err(EncryptionError::Cancelled);
        }
        if self.fail {
            return Err(EncryptionError::Unavailable {
                endpoint: provider_endpoint.to_string(),
                detail: "mock failure".to_string(),
            });
        }
        self.calls.lock().unwrap().push(request.clone());
        Ok(self.ciphertext.clone())
    }
}

// ============================================================================
// SECTION: Mock Factory
// ============================================================================

/// Recording mock of the token factory.
pub struct MockFactory {
    /// Receipt returned on success.
    pub receipt: PricingReceipt,
    /// Whether every call fails.
    pub fail: bool,
    /// Captured fixed-rate calls.
    pub fixed_calls: Mutex<Vec<(NftCreateData, DatatokenCreateParams, FixedRateParams)>>,
    /// Captured dispenser calls.
    pub dispenser_calls: Mutex<Vec<(NftCreateData, DatatokenCreateParams, DispenserParams)>>,
}

impl MockFactory {
    /// Creates a succeeding mock returning a fixed receipt.
    pub fn succeeding() -> Self {
        Self {
            receipt: sample_receipt(),
            fail: false,
            fixed_calls: Mutex::new(Vec::new()),
            dispenser_calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::succeeding()
        }
    }

    /// Returns the total number of captured calls.
    pub fn call_count(&self) -> usize {
        self.fixed_calls.lock().unwrap().len() + self.dispenser_calls.lock().unwrap().len()
    }
}

impl NftFactory for MockFactory {
    fn create_with_fixed_rate(
        &self,
        _owner: &Address,
        nft: &NftCreateData,
        datatoken: &DatatokenCreateParams,
        fixed_rate: &FixedRateParams,
        cancel: &CancelToken,
    ) -> Result<PricingReceipt, FactoryError> {
        if cancel.is_cancelled() {
            return Err(FactoryError::Cancelled);
        }
        if self.fail {
            return Err(FactoryError::Factory("mock failure".to_string()));
        }
        self.fixed_calls.lock().unwrap().push((
            nft.clone(),
            datatoken.clone(),
            fixed_rate.clone(),
        ));
        Ok(self.receipt.clone())
    }

    fn create_with_dispenser(
        &self,
        _owner: &Address,
        nft: &NftCreateData,
        datatoken: &DatatokenCreateParams,
        dispenser: &DispenserParams,
        cancel: &CancelToken,
    ) -> Result<PricingReceipt, FactoryError> {
        if cancel.is_cancelled() {
            return Err(FactoryError::Cancelled);
        }
        if self.fail {
            return Err(FactoryError::Factory("mock failure".to_string()));
        }
        self.dispenser_calls.lock().unwrap().push((
            nft.clone(),
            datatoken.clone(),
            dispenser.clone(),
        ));
        Ok(self.receipt.clone())
    }
}

/// Receipt the succeeding mock factory returns.
pub fn sample_receipt() -> PricingReceipt {
    PricingReceipt {
        nft_address: Address::new("0x1f2e3d4c5b6a79880917263545362718f9e0d1c2"),
        datatoken_address: Address::new("0x9a8b7c6d5e4f30211203f4e5d6c7b8a990817263"),
        tx_hash: "0xb3e1a70525f6c8d94e2a1b0c3d4e5f60718293a4b5c6d7e8f9011223344556677".into(),
    }
}
