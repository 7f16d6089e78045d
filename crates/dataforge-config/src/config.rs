// crates/dataforge-config/src/config.rs
// ============================================================================
// Module: Dataforge Configuration
// Description: Configuration loading and validation for the publication pipeline.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: dataforge-core, bigdecimal, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size limits and
//! validated fail-closed: malformed fee addresses, URIs, or presets are load
//! errors, never silently defaulted. Every knob is an explicit struct handed
//! into the pipeline, keeping it testable and reentrant.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use dataforge_core::Address;
use dataforge_core::ChainContracts;
use dataforge_core::ChainId;
use dataforge_core::ContainerPreset;
use dataforge_core::MarketFees;
use dataforge_core::MetadataDefaults;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "dataforge.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "DATAFORGE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;
/// Minimum compliance request timeout in milliseconds.
pub(crate) const MIN_COMPLIANCE_TIMEOUT_MS: u64 = 100;
/// Maximum compliance request timeout in milliseconds.
pub(crate) const MAX_COMPLIANCE_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// The configuration file exceeds the size cap.
    #[error("config file too large: {actual_bytes} > {max_bytes}")]
    TooLarge {
        /// Observed file size in bytes.
        actual_bytes: u64,
        /// Maximum allowed size in bytes.
        max_bytes: u64,
    },
    /// The configuration file is not valid TOML for this schema.
    #[error("config parse error: {0}")]
    Parse(String),
    /// The configuration parsed but violates a validation rule.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Compliance Section
// ============================================================================

/// Compliance registry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ComplianceSection {
    /// Base URI of the compliance registry.
    pub base_uri: String,
    /// Latest registry protocol version this build speaks.
    pub api_version: String,
    /// Registry domains whose contexts select the latest protocol version.
    pub allowed_registry_domains: Vec<String>,
    /// Request timeout for registry calls, in milliseconds.
    pub timeout_ms: u64,
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Complete injected configuration for the publication pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Marketplace fee parameters.
    #[serde(default = "default_market_fees")]
    pub market: MarketFees,
    /// Metadata fallback values.
    #[serde(default = "default_metadata_defaults")]
    pub metadata: MetadataDefaults,
    /// Compliance registry settings.
    #[serde(default = "default_compliance")]
    pub compliance: ComplianceSection,
    /// Pricing mechanism contracts per supported chain.
    #[serde(default = "default_chains")]
    pub chains: Vec<ChainContracts>,
    /// Curated algorithm container preset catalog.
    #[serde(default = "default_presets")]
    pub presets: Vec<ContainerPreset>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            market: default_market_fees(),
            metadata: default_metadata_defaults(),
            compliance: default_compliance(),
            chains: default_chains(),
            presets: default_presets(),
        }
    }
}

impl ForgeConfig {
    /// Loads configuration from the given path, the environment override, or
    /// the default filename, in that order of preference.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized,
    /// unparseable, or invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => env::var(CONFIG_ENV_VAR)
                .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_NAME), PathBuf::from),
        };
        let metadata = fs::metadata(&path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::TooLarge {
                actual_bytes: metadata.len(),
                max_bytes: MAX_CONFIG_FILE_SIZE,
            });
        }
        let raw = fs::read_to_string(&path).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::from_toml_str(&raw)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the contract addresses for a chain, when configured.
    #[must_use]
    pub fn chain(&self, chain_id: ChainId) -> Option<&ChainContracts> {
        self.chains.iter().find(|contracts| contracts.chain_id == chain_id)
    }

    /// Validates every section fail-closed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_address("market.fee_address", &self.market.fee_address)?;
        validate_decimal("market.order_fee", &self.market.order_fee)?;
        validate_decimal("market.fixed_swap_fee", &self.market.fixed_swap_fee)?;
        if self.market.datatoken_template_index == 0 {
            return Err(ConfigError::Invalid(
                "market.datatoken_template_index must be >= 1".to_string(),
            ));
        }
        validate_http_url("metadata.license_url", &self.metadata.license_url)?;
        validate_http_url("metadata.access_terms_url", &self.metadata.access_terms_url)?;
        self.validate_compliance()?;
        self.validate_chains()?;
        self.validate_presets()
    }

    /// Validates the compliance registry section.
    fn validate_compliance(&self) -> Result<(), ConfigError> {
        validate_http_url("compliance.base_uri", &self.compliance.base_uri)?;
        if self.compliance.api_version.trim().is_empty() {
            return Err(ConfigError::Invalid("compliance.api_version is empty".to_string()));
        }
        for domain in &self.compliance.allowed_registry_domains {
            validate_http_url("compliance.allowed_registry_domains", domain)?;
        }
        if self.compliance.timeout_ms < MIN_COMPLIANCE_TIMEOUT_MS
            || self.compliance.timeout_ms > MAX_COMPLIANCE_TIMEOUT_MS
        {
            return Err(ConfigError::Invalid(format!(
                "compliance.timeout_ms out of range: {}",
                self.compliance.timeout_ms
            )));
        }
        Ok(())
    }

    /// Validates the per-chain contract table.
    fn validate_chains(&self) -> Result<(), ConfigError> {
        if self.chains.is_empty() {
            return Err(ConfigError::Invalid("chains must not be empty".to_string()));
        }
        for contracts in &self.chains {
            validate_address("chains.fixed_rate_exchange", &contracts.fixed_rate_exchange)?;
            validate_address("chains.dispenser", &contracts.dispenser)?;
            let duplicates = self
                .chains
                .iter()
                .filter(|other| other.chain_id == contracts.chain_id)
                .count();
            if duplicates > 1 {
                return Err(ConfigError::Invalid(format!(
                    "duplicate chain id: {}",
                    contracts.chain_id
                )));
            }
        }
        Ok(())
    }

    /// Validates the container preset catalog.
    fn validate_presets(&self) -> Result<(), ConfigError> {
        for preset in &self.presets {
            if preset.id.trim().is_empty() {
                return Err(ConfigError::Invalid("preset id is empty".to_string()));
            }
            if preset.image.trim().is_empty()
                || preset.tag.trim().is_empty()
                || preset.entrypoint.trim().is_empty()
            {
                return Err(ConfigError::Invalid(format!(
                    "preset has empty container fields: {}",
                    preset.id
                )));
            }
            if let Some(checksum) = &preset.checksum
                && !is_sha256_checksum(checksum)
            {
                return Err(ConfigError::Invalid(format!(
                    "preset checksum is not a sha256 digest: {}",
                    preset.id
                )));
            }
            let duplicates = self.presets.iter().filter(|other| other.id == preset.id).count();
            if duplicates > 1 {
                return Err(ConfigError::Invalid(format!("duplicate preset id: {}", preset.id)));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Built-in marketplace fee parameters.
fn default_market_fees() -> MarketFees {
    MarketFees {
        fee_address: Address::new("0x4a7f3b21e9c05d8f6a1b2c3d4e5f60718293a4b5"),
        order_fee: "0".to_string(),
        fixed_swap_fee: "0.001".to_string(),
        datatoken_template_index: 2,
    }
}

/// Built-in metadata fallbacks.
fn default_metadata_defaults() -> MetadataDefaults {
    MetadataDefaults {
        license_url: "https://market.dataforge.io/terms".to_string(),
        access_terms_url: "https://market.dataforge.io/terms/access".to_string(),
    }
}

/// Built-in compliance registry settings.
fn default_compliance() -> ComplianceSection {
    ComplianceSection {
        base_uri: "https://compliance.dataforge.io".to_string(),
        api_version: "2210".to_string(),
        allowed_registry_domains: vec![
            "https://registry.dataforge.io/v2206".to_string(),
            "https://registry.lab.dataforge.io/v2206".to_string(),
        ],
        timeout_ms: 10_000,
    }
}

/// Built-in chain contract table.
fn default_chains() -> Vec<ChainContracts> {
    vec![ChainContracts {
        chain_id: ChainId::new(1),
        fixed_rate_exchange: Address::new("0x7d1e3f0a5c9b2d4e6f8091a2b3c4d5e6f7081920"),
        dispenser: Address::new("0x2c4e6f8a0b1d3f5a7c9e0b2d4f6a8c0e1f3a5b7d"),
    }]
}

/// Built-in container preset catalog.
fn default_presets() -> Vec<ContainerPreset> {
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
            checksum: Some(
                "sha256:a1d8e4027c9f5b36e8d20a714f6c3b95d072e8a1b4c6f3950d8e2a716c4f0b83"
                    .to_string(),
            ),
        },
    ]
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Validates a 20-byte hex account address with `0x` prefix.
fn validate_address(field: &str, address: &Address) -> Result<(), ConfigError> {
    let value = address.as_str();
    let valid = value
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{field} is not a hex address: {value}")))
    }
}

/// Validates a non-negative decimal string.
fn validate_decimal(field: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = BigDecimal::from_str(value)
        .map_err(|_| ConfigError::Invalid(format!("{field} is not a decimal: {value}")))?;
    if parsed < BigDecimal::from(0) {
        return Err(ConfigError::Invalid(format!("{field} is negative: {value}")));
    }
    Ok(())
}

/// Validates an absolute `http`/`https` URL.
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(value)
        .map_err(|_| ConfigError::Invalid(format!("{field} is not a url: {value}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::Invalid(format!("{field} must be http(s): {value}")));
    }
    Ok(())
}

/// Returns true for `sha256:` digests with a 64-character hex payload.
fn is_sha256_checksum(checksum: &str) -> bool {
    checksum
        .strip_prefix("sha256:")
        .is_some_and(|hex| hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
