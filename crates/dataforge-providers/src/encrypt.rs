// crates/dataforge-providers/src/encrypt.rs
// ============================================================================
// Module: File Reference Encryption Client
// Description: Network-backed implementation of the file reference encryptor.
// Purpose: Replace plaintext file references with provider-issued ciphertext.
// Dependencies: dataforge-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! The client posts the encryption request to the asset's provider endpoint
//! and returns the response body as an opaque ciphertext blob. Any transport
//! failure or non-success status resolves to
//! [`EncryptionError::Unavailable`] and aborts the publish; there is no
//! plaintext fallback. The call performs no server-side mutation, so a failed
//! publish is safe to retry by re-submission.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use dataforge_core::CancelToken;
use dataforge_core::ChainId;
use dataforge_core::EncryptionError;
use dataforge_core::EncryptionRequest;
use dataforge_core::FileEncryptor;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use url::Url;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the encryption client.
///
/// # Invariants
/// - `allow_http = false` blocks cleartext `http://` provider endpoints.
/// - `timeout_ms` applies to the full request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptClientConfig {
    /// Allow cleartext HTTP provider endpoints (disabled by default).
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for EncryptClientConfig {
    fn default() -> Self {
        Self {
            allow_http: false,
            timeout_ms: 10_000,
            user_agent: "dataforge/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking HTTP client implementing [`FileEncryptor`].
pub struct FileEncryptClient {
    /// Client configuration.
    config: EncryptClientConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl FileEncryptClient {
    /// Creates a new encryption client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptionError::Client`] when the HTTP client cannot be
    /// created.
    pub fn new(config: EncryptClientConfig) -> Result<Self, EncryptionError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| EncryptionError::Client(err.to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Validates the provider endpoint against scheme policy.
    fn validate_endpoint(&self, provider_endpoint: &str) -> Result<(), EncryptionError> {
        let unavailable = |detail: &str| EncryptionError::Unavailable {
            endpoint: provider_endpoint.to_string(),
            detail: detail.to_string(),
        };
        let parsed = Url::parse(provider_endpoint).map_err(|_| unavailable("invalid endpoint"))?;
        match parsed.scheme() {
            "https" => Ok(()),
            "http" if self.config.allow_http => Ok(()),
            _ => Err(unavailable("unsupported endpoint scheme")),
        }
    }
}

impl FileEncryptor for FileEncryptClient {
    fn encrypt(
        &self,
        request: &EncryptionRequest,
        chain_id: ChainId,
        provider_endpoint: &str,
        cancel: &CancelToken,
    ) -> Result<String, EncryptionError> {
        if cancel.is_cancelled() {
            return Err(EncryptionError::Cancelled);
        }
        self.validate_endpoint(provider_endpoint)?;
        let endpoint = format!(
            "{}/api/services/encrypt?chainId={chain_id}",
            provider_endpoint.trim_end_matches('/')
        );
        let body = serde_json::to_string(request)
            .map_err(|err| EncryptionError::Client(err.to_string()))?;
        let response = self
            .client
            .post(&endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|err| {
                tracing::error!(
                    endpoint = %endpoint,
                    nft = %request.nft_address,
                    "encryption request failed: {err}"
                );
                EncryptionError::Unavailable {
                    endpoint: endpoint.clone(),
                    detail: "request failed".to_string(),
                }
            })?;
        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                endpoint = %endpoint,
                status = status.as_u16(),
                nft = %request.nft_address,
                "encryption provider returned non-success status"
            );
            return Err(EncryptionError::Unavailable {
                endpoint,
                detail: format!("status {}", status.as_u16()),
            });
        }
        let ciphertext = response.text().map_err(|err| {
            tracing::error!(endpoint = %endpoint, "encryption response unreadable: {err}");
            EncryptionError::Unavailable {
                endpoint: endpoint.clone(),
                detail: "unreadable response".to_string(),
            }
        })?;
        if ciphertext.trim().is_empty() {
            return Err(EncryptionError::Unavailable {
                endpoint,
                detail: "empty ciphertext".to_string(),
            });
        }
        Ok(ciphertext)
    }
}
