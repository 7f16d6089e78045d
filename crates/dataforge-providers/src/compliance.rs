// crates/dataforge-providers/src/compliance.rs
// ============================================================================
// Module: Compliance Registry Client
// Description: Sign, store, and verify trust credentials against the registry.
// Purpose: Resolve every registry call to a structured outcome; never abort a publish.
// Dependencies: dataforge-core, reqwest, serde_json
// ============================================================================

//! ## Overview
//! The registry exposes three endpoints under one base URI: signing, storage,
//! and verification. Signing failures leave the credential unsigned; storage
//! and verification absorb transport failures into negative structured
//! outcomes and log them, because an asset may publish without a verified
//! credential. A `409` from storage means the payload already exists by
//! content identity and is not an error; a `409` from verification is a
//! conflict whose body is echoed back to the caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use dataforge_core::CancelToken;
use dataforge_core::CredentialStatus;
use dataforge_core::Did;
use dataforge_core::canonical_digest;
use dataforge_core::declared_contexts;
use dataforge_core::select_api_version;
use dataforge_core::service_offering_subject_id;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header carrying the selected registry protocol version.
pub const API_VERSION_HEADER: &str = "X-Api-Version";

/// Signing endpoint path under the registry base URI.
const SIGN_PATH: &str = "/api/sign";

/// Storage endpoint path under the registry base URI.
const STORE_PATH: &str = "/api/service-offering/verify/raw?store=true";

/// Verification endpoint path under the registry base URI.
const VERIFY_PATH: &str = "/main/api/credential-offers";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the compliance registry client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceClientConfig {
    /// Base URI of the compliance registry.
    pub base_uri: String,
    /// Latest registry protocol version this build speaks.
    pub api_version: String,
    /// Registry domains whose contexts select the latest protocol version.
    pub allowed_registry_domains: Vec<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for ComplianceClientConfig {
    fn default() -> Self {
        Self {
            base_uri: "https://compliance.dataforge.io".to_string(),
            api_version: "2210".to_string(),
            allowed_registry_domains: vec![
                "https://registry.dataforge.io/v2206".to_string(),
                "https://registry.lab.dataforge.io/v2206".to_string(),
            ],
            timeout_ms: 10_000,
            user_agent: "dataforge/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by operations that must report failure to their caller.
///
/// Storage and verification do not use this type on the network path; they
/// absorb failures into their structured outcomes.
#[derive(Debug, Error)]
pub enum ComplianceError {
    /// The HTTP client could not be constructed.
    #[error("compliance client build failed: {0}")]
    Client(String),
    /// A registry endpoint was unreachable.
    #[error("compliance transport error at {endpoint}: {detail}")]
    Transport {
        /// Endpoint the request targeted.
        endpoint: String,
        /// Transport detail.
        detail: String,
    },
    /// A registry endpoint returned a non-success status.
    #[error("compliance endpoint {endpoint} returned status {status}")]
    Status {
        /// Endpoint the request targeted.
        endpoint: String,
        /// Returned HTTP status code.
        status: u16,
    },
    /// A payload or response body was not the expected JSON shape.
    #[error("compliance payload error: {0}")]
    Payload(String),
    /// The call was cancelled before any request was sent.
    #[error("compliance request cancelled")]
    Cancelled,
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// A credential signed by the registry's signing endpoint.
///
/// The raw payload is wrapped under `selfDescriptionCredential` and the
/// registry's own fields are flattened alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedCredential {
    /// The raw credential the signature covers.
    #[serde(rename = "selfDescriptionCredential")]
    pub self_description_credential: Value,
    /// Registry-issued compliance fields.
    #[serde(flatten)]
    pub compliance: Map<String, Value>,
}

/// Structured result of a storage attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOutcome {
    /// Whether the registry stored the payload in this call.
    pub stored: bool,
    /// URL the payload is stored under, when the registry returned one.
    pub stored_url: Option<String>,
}

impl StoreOutcome {
    /// Returns the lifecycle state this outcome leaves the credential in.
    #[must_use]
    pub const fn status(&self) -> CredentialStatus {
        if self.stored { CredentialStatus::Stored } else { CredentialStatus::Signed }
    }

    /// Outcome for any failed or conflicting storage attempt.
    const fn not_stored() -> Self {
        Self {
            stored: false,
            stored_url: None,
        }
    }
}

/// Structured result of a verification attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyOutcome {
    /// Whether the registry accepted the credential.
    pub verified: bool,
    /// Registry protocol version selected for this call.
    pub api_version: Option<String>,
    /// Whether the service-offering subject id matches the asset identifier;
    /// absent when no identifier was supplied for comparison.
    pub id_match: Option<bool>,
    /// Registry-supplied conflict detail, echoed on `409`.
    pub response_body: Option<Value>,
}

impl VerifyOutcome {
    /// Returns the lifecycle state this outcome leaves the credential in.
    #[must_use]
    pub const fn status(&self) -> CredentialStatus {
        if self.verified { CredentialStatus::Verified } else { CredentialStatus::Rejected }
    }

    /// Outcome for any failed verification attempt.
    const fn rejected(api_version: Option<String>) -> Self {
        Self {
            verified: false,
            api_version,
            id_match: None,
            response_body: None,
        }
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking HTTP client for the compliance registry.
pub struct ComplianceClient {
    /// Client configuration.
    config: ComplianceClientConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl ComplianceClient {
    /// Creates a new registry client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ComplianceError::Client`] when the HTTP client cannot be
    /// created.
    pub fn new(config: ComplianceClientConfig) -> Result<Self, ComplianceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| ComplianceError::Client(err.to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Joins a path onto the configured base URI.
    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_uri.trim_end_matches('/'))
    }

    /// Submits a raw credential for signing.
    ///
    /// # Errors
    ///
    /// Returns [`ComplianceError`] on transport failure or any non-success
    /// status; the credential then remains unsigned. The failure is non-fatal
    /// to publication.
    pub fn sign_credential(
        &self,
        raw: &Value,
        cancel: &CancelToken,
    ) -> Result<SignedCredential, ComplianceError> {
        if cancel.is_cancelled() {
            return Err(ComplianceError::Cancelled);
        }
        let endpoint = self.endpoint(SIGN_PATH);
        let response = self.post_json(&endpoint, raw, None)?;
        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                endpoint = %endpoint,
                status = status.as_u16(),
                "credential signing returned non-success status"
            );
            return Err(ComplianceError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        let body = read_json(response, &endpoint)?;
        let Value::Object(compliance) = body else {
            return Err(ComplianceError::Payload("signing response is not an object".to_string()));
        };
        Ok(SignedCredential {
            self_description_credential: raw.clone(),
            compliance,
        })
    }

    /// Submits a signed credential for storage.
    ///
    /// A `409` means the payload already exists remotely by content identity
    /// and resolves to `stored: false` without an error; transport failures
    /// and other statuses are logged and resolve the same way.
    #[must_use]
    pub fn store_credential(&self, signed: &SignedCredential, cancel: &CancelToken) -> StoreOutcome {
        if cancel.is_cancelled() {
            return StoreOutcome::not_stored();
        }
        let endpoint = self.endpoint(STORE_PATH);
        let digest = canonical_digest(signed).ok();
        let payload = match serde_json::to_value(signed) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(endpoint = %endpoint, "signed credential unserializable: {err}");
                return StoreOutcome::not_stored();
            }
        };
        let response = match self.post_json(&endpoint, &payload, None) {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(endpoint = %endpoint, "credential storage failed: {err}");
                return StoreOutcome::not_stored();
            }
        };
        let status = response.status().as_u16();
        if status == 409 {
            tracing::warn!(
                endpoint = %endpoint,
                digest = digest.as_deref().unwrap_or("-"),
                "credential already stored by content identity"
            );
            return StoreOutcome::not_stored();
        }
        if !response.status().is_success() {
            tracing::error!(
                endpoint = %endpoint,
                status,
                "credential storage returned non-success status"
            );
            return StoreOutcome::not_stored();
        }
        let stored_url = read_json(response, &endpoint)
            .ok()
            .as_ref()
            .and_then(|body| body.get("storedCredentialUrl"))
            .and_then(Value::as_str)
            .map(str::to_string);
        StoreOutcome {
            stored: true,
            stored_url,
        }
    }

    /// Submits a raw credential for verification against the registry.
    ///
    /// The registry protocol version is selected from the credential's
    /// declared contexts, sent as a request header, and reported in the
    /// outcome. A `409` resolves to a conflict with the response body echoed;
    /// a `201` resolves to verified, with the service-offering subject id
    /// compared case-insensitively against `did` when one is supplied. Every
    /// failure resolves to a structured negative outcome; this method never
    /// panics or escapes the pipeline boundary.
    #[must_use]
    pub fn verify_raw_credential(
        &self,
        raw: &str,
        did: Option<&Did>,
        cancel: &CancelToken,
    ) -> VerifyOutcome {
        if cancel.is_cancelled() {
            return VerifyOutcome::rejected(None);
        }
        let endpoint = self.endpoint(VERIFY_PATH);
        let parsed: Value = match serde_json::from_str(raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::error!(endpoint = %endpoint, "raw credential is not valid json: {err}");
                return VerifyOutcome::rejected(None);
            }
        };
        let contexts = declared_contexts(&parsed);
        let api_version = select_api_version(
            contexts.as_deref(),
            &self.config.allowed_registry_domains,
            &self.config.api_version,
        );
        let response = match self.post_json(&endpoint, &parsed, Some(&api_version)) {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(endpoint = %endpoint, "credential verification failed: {err}");
                return VerifyOutcome::rejected(Some(api_version));
            }
        };
        let status = response.status().as_u16();
        match status {
            409 => {
                let body = read_json(response, &endpoint).ok();
                tracing::warn!(endpoint = %endpoint, "credential verification conflict");
                VerifyOutcome {
                    verified: false,
                    api_version: Some(api_version),
                    id_match: None,
                    response_body: body,
                }
            }
            201 => {
                let subject_id = service_offering_subject_id(&parsed);
                let id_match = did.map(|did| {
                    subject_id.as_deref().is_some_and(|subject| did.matches(subject))
                });
                VerifyOutcome {
                    verified: true,
                    api_version: Some(api_version),
                    id_match,
                    response_body: None,
                }
            }
            _ => {
                tracing::error!(
                    endpoint = %endpoint,
                    status,
                    "credential verification returned unexpected status"
                );
                VerifyOutcome::rejected(Some(api_version))
            }
        }
    }

    /// Fetches a credential by URL and returns it pretty-printed.
    ///
    /// # Errors
    ///
    /// Returns [`ComplianceError`] on transport failure, non-success status,
    /// or a non-JSON body.
    pub fn fetch_credential(
        &self,
        url: &str,
        cancel: &CancelToken,
    ) -> Result<String, ComplianceError> {
        if cancel.is_cancelled() {
            return Err(ComplianceError::Cancelled);
        }
        let response = self.client.get(url).send().map_err(|err| {
            tracing::error!(endpoint = %url, "credential fetch failed: {err}");
            ComplianceError::Transport {
                endpoint: url.to_string(),
                detail: err.to_string(),
            }
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ComplianceError::Status {
                endpoint: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = read_json(response, url)?;
        serde_json::to_string_pretty(&body)
            .map_err(|err| ComplianceError::Payload(err.to_string()))
    }

    /// Posts a JSON payload, optionally tagging the protocol version header.
    fn post_json(
        &self,
        endpoint: &str,
        payload: &Value,
        api_version: Option<&str>,
    ) -> Result<Response, ComplianceError> {
        let body = serde_json::to_string(payload)
            .map_err(|err| ComplianceError::Payload(err.to_string()))?;
        let mut request =
            self.client.post(endpoint).header(CONTENT_TYPE, "application/json").body(body);
        if let Some(version) = api_version {
            request = request.header(API_VERSION_HEADER, version);
        }
        request.send().map_err(|err| ComplianceError::Transport {
            endpoint: endpoint.to_string(),
            detail: err.to_string(),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a response body as JSON.
fn read_json(response: Response, endpoint: &str) -> Result<Value, ComplianceError> {
    let text = response.text().map_err(|err| ComplianceError::Transport {
        endpoint: endpoint.to_string(),
        detail: err.to_string(),
    })?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|err| ComplianceError::Payload(err.to_string()))
}
