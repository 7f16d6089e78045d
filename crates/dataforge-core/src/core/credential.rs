// crates/dataforge-core/src/core/credential.rs
// ============================================================================
// Module: Trust Credential Model
// Description: Credential lifecycle states and pure credential inspection.
// Purpose: Keep registry protocol selection and payload inspection testable offline.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Trust credentials move through `unsigned -> signed -> stored -> verified |
//! rejected`; the registry is the authority for the terminal states. This
//! module holds the lifecycle enum, the pure API version selector, and the
//! payload-inspection helpers the network client builds on. Nothing here
//! performs IO.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Registry protocol version used when no declared context matches.
pub const LEGACY_API_VERSION: &str = "2204";

/// Credential subject type marking the service-offering entry.
pub const SERVICE_OFFERING_TYPE: &str = "ServiceOffering";

// ============================================================================
// SECTION: Lifecycle
// ============================================================================

/// Lifecycle state of a trust credential.
///
/// # Invariants
/// - The publisher triggers each transition; only the registry grants
///   `Verified` or `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialStatus {
    /// Raw payload, not yet signed.
    Unsigned,
    /// Signed by the registry's signing endpoint.
    Signed,
    /// Accepted by the registry's storage endpoint.
    Stored,
    /// Verified by the registry.
    Verified,
    /// Rejected or unverifiable.
    Rejected,
}

// ============================================================================
// SECTION: Credential Attachment
// ============================================================================

/// Credential carried inside a document's trust section.
///
/// Stored by reference (URL), inline (raw JSON), or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialAttachment {
    /// Inline raw credential JSON, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// URL the credential is stored under, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ============================================================================
// SECTION: Legal Name
// ============================================================================

/// Legal-name field that appears either bare or wrapped in a localized value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegalName {
    /// Bare string form.
    Plain(String),
    /// Localized wrapper form.
    Localized {
        /// The wrapped value.
        #[serde(rename = "@value")]
        value: String,
    },
}

impl LegalName {
    /// Unwraps the carried value regardless of form.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Plain(value)
            | Self::Localized {
                value,
            } => value,
        }
    }
}

// ============================================================================
// SECTION: API Version Selection
// ============================================================================

/// Selects the registry protocol version from declared context URIs.
///
/// An absent or empty context list, or any context prefixed by an allowed
/// registry domain, selects the latest configured version; everything else
/// falls back to the pinned [`LEGACY_API_VERSION`].
#[must_use]
pub fn select_api_version(
    contexts: Option<&[String]>,
    allowed_registry_domains: &[String],
    latest: &str,
) -> String {
    let Some(contexts) = contexts else {
        return latest.to_string();
    };
    if contexts.is_empty() {
        return latest.to_string();
    }
    let matches_registry = contexts.iter().any(|context| {
        allowed_registry_domains.iter().any(|domain| context.starts_with(domain.as_str()))
    });
    if matches_registry { latest.to_string() } else { LEGACY_API_VERSION.to_string() }
}

/// Extracts the declared context URIs from a parsed credential.
#[must_use]
pub fn declared_contexts(credential: &Value) -> Option<Vec<String>> {
    let contexts = credential.get("@context")?.as_array()?;
    Some(contexts.iter().filter_map(Value::as_str).map(str::to_string).collect())
}

// ============================================================================
// SECTION: Payload Inspection
// ============================================================================

/// Returns the subject id of the `ServiceOffering` entry, when present.
#[must_use]
pub fn service_offering_subject_id(credential: &Value) -> Option<String> {
    let entries = credential.get("verifiableCredential")?.as_array()?;
    entries.iter().find_map(|entry| {
        let subject = entry.get("credentialSubject")?;
        if subject.get("type")?.as_str()? != SERVICE_OFFERING_TYPE {
            return None;
        }
        Some(subject.get("id")?.as_str()?.to_string())
    })
}

/// Extracts the publisher legal name from a credential, unwrapping both the
/// bare-string and localized forms.
#[must_use]
pub fn publisher_legal_name(credential: &Value) -> Option<String> {
    let subject = credential.get("verifiableCredential")?.as_array()?.first()?.get("credentialSubject")?;
    let legal_name: LegalName = serde_json::from_value(subject.get("legalName")?.clone()).ok()?;
    Some(legal_name.value().to_string())
}
