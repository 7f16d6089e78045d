// crates/dataforge-core/src/core/timestamp.rs
// ============================================================================
// Module: Dataforge Publish Timestamps
// Description: RFC 3339 UTC instants with sub-second precision stripped.
// Purpose: Provide deterministic, caller-injected time values for documents.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Documents carry `created` and `updated` values that are equal at publish
//! time and never include a sub-second component. The transformer never reads
//! wall-clock time itself; callers mint a [`PublishTimestamp`] once and thread
//! it through, which keeps repeated transforms byte-identical.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when formatting a publish timestamp.
#[derive(Debug, Error)]
pub enum TimestampError {
    /// The instant could not be truncated or formatted as RFC 3339.
    #[error("timestamp formatting failed: {0}")]
    Format(String),
}

// ============================================================================
// SECTION: Publish Timestamp
// ============================================================================

/// UTC instant formatted as RFC 3339 without a sub-second component.
///
/// # Invariants
/// - The wire form never contains fractional seconds.
/// - Equal inputs format to equal wire strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublishTimestamp(String);

impl PublishTimestamp {
    /// Captures the current instant with sub-second precision stripped.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::Format`] when formatting fails.
    pub fn now() -> Result<Self, TimestampError> {
        Self::from_instant(OffsetDateTime::now_utc())
    }

    /// Formats an explicit instant with sub-second precision stripped.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::Format`] when formatting fails.
    pub fn from_instant(instant: OffsetDateTime) -> Result<Self, TimestampError> {
        let truncated = instant
            .replace_nanosecond(0)
            .map_err(|err| TimestampError::Format(err.to_string()))?;
        let formatted =
            truncated.format(&Rfc3339).map_err(|err| TimestampError::Format(err.to_string()))?;
        Ok(Self(formatted))
    }

    /// Returns the formatted timestamp as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublishTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
