// crates/dataforge-core/src/core/normalize.rs
// ============================================================================
// Module: Dataforge Input Normalization
// Description: Pure string transforms applied to publisher form input.
// Purpose: Slugify tags, map timeout strings, and sanitize URLs fail-closed.
// Dependencies: url, crate::interfaces
// ============================================================================

//! ## Overview
//! Everything in this module is a pure function of its inputs. Tag slugs are
//! idempotent, timeout parsing accepts a small fixed vocabulary, and URL
//! sanitizing rejects schemes and credentials the pipeline refuses to embed
//! into documents.

// ============================================================================
// SECTION: Imports
// ============================================================================

use url::Url;

use crate::interfaces::ValidationError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Timeout value meaning "no expiry".
const TIMEOUT_FOREVER: &str = "forever";

/// URL schemes the pipeline accepts in file and link references.
const ALLOWED_URL_SCHEMES: [&str; 3] = ["http", "https", "ipfs"];

// ============================================================================
// SECTION: Tag Normalization
// ============================================================================

/// Slugifies a single tag: case-folded, non-alphanumeric runs collapsed to `-`.
///
/// # Invariants
/// - Idempotent: slugifying a slug yields the same slug.
#[must_use]
pub fn slugify_tag(tag: &str) -> String {
    let mut slug = String::with_capacity(tag.len());
    let mut pending_separator = false;
    for ch in tag.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            // Case folding can expand to combining marks; keep letters only.
            for lowered in ch.to_lowercase() {
                if lowered.is_alphanumeric() {
                    slug.push(lowered);
                }
            }
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Normalizes a tag list, preserving input order.
///
/// Empty or absent tag lists propagate as `None` rather than an empty
/// container; tags that slugify to nothing are dropped.
#[must_use]
pub fn normalize_tags(tags: Option<&[String]>) -> Option<Vec<String>> {
    let tags = tags?;
    if tags.is_empty() {
        return None;
    }
    let normalized: Vec<String> =
        tags.iter().map(|tag| slugify_tag(tag)).filter(|slug| !slug.is_empty()).collect();
    if normalized.is_empty() { None } else { Some(normalized) }
}

// ============================================================================
// SECTION: File Extensions
// ============================================================================

/// Returns the final dot-separated segment of a file URL.
///
/// A URL without any dot yields the whole input, mirroring the historical
/// extension-derivation behavior for algorithm language fields.
#[must_use]
pub fn file_extension(file_url: &str) -> &str {
    file_url.rsplit('.').next().unwrap_or(file_url)
}

// ============================================================================
// SECTION: Timeout Mapping
// ============================================================================

/// Maps a human timeout string to whole seconds.
///
/// Accepts `forever` (zero seconds) or `<count> <unit>` where unit is one of
/// second, minute, hour, day, week, month, or year, singular or plural.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimeout`] for any other shape, including
/// values that overflow `u64` seconds.
pub fn parse_timeout(raw: &str) -> Result<u64, ValidationError> {
    let normalized = raw.trim().to_ascii_lowercase();
    if normalized == TIMEOUT_FOREVER {
        return Ok(0);
    }
    let invalid = || ValidationError::InvalidTimeout(raw.to_string());
    let mut parts = normalized.split_whitespace();
    let count: u64 = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let unit = parts.next().ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    let seconds_per_unit = unit_seconds(unit).ok_or_else(invalid)?;
    count.checked_mul(seconds_per_unit).ok_or_else(invalid)
}

/// Returns the seconds carried by one timeout unit, accepting plural forms.
fn unit_seconds(unit: &str) -> Option<u64> {
    let singular = unit.strip_suffix('s').unwrap_or(unit);
    match singular {
        "second" => Some(1),
        "minute" => Some(60),
        "hour" => Some(3_600),
        "day" => Some(86_400),
        "week" => Some(604_800),
        "month" => Some(2_592_000),
        "year" => Some(31_536_000),
        _ => None,
    }
}

// ============================================================================
// SECTION: URL Sanitizing
// ============================================================================

/// Validates and trims a URL destined for a document or a provider call.
///
/// Only `http`, `https`, and `ipfs` schemes are accepted, and URLs carrying
/// embedded credentials are rejected.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidUrl`] when parsing fails or policy is
/// violated.
pub fn sanitize_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let invalid = || ValidationError::InvalidUrl(raw.to_string());
    let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
    if !ALLOWED_URL_SCHEMES.contains(&parsed.scheme()) {
        return Err(invalid());
    }
    if !parsed.username().is_empty() || parsed.password().is_some() {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}
