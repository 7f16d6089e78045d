// crates/dataforge-config/tests/config_loading.rs
// ============================================================================
// Module: Config Loading and Validation Tests
// Description: Verifies fail-closed parsing, validation rules, and file limits.
// ============================================================================
//! ## Overview
//! Ensures malformed addresses, fees, URIs, presets, and chain tables fail
//! closed, and that file loading enforces the size cap.

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

mod common;

use std::io::Write;

use dataforge_config::ConfigError;
use dataforge_config::ForgeConfig;

use crate::common::config_from_toml;

#[test]
fn malformed_fee_address_fails_closed() {
    let err = config_from_toml(
        r#"
[market]
fee_address = "not-an-address"
order_fee = "0"
fixed_swap_fee = "0.001"
datatoken_template_index = 2
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn negative_fee_fails_closed() {
    let err = config_from_toml(
        r#"
[market]
fee_address = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
order_fee = "-1"
fixed_swap_fee = "0.001"
datatoken_template_index = 2
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn zero_template_index_fails_closed() {
    let err = config_from_toml(
        r#"
[market]
fee_address = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
order_fee = "0"
fixed_swap_fee = "0.001"
datatoken_template_index = 0
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn non_http_compliance_uri_fails_closed() {
    let err = config_from_toml(
        r#"
[compliance]
base_uri = "ftp://compliance.example.org"
api_version = "2210"
allowed_registry_domains = []
timeout_ms = 10000
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn out_of_range_compliance_timeout_fails_closed() {
    let err = config_from_toml(
        r#"
[compliance]
base_uri = "https://compliance.example.org"
api_version = "2210"
allowed_registry_domains = []
timeout_ms = 99
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn empty_chain_table_fails_closed() {
    let err = config_from_toml("chains = []\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn duplicate_chain_ids_fail_closed() {
    let err = config_from_toml(
        r#"
[[chains]]
chain_id = 1
fixed_rate_exchange = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"
dispenser = "0xcccccccccccccccccccccccccccccccccccccccc"

[[chains]]
chain_id = 1
fixed_rate_exchange = "0xdddddddddddddddddddddddddddddddddddddddd"
dispenser = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn malformed_preset_checksum_fails_closed() {
    let err = config_from_toml(
        r#"
[[presets]]
id = "python-3.11"
image = "python"
tag = "3.11-slim"
entrypoint = "python $ALGO"
checksum = "md5:abcd"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn preset_without_checksum_is_loadable() {
    // The missing checksum only becomes fatal when the preset is selected.
    let config = config_from_toml(
        r#"
[[presets]]
id = "python-3.11"
image = "python"
tag = "3.11-slim"
entrypoint = "python $ALGO"
"#,
    )
    .unwrap();
    assert_eq!(config.presets.len(), 1);
    assert!(config.presets[0].checksum.is_none());
}

#[test]
fn duplicate_preset_ids_fail_closed() {
    let err = config_from_toml(
        r#"
[[presets]]
id = "python-3.11"
image = "python"
tag = "3.11-slim"
entrypoint = "python $ALGO"

[[presets]]
id = "python-3.11"
image = "python"
tag = "3.12-slim"
entrypoint = "python $ALGO"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn unparseable_toml_is_a_parse_error() {
    let err = config_from_toml("market = 7\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_reads_a_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[metadata]
license_url = "https://market.example.org/terms"
access_terms_url = "https://market.example.org/terms/access"
"#
    )
    .unwrap();
    let config = ForgeConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.metadata.license_url, "https://market.example.org/terms");
}

#[test]
fn load_rejects_missing_files() {
    let err = ForgeConfig::load(Some(std::path::Path::new("/nonexistent/dataforge.toml")))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn load_rejects_oversized_files() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let filler = format!("# {}\n", "x".repeat(1024));
    for _ in 0..1100 {
        file.write_all(filler.as_bytes()).unwrap();
    }
    file.flush().unwrap();
    let err = ForgeConfig::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::TooLarge { .. }));
}
