// crates/dataforge-config/tests/common/mod.rs
// ============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for dataforge-config.
// ============================================================================

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

use dataforge_config::ConfigError;
use dataforge_config::ForgeConfig;

/// Parses and validates a TOML string into a `ForgeConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<ForgeConfig, ConfigError> {
    ForgeConfig::from_toml_str(toml_str)
}

/// Returns a config with all defaults applied.
pub fn minimal_config() -> Result<ForgeConfig, ConfigError> {
    config_from_toml("")
}
