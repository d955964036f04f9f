// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./dexter.toml` > `~/.config/dexter/dexter.toml` > `/etc/dexter/dexter.toml`
//! with environment variable overrides via `DEXTER_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::DexterConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/dexter/dexter.toml` (system-wide)
/// 3. `~/.config/dexter/dexter.toml` (user XDG config)
/// 4. `./dexter.toml` (local directory)
/// 5. `DEXTER_*` environment variables
pub fn load_config() -> Result<DexterConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<DexterConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DexterConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DexterConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DexterConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(DexterConfig::default()))
        .merge(Toml::file("/etc/dexter/dexter.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("dexter/dexter.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("dexter.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `DEXTER_STORAGE_DATABASE_PATH` must map to
/// `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("DEXTER_").map(|key| section_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name onto a dotted config key.
fn section_key(key: &str) -> String {
    for section in ["logging", "storage", "affiliation", "quotes"] {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(section_key("storage_database_path"), "storage.database_path");
        assert_eq!(section_key("affiliation_window_days"), "affiliation.window_days");
        assert_eq!(
            section_key("quotes_duplicate_threshold"),
            "quotes.duplicate_threshold"
        );
        assert_eq!(section_key("logging_level"), "logging.level");
    }

    #[test]
    fn unknown_env_keys_pass_through() {
        assert_eq!(section_key("mystery"), "mystery");
    }
}
