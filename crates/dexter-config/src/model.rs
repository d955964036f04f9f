// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Dexter.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Dexter configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DexterConfig {
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Affiliation relearning settings.
    #[serde(default)]
    pub affiliation: AffiliationConfig,

    /// Quotation duplicate detection settings.
    #[serde(default)]
    pub quotes: QuoteConfig,
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// SQLite storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("dexter").join("dexter.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("dexter.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Affiliation relearning configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AffiliationConfig {
    /// How many days of document sources are considered when relearning.
    /// The current affiliation is weighted as if it were claimed this long ago.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

impl Default for AffiliationConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

fn default_window_days() -> u32 {
    7
}

/// Quotation duplicate detection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QuoteConfig {
    /// Minimum similarity ratio (0.0-1.0) at which two quotes by the same
    /// entity count as the same quotation.
    #[serde(default = "default_duplicate_threshold")]
    pub duplicate_threshold: f64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            duplicate_threshold: default_duplicate_threshold(),
        }
    }
}

fn default_duplicate_threshold() -> f64 {
    0.8
}
