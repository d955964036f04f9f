// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde attributes cannot express: non-empty paths,
//! positive windows, thresholds inside the similarity range.

use crate::diagnostic::ConfigError;
use crate::model::DexterConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Longest accepted relearning window: one hundred years.
pub const MAX_WINDOW_DAYS: u32 = 36_500;

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &DexterConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let window = config.affiliation.window_days;
    if window == 0 {
        errors.push(ConfigError::Validation {
            message: "affiliation.window_days must be at least 1".to_string(),
        });
    } else if window > MAX_WINDOW_DAYS {
        errors.push(ConfigError::Validation {
            message: format!(
                "affiliation.window_days must be at most {MAX_WINDOW_DAYS}, got {window}"
            ),
        });
    }

    let threshold = config.quotes.duplicate_threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        errors.push(ConfigError::Validation {
            message: format!(
                "quotes.duplicate_threshold must be in (0, 1], got {threshold}"
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&DexterConfig::default()).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = DexterConfig::default();
        config.storage.database_path = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "database_path"));
    }

    #[test]
    fn zero_window_fails_validation() {
        let mut config = DexterConfig::default();
        config.affiliation.window_days = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "window_days"));
    }

    #[test]
    fn oversized_window_fails_validation() {
        let mut config = DexterConfig::default();
        config.affiliation.window_days = 4_000_000_000;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "at most 36500"));

        config.affiliation.window_days = MAX_WINDOW_DAYS;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn threshold_outside_unit_range_fails_validation() {
        for bad in [0.0, -0.2, 1.5, f64::NAN] {
            let mut config = DexterConfig::default();
            config.quotes.duplicate_threshold = bad;
            let errors = validate_config(&config).unwrap_err();
            assert!(has_message(&errors, "duplicate_threshold"), "{bad}");
        }
    }

    #[test]
    fn threshold_of_one_is_allowed() {
        let mut config = DexterConfig::default();
        config.quotes.duplicate_threshold = 1.0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = DexterConfig::default();
        config.logging.level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "logging.level"));
    }

    #[test]
    fn all_failures_are_collected() {
        let mut config = DexterConfig::default();
        config.storage.database_path = String::new();
        config.affiliation.window_days = 0;
        config.logging.level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
