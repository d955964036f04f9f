// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Dexter.
//!
//! Configuration is read from the layered file hierarchy, an explicit file
//! (`dexter --config <PATH>`) or an inline TOML string, then validated.
//! Failures come back as [`ConfigError`] diagnostics ready for [`render_errors`].
//!
//! ```no_run
//! use dexter_config::{load_and_validate, ConfigSource};
//!
//! let config = load_and_validate(ConfigSource::Layered).expect("config errors");
//! println!("Database: {}", config.storage.database_path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::DexterConfig;

/// Where configuration is read from.
#[derive(Debug, Clone, Copy)]
pub enum ConfigSource<'a> {
    /// System, user and working-directory `dexter.toml` plus `DEXTER_*` env vars.
    Layered,
    /// One file plus `DEXTER_*` env vars. The file must exist.
    File(&'a Path),
    /// A TOML string on top of the defaults, without env vars.
    Inline(&'a str),
}

/// Load configuration from `source` and validate it.
pub fn load_and_validate(source: ConfigSource<'_>) -> Result<DexterConfig, Vec<ConfigError>> {
    let loaded = match source {
        ConfigSource::Layered => loader::load_config(),
        ConfigSource::File(path) => {
            if !path.is_file() {
                return Err(vec![ConfigError::Other(format!(
                    "config file `{}` does not exist",
                    path.display()
                ))]);
            }
            loader::load_config_from_path(path)
        }
        ConfigSource::Inline(toml) => loader::load_config_from_str(toml),
    };

    let config = loaded
        .map_err(|err| diagnostic::figment_to_config_errors(err, &source_texts(source)))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// The TOML texts behind `source`, keyed by the name Figment reports, so
/// diagnostics can point into them.
fn source_texts(source: ConfigSource<'_>) -> Vec<(String, String)> {
    let read = |path: PathBuf| {
        std::fs::read_to_string(&path)
            .ok()
            .map(|content| (path.display().to_string(), content))
    };

    match source {
        ConfigSource::Inline(toml) => vec![("<inline>".to_string(), toml.to_string())],
        ConfigSource::File(path) => read(path.to_path_buf()).into_iter().collect(),
        ConfigSource::Layered => {
            let local = std::env::current_dir()
                .map(|d| d.join("dexter.toml"))
                .unwrap_or_else(|_| PathBuf::from("dexter.toml"));
            let user = dirs::config_dir().map(|d| d.join("dexter/dexter.toml"));
            [Some(local), user, Some(PathBuf::from("/etc/dexter/dexter.toml"))]
                .into_iter()
                .flatten()
                .filter_map(read)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_source_is_validated() {
        let errors = load_and_validate(ConfigSource::Inline("[affiliation]\nwindow_days = 0\n"))
            .unwrap_err();
        assert!(matches!(errors[0], ConfigError::Validation { .. }));
    }

    #[test]
    fn inline_source_is_named_for_diagnostics() {
        let texts = source_texts(ConfigSource::Inline("[quotes]\n"));
        assert_eq!(texts, vec![("<inline>".to_string(), "[quotes]\n".to_string())]);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let errors =
            load_and_validate(ConfigSource::File(Path::new("/nonexistent/dexter.toml")))
                .unwrap_err();
        assert!(matches!(&errors[0], ConfigError::Other(msg) if msg.contains("does not exist")));
    }
}
