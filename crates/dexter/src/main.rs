// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dexter - newsroom curation tools.
//!
//! This is the binary entry point for the `dexter` command.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod person;
mod quotes;
mod relearn;
mod stats;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use dexter_config::{ConfigError, ConfigSource, DexterConfig};
use dexter_core::{DexterError, StorageAdapter};
use dexter_storage::SqliteStore;

/// Dexter - newsroom curation tools.
#[derive(Parser, Debug)]
#[command(name = "dexter", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the usual locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Relearn one person's affiliation from recent documents.
    Relearn {
        /// Id of the person.
        person_id: i64,
        /// Reference time (RFC 3339). Defaults to now.
        #[arg(long)]
        as_of: Option<DateTime<Utc>>,
    },
    /// Relearn the affiliation of everyone quoted within the window.
    RelearnAll {
        /// Reference time (RFC 3339). Defaults to now.
        #[arg(long)]
        as_of: Option<DateTime<Utc>>,
    },
    /// Show how similar two quotations are.
    Similarity { a: String, b: String },
    /// List repeated quotations in a document.
    Duplicates { document_id: i64 },
    /// Show dashboard statistics.
    Stats {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Find or create a person and print their summary as JSON.
    Person {
        name: String,
        /// Gender for a newly created person, by name or abbreviation.
        #[arg(long)]
        gender: Option<String>,
        /// Race for a newly created person, by name or abbreviation.
        #[arg(long)]
        race: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            dexter_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    let color = !cli.plain && std::io::stdout().is_terminal();
    let result = match cli.command {
        Some(Commands::Relearn { person_id, as_of }) => {
            relearn::run_relearn(&config, person_id, as_of.unwrap_or_else(Utc::now), color).await
        }
        Some(Commands::RelearnAll { as_of }) => {
            relearn::run_relearn_all(&config, as_of.unwrap_or_else(Utc::now), color).await
        }
        Some(Commands::Similarity { a, b }) => {
            quotes::run_similarity(&config, &a, &b, color);
            Ok(())
        }
        Some(Commands::Duplicates { document_id }) => {
            quotes::run_duplicates(&config, document_id, color).await
        }
        Some(Commands::Stats { json }) => stats::run_stats(&config, json).await,
        Some(Commands::Person { name, gender, race }) => {
            person::run_person(&config, &name, gender.as_deref(), race.as_deref()).await
        }
        None => {
            println!("dexter: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Load the `--config` file if given, otherwise the layered configuration.
fn load_config(path: Option<&Path>) -> Result<DexterConfig, Vec<ConfigError>> {
    let source = match path {
        Some(path) => ConfigSource::File(path),
        None => ConfigSource::Layered,
    };
    dexter_config::load_and_validate(source)
}

/// Open and migrate the configured database.
pub(crate) async fn open_store(config: &DexterConfig) -> Result<SqliteStore, DexterError> {
    let store = SqliteStore::new(config.storage.clone());
    store.initialize().await?;
    Ok(store)
}

/// Initialize tracing. `RUST_LOG` wins over the configured level, which only
/// applies to the dexter crates.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "dexter={log_level},dexter_curation={log_level},dexter_storage={log_level},dexter_config={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    #[serial_test::serial]
    fn binary_loads_config_defaults() {
        let config = load_config(None).expect("default config should be valid");
        assert_eq!(config.affiliation.window_days, 7);
        assert_eq!(config.quotes.duplicate_threshold, 0.8);
    }

    #[test]
    fn cli_parses_relearn_with_as_of() {
        let cli = Cli::try_parse_from(["dexter", "relearn", "42", "--as-of", "2026-05-01T12:00:00Z"])
            .unwrap();
        match cli.command {
            Some(Commands::Relearn { person_id, as_of }) => {
                assert_eq!(person_id, 42);
                assert_eq!(as_of.unwrap().to_rfc3339(), "2026-05-01T12:00:00+00:00");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    #[serial_test::serial]
    fn config_flag_selects_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dexter.toml");
        std::fs::write(&path, "[quotes]\nduplicate_threshold = 0.95\n").unwrap();

        let cli = Cli::try_parse_from([
            "dexter",
            "similarity",
            "a",
            "b",
            "--config",
            path.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some(path.as_path()));

        let config = load_config(cli.config.as_deref()).unwrap();
        assert_eq!(config.quotes.duplicate_threshold, 0.95);
    }

    #[test]
    fn config_flag_with_missing_file_fails() {
        let errors = load_config(Some(Path::new("/nonexistent/dexter.toml"))).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn cli_rejects_bad_timestamp() {
        assert!(Cli::try_parse_from(["dexter", "relearn-all", "--as-of", "yesterday"]).is_err());
    }

    #[test]
    fn cli_parses_person_with_gender_and_race() {
        let cli = Cli::try_parse_from(["dexter", "person", "Thuli", "--gender", "F", "--race", "Black"])
            .unwrap();
        match cli.command {
            Some(Commands::Person { name, gender, race }) => {
                assert_eq!(name, "Thuli");
                assert_eq!(gender.as_deref(), Some("F"));
                assert_eq!(race.as_deref(), Some("Black"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[tokio::test]
    async fn open_store_creates_database() {
        let (dir, config) = test_support::temp_config();
        let store = open_store(&config).await.unwrap();
        assert!(dir.path().join("cli.db").exists());
        store.close().await.unwrap();
    }
}
