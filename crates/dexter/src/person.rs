// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dexter person` command implementation.

use dexter_config::DexterConfig;
use dexter_core::types::{GenderId, PersonSummary, RaceId};
use dexter_core::{DexterError, StorageAdapter};
use dexter_storage::SqliteStore;

use crate::open_store;

/// Find or create the person called `name` and print their summary as JSON.
///
/// `gender` and `race` only apply when the person is created.
pub async fn run_person(
    config: &DexterConfig,
    name: &str,
    gender: Option<&str>,
    race: Option<&str>,
) -> Result<(), DexterError> {
    let store = open_store(config).await?;
    let summary = lookup(&store, name, gender, race).await?;
    let out = serde_json::to_string_pretty(&summary)
        .map_err(|e| DexterError::Internal(format!("failed to serialize person: {e}")))?;
    println!("{out}");
    store.close().await
}

async fn lookup(
    store: &SqliteStore,
    name: &str,
    gender: Option<&str>,
    race: Option<&str>,
) -> Result<PersonSummary, DexterError> {
    let gender_id = match gender {
        Some(wanted) => {
            let genders = store.genders().await?;
            let found = genders
                .iter()
                .find(|g| matches_label(wanted, &g.name, &g.abbr()));
            Some(found.map(|g| g.id).ok_or_else(|| unknown("gender", wanted))?)
        }
        None => None,
    };
    let race_id = match race {
        Some(wanted) => {
            let races = store.races().await?;
            let found = races
                .iter()
                .find(|r| matches_label(wanted, &r.name, &r.abbr()));
            Some(found.map(|r| r.id).ok_or_else(|| unknown("race", wanted))?)
        }
        None => None,
    };

    create_and_summarize(store, name, gender_id, race_id).await
}

async fn create_and_summarize(
    store: &SqliteStore,
    name: &str,
    gender_id: Option<GenderId>,
    race_id: Option<RaceId>,
) -> Result<PersonSummary, DexterError> {
    let person = store.get_or_create_person(name, gender_id, race_id).await?;
    store
        .person_summary(person.id)
        .await?
        .ok_or(DexterError::NotFound {
            kind: "person",
            id: person.id.0,
        })
}

/// Case-insensitive match on either the full name or its abbreviation.
fn matches_label(wanted: &str, name: &str, abbr: &str) -> bool {
    let wanted = wanted.trim();
    wanted.eq_ignore_ascii_case(name) || wanted.eq_ignore_ascii_case(abbr)
}

fn unknown(kind: &str, wanted: &str) -> DexterError {
    DexterError::InvalidInput(format!("unknown {kind} `{wanted}`"))
}
