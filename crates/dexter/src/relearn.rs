// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dexter relearn` and `dexter relearn-all`.

use chrono::{DateTime, Utc};
use colored::Colorize;
use dexter_config::DexterConfig;
use dexter_core::types::{PersonId, PersonSummary};
use dexter_core::{DexterError, StorageAdapter};
use dexter_curation::{AffiliationLearner, Relearned, relearn_affiliation, relearn_recent};
use tracing::info;

use crate::open_store;

/// Relearn a single person's affiliation and print the outcome.
pub async fn run_relearn(
    config: &DexterConfig,
    person_id: i64,
    as_of: DateTime<Utc>,
    color: bool,
) -> Result<(), DexterError> {
    let store = open_store(config).await?;
    let learner = AffiliationLearner::new(config.affiliation.window_days);

    let person_id = PersonId(person_id);
    let outcome = relearn_affiliation(&store, &learner, person_id, as_of).await?;
    let summary = store.person_summary(person_id).await?;
    println!("{}", describe(person_id, summary.as_ref(), &outcome, color));

    store.close().await
}

/// Relearn everyone with recent claims and print one line per person.
pub async fn run_relearn_all(
    config: &DexterConfig,
    as_of: DateTime<Utc>,
    color: bool,
) -> Result<(), DexterError> {
    let store = open_store(config).await?;
    let learner = AffiliationLearner::new(config.affiliation.window_days);

    let outcomes = relearn_recent(&store, &learner, as_of).await?;
    let mut changed = 0;
    for (person_id, outcome) in &outcomes {
        if outcome.changed {
            changed += 1;
        }
        let summary = store.person_summary(*person_id).await?;
        println!("{}", describe(*person_id, summary.as_ref(), outcome, color));
    }
    info!(people = outcomes.len(), changed, "relearn complete");
    println!("{} people checked, {changed} changed", outcomes.len());

    store.close().await
}

fn describe(
    person_id: PersonId,
    summary: Option<&PersonSummary>,
    outcome: &Relearned,
    color: bool,
) -> String {
    let name = summary.map_or_else(|| format!("person {person_id}"), |s| s.name.clone());
    let affiliation = summary
        .and_then(|s| s.affiliation.clone())
        .or_else(|| outcome.affiliation.map(|a| format!("affiliation {a}")))
        .unwrap_or_else(|| "none".to_string());

    match (outcome.changed, color) {
        (true, true) => format!("{} {name}: now {}", "✓".green(), affiliation.green()),
        (true, false) => format!("[CHANGED] {name}: now {affiliation}"),
        (false, true) => format!("{} {name}: {affiliation}", "·".dimmed()),
        (false, false) => format!("[SAME] {name}: {affiliation}"),
    }
}
