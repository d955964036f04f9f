// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dexter similarity` and `dexter duplicates`.

use colored::Colorize;
use dexter_config::DexterConfig;
use dexter_core::types::DocumentId;
use dexter_core::{DexterError, QuoteStore, StorageAdapter};
use dexter_curation::{QuoteMatcher, similarity};

use crate::open_store;

/// Print the similarity score of two quotations.
pub fn run_similarity(config: &DexterConfig, a: &str, b: &str, color: bool) {
    let matcher = QuoteMatcher::new(config.quotes.duplicate_threshold);
    println!("{}", similarity_line(&matcher, a, b, color));
}

fn similarity_line(matcher: &QuoteMatcher, a: &str, b: &str, color: bool) -> String {
    let score = similarity(a, b);
    let same = matcher.same_quote(a, b);
    let verdict = match (same, color) {
        (true, true) => "same quotation".green().to_string(),
        (false, true) => "different".yellow().to_string(),
        (true, false) => "same quotation".to_string(),
        (false, false) => "different".to_string(),
    };
    format!("{score:.3} ({verdict})")
}

/// List pairs of repeated quotations in a document.
pub async fn run_duplicates(
    config: &DexterConfig,
    document_id: i64,
    color: bool,
) -> Result<(), DexterError> {
    let store = open_store(config).await?;
    let matcher = QuoteMatcher::new(config.quotes.duplicate_threshold);

    let utterances = store.utterances_for_document(DocumentId(document_id)).await?;
    let pairs = matcher.duplicate_pairs(&utterances);
    if pairs.is_empty() {
        println!("no repeated quotations in document {document_id}");
    }
    for (first, second) in pairs {
        if color {
            println!("{} utterance {first} repeats as {second}", "!".yellow());
        } else {
            println!("utterance {first} repeats as {second}");
        }
    }

    store.close().await
}
