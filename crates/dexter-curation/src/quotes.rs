// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quotation similarity and duplicate detection.

use tracing::debug;

use dexter_core::types::{NewUtterance, Utterance, UtteranceId};
use dexter_core::{DexterError, QuoteStore};

/// Similarity at or above which two quotations count as the same.
pub const DUPLICATE_THRESHOLD: f64 = 0.8;

/// Normalised Levenshtein similarity of two strings, in `[0, 1]`.
///
/// Computed as `(lensum - distance) / lensum` over Unicode scalar values,
/// where `lensum` is the combined length of both strings.
///
/// Two empty strings score 0, not 1. Callers comparing quotations also check
/// case-insensitive equality, so empty quotes are still treated as equal there.
pub fn similarity(a: &str, b: &str) -> f64 {
    let lensum = a.chars().count() + b.chars().count();
    if lensum == 0 {
        return 0.0;
    }
    let distance = strsim::levenshtein(a, b);
    (lensum - distance) as f64 / lensum as f64
}

/// Whether two utterances are the same quotation, using [`DUPLICATE_THRESHOLD`].
pub fn are_duplicates(a: &Utterance, b: &Utterance) -> bool {
    QuoteMatcher::default().are_duplicates(a, b)
}

/// Outcome of [`record_utterance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Inserted(UtteranceId),
    /// A matching utterance was already stored; nothing was written.
    Duplicate(UtteranceId),
}

impl RecordOutcome {
    pub fn id(&self) -> UtteranceId {
        match *self {
            Self::Inserted(id) | Self::Duplicate(id) => id,
        }
    }
}

/// Duplicate detection with a configurable similarity threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteMatcher {
    threshold: f64,
}

impl Default for QuoteMatcher {
    fn default() -> Self {
        Self::new(DUPLICATE_THRESHOLD)
    }
}

impl QuoteMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Case-insensitive equality, or similarity at or above the threshold.
    pub fn same_quote(&self, a: &str, b: &str) -> bool {
        a.to_lowercase() == b.to_lowercase() || similarity(a, b) >= self.threshold
    }

    /// Same entity (by id) and the same quotation.
    pub fn are_duplicates(&self, a: &Utterance, b: &Utterance) -> bool {
        a.entity_id == b.entity_id && self.same_quote(&a.quote, &b.quote)
    }

    /// Every duplicate pair in `utterances`, as `(earlier, later)` ids in
    /// input order.
    pub fn duplicate_pairs(&self, utterances: &[Utterance]) -> Vec<(UtteranceId, UtteranceId)> {
        let mut pairs = Vec::new();
        for (i, a) in utterances.iter().enumerate() {
            for b in &utterances[i + 1..] {
                if self.are_duplicates(a, b) {
                    pairs.push((a.id, b.id));
                }
            }
        }
        pairs
    }

    fn matches_new(&self, stored: &Utterance, new: &NewUtterance) -> bool {
        stored.entity_id == new.entity_id && self.same_quote(&stored.quote, &new.quote)
    }
}

/// Store `utterance` unless the document already holds the same quotation
/// from the same entity.
pub async fn record_utterance<S>(
    store: &S,
    matcher: &QuoteMatcher,
    utterance: &NewUtterance,
) -> Result<RecordOutcome, DexterError>
where
    S: QuoteStore + ?Sized,
{
    let existing = store.utterances_for_document(utterance.document_id).await?;
    if let Some(dup) = existing.iter().find(|u| matcher.matches_new(u, utterance)) {
        debug!(
            document = %utterance.document_id,
            existing = %dup.id,
            "skipping duplicate utterance"
        );
        return Ok(RecordOutcome::Duplicate(dup.id));
    }

    let id = store.insert_utterance(utterance).await?;
    Ok(RecordOutcome::Inserted(id))
}
