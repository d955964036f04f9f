// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Curation algorithms for Dexter: relearning a person's affiliation from
//! recent documents, and recognising repeated quotations.
//!
//! Both algorithms are synchronous and take `now` explicitly. The async entry
//! points only add store access around them.

pub mod affiliation;
pub mod quotes;

pub use affiliation::{
    AffiliationLearner, AffiliationWeights, DEFAULT_WINDOW_DAYS, Relearned, decay_weight,
    relearn_affiliation, relearn_recent,
};
pub use quotes::{
    DUPLICATE_THRESHOLD, QuoteMatcher, RecordOutcome, are_duplicates, record_utterance,
    similarity,
};
