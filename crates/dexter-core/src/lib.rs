// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Dexter newsroom curation system.
//!
//! This crate provides the domain types (people, affiliations, documents,
//! utterances), the store traits the curation algorithms consume, and the
//! error type shared by every crate in the workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DexterError;
pub use types::{
    AffiliationClaim, AffiliationId, DocumentId, EntityId, HealthStatus, MediumId, Person,
    PersonId, Utterance, UtteranceId,
};

pub use traits::{EvidenceStore, QuoteStore, StorageAdapter};
