// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read/write access the affiliation learner needs from a store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::DexterError;
use crate::types::{AffiliationClaim, AffiliationId, Person, PersonId};

/// Source of people and the affiliation claims made about them.
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    /// Fetch a person by id.
    async fn person(&self, id: PersonId) -> Result<Option<Person>, DexterError>;

    /// Claims for `person` from documents published in `[from, to]`.
    ///
    /// Implementations must exclude sources without an affiliation and return
    /// claims ordered by publication date, oldest first.
    async fn affiliation_claims(
        &self,
        person: PersonId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<AffiliationClaim>, DexterError>;

    /// Overwrite a person's current affiliation.
    async fn set_person_affiliation(
        &self,
        person: PersonId,
        affiliation: Option<AffiliationId>,
    ) -> Result<(), DexterError>;

    /// People with at least one claim in `[from, to]`, ordered by id.
    async fn people_with_claims(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PersonId>, DexterError>;
}
