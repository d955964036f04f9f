// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory store for deterministic tests.
//!
//! `MemoryStore` implements [`EvidenceStore`] and [`QuoteStore`] over plain
//! vectors and counts affiliation writes, so tests can assert that an
//! unchanged relearn does not touch the store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use dexter_core::types::{
    AffiliationClaim, AffiliationId, DocumentId, NewUtterance, Person, PersonId, Utterance,
    UtteranceId,
};
use dexter_core::{DexterError, EvidenceStore, QuoteStore};

#[derive(Default)]
struct State {
    people: Vec<Person>,
    claims: Vec<AffiliationClaim>,
    utterances: Vec<Utterance>,
    affiliation_writes: usize,
    next_document: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a person with the given current affiliation.
    pub async fn add_person(&self, name: &str, affiliation: Option<AffiliationId>) -> PersonId {
        let mut state = self.state.lock().await;
        let id = PersonId(state.people.len() as i64 + 1);
        let created = Utc::now();
        state.people.push(Person {
            id,
            name: name.to_string(),
            gender_id: None,
            race_id: None,
            affiliation_id: affiliation,
            created_at: created,
            updated_at: created,
        });
        id
    }

    /// Add a claim from a fresh document published at `published_at`.
    pub async fn add_claim(
        &self,
        person: PersonId,
        affiliation: AffiliationId,
        published_at: DateTime<Utc>,
    ) -> DocumentId {
        let mut state = self.state.lock().await;
        state.next_document += 1;
        let document_id = DocumentId(state.next_document);
        state.claims.push(AffiliationClaim {
            person_id: person,
            affiliation_id: affiliation,
            document_id,
            published_at,
        });
        document_id
    }

    /// Current stored affiliation of a person.
    pub async fn affiliation_of(&self, person: PersonId) -> Option<AffiliationId> {
        let state = self.state.lock().await;
        state
            .people
            .iter()
            .find(|p| p.id == person)
            .and_then(|p| p.affiliation_id)
    }

    /// Number of successful `set_person_affiliation` calls.
    pub async fn affiliation_writes(&self) -> usize {
        self.state.lock().await.affiliation_writes
    }

    pub async fn utterance_count(&self) -> usize {
        self.state.lock().await.utterances.len()
    }
}

#[async_trait]
impl EvidenceStore for MemoryStore {
    async fn person(&self, id: PersonId) -> Result<Option<Person>, DexterError> {
        let state = self.state.lock().await;
        Ok(state.people.iter().find(|p| p.id == id).cloned())
    }

    async fn affiliation_claims(
        &self,
        person: PersonId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<AffiliationClaim>, DexterError> {
        let state = self.state.lock().await;
        let mut claims: Vec<_> = state
            .claims
            .iter()
            .filter(|c| c.person_id == person && c.published_at >= from && c.published_at <= to)
            .cloned()
            .collect();
        // Stable, so same-instant claims keep insertion order.
        claims.sort_by_key(|c| c.published_at);
        Ok(claims)
    }

    async fn set_person_affiliation(
        &self,
        person: PersonId,
        affiliation: Option<AffiliationId>,
    ) -> Result<(), DexterError> {
        let mut state = self.state.lock().await;
        let Some(p) = state.people.iter_mut().find(|p| p.id == person) else {
            return Err(DexterError::NotFound {
                kind: "person",
                id: person.0,
            });
        };
        p.affiliation_id = affiliation;
        p.updated_at = Utc::now();
        state.affiliation_writes += 1;
        Ok(())
    }

    async fn people_with_claims(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PersonId>, DexterError> {
        let state = self.state.lock().await;
        let mut people: Vec<_> = state
            .claims
            .iter()
            .filter(|c| c.published_at >= from && c.published_at <= to)
            .map(|c| c.person_id)
            .collect();
        people.sort();
        people.dedup();
        Ok(people)
    }
}

#[async_trait]
impl QuoteStore for MemoryStore {
    async fn utterances_for_document(
        &self,
        document: DocumentId,
    ) -> Result<Vec<Utterance>, DexterError> {
        let state = self.state.lock().await;
        Ok(state
            .utterances
            .iter()
            .filter(|u| u.document_id == document)
            .cloned()
            .collect())
    }

    async fn insert_utterance(
        &self,
        utterance: &NewUtterance,
    ) -> Result<UtteranceId, DexterError> {
        let mut state = self.state.lock().await;
        let id = UtteranceId(state.utterances.len() as i64 + 1);
        state.utterances.push(Utterance {
            id,
            document_id: utterance.document_id,
            entity_id: utterance.entity_id,
            quote: utterance.quote.clone(),
            offset: utterance.offset,
            length: utterance.length,
        });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[tokio::test]
    async fn claims_are_filtered_and_sorted() {
        let store = MemoryStore::new();
        let now = Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap();
        let p = store.add_person("P", None).await;
        store.add_claim(p, AffiliationId(2), now - Duration::days(1)).await;
        store.add_claim(p, AffiliationId(1), now - Duration::days(3)).await;
        store.add_claim(p, AffiliationId(3), now - Duration::days(30)).await;

        let claims = store
            .affiliation_claims(p, now - Duration::days(7), now)
            .await
            .unwrap();
        let ids: Vec<_> = claims.iter().map(|c| c.affiliation_id).collect();
        assert_eq!(ids, vec![AffiliationId(1), AffiliationId(2)]);
    }

    #[tokio::test]
    async fn writes_are_counted_and_unknown_people_rejected() {
        let store = MemoryStore::new();
        let p = store.add_person("P", None).await;
        store
            .set_person_affiliation(p, Some(AffiliationId(4)))
            .await
            .unwrap();
        assert_eq!(store.affiliation_of(p).await, Some(AffiliationId(4)));
        assert_eq!(store.affiliation_writes().await, 1);
        assert!(store.set_person_affiliation(PersonId(99), None).await.is_err());
        assert_eq!(store.affiliation_writes().await, 1);
    }
}
