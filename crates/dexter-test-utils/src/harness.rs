// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness backed by a real SQLite database.
//!
//! `TestHarness` opens a migrated [`SqliteStore`] in a temporary directory and
//! offers helpers to seed people, affiliations, documents and sources.

use chrono::{DateTime, Utc};
use dexter_config::model::StorageConfig;
use dexter_core::types::{
    Affiliation, AffiliationId, DocumentId, DocumentSource, Entity, EntityGroup, NewDocument,
    Person,
};
use dexter_core::{DexterError, StorageAdapter};
use dexter_storage::queries;
use dexter_storage::{Database, SqliteStore};

pub struct TestHarness {
    store: SqliteStore,
    // Dropped last so the database file outlives the store.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub async fn new() -> Result<Self, DexterError> {
        let temp_dir = tempfile::TempDir::new().map_err(DexterError::storage)?;
        let db_path = temp_dir.path().join("test.db");
        let store = SqliteStore::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        });
        store.initialize().await?;
        Ok(Self {
            store,
            _temp_dir: temp_dir,
        })
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    pub fn db(&self) -> Result<&Database, DexterError> {
        self.store.db()
    }

    pub async fn add_affiliation(&self, code: &str, name: &str) -> Result<Affiliation, DexterError> {
        queries::affiliations::insert_affiliation(self.db()?, code, name).await
    }

    pub async fn add_person(&self, name: &str) -> Result<Person, DexterError> {
        self.store.get_or_create_person(name, None, None).await
    }

    pub async fn add_entity(&self, name: &str, group: EntityGroup) -> Result<Entity, DexterError> {
        queries::entities::insert_entity(self.db()?, name, group).await
    }

    pub async fn add_document(
        &self,
        title: &str,
        published_at: DateTime<Utc>,
    ) -> Result<DocumentId, DexterError> {
        let doc = NewDocument {
            url: None,
            title: title.to_string(),
            summary: None,
            text: String::new(),
            published_at,
            medium_id: None,
        };
        queries::documents::insert_document(self.db()?, &doc).await
    }

    /// Publish a document at `published_at` that quotes `person` with the
    /// given affiliation (or none).
    pub async fn add_source(
        &self,
        person: &Person,
        affiliation: Option<AffiliationId>,
        published_at: DateTime<Utc>,
    ) -> Result<DocumentId, DexterError> {
        let document_id = self
            .add_document(&format!("{} quoted", person.name), published_at)
            .await?;
        queries::sources::insert_document_source(
            self.db()?,
            &DocumentSource {
                document_id,
                person_id: person.id,
                affiliation_id: affiliation,
            },
        )
        .await?;
        Ok(document_id)
    }
}
