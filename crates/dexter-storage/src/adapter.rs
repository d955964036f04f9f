// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the store traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use tracing::debug;

use dexter_config::model::StorageConfig;
use dexter_core::types::{
    AffiliationClaim, AffiliationId, DashboardStats, DocumentId, Gender, GenderId, NewUtterance,
    Person, PersonId, PersonSummary, Race, RaceId, Utterance, UtteranceId,
};
use dexter_core::{DexterError, EvidenceStore, HealthStatus, QuoteStore, StorageAdapter};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules. The
/// database is opened on the first call to [`StorageAdapter::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a store for the configured database. Nothing is opened yet.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// The underlying database, or an error if [`StorageAdapter::initialize`]
    /// has not run.
    pub fn db(&self) -> Result<&Database, DexterError> {
        self.db.get().ok_or_else(|| DexterError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    pub async fn get_or_create_person(
        &self,
        name: &str,
        gender_id: Option<GenderId>,
        race_id: Option<RaceId>,
    ) -> Result<Person, DexterError> {
        queries::people::get_or_create_person(self.db()?, name, gender_id, race_id).await
    }

    pub async fn genders(&self) -> Result<Vec<Gender>, DexterError> {
        queries::reference::genders(self.db()?).await
    }

    pub async fn races(&self) -> Result<Vec<Race>, DexterError> {
        queries::reference::races(self.db()?).await
    }

    pub async fn person_summary(&self, id: PersonId) -> Result<Option<PersonSummary>, DexterError> {
        queries::people::person_summary(self.db()?, id).await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, DexterError> {
        queries::stats::dashboard_stats(self.db()?).await
    }
}

#[async_trait]
impl StorageAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn initialize(&self) -> Result<(), DexterError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| DexterError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn health_check(&self) -> Result<HealthStatus, DexterError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn close(&self) -> Result<(), DexterError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl EvidenceStore for SqliteStore {
    async fn person(&self, id: PersonId) -> Result<Option<Person>, DexterError> {
        queries::people::get_person(self.db()?, id).await
    }

    async fn affiliation_claims(
        &self,
        person: PersonId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<AffiliationClaim>, DexterError> {
        queries::sources::affiliation_claims(self.db()?, person, from, to).await
    }

    async fn set_person_affiliation(
        &self,
        person: PersonId,
        affiliation: Option<AffiliationId>,
    ) -> Result<(), DexterError> {
        queries::people::set_person_affiliation(self.db()?, person, affiliation).await
    }

    async fn people_with_claims(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PersonId>, DexterError> {
        queries::sources::people_with_claims(self.db()?, from, to).await
    }
}

#[async_trait]
impl QuoteStore for SqliteStore {
    async fn utterances_for_document(
        &self,
        document: DocumentId,
    ) -> Result<Vec<Utterance>, DexterError> {
        queries::utterances::utterances_for_document(self.db()?, document).await
    }

    async fn insert_utterance(
        &self,
        utterance: &NewUtterance,
    ) -> Result<UtteranceId, DexterError> {
        queries::utterances::insert_utterance(self.db()?, utterance).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init_test.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        assert_eq!(store.name(), "sqlite");
        store.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(store.initialize().await.is_err(), "second initialize should fail");
    }

    #[tokio::test]
    async fn health_check_requires_initialize() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("health.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        assert!(store.health_check().await.is_err());
        store.initialize().await.unwrap();
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn person_round_trip_through_evidence_store() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("people.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();

        let person = store.get_or_create_person("Pravin", None, None).await.unwrap();
        let loaded = store.person(person.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Pravin");
        assert_eq!(loaded.affiliation_id, None);

        let err = store
            .set_person_affiliation(PersonId(12345), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DexterError::NotFound { .. }));

        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn works_without_wal() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("rollback.db");
        let store = SqliteStore::new(StorageConfig {
            database_path: db_path.to_str().unwrap().to_string(),
            wal_mode: false,
        });
        store.initialize().await.unwrap();
        let stats = store.dashboard_stats().await.unwrap();
        assert_eq!(stats.document_count, 0);
    }
}
