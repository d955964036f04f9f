// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. Every function takes the shared [`Database`] handle
//! and runs on its single background connection.
//!
//! [`Database`]: crate::database::Database

pub mod affiliations;
pub mod documents;
pub mod entities;
pub mod people;
pub mod reference;
pub mod sources;
pub mod stats;
pub mod utterances;

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{DateTime, TimeZone, Utc};
    use tempfile::TempDir;

    use crate::database::Database;
    use crate::models::{DocumentId, NewDocument};

    /// Fresh migrated database in a temporary directory. Keep the `TempDir`
    /// alive for as long as the database is used.
    pub async fn test_db() -> (TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        (dir, db)
    }

    pub fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, d, 12, 0, 0).unwrap()
    }

    pub async fn document_on(db: &Database, title: &str, published_at: DateTime<Utc>) -> DocumentId {
        super::documents::insert_document(
            db,
            &NewDocument {
                url: None,
                title: title.to_string(),
                summary: None,
                text: format!("{title} body"),
                published_at,
                medium_id: None,
            },
        )
        .await
        .unwrap()
    }
}
