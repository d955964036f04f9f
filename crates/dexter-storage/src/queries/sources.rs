// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document sources and the affiliation claims derived from them.

use chrono::{DateTime, Utc};
use dexter_core::DexterError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{
    AffiliationClaim, AffiliationId, DocumentId, DocumentSource, PersonId, from_db_time,
    to_db_time,
};

/// Record that a person is a source in a document.
pub async fn insert_document_source(
    db: &Database,
    source: &DocumentSource,
) -> Result<(), DexterError> {
    let source = source.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO document_sources (doc_id, person_id, affiliation_id)
                 VALUES (?1, ?2, ?3)",
                params![
                    source.document_id.0,
                    source.person_id.0,
                    source.affiliation_id.map(|a| a.0),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Affiliation claims for a person from documents published in `[from, to]`.
///
/// Sources without an affiliation are skipped. Claims come back oldest
/// first; claims from the same instant keep their insertion order.
pub async fn affiliation_claims(
    db: &Database,
    person_id: PersonId,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<AffiliationClaim>, DexterError> {
    let from = to_db_time(&from);
    let to = to_db_time(&to);
    db.connection()
        .call(move |conn| -> Result<Vec<AffiliationClaim>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT s.person_id, s.affiliation_id, s.doc_id, d.published_at
                 FROM document_sources s
                 JOIN documents d ON d.id = s.doc_id
                 WHERE s.person_id = ?1
                   AND s.affiliation_id IS NOT NULL
                   AND d.published_at >= ?2
                   AND d.published_at <= ?3
                 ORDER BY d.published_at ASC, s.id ASC",
            )?;
            let rows = stmt.query_map(params![person_id.0, from, to], |row| {
                Ok(AffiliationClaim {
                    person_id: PersonId(row.get(0)?),
                    affiliation_id: AffiliationId(row.get(1)?),
                    document_id: DocumentId(row.get(2)?),
                    published_at: from_db_time(row, 3)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Ids of everyone with at least one affiliation claim in `[from, to]`.
pub async fn people_with_claims(
    db: &Database,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<PersonId>, DexterError> {
    let from = to_db_time(&from);
    let to = to_db_time(&to);
    db.connection()
        .call(move |conn| -> Result<Vec<PersonId>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT s.person_id
                 FROM document_sources s
                 JOIN documents d ON d.id = s.doc_id
                 WHERE s.affiliation_id IS NOT NULL
                   AND d.published_at >= ?1
                   AND d.published_at <= ?2
                 ORDER BY s.person_id ASC",
            )?;
            let rows = stmt.query_map(params![from, to], |row| Ok(PersonId(row.get(0)?)))?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}
