// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document and media outlet operations.

use dexter_core::DexterError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Document, DocumentId, Medium, MediumId, NewDocument, from_db_time, to_db_time};

/// Store a new document and return its id.
pub async fn insert_document(db: &Database, doc: &NewDocument) -> Result<DocumentId, DexterError> {
    let doc = doc.clone();
    db.connection()
        .call(move |conn| -> Result<DocumentId, rusqlite::Error> {
            conn.execute(
                "INSERT INTO documents (url, title, summary, body, published_at, medium_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    doc.url,
                    doc.title,
                    doc.summary,
                    doc.text,
                    to_db_time(&doc.published_at),
                    doc.medium_id.map(|m| m.0),
                ],
            )?;
            Ok(DocumentId(conn.last_insert_rowid()))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a document by id.
pub async fn get_document(db: &Database, id: DocumentId) -> Result<Option<Document>, DexterError> {
    db.connection()
        .call(move |conn| -> Result<Option<Document>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT id, url, title, summary, body, published_at, medium_id
                 FROM documents WHERE id = ?1",
                params![id.0],
                |row| {
                    Ok(Document {
                        id: DocumentId(row.get(0)?),
                        url: row.get(1)?,
                        title: row.get(2)?,
                        summary: row.get(3)?,
                        text: row.get(4)?,
                        published_at: from_db_time(row, 5)?,
                        medium_id: row.get::<_, Option<i64>>(6)?.map(MediumId),
                    })
                },
            );
            match result {
                Ok(doc) => Ok(Some(doc)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Register a media outlet.
pub async fn insert_medium(
    db: &Database,
    name: &str,
    domain: Option<&str>,
) -> Result<Medium, DexterError> {
    let name = name.to_string();
    let domain = domain.map(|d| d.to_string());
    db.connection()
        .call(move |conn| -> Result<Medium, rusqlite::Error> {
            conn.execute(
                "INSERT INTO media (name, domain) VALUES (?1, ?2)",
                params![name, domain],
            )?;
            Ok(Medium {
                id: MediumId(conn.last_insert_rowid()),
                name,
                domain,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}
