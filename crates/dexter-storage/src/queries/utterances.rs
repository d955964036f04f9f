// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Utterance operations.

use dexter_core::DexterError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{DocumentId, NewUtterance, Utterance, UtteranceId, utterance_from_row};

/// Store an utterance and return its id.
pub async fn insert_utterance(
    db: &Database,
    utterance: &NewUtterance,
) -> Result<UtteranceId, DexterError> {
    let u = utterance.clone();
    db.connection()
        .call(move |conn| -> Result<UtteranceId, rusqlite::Error> {
            conn.execute(
                "INSERT INTO utterances (doc_id, entity_id, quote, quote_offset, quote_length)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![u.document_id.0, u.entity_id.0, u.quote, u.offset, u.length],
            )?;
            Ok(UtteranceId(conn.last_insert_rowid()))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All utterances in a document, in insertion order.
pub async fn utterances_for_document(
    db: &Database,
    document_id: DocumentId,
) -> Result<Vec<Utterance>, DexterError> {
    db.connection()
        .call(move |conn| -> Result<Vec<Utterance>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, doc_id, entity_id, quote, quote_offset, quote_length
                 FROM utterances WHERE doc_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![document_id.0], utterance_from_row)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}
