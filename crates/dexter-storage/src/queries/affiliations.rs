// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Affiliation lookups.

use dexter_core::DexterError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Affiliation, AffiliationId};

/// Insert an affiliation and return it with its new id.
pub async fn insert_affiliation(
    db: &Database,
    code: &str,
    name: &str,
) -> Result<Affiliation, DexterError> {
    let code = code.to_string();
    let name = name.to_string();
    db.connection()
        .call(move |conn| -> Result<Affiliation, rusqlite::Error> {
            conn.execute(
                "INSERT INTO affiliations (code, name) VALUES (?1, ?2)",
                params![code, name],
            )?;
            Ok(Affiliation {
                id: AffiliationId(conn.last_insert_rowid()),
                code,
                name,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get an affiliation by id.
pub async fn get_affiliation(
    db: &Database,
    id: AffiliationId,
) -> Result<Option<Affiliation>, DexterError> {
    db.connection()
        .call(move |conn| -> Result<Option<Affiliation>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT id, code, name FROM affiliations WHERE id = ?1",
                params![id.0],
                |row| {
                    Ok(Affiliation {
                        id: AffiliationId(row.get(0)?),
                        code: row.get(1)?,
                        name: row.get(2)?,
                    })
                },
            );
            match result {
                Ok(affiliation) => Ok(Some(affiliation)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::testing::test_db;

    #[tokio::test]
    async fn insert_and_get_affiliation() {
        let (_dir, db) = test_db().await;
        let anc = insert_affiliation(&db, "1.1", "ANC").await.unwrap();

        let fetched = get_affiliation(&db, anc.id).await.unwrap().unwrap();
        assert_eq!(fetched, anc);
        assert_eq!(fetched.full_name(), "1.1 ANC");
    }

    #[tokio::test]
    async fn get_missing_affiliation_returns_none() {
        let (_dir, db) = test_db().await;
        assert!(get_affiliation(&db, AffiliationId(404)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_code_is_rejected() {
        let (_dir, db) = test_db().await;
        insert_affiliation(&db, "2.1", "DA").await.unwrap();
        assert!(insert_affiliation(&db, "2.1", "Other").await.is_err());
    }
}
