// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gender and race lookup tables.

use dexter_core::DexterError;

use crate::database::Database;
use crate::models::{Gender, GenderId, Race, RaceId};

/// All genders, in id order.
pub async fn genders(db: &Database) -> Result<Vec<Gender>, DexterError> {
    db.connection()
        .call(|conn| -> Result<Vec<Gender>, rusqlite::Error> {
            let mut stmt = conn.prepare("SELECT id, name FROM genders ORDER BY id")?;
            let rows = stmt.query_map([], |row| {
                Ok(Gender {
                    id: GenderId(row.get(0)?),
                    name: row.get(1)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All races, in id order.
pub async fn races(db: &Database) -> Result<Vec<Race>, DexterError> {
    db.connection()
        .call(|conn| -> Result<Vec<Race>, rusqlite::Error> {
            let mut stmt = conn.prepare("SELECT id, name FROM races ORDER BY id")?;
            let rows = stmt.query_map([], |row| {
                Ok(Race {
                    id: RaceId(row.get(0)?),
                    name: row.get(1)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::testing::test_db;

    #[tokio::test]
    async fn seeded_genders_are_listed() {
        let (_dir, db) = test_db().await;
        let all = genders(&db).await.unwrap();
        let abbrs: Vec<String> = all.iter().map(Gender::abbr).collect();
        assert_eq!(all[0].name, "Female");
        assert_eq!(abbrs, ["F", "M", "O"]);
    }

    #[tokio::test]
    async fn seeded_races_are_listed() {
        let (_dir, db) = test_db().await;
        let all = races(&db).await.unwrap();
        let abbrs: Vec<String> = all.iter().map(Race::abbr).collect();
        assert_eq!(abbrs, ["B", "W", "C", "A", "I", "O"]);
        assert_eq!(all[1].id, RaceId(2));
    }
}
