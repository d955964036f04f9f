// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity operations.

use dexter_core::DexterError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Entity, EntityGroup, EntityId, PersonId, entity_from_row};

/// Insert an entity, or return the existing one with the same group and name.
pub async fn insert_entity(
    db: &Database,
    name: &str,
    group: EntityGroup,
) -> Result<Entity, DexterError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| -> Result<Entity, rusqlite::Error> {
            conn.execute(
                "INSERT OR IGNORE INTO entities (name, entity_group) VALUES (?1, ?2)",
                params![name, group.to_string()],
            )?;
            conn.query_row(
                "SELECT id, name, entity_group, person_id FROM entities
                 WHERE entity_group = ?1 AND name = ?2",
                params![group.to_string(), name],
                entity_from_row,
            )
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get an entity by id.
pub async fn get_entity(db: &Database, id: EntityId) -> Result<Option<Entity>, DexterError> {
    db.connection()
        .call(move |conn| -> Result<Option<Entity>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT id, name, entity_group, person_id FROM entities WHERE id = ?1",
                params![id.0],
                entity_from_row,
            );
            match result {
                Ok(entity) => Ok(Some(entity)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All entities linked to a person, in insertion order.
pub async fn entities_for_person(
    db: &Database,
    person_id: PersonId,
) -> Result<Vec<Entity>, DexterError> {
    db.connection()
        .call(move |conn| -> Result<Vec<Entity>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, name, entity_group, person_id FROM entities
                 WHERE person_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![person_id.0], entity_from_row)?;
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
    async fn insert_entity_is_idempotent_per_group() {
        let (_dir, db) = test_db().await;
        let first = insert_entity(&db, "Zuma", EntityGroup::Person).await.unwrap();
        let again = insert_entity(&db, "Zuma", EntityGroup::Person).await.unwrap();
        let place = insert_entity(&db, "Zuma", EntityGroup::Location).await.unwrap();

        assert_eq!(first.id, again.id);
        assert_ne!(first.id, place.id);
        assert_eq!(place.group, EntityGroup::Location);
        assert!(first.person_id.is_none());
    }

    #[tokio::test]
    async fn get_entity_by_id() {
        let (_dir, db) = test_db().await;
        let e = insert_entity(&db, "SABC", EntityGroup::Organisation).await.unwrap();
        assert_eq!(get_entity(&db, e.id).await.unwrap(), Some(e));
        assert_eq!(get_entity(&db, EntityId(999)).await.unwrap(), None);
    }
}
