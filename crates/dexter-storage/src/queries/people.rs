// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Person operations.

use dexter_core::DexterError;
use rusqlite::{OptionalExtension, params};

use crate::database::Database;
use crate::models::{
    AffiliationId, GenderId, PERSON_COLUMNS, Person, PersonId, PersonSummary, RaceId,
    person_from_row, to_db_time,
};

/// Get a person by id.
pub async fn get_person(db: &Database, id: PersonId) -> Result<Option<Person>, DexterError> {
    db.connection()
        .call(move |conn| -> Result<Option<Person>, rusqlite::Error> {
            conn.query_row(
                &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1"),
                params![id.0],
                person_from_row,
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Find a person by exact name.
pub async fn find_person_by_name(db: &Database, name: &str) -> Result<Option<Person>, DexterError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<Person>, rusqlite::Error> {
            conn.query_row(
                &format!("SELECT {PERSON_COLUMNS} FROM people WHERE name = ?1"),
                params![name],
                person_from_row,
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Return the person called `name`, creating it if necessary.
///
/// A newly created person adopts every unlinked `person` entity with the same
/// name. Lookup, insert and linking happen in one transaction.
pub async fn get_or_create_person(
    db: &Database,
    name: &str,
    gender_id: Option<GenderId>,
    race_id: Option<RaceId>,
) -> Result<Person, DexterError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(DexterError::InvalidInput("person name is empty".into()));
    }

    db.connection()
        .call(move |conn| -> Result<Person, rusqlite::Error> {
            let tx = conn.transaction()?;
            let select = format!("SELECT {PERSON_COLUMNS} FROM people WHERE name = ?1");

            if let Some(existing) = tx
                .query_row(&select, params![name], person_from_row)
                .optional()?
            {
                tx.commit()?;
                return Ok(existing);
            }

            tx.execute(
                "INSERT INTO people (name, gender_id, race_id) VALUES (?1, ?2, ?3)",
                params![name, gender_id.map(|g| g.0), race_id.map(|r| r.0)],
            )?;
            let person_id = tx.last_insert_rowid();
            tx.execute(
                "UPDATE entities SET person_id = ?1
                 WHERE entity_group = 'person' AND name = ?2 AND person_id IS NULL",
                params![person_id, name],
            )?;

            let person = tx.query_row(&select, params![name], person_from_row)?;
            tx.commit()?;
            Ok(person)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Record a person's current affiliation.
pub async fn set_person_affiliation(
    db: &Database,
    id: PersonId,
    affiliation_id: Option<AffiliationId>,
) -> Result<(), DexterError> {
    let now = to_db_time(&chrono::Utc::now());
    let updated = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute(
                "UPDATE people SET affiliation_id = ?1, updated_at = ?2 WHERE id = ?3",
                params![affiliation_id.map(|a| a.0), now, id.0],
            )
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    if updated == 0 {
        return Err(DexterError::NotFound {
            kind: "person",
            id: id.0,
        });
    }
    Ok(())
}

/// Display-ready view of a person with race, gender and affiliation resolved.
pub async fn person_summary(
    db: &Database,
    id: PersonId,
) -> Result<Option<PersonSummary>, DexterError> {
    db.connection()
        .call(move |conn| -> Result<Option<PersonSummary>, rusqlite::Error> {
            conn.query_row(
                "SELECT p.id, p.name, r.name, g.name, a.code, a.name
                 FROM people p
                 LEFT JOIN races r ON r.id = p.race_id
                 LEFT JOIN genders g ON g.id = p.gender_id
                 LEFT JOIN affiliations a ON a.id = p.affiliation_id
                 WHERE p.id = ?1",
                params![id.0],
                |row| {
                    let code: Option<String> = row.get(4)?;
                    let aff_name: Option<String> = row.get(5)?;
                    let affiliation = aff_name.map(|n| match code.as_deref() {
                        Some(c) if !c.is_empty() => format!("{c} {n}"),
                        _ => n,
                    });
                    Ok(PersonSummary {
                        id: PersonId(row.get(0)?),
                        name: row.get(1)?,
                        race: row.get(2)?,
                        gender: row.get(3)?,
                        affiliation,
                    })
                },
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}
