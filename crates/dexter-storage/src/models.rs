// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `dexter-core::types` for use across
//! store trait boundaries. This module re-exports them and holds the row
//! mapping helpers shared by the query modules.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use rusqlite::types::Type;

pub use dexter_core::types::{
    Affiliation, AffiliationClaim, AffiliationId, DashboardStats, Document, DocumentId,
    DocumentSource, Entity, EntityGroup, EntityId, Gender, GenderId, Medium, MediumCount,
    MediumId, NewDocument, NewUtterance, Person, PersonId, PersonSummary, Race, RaceId,
    Utterance, UtteranceId,
};

/// Render a timestamp the way it is stored: RFC 3339, UTC, millisecond precision.
///
/// The fixed width keeps lexicographic order equal to chronological order,
/// which range queries on `published_at` rely on.
pub fn to_db_time(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp from column `idx`.
pub fn from_db_time(row: &Row<'_>, idx: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    parse_db_time(&raw, idx)
}

/// Parse a nullable stored timestamp from column `idx`.
pub fn from_db_time_opt(
    row: &Row<'_>,
    idx: usize,
) -> Result<Option<DateTime<Utc>>, rusqlite::Error> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| parse_db_time(&s, idx)).transpose()
}

fn parse_db_time(raw: &str, idx: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Columns: id, name, gender_id, race_id, affiliation_id, created_at, updated_at.
pub(crate) fn person_from_row(row: &Row<'_>) -> Result<Person, rusqlite::Error> {
    Ok(Person {
        id: PersonId(row.get(0)?),
        name: row.get(1)?,
        gender_id: row.get::<_, Option<i64>>(2)?.map(GenderId),
        race_id: row.get::<_, Option<i64>>(3)?.map(RaceId),
        affiliation_id: row.get::<_, Option<i64>>(4)?.map(AffiliationId),
        created_at: from_db_time(row, 5)?,
        updated_at: from_db_time(row, 6)?,
    })
}

pub(crate) const PERSON_COLUMNS: &str =
    "id, name, gender_id, race_id, affiliation_id, created_at, updated_at";

/// Columns: id, name, entity_group, person_id.
pub(crate) fn entity_from_row(row: &Row<'_>) -> Result<Entity, rusqlite::Error> {
    let group: String = row.get(2)?;
    let group = group
        .parse::<EntityGroup>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    Ok(Entity {
        id: EntityId(row.get(0)?),
        name: row.get(1)?,
        group,
        person_id: row.get::<_, Option<i64>>(3)?.map(PersonId),
    })
}

/// Columns: id, doc_id, entity_id, quote, quote_offset, quote_length.
pub(crate) fn utterance_from_row(row: &Row<'_>) -> Result<Utterance, rusqlite::Error> {
    Ok(Utterance {
        id: UtteranceId(row.get(0)?),
        document_id: DocumentId(row.get(1)?),
        entity_id: EntityId(row.get(2)?),
        quote: row.get(3)?,
        offset: row.get(4)?,
        length: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn db_time_is_fixed_width_utc_millis() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 5, 0).unwrap();
        assert_eq!(to_db_time(&at), "2026-03-01T09:05:00.000Z");
    }

    #[test]
    fn db_time_sorts_chronologically() {
        let early = Utc.with_ymd_and_hms(2026, 1, 9, 23, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2026, 1, 10, 1, 0, 0).unwrap();
        assert!(to_db_time(&early) < to_db_time(&late));
    }
}
