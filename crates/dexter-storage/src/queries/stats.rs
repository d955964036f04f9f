// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregate numbers for the dashboard.

use std::collections::BTreeMap;

use dexter_core::DexterError;

use crate::database::Database;
use crate::models::{DashboardStats, MediumCount, from_db_time_opt};

/// Number of media outlets listed on the dashboard.
const MEDIA_SHOWN: i64 = 5;

/// Document totals, publication date range, entity counts per group and the
/// per-outlet document counts (smallest first).
pub async fn dashboard_stats(db: &Database) -> Result<DashboardStats, DexterError> {
    db.connection()
        .call(|conn| -> Result<DashboardStats, rusqlite::Error> {
            let (document_count, date_from, date_to) = conn.query_row(
                "SELECT COUNT(*), MIN(published_at), MAX(published_at) FROM documents",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        from_db_time_opt(row, 1)?,
                        from_db_time_opt(row, 2)?,
                    ))
                },
            )?;

            let mut stmt = conn.prepare(
                "SELECT entity_group, COUNT(*) FROM entities GROUP BY entity_group",
            )?;
            let group_counts = stmt
                .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
                .collect::<Result<BTreeMap<_, _>, _>>()?;

            let mut stmt = conn.prepare(
                "SELECT m.name, COUNT(d.id) AS n
                 FROM media m
                 JOIN documents d ON d.medium_id = m.id
                 GROUP BY m.id
                 ORDER BY n ASC, m.name ASC
                 LIMIT ?1",
            )?;
            let media_counts = stmt
                .query_map([MEDIA_SHOWN], |row| {
                    Ok(MediumCount {
                        medium: row.get(0)?,
                        documents: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(DashboardStats {
                document_count,
                date_from,
                date_to,
                group_counts,
                media_counts,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityGroup, NewDocument};
    use crate::queries::documents::{insert_document, insert_medium};
    use crate::queries::entities::insert_entity;
    use crate::queries::testing::{day, test_db};

    #[tokio::test]
    async fn empty_database_has_zero_counts() {
        let (_dir, db) = test_db().await;
        let stats = dashboard_stats(&db).await.unwrap();
        assert_eq!(stats.document_count, 0);
        assert_eq!(stats.date_from, None);
        assert_eq!(stats.date_to, None);
        assert!(stats.group_counts.is_empty());
        assert!(stats.media_counts.is_empty());
    }

    #[tokio::test]
    async fn counts_documents_entities_and_media() {
        let (_dir, db) = test_db().await;
        let big = insert_medium(&db, "Big Daily", None).await.unwrap();
        let small = insert_medium(&db, "Small Weekly", None).await.unwrap();

        for (d, medium) in [(2, big.id), (4, big.id), (8, small.id)] {
            insert_document(
                &db,
                &NewDocument {
                    url: None,
                    title: format!("doc {d}"),
                    summary: None,
                    text: String::new(),
                    published_at: day(d),
                    medium_id: Some(medium),
                },
            )
            .await
            .unwrap();
        }
        insert_entity(&db, "A", EntityGroup::Person).await.unwrap();
        insert_entity(&db, "B", EntityGroup::Person).await.unwrap();
        insert_entity(&db, "Cape Town", EntityGroup::Location).await.unwrap();

        let stats = dashboard_stats(&db).await.unwrap();
        assert_eq!(stats.document_count, 3);
        assert_eq!(stats.date_from, Some(day(2)));
        assert_eq!(stats.date_to, Some(day(8)));
        assert_eq!(stats.group_counts.get("person"), Some(&2));
        assert_eq!(stats.group_counts.get("location"), Some(&1));
        assert_eq!(
            stats.media_counts,
            vec![
                MediumCount {
                    medium: "Small Weekly".to_string(),
                    documents: 1
                },
                MediumCount {
                    medium: "Big Daily".to_string(),
                    documents: 2
                },
            ]
        );
    }
}
