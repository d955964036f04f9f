// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All statements are serialized through tokio-rusqlite's single background
//! thread: `Database` is the single writer, and query modules take `&Database`
//! and go through `connection().call()`. Do NOT create additional Connection
//! instances for writes.

use std::path::Path;
use std::time::Duration;

use dexter_core::DexterError;
use tracing::debug;

use crate::migrations::run_migrations;

/// Convert a tokio-rusqlite error into [`DexterError::Storage`].
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> DexterError {
    DexterError::storage(e)
}

/// Per-connection settings. Foreign keys and the busy timeout do not persist
/// in the database file, so every connection applies them.
fn apply_pragmas(conn: &rusqlite::Connection, wal_mode: bool) -> Result<(), rusqlite::Error> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    if wal_mode {
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(journal_mode = %mode, "journal mode set");
    }
    Ok(())
}

/// Handle to the Dexter SQLite database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path` in WAL mode and run
    /// pending migrations.
    pub async fn open(path: &str) -> Result<Self, DexterError> {
        Self::open_with(path, true).await
    }

    /// Open the database with an explicit journal mode choice.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, DexterError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(DexterError::storage)?;
            }
        }

        // Migrations run once on a short-lived synchronous connection before
        // the background connection takes over.
        {
            let mut conn = rusqlite::Connection::open(path).map_err(DexterError::storage)?;
            apply_pragmas(&conn, wal_mode).map_err(DexterError::storage)?;
            run_migrations(&mut conn)?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(DexterError::storage)?;
        conn.call(move |conn| -> Result<(), rusqlite::Error> { apply_pragmas(conn, wal_mode) })
            .await
            .map_err(map_tr_err)?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The single background connection all queries run on.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL into the main database file.
    pub async fn checkpoint(&self) -> Result<(), DexterError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
            })
            .await
            .map_err(map_tr_err)
    }

    /// Checkpoint and close the connection.
    pub async fn close(self) -> Result<(), DexterError> {
        self.checkpoint().await?;
        self.conn.close().await.map_err(map_tr_err)?;
        debug!("database closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("dexter.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        assert!(db_path.exists());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn migrations_create_schema_and_reference_data() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("schema.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let (genders, races) = db
            .connection()
            .call(|conn| -> Result<(i64, i64), rusqlite::Error> {
                let g = conn.query_row("SELECT COUNT(*) FROM genders", [], |r| r.get(0))?;
                let r = conn.query_row("SELECT COUNT(*) FROM races", [], |r| r.get(0))?;
                Ok((g, r))
            })
            .await
            .unwrap();
        assert_eq!(genders, 3);
        assert_eq!(races, 6);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn reopening_does_not_rerun_migrations() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");
        let path = db_path.to_str().unwrap();

        Database::open(path).await.unwrap().close().await.unwrap();
        let db = Database::open(path).await.unwrap();
        let genders: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row("SELECT COUNT(*) FROM genders", [], |r| r.get(0))
            })
            .await
            .unwrap();
        assert_eq!(genders, 3, "seed data must be inserted exactly once");
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("fk.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let result = db
            .connection()
            .call(|conn| -> Result<usize, rusqlite::Error> {
                conn.execute(
                    "INSERT INTO people (name, affiliation_id) VALUES ('Nobody', 999)",
                    [],
                )
            })
            .await;
        assert!(result.is_err(), "dangling affiliation must be rejected");
        db.close().await.unwrap();
    }
}
