//! Versioned schema migrations.
//!
//! Applied versions are recorded in `schema_migrations`, so reopening a
//! database only runs what is new.

use crate::PathDb;
use crate::error::DatabaseError;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial",
    sql: include_str!("../migrations/001_initial.sql"),
}];

impl PathDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS schema_migrations (
                    version INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
                )",
                (),
            )
            .await?;

        let applied = self.schema_version().await?;
        for migration in MIGRATIONS.iter().filter(|m| m.version > applied) {
            let failed = |e: libsql::Error| DatabaseError::Migration {
                version: migration.version,
                reason: e.to_string(),
            };
            self.conn.execute_batch(migration.sql).await.map_err(failed)?;
            self.conn
                .execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    libsql::params![i64::from(migration.version), migration.name],
                )
                .await
                .map_err(failed)?;
            tracing::info!(version = migration.version, name = migration.name, "applied migration");
        }
        Ok(())
    }

    /// Highest applied migration version, `0` for a fresh database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the version table cannot be read.
    pub async fn schema_version(&self) -> Result<u32, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT COALESCE(MAX(version), 0) FROM schema_migrations", ())
            .await?;
        let version = match rows.next().await? {
            Some(row) => row.get::<i64>(0)?,
            None => 0,
        };
        u32::try_from(version)
            .map_err(|_| DatabaseError::Row(format!("schema version {version} out of range")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_applied_versions() {
        let db = PathDb::open_local(":memory:").await.unwrap();
        let latest = MIGRATIONS.iter().map(|m| m.version).max().unwrap();
        assert_eq!(db.schema_version().await.unwrap(), latest);
    }

    #[tokio::test]
    async fn reopening_applies_nothing_new() {
        let db = PathDb::open_local(":memory:").await.unwrap();
        db.run_migrations().await.unwrap();

        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM schema_migrations", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), i64::try_from(MIGRATIONS.len()).unwrap());
    }

    #[test]
    fn versions_are_strictly_increasing() {
        assert!(MIGRATIONS.windows(2).all(|w| w[0].version < w[1].version));
    }
}
