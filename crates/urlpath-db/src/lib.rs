//! # urlpath-db
//!
//! libSQL storage for path records and content entities.
//!
//! `PathDb` backs both the path store and the entity store of the sync
//! engine. Queries are grouped per table under `repos/`, each one an
//! `impl PathDb` block.
//!
//! A `PathDb` wraps one connection. Transactions opened with
//! [`PathDb::begin`] cover every repository call made on that handle until
//! [`PathDb::commit`] or [`PathDb::rollback`]. [`PathDb::connect`] opens a
//! sibling handle with its own connection to the same file, so independent
//! transactions can run side by side.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod updates;

use std::sync::Arc;

use error::DatabaseError;
use libsql::Builder;

const IN_MEMORY: &str = ":memory:";

/// How long a connection waits for another connection's write lock.
const BUSY_TIMEOUT_MS: u32 = 5_000;

pub struct PathDb {
    database: Arc<libsql::Database>,
    conn: libsql::Connection,
    path: String,
}

impl PathDb {
    /// Open (or create) a local database file, or `":memory:"`, and bring its
    /// schema up to date.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file cannot be opened, the connection
    /// cannot be configured, or a migration fails.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let database = Builder::new_local(path).build().await?;
        let conn = database.connect()?;
        prepare_connection(&conn, path).await?;

        let db = Self {
            database: Arc::new(database),
            conn,
            path: path.to_string(),
        };
        db.run_migrations().await?;
        tracing::debug!(path, "path database ready");
        Ok(db)
    }

    /// Open another connection to the same database file.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Open` for `":memory:"` databases, whose
    /// contents are private to their first connection, or if the new
    /// connection cannot be configured.
    pub async fn connect(&self) -> Result<Self, DatabaseError> {
        if self.is_in_memory() {
            return Err(DatabaseError::Open(
                "an in-memory database cannot open a second connection".into(),
            ));
        }
        let conn = self.database.connect()?;
        prepare_connection(&conn, &self.path).await?;
        Ok(Self {
            database: Arc::clone(&self.database),
            conn,
            path: self.path.clone(),
        })
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// New random ID of the form `{prefix}-xxxxxxxx` (8 lowercase hex digits).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(row.get::<String>(0)?),
            None => Err(DatabaseError::NoResult),
        }
    }

    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::TransactionOpen` if one is already in progress.
    pub async fn begin(&self) -> Result<(), DatabaseError> {
        if self.in_transaction() {
            return Err(DatabaseError::TransactionOpen);
        }
        self.conn.execute("BEGIN IMMEDIATE", ()).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the commit fails.
    pub async fn commit(&self) -> Result<(), DatabaseError> {
        self.conn.execute("COMMIT", ()).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if no transaction is open or the rollback fails.
    pub async fn rollback(&self) -> Result<(), DatabaseError> {
        self.conn.execute("ROLLBACK", ()).await?;
        Ok(())
    }
}

/// Per-connection settings: SQLite scopes both pragmas to the connection.
async fn prepare_connection(conn: &libsql::Connection, path: &str) -> Result<(), DatabaseError> {
    let pragmas = [
        "PRAGMA foreign_keys = ON".to_string(),
        format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"),
    ];
    for pragma in &pragmas {
        let failed = |e: libsql::Error| DatabaseError::Open(format!("{path}: {pragma}: {e}"));
        // `busy_timeout` echoes its value as a row, so step pragmas as queries.
        let mut rows = conn.query(pragma, ()).await.map_err(failed)?;
        rows.next().await.map_err(failed)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> PathDb {
        PathDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn opens_with_both_tables() {
        let db = test_db().await;

        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('url_paths', 'content_entities') ORDER BY name",
                (),
            )
            .await
            .unwrap();
        let mut names = Vec::new();
        while let Some(row) = rows.next().await.unwrap() {
            names.push(row.get::<String>(0).unwrap());
        }
        assert_eq!(names, ["content_entities", "url_paths"]);
    }

    #[tokio::test]
    async fn ids_carry_prefix_and_eight_hex_digits() {
        let db = test_db().await;
        for prefix in urlpath_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            let (got_prefix, suffix) = urlpath_core::ids::split_id(&id).unwrap();
            assert_eq!(got_prefix, *prefix);
            assert_eq!(suffix.len(), 8, "{id}");
            assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[tokio::test]
    async fn ids_do_not_repeat() {
        let db = test_db().await;
        let mut seen = HashSet::new();
        for _ in 0..64 {
            assert!(seen.insert(db.generate_id("pth").await.unwrap()));
        }
    }

    #[tokio::test]
    async fn rollback_discards_writes() {
        let db = test_db().await;
        db.begin().await.unwrap();
        db.conn()
            .execute(
                "INSERT INTO url_paths (id, url_path, generated, contenttype) VALUES ('pth-t1', '/a', 0, 'api::a.a')",
                (),
            )
            .await
            .unwrap();
        db.rollback().await.unwrap();

        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM url_paths", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 0);
    }

    #[tokio::test]
    async fn nested_begin_is_rejected() {
        let db = test_db().await;
        db.begin().await.unwrap();
        assert!(db.in_transaction());
        assert!(matches!(db.begin().await, Err(DatabaseError::TransactionOpen)));
        db.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn path_record_cannot_be_shared() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO url_paths (id, url_path, generated, contenttype) VALUES ('pth-t1', '/a', 0, 'api::a.a')",
                (),
            )
            .await
            .unwrap();
        db.conn()
            .execute(
                "INSERT INTO content_entities (id, content_type, url_path_id) VALUES ('ent-1', 'api::a.a', 'pth-t1')",
                (),
            )
            .await
            .unwrap();

        let result = db
            .conn()
            .execute(
                "INSERT INTO content_entities (id, content_type, url_path_id) VALUES ('ent-2', 'api::a.a', 'pth-t1')",
                (),
            )
            .await;
        assert!(result.is_err(), "second owner of a path should be rejected");
    }

    async fn path_count(db: &PathDb) -> i64 {
        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM url_paths", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        row.get::<i64>(0).unwrap()
    }

    #[tokio::test]
    async fn connections_share_a_file_but_not_transactions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paths.db");
        let first = PathDb::open_local(path.to_str().unwrap()).await.unwrap();
        let second = first.connect().await.unwrap();

        first.begin().await.unwrap();
        first
            .create_path("/draft", false, "api::page.page")
            .await
            .unwrap();
        assert!(!second.in_transaction());
        assert_eq!(path_count(&second).await, 0);

        first.commit().await.unwrap();
        assert_eq!(path_count(&second).await, 1);
    }

    #[tokio::test]
    async fn reopening_a_file_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paths.db");
        let id = {
            let db = PathDb::open_local(path.to_str().unwrap()).await.unwrap();
            db.create_path("/kept", true, "api::page.page").await.unwrap().id
        };

        let db = PathDb::open_local(path.to_str().unwrap()).await.unwrap();
        assert_eq!(db.get_path(&id).await.unwrap().unwrap().url_path, "/kept");
    }

    #[tokio::test]
    async fn in_memory_database_has_a_single_connection() {
        let db = test_db().await;
        assert!(db.is_in_memory());
        assert!(matches!(db.connect().await, Err(DatabaseError::Open(_))));
    }
}
