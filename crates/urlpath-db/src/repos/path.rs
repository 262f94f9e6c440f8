//! Path record repository: the Path Store.

use chrono::Utc;

use urlpath_core::entities::PathRecord;
use urlpath_core::ids::PREFIX_PATH;

use crate::PathDb;
use crate::error::DatabaseError;
use crate::helpers::{get_bool, parse_datetime};
use crate::updates::path::PathUpdate;

const PATH_COLUMNS: &str = "id, url_path, generated, contenttype, created_at, updated_at";

fn row_to_path(row: &libsql::Row) -> Result<PathRecord, DatabaseError> {
    Ok(PathRecord {
        id: row.get::<String>(0)?,
        url_path: row.get::<String>(1)?,
        generated: get_bool(row, 2)?,
        contenttype: row.get::<String>(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl PathDb {
    pub async fn create_path(
        &self,
        url_path: &str,
        generated: bool,
        contenttype: &str,
    ) -> Result<PathRecord, DatabaseError> {
        let now = Utc::now();
        let id = self.generate_id(PREFIX_PATH).await?;

        self.conn()
            .execute(
                "INSERT INTO url_paths (id, url_path, generated, contenttype, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    url_path,
                    i64::from(generated),
                    contenttype,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::debug!(path_id = %id, url_path, generated, contenttype, "created path record");

        Ok(PathRecord {
            id,
            url_path: url_path.to_string(),
            generated,
            contenttype: contenttype.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_path(&self, id: &str) -> Result<Option<PathRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {PATH_COLUMNS} FROM url_paths WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_path(&row)?)),
            None => Ok(None),
        }
    }

    /// Apply a partial update. Fails with `NoResult` if the record does not exist.
    pub async fn update_path(&self, id: &str, update: &PathUpdate) -> Result<(), DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(ref url_path) = update.url_path {
            sets.push(format!("url_path = ?{idx}"));
            params.push(url_path.as_str().into());
            idx += 1;
        }
        if let Some(generated) = update.generated {
            sets.push(format!("generated = ?{idx}"));
            params.push(i64::from(generated).into());
            idx += 1;
        }

        if sets.is_empty() {
            return match self.get_path(id).await? {
                Some(_) => Ok(()),
                None => Err(DatabaseError::NoResult),
            };
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(Utc::now().to_rfc3339().into());
        idx += 1;

        params.push(id.into());
        let sql = format!("UPDATE url_paths SET {} WHERE id = ?{idx}", sets.join(", "));

        let affected = self
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }

        tracing::debug!(path_id = id, ?update, "updated path record");
        Ok(())
    }

    /// Delete a path record. Fails with `NoResult` if the record does not exist.
    pub async fn delete_path(&self, id: &str) -> Result<(), DatabaseError> {
        let affected = self
            .conn()
            .execute("DELETE FROM url_paths WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        tracing::debug!(path_id = id, "deleted path record");
        Ok(())
    }

    /// List path records, optionally restricted to one content type.
    pub async fn list_paths(
        &self,
        contenttype: Option<&str>,
    ) -> Result<Vec<PathRecord>, DatabaseError> {
        let mut rows = match contenttype {
            Some(ct) => {
                self.conn()
                    .query(
                        &format!(
                            "SELECT {PATH_COLUMNS} FROM url_paths WHERE contenttype = ?1 ORDER BY created_at, id"
                        ),
                        [ct],
                    )
                    .await?
            }
            None => {
                self.conn()
                    .query(
                        &format!("SELECT {PATH_COLUMNS} FROM url_paths ORDER BY created_at, id"),
                        (),
                    )
                    .await?
            }
        };

        let mut paths = Vec::new();
        while let Some(row) = rows.next().await? {
            paths.push(row_to_path(&row)?);
        }
        Ok(paths)
    }

    /// Find the path record holding a given URL path.
    pub async fn find_path_by_url(
        &self,
        url_path: &str,
    ) -> Result<Option<PathRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {PATH_COLUMNS} FROM url_paths WHERE url_path = ?1 LIMIT 1"),
                [url_path],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_path(&row)?)),
            None => Ok(None),
        }
    }
}
