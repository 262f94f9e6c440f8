//! Content entity repository: the Entity Store.
//!
//! `url_path_id` is stripped out of the JSON payload and kept in its own
//! column. Everything else in the payload is stored as-is.

use chrono::Utc;

use urlpath_core::entities::{ContentEntity, EntityData};
use urlpath_core::ids::PREFIX_ENTITY;

use crate::PathDb;
use crate::error::DatabaseError;
use crate::helpers::{entity_data_to_json, get_opt_string, parse_datetime, parse_entity_data};

const ENTITY_COLUMNS: &str = "id, content_type, data, url_path_id, created_at, updated_at";

fn row_to_entity(row: &libsql::Row) -> Result<ContentEntity, DatabaseError> {
    Ok(ContentEntity {
        id: row.get::<String>(0)?,
        content_type: row.get::<String>(1)?,
        data: parse_entity_data(&row.get::<String>(2)?)?,
        url_path_id: get_opt_string(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl PathDb {
    pub async fn create_entity(
        &self,
        content_type: &str,
        data: &EntityData,
    ) -> Result<ContentEntity, DatabaseError> {
        let id = self.generate_id(PREFIX_ENTITY).await?;
        self.create_entity_with_id(&id, content_type, data).await
    }

    /// Insert an entity under an ID generated ahead of time (see `generate_id`).
    ///
    /// An `id` field inside `data` is dropped; the argument wins.
    pub async fn create_entity_with_id(
        &self,
        id: &str,
        content_type: &str,
        data: &EntityData,
    ) -> Result<ContentEntity, DatabaseError> {
        let now = Utc::now();

        let mut data = data.clone();
        let url_path_id = data.take_url_path_id();
        data.remove("id");

        self.conn()
            .execute(
                "INSERT INTO content_entities (id, content_type, data, url_path_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id,
                    content_type,
                    entity_data_to_json(&data)?,
                    url_path_id.as_deref(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::debug!(entity_id = id, content_type, "created content entity");

        Ok(ContentEntity {
            id: id.to_string(),
            content_type: content_type.to_string(),
            data,
            url_path_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_entity(
        &self,
        content_type: &str,
        id: &str,
    ) -> Result<Option<ContentEntity>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {ENTITY_COLUMNS} FROM content_entities WHERE content_type = ?1 AND id = ?2"
                ),
                [content_type, id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_entity(&row)?)),
            None => Ok(None),
        }
    }

    /// Shallow-merge a partial payload into the stored entity.
    ///
    /// A `url_path_id` in the payload replaces the stored reference; its absence
    /// leaves the reference untouched.
    pub async fn update_entity(
        &self,
        content_type: &str,
        id: &str,
        patch: &EntityData,
    ) -> Result<ContentEntity, DatabaseError> {
        let current = self
            .get_entity(content_type, id)
            .await?
            .ok_or(DatabaseError::NoResult)?;

        let mut patch = patch.clone();
        let url_path_id = patch.take_url_path_id().or(current.url_path_id);
        patch.remove("id");
        let data = current.data.merged_with(&patch);
        let now = Utc::now();

        self.conn()
            .execute(
                "UPDATE content_entities SET data = ?1, url_path_id = ?2, updated_at = ?3
                 WHERE content_type = ?4 AND id = ?5",
                libsql::params![
                    entity_data_to_json(&data)?,
                    url_path_id.as_deref(),
                    now.to_rfc3339(),
                    content_type,
                    id
                ],
            )
            .await?;

        tracing::debug!(entity_id = id, content_type, "updated content entity");

        Ok(ContentEntity {
            id: id.to_string(),
            content_type: content_type.to_string(),
            data,
            url_path_id,
            created_at: current.created_at,
            updated_at: now,
        })
    }

    /// Delete an entity. Fails with `NoResult` if it does not exist.
    pub async fn delete_entity(&self, content_type: &str, id: &str) -> Result<(), DatabaseError> {
        let affected = self
            .conn()
            .execute(
                "DELETE FROM content_entities WHERE content_type = ?1 AND id = ?2",
                [content_type, id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        tracing::debug!(entity_id = id, content_type, "deleted content entity");
        Ok(())
    }

    pub async fn list_entities(
        &self,
        content_type: &str,
    ) -> Result<Vec<ContentEntity>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {ENTITY_COLUMNS} FROM content_entities WHERE content_type = ?1 ORDER BY created_at, id"
                ),
                [content_type],
            )
            .await?;

        let mut entities = Vec::new();
        while let Some(row) = rows.next().await? {
            entities.push(row_to_entity(&row)?);
        }
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use urlpath_core::entities::EntityData;

    use crate::PathDb;
    use crate::error::DatabaseError;

    const ARTICLE: &str = "api::article.article";

    async fn test_db() -> PathDb {
        PathDb::open_local(":memory:").await.unwrap()
    }

    fn data(value: serde_json::Value) -> EntityData {
        EntityData::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn create_keeps_path_reference_out_of_data() {
        let db = test_db().await;
        let path = db.create_path("/a", false, ARTICLE).await.unwrap();

        let entity = db
            .create_entity(ARTICLE, &data(json!({"title": "Hello", "url_path_id": &path.id})))
            .await
            .unwrap();
        assert_eq!(entity.url_path_id.as_deref(), Some(path.id.as_str()));
        assert!(!entity.data.contains("url_path_id"));

        let fetched = db.get_entity(ARTICLE, &entity.id).await.unwrap().unwrap();
        assert_eq!(fetched.data.get("title"), Some(&json!("Hello")));
        assert_eq!(fetched.url_path_id, entity.url_path_id);
    }

    #[tokio::test]
    async fn create_with_pregenerated_id() {
        let db = test_db().await;
        let entity = db
            .create_entity_with_id("ent-0000beef", ARTICLE, &data(json!({"id": "ignored", "n": 1})))
            .await
            .unwrap();
        assert_eq!(entity.id, "ent-0000beef");
        assert!(!entity.data.contains("id"));
        assert!(db.get_entity(ARTICLE, "ent-0000beef").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn get_is_scoped_to_content_type() {
        let db = test_db().await;
        let entity = db.create_entity(ARTICLE, &data(json!({}))).await.unwrap();
        assert!(db.get_entity("api::page.page", &entity.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_merges_and_keeps_reference() {
        let db = test_db().await;
        let path = db.create_path("/a", false, ARTICLE).await.unwrap();
        let entity = db
            .create_entity(
                ARTICLE,
                &data(json!({"title": "Old", "body": "B", "url_path_id": &path.id})),
            )
            .await
            .unwrap();

        let updated = db
            .update_entity(ARTICLE, &entity.id, &data(json!({"title": "New"})))
            .await
            .unwrap();
        assert_eq!(updated.data.get("title"), Some(&json!("New")));
        assert_eq!(updated.data.get("body"), Some(&json!("B")));
        assert_eq!(updated.url_path_id.as_deref(), Some(path.id.as_str()));

        let fetched = db.get_entity(ARTICLE, &entity.id).await.unwrap().unwrap();
        assert_eq!(fetched.data, updated.data);
    }

    #[tokio::test]
    async fn update_missing_is_no_result() {
        let db = test_db().await;
        let result = db.update_entity(ARTICLE, "ent-missing", &data(json!({}))).await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }

    #[tokio::test]
    async fn deleting_path_clears_reference() {
        let db = test_db().await;
        let path = db.create_path("/a", false, ARTICLE).await.unwrap();
        let entity = db
            .create_entity(ARTICLE, &data(json!({"url_path_id": &path.id})))
            .await
            .unwrap();

        db.delete_path(&path.id).await.unwrap();

        let fetched = db.get_entity(ARTICLE, &entity.id).await.unwrap().unwrap();
        assert!(fetched.url_path_id.is_none());
    }

    #[tokio::test]
    async fn delete_and_list() {
        let db = test_db().await;
        let a = db.create_entity(ARTICLE, &data(json!({"n": 1}))).await.unwrap();
        db.create_entity(ARTICLE, &data(json!({"n": 2}))).await.unwrap();
        assert_eq!(db.list_entities(ARTICLE).await.unwrap().len(), 2);

        db.delete_entity(ARTICLE, &a.id).await.unwrap();
        assert_eq!(db.list_entities(ARTICLE).await.unwrap().len(), 1);
        assert!(matches!(
            db.delete_entity(ARTICLE, &a.id).await,
            Err(DatabaseError::NoResult)
        ));
    }
}
