//! Store seams consumed by the sync engine.
//!
//! `PathDb` implements both stores. Tests plug in recording doubles.

use async_trait::async_trait;
use urlpath_core::entities::{ContentEntity, PathRecord};
use urlpath_db::PathDb;
use urlpath_db::updates::path::PathUpdate;

/// CRUD storage for path records.
#[async_trait]
pub trait PathStore: Send + Sync {
    async fn create(
        &self,
        url_path: &str,
        generated: bool,
        contenttype: &str,
    ) -> anyhow::Result<PathRecord>;

    async fn find_one(&self, id: &str) -> anyhow::Result<Option<PathRecord>>;

    async fn update(&self, id: &str, update: &PathUpdate) -> anyhow::Result<()>;

    async fn delete(&self, id: &str) -> anyhow::Result<()>;
}

/// Read access to stored content entities.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn find_one(&self, content_type: &str, id: &str)
    -> anyhow::Result<Option<ContentEntity>>;
}

#[async_trait]
impl PathStore for PathDb {
    async fn create(
        &self,
        url_path: &str,
        generated: bool,
        contenttype: &str,
    ) -> anyhow::Result<PathRecord> {
        Ok(self.create_path(url_path, generated, contenttype).await?)
    }

    async fn find_one(&self, id: &str) -> anyhow::Result<Option<PathRecord>> {
        Ok(self.get_path(id).await?)
    }

    async fn update(&self, id: &str, update: &PathUpdate) -> anyhow::Result<()> {
        Ok(self.update_path(id, update).await?)
    }

    async fn delete(&self, id: &str) -> anyhow::Result<()> {
        Ok(self.delete_path(id).await?)
    }
}

#[async_trait]
impl EntityStore for PathDb {
    async fn find_one(
        &self,
        content_type: &str,
        id: &str,
    ) -> anyhow::Result<Option<ContentEntity>> {
        Ok(self.get_entity(content_type, id).await?)
    }
}
