//! The synchronization engine.
//!
//! One `PathSyncEngine` is attached per content type. It decides, for every
//! create/update/delete, whether the entity's path record is created, kept,
//! rewritten, or removed.
//!
//! ```text
//! create  : manual value & no generation flag -> manual record
//!           otherwise                         -> generated record
//! update  : 1. no url_path_id in payload or store -> back-fill (create rule)
//!           2. payload says nothing about path    -> regenerate if generated, else keep
//!           3. manual value & no generation flag  -> overwrite, generated = false
//!           4. otherwise                          -> regenerate, generated = true
//! delete  : referenced record deleted first; no reference -> no store calls
//! ```
//!
//! The engine is stateless apart from its content type. Stores and resolver
//! arrive with every call as a [`SyncDeps`], so the caller decides which
//! connection (and therefore which transaction) the path writes land in.

use std::sync::Arc;

use async_trait::async_trait;
use urlpath_core::entities::{ContentEntity, EntityData, PathRecord};
use urlpath_db::PathDb;
use urlpath_db::updates::path::PathUpdate;

use crate::decision::PathDecision;
use crate::error::SyncError;
use crate::resolver::PatternResolver;
use crate::store::{EntityStore, PathStore};
use crate::subscriber::Subscriber;

/// Collaborators used while handling one lifecycle event.
#[derive(Clone)]
pub struct SyncDeps {
    pub paths: Arc<dyn PathStore>,
    pub entities: Arc<dyn EntityStore>,
    pub resolver: Arc<dyn PatternResolver>,
}

impl SyncDeps {
    pub fn new(
        paths: Arc<dyn PathStore>,
        entities: Arc<dyn EntityStore>,
        resolver: Arc<dyn PatternResolver>,
    ) -> Self {
        Self {
            paths,
            entities,
            resolver,
        }
    }

    /// Use one database handle as both path store and entity store.
    pub fn from_db(db: &Arc<PathDb>, resolver: Arc<dyn PatternResolver>) -> Self {
        Self {
            paths: db.clone(),
            entities: db.clone(),
            resolver,
        }
    }
}

/// Lifecycle interceptors for one content type.
pub struct PathSyncEngine {
    content_type: String,
}

impl PathSyncEngine {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
        }
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    fn resolve(&self, deps: &SyncDeps, data: &EntityData) -> Result<String, SyncError> {
        deps.resolver
            .resolve(&self.content_type, data)
            .map_err(|source| SyncError::PathResolution {
                content_type: self.content_type.clone(),
                source,
            })
    }

    async fn fetch_entity(&self, deps: &SyncDeps, id: &str) -> Result<ContentEntity, SyncError> {
        deps.entities
            .find_one(&self.content_type, id)
            .await
            .map_err(|e| SyncError::entity_store("find_one", e))?
            .ok_or_else(|| SyncError::EntityNotFound {
                content_type: self.content_type.clone(),
                id: id.to_string(),
            })
    }

    /// Create a path record following the manual-vs-generated rule.
    ///
    /// The manual value is read from `payload`; resolution runs on `resolve_input`.
    async fn create_path(
        &self,
        deps: &SyncDeps,
        payload: &EntityData,
        resolve_input: &EntityData,
    ) -> Result<PathRecord, SyncError> {
        let (url_path, generated) = match payload.manual_path() {
            Some(manual) => (manual.to_string(), false),
            None => (self.resolve(deps, resolve_input)?, true),
        };
        deps.paths
            .create(&url_path, generated, &self.content_type)
            .await
            .map_err(|e| SyncError::path_store("create", e))
    }

    async fn update_path(
        deps: &SyncDeps,
        path_id: &str,
        update: &PathUpdate,
    ) -> Result<(), SyncError> {
        deps.paths
            .update(path_id, update)
            .await
            .map_err(|e| SyncError::path_store("update", e))
    }

    async fn regenerate(
        &self,
        deps: &SyncDeps,
        path_id: &str,
        resolve_input: &EntityData,
    ) -> Result<PathDecision, SyncError> {
        let url_path = self.resolve(deps, resolve_input)?;
        Self::update_path(deps, path_id, &PathUpdate::generated(url_path.clone())).await?;
        Ok(PathDecision::regenerated(path_id, url_path))
    }
}

#[async_trait]
impl Subscriber for PathSyncEngine {
    async fn before_create(
        &self,
        deps: &SyncDeps,
        data: &EntityData,
    ) -> Result<PathDecision, SyncError> {
        let record = self.create_path(deps, data, data).await?;
        tracing::debug!(
            content_type = %self.content_type,
            path_id = %record.id,
            generated = record.generated,
            "path created for new entity"
        );
        Ok(PathDecision::created(&record))
    }

    async fn before_update(
        &self,
        deps: &SyncDeps,
        id: &str,
        data: &EntityData,
    ) -> Result<PathDecision, SyncError> {
        // Branch 1 must stay first: back-fill is decided before any explicit
        // path flags in the payload are looked at.
        let (path_id, resolve_input) = if let Some(path_id) = data.url_path_id() {
            let mut input = data.clone();
            input.insert("id", id);
            (path_id.to_string(), input)
        } else {
            let entity = self.fetch_entity(deps, id).await?;
            let merged = entity.full_data().merged_with(data);
            if let Some(path_id) = entity.url_path_id {
                (path_id, merged)
            } else {
                let record = self.create_path(deps, data, &merged).await?;
                tracing::info!(
                    content_type = %self.content_type,
                    entity_id = id,
                    path_id = %record.id,
                    "back-filled missing path"
                );
                return Ok(PathDecision::created(&record));
            }
        };

        if !data.specifies_path() {
            let record = deps
                .paths
                .find_one(&path_id)
                .await
                .map_err(|e| SyncError::path_store("find_one", e))?
                .ok_or_else(|| {
                    SyncError::path_store(
                        "find_one",
                        anyhow::anyhow!("path record {path_id} referenced by {id} does not exist"),
                    )
                })?;

            if !record.generated {
                return Ok(PathDecision::reused(path_id));
            }
            return self.regenerate(deps, &path_id, &resolve_input).await;
        }

        if let Some(manual) = data.manual_path() {
            Self::update_path(deps, &path_id, &PathUpdate::manual(manual)).await?;
            return Ok(PathDecision::regenerated(path_id, manual));
        }

        self.regenerate(deps, &path_id, &resolve_input).await
    }

    async fn before_delete(&self, deps: &SyncDeps, id: &str) -> Result<PathDecision, SyncError> {
        let entity = self.fetch_entity(deps, id).await?;
        let Some(path_id) = entity.url_path_id else {
            return Ok(PathDecision::noop());
        };

        deps.paths
            .delete(&path_id)
            .await
            .map_err(|e| SyncError::path_store("delete", e))?;
        tracing::debug!(
            content_type = %self.content_type,
            entity_id = id,
            path_id = %path_id,
            "path deleted with entity"
        );
        Ok(PathDecision::deleted(path_id))
    }
}
