//! Mutation pipeline: entity writes with their path interceptors.
//!
//! Every mutation follows this protocol:
//! 1. Open a connection of its own and begin an immediate transaction on it
//! 2. Dispatch the lifecycle event to the content type's subscriber (if attached)
//! 3. Apply the returned `PathDecision` to the payload
//! 4. Persist the entity
//! 5. Commit, or roll back on any error
//!
//! The path write and the entity write are therefore committed together.
//! Mutations share no lock in this process; SQLite's own write lock orders
//! concurrent commits, with connections waiting on each other up to the busy
//! timeout configured in `urlpath-db`.

use std::sync::Arc;

use urlpath_config::UrlPathConfig;
use urlpath_core::content_type::ContentTypeRegistry;
use urlpath_core::entities::{ContentEntity, EntityData};
use urlpath_core::enums::LifecycleEvent;
use urlpath_core::ids::PREFIX_ENTITY;
use urlpath_db::PathDb;
use urlpath_db::error::DatabaseError;

use crate::decision::PathDecision;
use crate::engine::SyncDeps;
use crate::error::SyncError;
use crate::registry::SubscriberRegistry;
use crate::resolver::{FieldPatternResolver, PatternResolver};

pub struct MutationPipeline {
    db: Arc<PathDb>,
    registry: SubscriberRegistry,
    resolver: Arc<dyn PatternResolver>,
}

impl MutationPipeline {
    /// `db` must be file-backed: each mutation opens its own connection to it.
    pub fn new(
        db: Arc<PathDb>,
        registry: SubscriberRegistry,
        resolver: Arc<dyn PatternResolver>,
    ) -> Self {
        Self {
            db,
            registry,
            resolver,
        }
    }

    /// Open the configured database and attach engines to every eligible
    /// content type, resolving paths with the configured patterns.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Database` if the database is in-memory or cannot
    /// be opened.
    pub async fn open(
        config: &UrlPathConfig,
        content_types: ContentTypeRegistry,
    ) -> Result<Self, SyncError> {
        if config.database.is_in_memory() {
            return Err(DatabaseError::Open(
                "the mutation pipeline needs a database file, not :memory:".into(),
            )
            .into());
        }
        let db = Arc::new(PathDb::open_local(&config.database.path).await?);
        let resolver = Arc::new(FieldPatternResolver::new(config.patterns.clone()));
        let mut registry =
            SubscriberRegistry::new(content_types).respect_visibility(config.general.respect_visibility);
        registry.attach_all();
        Ok(Self::new(db, registry, resolver))
    }

    #[must_use]
    pub const fn db(&self) -> &Arc<PathDb> {
        &self.db
    }

    #[must_use]
    pub const fn registry(&self) -> &SubscriberRegistry {
        &self.registry
    }

    /// Create an entity, attaching a path record if its type is tracked.
    ///
    /// # Errors
    ///
    /// Any interceptor or store failure aborts the creation; nothing is persisted.
    pub async fn create(
        &self,
        content_type: &str,
        data: EntityData,
    ) -> Result<ContentEntity, SyncError> {
        let tx = self.begin().await?;
        let result = self.create_inner(&tx, content_type, data).await;
        finish(&tx, LifecycleEvent::BeforeCreate, content_type, result).await
    }

    /// Apply a partial update, keeping the entity's path record in sync.
    ///
    /// # Errors
    ///
    /// Any interceptor or store failure aborts the update; nothing is persisted.
    pub async fn update(
        &self,
        content_type: &str,
        id: &str,
        data: EntityData,
    ) -> Result<ContentEntity, SyncError> {
        let tx = self.begin().await?;
        let result = self.update_inner(&tx, content_type, id, data).await;
        finish(&tx, LifecycleEvent::BeforeUpdate, content_type, result).await
    }

    /// Delete an entity together with its path record.
    ///
    /// # Errors
    ///
    /// Any interceptor or store failure aborts the deletion; nothing is removed.
    pub async fn delete(&self, content_type: &str, id: &str) -> Result<(), SyncError> {
        let tx = self.begin().await?;
        let result = self.delete_inner(&tx, content_type, id).await;
        finish(&tx, LifecycleEvent::BeforeDelete, content_type, result).await
    }

    /// A fresh connection with an open transaction.
    async fn begin(&self) -> Result<Arc<PathDb>, SyncError> {
        let tx = Arc::new(self.db.connect().await?);
        tx.begin().await?;
        Ok(tx)
    }

    fn deps(&self, tx: &Arc<PathDb>) -> SyncDeps {
        SyncDeps::from_db(tx, Arc::clone(&self.resolver))
    }

    async fn create_inner(
        &self,
        tx: &Arc<PathDb>,
        content_type: &str,
        mut data: EntityData,
    ) -> Result<ContentEntity, SyncError> {
        let id = tx.generate_id(PREFIX_ENTITY).await?;
        data.insert("id", id.clone());

        if let Some(subscriber) = self.registry.subscriber_for(content_type) {
            let decision = subscriber.before_create(&self.deps(tx), &data).await?;
            apply_decision(&decision, &mut data, content_type, &id);
        }

        tx.create_entity_with_id(&id, content_type, &data)
            .await
            .map_err(|e| SyncError::entity_store("create", e))
    }

    async fn update_inner(
        &self,
        tx: &Arc<PathDb>,
        content_type: &str,
        id: &str,
        mut data: EntityData,
    ) -> Result<ContentEntity, SyncError> {
        if let Some(subscriber) = self.registry.subscriber_for(content_type) {
            let decision = subscriber.before_update(&self.deps(tx), id, &data).await?;
            apply_decision(&decision, &mut data, content_type, id);
        }

        tx.update_entity(content_type, id, &data)
            .await
            .map_err(|e| not_found_or(e, content_type, id, "update"))
    }

    async fn delete_inner(
        &self,
        tx: &Arc<PathDb>,
        content_type: &str,
        id: &str,
    ) -> Result<(), SyncError> {
        if let Some(subscriber) = self.registry.subscriber_for(content_type) {
            let decision = subscriber.before_delete(&self.deps(tx), id).await?;
            tracing::debug!(content_type, entity_id = id, action = %decision.action, "delete decision");
        }

        tx.delete_entity(content_type, id)
            .await
            .map_err(|e| not_found_or(e, content_type, id, "delete"))
    }
}

async fn finish<T>(
    tx: &PathDb,
    event: LifecycleEvent,
    content_type: &str,
    result: Result<T, SyncError>,
) -> Result<T, SyncError> {
    let error = match result {
        Ok(value) => match tx.commit().await {
            Ok(()) => return Ok(value),
            Err(e) => SyncError::from(e),
        },
        Err(e) => e,
    };

    tracing::warn!(%event, content_type, error = %error, "mutation aborted");
    if let Err(rollback) = tx.rollback().await {
        tracing::error!(error = %rollback, "rollback failed");
    }
    Err(error)
}

fn apply_decision(decision: &PathDecision, data: &mut EntityData, content_type: &str, id: &str) {
    decision.apply(data);
    tracing::debug!(
        content_type,
        entity_id = id,
        action = %decision.action,
        path_id = decision.path_id.as_deref(),
        "path decision applied"
    );
}

fn not_found_or(e: DatabaseError, content_type: &str, id: &str, op: &'static str) -> SyncError {
    match e {
        DatabaseError::NoResult => SyncError::EntityNotFound {
            content_type: content_type.to_string(),
            id: id.to_string(),
        },
        other => SyncError::entity_store(op, other),
    }
}
