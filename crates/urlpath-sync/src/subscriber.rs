//! Observer interface for entity lifecycle events.

use async_trait::async_trait;
use urlpath_core::entities::EntityData;

use crate::decision::PathDecision;
use crate::engine::SyncDeps;
use crate::error::SyncError;

/// Receives lifecycle events for one content type, before persistence.
///
/// The mutation does not proceed until the interceptor returns. An `Err`
/// aborts it. `deps` are bound to the mutation's own transaction.
#[async_trait]
pub trait Subscriber: Send + Sync {
    /// Called with the full payload of an entity about to be created.
    async fn before_create(
        &self,
        deps: &SyncDeps,
        data: &EntityData,
    ) -> Result<PathDecision, SyncError>;

    /// Called with the (possibly partial) payload of an update to entity `id`.
    async fn before_update(
        &self,
        deps: &SyncDeps,
        id: &str,
        data: &EntityData,
    ) -> Result<PathDecision, SyncError>;

    /// Called before entity `id` is deleted.
    async fn before_delete(&self, deps: &SyncDeps, id: &str) -> Result<PathDecision, SyncError>;
}
