//! Sync engine error types.

use thiserror::Error;
use urlpath_db::error::DatabaseError;

/// Errors surfaced by the sync engine, the registry, and the mutation pipeline.
///
/// Every error raised while handling a mutation aborts that mutation. Only
/// attach-time `ContentTypeNotFound` is logged and skipped by `attach_all`.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A content type was requested that the registry does not know.
    #[error("Content type not found: {0}")]
    ContentTypeNotFound(String),

    /// The pattern resolver could not produce a path.
    #[error("Path resolution failed for {content_type}: {source:#}")]
    PathResolution {
        content_type: String,
        #[source]
        source: anyhow::Error,
    },

    /// A path store call failed (or referenced a record that does not exist).
    #[error("Path store {op} failed: {source:#}")]
    PathStore {
        op: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// The entity needed to back-fill or clean up does not exist.
    #[error("Entity not found: {content_type} {id}")]
    EntityNotFound { content_type: String, id: String },

    /// An entity store call failed.
    #[error("Entity store {op} failed: {source:#}")]
    EntityStore {
        op: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// Transaction bookkeeping failed in the mutation pipeline.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl SyncError {
    pub(crate) fn path_store(op: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::PathStore {
            op,
            source: source.into(),
        }
    }

    pub(crate) fn entity_store(op: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::EntityStore {
            op,
            source: source.into(),
        }
    }
}
