//! Explicit interceptor results.
//!
//! Interceptors never mutate the in-flight payload. They return a
//! `PathDecision` and the caller applies it before persisting the entity.

use serde::Serialize;
use urlpath_core::entities::{EntityData, PathRecord};
use urlpath_core::enums::PathAction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathDecision {
    pub action: PathAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_value: Option<String>,
}

impl PathDecision {
    /// A new path record was created for the entity.
    #[must_use]
    pub fn created(record: &PathRecord) -> Self {
        Self {
            action: PathAction::CreatePath,
            path_id: Some(record.id.clone()),
            path_value: Some(record.url_path.clone()),
        }
    }

    /// The existing record was left untouched.
    #[must_use]
    pub fn reused(path_id: impl Into<String>) -> Self {
        Self {
            action: PathAction::ReusePath,
            path_id: Some(path_id.into()),
            path_value: None,
        }
    }

    /// The existing record was rewritten with `path_value`.
    #[must_use]
    pub fn regenerated(path_id: impl Into<String>, path_value: impl Into<String>) -> Self {
        Self {
            action: PathAction::RegenPath,
            path_id: Some(path_id.into()),
            path_value: Some(path_value.into()),
        }
    }

    /// The record was deleted ahead of its entity.
    #[must_use]
    pub fn deleted(path_id: impl Into<String>) -> Self {
        Self {
            action: PathAction::DeletePath,
            path_id: Some(path_id.into()),
            path_value: None,
        }
    }

    #[must_use]
    pub const fn noop() -> Self {
        Self {
            action: PathAction::NoOp,
            path_id: None,
            path_value: None,
        }
    }

    /// Write the decision into the persistence payload.
    ///
    /// Only `CreatePath` changes the payload: it attaches `url_path_id`.
    pub fn apply(&self, data: &mut EntityData) {
        if self.action != PathAction::CreatePath {
            return;
        }
        if let Some(path_id) = &self.path_id {
            data.set_url_path_id(path_id.clone());
        }
    }
}
