//! Path state machine, sync actions, and lifecycle events.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::PathRecord;
use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// PathState
// ---------------------------------------------------------------------------

/// State of a content entity relative to its path record.
///
/// ```text
/// no_path → manual_path    ⇄ generated_path
///         → generated_path
/// ```
///
/// There is no edge back to `no_path`. Deleting the entity discards the
/// state together with the path record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PathState {
    NoPath,
    ManualPath,
    GeneratedPath,
}

impl PathState {
    /// Derive the state from the entity's current path record (if any).
    #[must_use]
    pub const fn of(record: Option<&PathRecord>) -> Self {
        match record {
            None => Self::NoPath,
            Some(r) if r.generated => Self::GeneratedPath,
            Some(_) => Self::ManualPath,
        }
    }

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::NoPath | Self::ManualPath | Self::GeneratedPath => {
                &[Self::ManualPath, Self::GeneratedPath]
            }
        }
    }

    /// Check if a transition to `next` is valid.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Move to `next`, refusing transitions the machine does not allow.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition`, e.g. for any move back to `NoPath`.
    pub fn transition(self, next: Self) -> Result<Self, CoreError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition { from: self, to: next })
        }
    }

    /// Return the string representation used in logs and responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoPath => "no_path",
            Self::ManualPath => "manual_path",
            Self::GeneratedPath => "generated_path",
        }
    }
}

impl fmt::Display for PathState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PathAction
// ---------------------------------------------------------------------------

/// What a lifecycle interceptor did (or asks the caller to do) with the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PathAction {
    /// A new path record was created; its ID must be stored on the entity.
    CreatePath,
    /// The existing path record was kept as-is.
    ReusePath,
    /// The existing path record was rewritten (manual value or regenerated).
    RegenPath,
    /// The path record was deleted ahead of the entity.
    DeletePath,
    /// Nothing to do (e.g. deleting an entity that never had a path).
    NoOp,
}

impl PathAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatePath => "create_path",
            Self::ReusePath => "reuse_path",
            Self::RegenPath => "regen_path",
            Self::DeletePath => "delete_path",
            Self::NoOp => "no_op",
        }
    }
}

impl fmt::Display for PathAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Entity lifecycle events the sync engine subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    BeforeCreate,
    BeforeUpdate,
    BeforeDelete,
}

impl LifecycleEvent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BeforeCreate => "before_create",
            Self::BeforeUpdate => "before_update",
            Self::BeforeDelete => "before_delete",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
