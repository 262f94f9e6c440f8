//! Errors raised by the domain types themselves.
//!
//! Storage, configuration and sync failures have their own error enums in
//! `urlpath-db`, `urlpath-config` and `urlpath-sync`.

use thiserror::Error;

use crate::enums::PathState;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Entity payloads are JSON objects; `found` names the JSON type received.
    #[error("entity data must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("path cannot move from {from} to {to}")]
    InvalidTransition { from: PathState, to: PathState },
}
