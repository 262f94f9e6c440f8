//! Repository modules implementing CRUD operations for urlpath entities.
//!
//! Each module adds methods to `PathDb` via `impl PathDb` blocks.

pub mod entity;
pub mod path;
