//! # urlpath-core
//!
//! Core types, ID prefixes, and error types for URL path synchronization.
//!
//! This crate provides the foundational types shared across all urlpath crates:
//! - Path records and content entities (with their free-form field data)
//! - Content-type configuration and the eligibility registry
//! - The per-entity path state machine and sync action enums
//! - ID prefix constants
//! - Permission actions exposed to the admin registrar
//! - Cross-cutting error types

pub mod content_type;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod permissions;
