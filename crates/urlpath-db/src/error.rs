//! Storage errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The database file could not be opened or prepared for use.
    #[error("cannot open path database: {0}")]
    Open(String),

    /// Migration `version` did not apply.
    #[error("migration {version} failed: {reason}")]
    Migration { version: u32, reason: String },

    /// A stored row could not be decoded into a domain type.
    #[error("malformed row: {0}")]
    Row(String),

    /// Entity data could not be encoded for storage.
    #[error("cannot encode entity data: {0}")]
    Encode(#[from] serde_json::Error),

    /// The targeted path record or entity does not exist.
    #[error("no such record")]
    NoResult,

    #[error("a transaction is already open on this connection")]
    TransactionOpen,

    #[error(transparent)]
    LibSql(#[from] libsql::Error),
}
