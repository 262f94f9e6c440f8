use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The stored URL path of one content entity and its provenance.
///
/// Owned by at most one entity at a time. `generated` is the only flag
/// consulted when deciding whether to regenerate on update.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PathRecord {
    pub id: String,
    pub url_path: String,
    pub generated: bool,
    /// Owning content-type uid.
    pub contenttype: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
