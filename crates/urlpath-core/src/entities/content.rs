use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityData;

/// A persisted record of user-authored content of some content type.
///
/// `url_path_id` is kept out of `data` and stored in its own column so the
/// relation to the path record can be indexed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentEntity {
    pub id: String,
    pub content_type: String,
    pub data: EntityData,
    pub url_path_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentEntity {
    /// The entity's data with its own `id` and `url_path_id` folded in.
    ///
    /// This is what pattern resolution sees for a stored entity.
    #[must_use]
    pub fn full_data(&self) -> EntityData {
        let mut data = self.data.clone();
        data.insert("id", self.id.clone());
        if let Some(path_id) = &self.url_path_id {
            data.set_url_path_id(path_id.clone());
        }
        data
    }
}
