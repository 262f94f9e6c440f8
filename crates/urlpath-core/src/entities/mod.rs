//! Entity structs for urlpath domain objects.
//!
//! `PathRecord` and `ContentEntity` each map to a table in the libSQL database.
//! `EntityData` is the free-form field payload carried by create/update events.

mod content;
mod data;
mod path;

pub use content::ContentEntity;
pub use data::{EntityData, PATH_GENERATED_FIELD, PATH_VALUE_FIELD, URL_PATH_ID_FIELD, is_truthy};
pub use path::PathRecord;
