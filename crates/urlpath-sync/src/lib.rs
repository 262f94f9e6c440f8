//! # urlpath-sync
//!
//! Keeps every content entity's URL path record consistent with the entity.
//!
//! - [`engine::PathSyncEngine`] holds the create/update/delete decision rules.
//! - [`registry::SubscriberRegistry`] binds one engine per eligible content type.
//! - [`pipeline::MutationPipeline`] runs entity writes through the attached
//!   interceptors inside a transaction.
//! - [`resolver::FieldPatternResolver`] turns `[field]` patterns into paths.
//!
//! # Usage
//!
//! ```no_run
//! use urlpath_config::UrlPathConfig;
//! use urlpath_core::content_type::{ContentTypeConfig, ContentTypeRegistry};
//! use urlpath_core::entities::EntityData;
//! use urlpath_sync::pipeline::MutationPipeline;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = UrlPathConfig::load()?;
//! let types: ContentTypeRegistry = [ContentTypeConfig::new("api::article.article")]
//!     .into_iter()
//!     .collect();
//! let pipeline = MutationPipeline::open(&config, types).await?;
//!
//! let data = EntityData::from_value(serde_json::json!({"title": "Hello"}))?;
//! let article = pipeline.create("api::article.article", data).await?;
//! println!("{:?}", article.url_path_id);
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod decision;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod resolver;
pub mod store;
pub mod subscriber;
mod test_support;

pub use error::SyncError;
