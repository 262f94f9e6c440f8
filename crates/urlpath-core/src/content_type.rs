//! Content-type configuration and the registry handed to the registration layer.
//!
//! The registry is built once at startup and passed in explicitly. Nothing
//! reads content types from ambient global state.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Configuration of one content type, as far as path tracking is concerned.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ContentTypeConfig {
    /// Content-type uid, e.g. `"api::article.article"`.
    pub uid: String,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Visibility in the editorial surface. Only an explicit `false` opts the
    /// type out of path tracking; `None` means visible.
    #[serde(default)]
    pub visible: Option<bool>,
}

impl ContentTypeConfig {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            visible: None,
        }
    }

    /// Mark the type as hidden from the editorial surface.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = Some(false);
        self
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Whether entities of this type get a path record.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        !matches!(self.visible, Some(false))
    }

    /// The last segment of the uid (`"api::article.article"` -> `"article"`).
    #[must_use]
    pub fn short_name(&self) -> &str {
        short_name(&self.uid)
    }
}

/// The last `.`-separated segment of a content-type uid.
#[must_use]
pub fn short_name(uid: &str) -> &str {
    uid.rsplit('.').next().unwrap_or(uid)
}

/// All known content types keyed by uid.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ContentTypeRegistry(BTreeMap<String, ContentTypeConfig>);

impl ContentTypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a content type, keyed by its uid.
    pub fn insert(&mut self, config: ContentTypeConfig) {
        self.0.insert(config.uid.clone(), config);
    }

    #[must_use]
    pub fn get(&self, uid: &str) -> Option<&ContentTypeConfig> {
        self.0.get(uid)
    }

    #[must_use]
    pub fn contains(&self, uid: &str) -> bool {
        self.0.contains_key(uid)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentTypeConfig> {
        self.0.values()
    }

    /// Content types eligible for path tracking, in uid order.
    pub fn eligible(&self) -> impl Iterator<Item = &ContentTypeConfig> {
        self.0.values().filter(|ct| ct.is_eligible())
    }
}

impl FromIterator<ContentTypeConfig> for ContentTypeRegistry {
    fn from_iter<I: IntoIterator<Item = ContentTypeConfig>>(iter: I) -> Self {
        let mut registry = Self::new();
        for config in iter {
            registry.insert(config);
        }
        registry
    }
}
