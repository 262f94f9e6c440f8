//! Path record update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<bool>,
}

impl PathUpdate {
    /// Overwrite with a manual value (`generated = false`).
    pub fn manual(url_path: impl Into<String>) -> Self {
        PathUpdateBuilder::new()
            .url_path(url_path)
            .generated(false)
            .build()
    }

    /// Overwrite with a resolved value (`generated = true`).
    pub fn generated(url_path: impl Into<String>) -> Self {
        PathUpdateBuilder::new()
            .url_path(url_path)
            .generated(true)
            .build()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.url_path.is_none() && self.generated.is_none()
    }
}

pub struct PathUpdateBuilder(PathUpdate);

impl PathUpdateBuilder {
    pub fn new() -> Self {
        Self(PathUpdate::default())
    }

    pub fn url_path(mut self, val: impl Into<String>) -> Self {
        self.0.url_path = Some(val.into());
        self
    }

    pub fn generated(mut self, val: bool) -> Self {
        self.0.generated = Some(val);
        self
    }

    pub fn build(self) -> PathUpdate {
        self.0
    }
}

impl Default for PathUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
