//! URL pattern configuration.
//!
//! Patterns are URL templates with `[field]` tokens, e.g. `"/blog/[title]"`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_pattern() -> String {
    "/[contenttype]/[id]".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PatternConfig {
    /// Pattern used for content types without their own entry.
    #[serde(default = "default_pattern")]
    pub default: String,

    /// Per content-type patterns, keyed by content-type uid.
    #[serde(default)]
    pub by_type: BTreeMap<String, String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            default: default_pattern(),
            by_type: BTreeMap::new(),
        }
    }
}

impl PatternConfig {
    /// The pattern that applies to `content_type`.
    pub fn pattern_for(&self, content_type: &str) -> &str {
        self.by_type
            .get(content_type)
            .map_or(self.default.as_str(), String::as_str)
    }

    /// Every pattern must be an absolute path template.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "patterns.default".into(),
                reason: format!("pattern '{}' must start with '/'", self.default),
            });
        }
        for (uid, pattern) in &self.by_type {
            if !pattern.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    field: format!("patterns.by_type.{uid}"),
                    reason: format!("pattern '{pattern}' must start with '/'"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default() {
        let mut config = PatternConfig::default();
        config
            .by_type
            .insert("api::article.article".into(), "/blog/[title]".into());
        assert_eq!(config.pattern_for("api::article.article"), "/blog/[title]");
        assert_eq!(config.pattern_for("api::page.page"), "/[contenttype]/[id]");
    }

    #[test]
    fn validate_rejects_relative_patterns() {
        let mut config = PatternConfig::default();
        assert!(config.validate().is_ok());
        config.by_type.insert("api::page.page".into(), "page/[id]".into());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("patterns.by_type.api::page.page"));
    }
}
