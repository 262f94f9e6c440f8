//! Pattern resolution: content type + entity fields -> URL path.
//!
//! The engine only depends on the `PatternResolver` contract. Resolution must
//! be deterministic for fixed inputs and must fail rather than fall back to a
//! default path.

use anyhow::{Context, bail};
use heck::ToKebabCase;
use serde_json::Value;
use urlpath_config::PatternConfig;
use urlpath_core::content_type::short_name;
use urlpath_core::entities::EntityData;

/// Token that expands to the content type's short name.
const CONTENTTYPE_TOKEN: &str = "contenttype";

pub trait PatternResolver: Send + Sync {
    /// Resolve the URL path of an entity of `content_type` with field `data`.
    ///
    /// # Errors
    ///
    /// Returns an error when the pattern cannot be expanded for this data.
    fn resolve(&self, content_type: &str, data: &EntityData) -> anyhow::Result<String>;
}

/// Expands `[field]` tokens in the configured pattern with slugified field values.
///
/// `[contenttype]` expands to the last segment of the content-type uid.
#[derive(Debug, Clone, Default)]
pub struct FieldPatternResolver {
    patterns: PatternConfig,
}

impl FieldPatternResolver {
    #[must_use]
    pub const fn new(patterns: PatternConfig) -> Self {
        Self { patterns }
    }

    #[must_use]
    pub const fn patterns(&self) -> &PatternConfig {
        &self.patterns
    }
}

impl PatternResolver for FieldPatternResolver {
    fn resolve(&self, content_type: &str, data: &EntityData) -> anyhow::Result<String> {
        let pattern = self.patterns.pattern_for(content_type);
        expand(pattern, content_type, data)
            .with_context(|| format!("pattern '{pattern}'"))
    }
}

fn expand(pattern: &str, content_type: &str, data: &EntityData) -> anyhow::Result<String> {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find(']') else {
            bail!("unterminated token at '{}'", &rest[open..]);
        };
        let token = after[..close].trim();
        out.push_str(&token_value(token, content_type, data)?);
        rest = &after[close + 1..];
    }
    out.push_str(rest);

    Ok(normalize(&out))
}

fn token_value(token: &str, content_type: &str, data: &EntityData) -> anyhow::Result<String> {
    if token.is_empty() {
        bail!("empty token");
    }
    if token == CONTENTTYPE_TOKEN {
        return Ok(short_name(content_type).to_kebab_case());
    }

    let raw = match data.get(token) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | None => bail!("field '{token}' has no value"),
        Some(Value::Array(_) | Value::Object(_)) => {
            bail!("field '{token}' is not a scalar")
        }
    };

    let slug = raw.to_kebab_case();
    if slug.is_empty() {
        bail!("field '{token}' slugifies to an empty segment");
    }
    Ok(slug)
}

/// Collapse repeated slashes, force a leading slash, drop a trailing one.
fn normalize(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}
