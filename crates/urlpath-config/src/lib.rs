//! # urlpath-config
//!
//! Layered configuration loading for urlpath using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`URLPATH_*` prefix, `__` as separator)
//! 2. Project-level `.urlpath/config.toml`
//! 3. User-level `~/.config/urlpath/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `URLPATH_DATABASE__PATH` -> `database.path`,
//! `URLPATH_PATTERNS__DEFAULT` -> `patterns.default`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use urlpath_config::UrlPathConfig;
//!
//! let config = UrlPathConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod database;
mod error;
mod general;
mod patterns;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use patterns::PatternConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UrlPathConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub patterns: PatternConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl UrlPathConfig {
    /// Read every layer (defaults, user file, project file, environment).
    ///
    /// `.env` files are ignored here; see [`Self::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` when a layer is malformed and
    /// `ConfigError::InvalidValue` when a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Like [`Self::load`], but first exports the variables of a `.env` file
    /// in the working directory, if there is one.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Err(e) if !e.not_found() => {
                tracing::warn!(error = %e, "ignoring unreadable .env file");
            }
            _ => {}
        }
        Self::load()
    }

    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        self.patterns.validate()
    }

    /// The provider chain, lowest priority first. Exposed for tests and for
    /// hosts that merge extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let files = [user_config_file(), Some(PathBuf::from(PROJECT_CONFIG_FILE))];
        files
            .into_iter()
            .flatten()
            .filter(|path| path.is_file())
            .fold(
                Figment::from(Serialized::defaults(Self::default())),
                |figment, path| figment.merge(Toml::file(path)),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

const ENV_PREFIX: &str = "URLPATH_";
const PROJECT_CONFIG_FILE: &str = ".urlpath/config.toml";

fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("urlpath").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = UrlPathConfig::default();
        assert_eq!(config.database.path, "urlpath.db");
        assert_eq!(config.patterns.default, "/[contenttype]/[id]");
        assert!(config.general.respect_visibility);
    }

    #[test]
    fn empty_database_path_is_rejected() {
        let mut config = UrlPathConfig::default();
        config.database.path = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "database.path"
        ));
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config = UrlPathConfig::from_figment(&UrlPathConfig::figment())
                .expect("should extract defaults");
            assert!(config.patterns.by_type.is_empty());
            Ok(())
        });
    }
}
