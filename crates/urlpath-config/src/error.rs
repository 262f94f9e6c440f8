use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or environment variable could not be read into `UrlPathConfig`.
    #[error("cannot load urlpath configuration: {0}")]
    Load(#[from] figment::Error),

    /// A loaded value failed validation.
    #[error("{field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
