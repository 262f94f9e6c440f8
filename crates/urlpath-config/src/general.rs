//! General application configuration.

use serde::{Deserialize, Serialize};

const fn default_respect_visibility() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Skip content types hidden from the editorial surface when attaching.
    #[serde(default = "default_respect_visibility")]
    pub respect_visibility: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            respect_visibility: default_respect_visibility(),
        }
    }
}
