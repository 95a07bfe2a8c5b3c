use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// Tunables for a [`Registry`](crate::Registry).
///
/// Where the file comes from is the embedding process's business; the
/// registry only takes the parsed value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Commentary stored by `add` when the request carries none.
    pub default_commentary: String,
    /// Deliverable flag stored by `add` when the request carries none.
    pub default_deliverable: bool,
    /// Cap applied by `list` when the query sets no limit.
    pub list_limit: Option<usize>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_commentary: "Initial addition".into(),
            default_deliverable: true,
            list_limit: None,
        }
    }
}

impl RegistryConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> RegistryResult<Self> {
        toml::from_str(source).map_err(|e| RegistryError::Config(e.to_string()))
    }
}
