//! Runtime configuration
//!
//! ```toml
//! logging = "production"
//!
//! [capabilities]
//! isolated_render_context = true
//! subscriptions = true
//! ```
//!
//! Every key is optional; omitted keys take their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::context::{ContextRegistry, EnvironmentCapabilities};
use crate::errors::{QueryError, Result};
use crate::logging_facility::{self, Profile};
use crate::snapshot::DataSnapshot;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Logging profile passed to `logging_facility::init`
    pub logging: Profile,
    /// What the host rendering environment supports
    pub capabilities: EnvironmentCapabilities,
}

impl RuntimeConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `InvalidConfig` if it does
    /// not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| QueryError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Initialise logging with the configured profile
    pub fn init_logging(&self) {
        logging_facility::init(self.logging);
    }

    /// Registry for these capabilities around `default_snapshot`
    pub fn registry(&self, default_snapshot: Arc<DataSnapshot>) -> ContextRegistry {
        ContextRegistry::new(self.capabilities, default_snapshot)
    }
}
