//! Pendo destination configuration.

use serde::{Deserialize, Serialize};

use dispatch_core::error::{DispatchError, DispatchResult};

/// Configuration for the Pendo destination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PendoConfig {
    /// Pendo subscription API key. Required; there is no default.
    #[serde(default)]
    pub api_key: String,
}

impl PendoConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Validate that the configuration is correct.
    pub fn validate(&self) -> DispatchResult<()> {
        if self.api_key.is_empty() {
            return Err(DispatchError::Config(
                "Pendo api_key must not be empty".into(),
            ));
        }
        Ok(())
    }
}
