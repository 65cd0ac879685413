//! Orchestrator configuration.

use serde::{Deserialize, Serialize};

use crate::pool::DEFAULT_POOL_SIZE;

/// Configuration for the upload orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Maximum concurrent uploads for batches of more than one endpoint.
    /// A single endpoint is always uploaded alone.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
}

fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
        }
    }
}

impl OrchestratorConfig {
    /// Sets the maximum concurrent uploads.
    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.pool_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.pool_size, 4);
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: OrchestratorConfig = toml::from_str("").unwrap();
        assert_eq!(config.pool_size, 4);
    }

    #[test]
    fn test_deserialize_full() {
        let config: OrchestratorConfig = toml::from_str("pool_size = 8").unwrap();
        assert_eq!(config.pool_size, 8);
        assert_eq!(OrchestratorConfig::default().with_pool_size(2).pool_size, 2);
    }
}
