//! Signer configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithm::HashAlgorithm;
use crate::error::{DigestifyError, Result};
use crate::DEFAULT_BLOCK_SIZE;

/// Environment variable naming a configuration file
pub const CONFIG_ENV: &str = "DIGESTIFY_CONFIG";

/// Settings shared by signing and verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestifyConfig {
    /// Hash function used for the HMAC
    pub algorithm: HashAlgorithm,

    /// Bytes read per block
    pub block_size: usize,
}

impl Default for DigestifyConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl DigestifyConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings no operation can run with
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(DigestifyError::Configuration(
                "block_size must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the block size is large enough to verify with this algorithm
    pub fn can_verify(&self) -> bool {
        self.block_size > self.algorithm.trailer_len()
    }
}
