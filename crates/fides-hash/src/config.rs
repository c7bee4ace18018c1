//! Hasher configuration.
//!
//! The deployment salt and the declared embedding dimensionality are the
//! only knobs. Both must be stated explicitly: the original platform
//! shipped 128-dim and 512-dim embedding models side by side, so guessing
//! a dimension here would silently break duplicate detection.

use serde::{Deserialize, Serialize};

use fides_contracts::error::{FidesError, FidesResult};

/// Configuration for the embedding hasher.
///
/// Deserializable from TOML:
///
/// ```toml
/// salt = "deployment-salt-v1"
/// embedding_dim = 512
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HasherConfig {
    /// Deployment-wide secret salt mixed into every digest. Must never be
    /// empty in production — an unsalted hash of a quantized embedding
    /// would be enumerable offline.
    pub salt: String,
    /// Dimensionality every incoming embedding must have.
    pub embedding_dim: usize,
}

impl HasherConfig {
    /// Build a config from explicit values.
    pub fn new(salt: impl Into<String>, embedding_dim: usize) -> Self {
        Self {
            salt: salt.into(),
            embedding_dim,
        }
    }

    /// Validate the config. Called by `EmbeddingHasher::new`; a violation
    /// must abort startup, never surface mid-request.
    pub fn validate(&self) -> FidesResult<()> {
        if self.salt.is_empty() {
            return Err(FidesError::ConfigError {
                reason: "hasher salt must not be empty".to_string(),
            });
        }
        if self.embedding_dim == 0 {
            return Err(FidesError::ConfigError {
                reason: "embedding_dim must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
