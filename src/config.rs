use std::{fs, num::NonZeroUsize, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Result, optimization::OptimizerSpec};

/// The specification for a training run.
///
/// The optimizer is agnostic to all of this but the `optimizer` entry, the rest drives the loop
/// that calls it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    #[serde(default)]
    pub optimizer: OptimizerSpec,
    #[serde(default = "default_epochs")]
    pub epochs: NonZeroUsize,
    #[serde(default = "default_batch_size")]
    pub batch_size: NonZeroUsize,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_epochs() -> NonZeroUsize {
    NonZeroUsize::new(100).unwrap_or(NonZeroUsize::MIN)
}

fn default_batch_size() -> NonZeroUsize {
    NonZeroUsize::new(32).unwrap_or(NonZeroUsize::MIN)
}

impl TrainingConfig {
    /// Parses a config from its json representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses the json config at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            optimizer: OptimizerSpec::default(),
            epochs: default_epochs(),
            batch_size: default_batch_size(),
            seed: None,
        }
    }
}
