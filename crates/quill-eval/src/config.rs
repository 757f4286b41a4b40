//! Per-run configuration.

use serde::{Deserialize, Serialize};

/// Settings that shape one program run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Seed for `?` and `X`. Without one the generator is seeded from
    /// system entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RunConfig {
    /// Config with a fixed random seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}
