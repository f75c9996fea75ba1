//! Sampler configuration.

use hg_types::{config_error, HgResult};
use serde::{Deserialize, Serialize};

pub const SEED_ENV: &str = "HYPERGRID_SEED";
pub const BATCH_SIZE_ENV: &str = "HYPERGRID_BATCH_SIZE";

/// Settings for a sampling session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Seed for the session's generator. Without one the generator is
    /// seeded from OS entropy and runs are not reproducible.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Points suggested per request.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_batch_size() -> usize {
    1
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            batch_size: default_batch_size(),
        }
    }
}

impl SamplerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Reads `HYPERGRID_SEED` and `HYPERGRID_BATCH_SIZE`, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> HgResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> HgResult<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(SEED_ENV) {
            let seed = raw
                .trim()
                .parse()
                .map_err(|e| config_error!("{SEED_ENV}={raw:?} is not a valid seed: {e}"))?;
            config.seed = Some(seed);
        }
        if let Some(raw) = lookup(BATCH_SIZE_ENV) {
            let batch_size: usize = raw
                .trim()
                .parse()
                .map_err(|e| config_error!("{BATCH_SIZE_ENV}={raw:?} is not a valid batch size: {e}"))?;
            if batch_size == 0 {
                return Err(config_error!("{BATCH_SIZE_ENV} must be at least 1"));
            }
            config.batch_size = batch_size;
        }
        Ok(config)
    }
}
