//! Seed configuration
//!
//! The default seed is the only process-wide setting in the crate. It is read at
//! construction time by initialisers that were not handed a generator, and is never
//! mutated afterwards.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{MlpError, Result};
use crate::rng;

/// Seed used for every generator the caller did not supply
pub const DEFAULT_SEED: u64 = 123456;

/// Environment variable consulted by [`InitConfig::from_env`]
pub const SEED_ENV_VAR: &str = "MLP_SEED";

/// Startup configuration for parameter initialisation.
///
/// Embeddable in a larger experiment configuration; missing fields fall back to
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitConfig {
    pub seed: u64,
}

impl Default for InitConfig {
    fn default() -> Self {
        InitConfig { seed: DEFAULT_SEED }
    }
}

impl InitConfig {
    /// Create a configuration with an explicit seed
    pub fn with_seed(seed: u64) -> Self {
        InitConfig { seed }
    }

    /// Build the configuration from `MLP_SEED`, falling back to [`DEFAULT_SEED`] when unset
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var))
    }

    /// Build the configuration from a variable lookup shaped like [`std::env::var`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: FnOnce(&str) -> std::result::Result<String, std::env::VarError>,
    {
        match lookup(SEED_ENV_VAR) {
            Ok(raw) => Self::parse_seed(&raw).map(Self::with_seed).inspect_err(|err| {
                tracing::warn!(var = SEED_ENV_VAR, %raw, %err, "rejecting seed override");
            }),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(err) => Err(MlpError::Config(format!("{SEED_ENV_VAR}: {err}"))),
        }
    }

    /// Parse a seed override as an unsigned 64-bit integer
    pub fn parse_seed(raw: &str) -> Result<u64> {
        raw.trim()
            .parse::<u64>()
            .map_err(|err| MlpError::Config(format!("seed `{raw}` is not a u64: {err}")))
    }

    /// A fresh generator seeded from this configuration
    pub fn rng(&self) -> StdRng {
        rng::seeded_rng(self.seed)
    }
}
