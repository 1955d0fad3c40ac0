use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Parameters for a synthetic scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of wallets to create.
    #[serde(default = "default_num_wallets")]
    pub num_wallets: usize,
    /// Number of attestations to generate.
    #[serde(default = "default_num_attestations")]
    pub num_attestations: usize,
    /// Fraction of wallets that are dishonest.
    #[serde(default = "default_dishonest_ratio")]
    pub dishonest_ratio: f64,
    /// Number of pinned, trusted wallets.
    #[serde(default = "default_num_trusted")]
    pub num_trusted: usize,
    /// Probability that an attestation corroborates an earlier one.
    #[serde(default = "default_meta_ratio")]
    pub meta_ratio: f64,
    /// RNG seed. Unset means a fresh seed per run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_num_wallets() -> usize {
    10
}
fn default_num_attestations() -> usize {
    100
}
fn default_dishonest_ratio() -> f64 {
    0.2
}
fn default_num_trusted() -> usize {
    1
}
fn default_meta_ratio() -> f64 {
    0.5
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_wallets: default_num_wallets(),
            num_attestations: default_num_attestations(),
            dishonest_ratio: default_dishonest_ratio(),
            num_trusted: default_num_trusted(),
            meta_ratio: default_meta_ratio(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Number of dishonest wallets implied by `dishonest_ratio`.
    pub fn num_dishonest(&self) -> usize {
        (self.num_wallets as f64 * self.dishonest_ratio).floor() as usize
    }

    /// Check the config before generating.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.num_wallets < 2 {
            return Err(SimError::InvalidConfig(
                "num_wallets must be at least 2".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.dishonest_ratio) {
            return Err(SimError::InvalidConfig(format!(
                "dishonest_ratio must be in [0.0, 1.0], got {}",
                self.dishonest_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.meta_ratio) {
            return Err(SimError::InvalidConfig(format!(
                "meta_ratio must be in [0.0, 1.0], got {}",
                self.meta_ratio
            )));
        }
        if self.num_dishonest() + self.num_trusted > self.num_wallets {
            return Err(SimError::InvalidConfig(format!(
                "{} dishonest and {} trusted wallets do not fit in {}",
                self.num_dishonest(),
                self.num_trusted,
                self.num_wallets
            )));
        }
        Ok(())
    }
}
