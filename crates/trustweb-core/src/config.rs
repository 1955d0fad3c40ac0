use serde::{Deserialize, Serialize};

use crate::error::{TrustError, TrustResult};

/// Configuration for a propagation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fixed claim vocabulary every identity carries a trust value for.
    #[serde(default = "default_predefined_claims")]
    pub predefined_claims: Vec<String>,
    /// Upper bound on relaxation rounds.
    #[serde(default = "default_num_rounds")]
    pub num_rounds: usize,
    /// Stop once every tracked value moves less than this between rounds.
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,
    /// Attester trust at or below this yields zero attestation trust.
    #[serde(default = "default_noise_threshold")]
    pub noise_threshold: f64,
}

fn default_predefined_claims() -> Vec<String> {
    vec![
        "is_human".into(),
        "is_bot".into(),
        "creditworthiness".into(),
    ]
}
fn default_num_rounds() -> usize {
    100
}
fn default_convergence_threshold() -> f64 {
    0.01
}
fn default_noise_threshold() -> f64 {
    0.01
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            predefined_claims: default_predefined_claims(),
            num_rounds: default_num_rounds(),
            convergence_threshold: default_convergence_threshold(),
            noise_threshold: default_noise_threshold(),
        }
    }
}

impl EngineConfig {
    /// Create a config for the given claim vocabulary with default limits.
    pub fn with_claims<I, S>(claims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            predefined_claims: claims.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Check the config before a run.
    pub fn validate(&self) -> TrustResult<()> {
        if self.predefined_claims.is_empty() {
            return Err(TrustError::InvalidConfig(
                "predefined_claims must not be empty".into(),
            ));
        }
        if self.num_rounds == 0 {
            return Err(TrustError::InvalidConfig(
                "num_rounds must be at least 1".into(),
            ));
        }
        if self.convergence_threshold.is_nan() || self.convergence_threshold <= 0.0 {
            return Err(TrustError::InvalidConfig(format!(
                "convergence_threshold must be positive, got {}",
                self.convergence_threshold
            )));
        }
        if !(0.0..1.0).contains(&self.noise_threshold) {
            return Err(TrustError::InvalidConfig(format!(
                "noise_threshold must be in [0.0, 1.0), got {}",
                self.noise_threshold
            )));
        }
        Ok(())
    }
}
