pub mod graph;
pub mod init;
pub mod propagate;
pub mod simulate;

use clap::Args;

use crate::config::TrustwebConfig;

/// Scenario overrides shared by the commands that generate data.
#[derive(Args, Debug, Default)]
pub struct ScenarioArgs {
    /// RNG seed for a reproducible scenario.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the number of wallets.
    #[arg(long)]
    pub wallets: Option<usize>,

    /// Override the number of attestations.
    #[arg(long)]
    pub attestations: Option<usize>,
}

impl ScenarioArgs {
    /// Apply the overrides on top of the loaded config.
    pub fn apply(&self, config: &mut TrustwebConfig) {
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(wallets) = self.wallets {
            config.simulation.num_wallets = wallets;
        }
        if let Some(attestations) = self.attestations {
            config.simulation.num_attestations = attestations;
        }
    }
}
