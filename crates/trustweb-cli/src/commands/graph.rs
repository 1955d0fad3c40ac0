//! `trustweb graph` — Print the trust graph of a scenario for one claim.

use clap::Args;

use trustweb_engine::{AttestationStore, PropagationEngine, TrustGraphView};
use trustweb_sim::Scenario;

use super::ScenarioArgs;
use crate::config::TrustwebConfig;

#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Claim to render.
    #[arg(long)]
    pub claim: String,

    #[command(flatten)]
    pub scenario: ScenarioArgs,
}

pub fn run(args: &GraphArgs, mut config: TrustwebConfig) -> anyhow::Result<()> {
    args.scenario.apply(&mut config);
    config.validate()?;

    let claims = &config.engine.predefined_claims;
    if !claims.iter().any(|c| c == &args.claim) {
        anyhow::bail!(
            "claim '{}' is not in the vocabulary ({})",
            args.claim,
            claims.join(", ")
        );
    }

    let scenario = Scenario::generate(&config.simulation, claims)?;
    let mut registry = scenario.registry(claims)?;
    let mut store = AttestationStore::from_attestations(scenario.attestations)?;

    let engine = PropagationEngine::new(config.engine.clone())?;
    let report = engine.run(&mut store, &mut registry)?;
    tracing::info!(rounds = report.rounds, converged = report.converged, "propagation finished");

    let view = TrustGraphView::for_claim(&store, &registry, &args.claim)?;
    println!("{}", view.to_json()?);
    Ok(())
}
