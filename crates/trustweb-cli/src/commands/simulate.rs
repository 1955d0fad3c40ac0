//! `trustweb simulate` — Generate a scenario and propagate trust over it.

use clap::Args;

use trustweb_sim::{summarize, Scenario};

use super::ScenarioArgs;
use crate::config::TrustwebConfig;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Print the full outcome as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &SimulateArgs, mut config: TrustwebConfig) -> anyhow::Result<()> {
    args.scenario.apply(&mut config);
    config.validate()?;

    let scenario = Scenario::generate(&config.simulation, &config.engine.predefined_claims)?;
    let outcome = scenario.propagate(&config.engine)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "Propagated {} attestations over {} identities",
        outcome.attestations.len(),
        outcome.registry.len()
    );
    println!(
        "  Rounds:    {} ({})",
        outcome.report.rounds,
        if outcome.report.converged {
            "converged"
        } else {
            "round budget exhausted"
        }
    );

    println!();
    for (address, identity) in outcome.registry.iter() {
        print!("  {:<12} {:<10}", address.to_string(), identity.role.to_string());
        for (claim, trust) in &identity.calculated_trust {
            print!(" {}={:.2}", claim, trust);
        }
        println!();
    }

    println!();
    for summary in summarize(&outcome.registry) {
        print!("  mean {:<10} ({:>3})", summary.role.to_string(), summary.identities);
        for (claim, trust) in &summary.mean_trust {
            print!(" {}={:.2}", claim, trust);
        }
        println!();
    }

    Ok(())
}
