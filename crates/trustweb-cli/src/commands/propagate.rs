//! `trustweb propagate` — Propagate trust over a JSON input file.

use clap::Args;
use serde::Deserialize;
use std::path::PathBuf;

use trustweb_core::{Address, Attestation, Role};
use trustweb_engine::{calculate_trust, IdentityRegistry};

use crate::config::TrustwebConfig;

#[derive(Args, Debug)]
pub struct PropagateArgs {
    /// JSON file with `identities` and `attestations`.
    #[arg(short, long)]
    pub input: PathBuf,
}

#[derive(Debug, Deserialize)]
struct IdentityEntry {
    address: Address,
    role: Role,
}

#[derive(Debug, Deserialize)]
struct PropagationInput {
    identities: Vec<IdentityEntry>,
    attestations: Vec<Attestation>,
}

fn build_registry(
    identities: Vec<IdentityEntry>,
    claims: &[String],
) -> anyhow::Result<IdentityRegistry> {
    let mut registry = IdentityRegistry::with_claims(claims);
    for entry in identities {
        registry.register(entry.address, entry.role)?;
    }
    Ok(registry)
}

pub fn run(args: &PropagateArgs, config: TrustwebConfig) -> anyhow::Result<()> {
    config.engine.validate()?;

    let contents = std::fs::read_to_string(&args.input)?;
    let input: PropagationInput = serde_json::from_str(&contents)?;
    tracing::info!(
        path = %args.input.display(),
        identities = input.identities.len(),
        attestations = input.attestations.len(),
        "loaded propagation input"
    );

    let registry = build_registry(input.identities, &config.engine.predefined_claims)?;
    let outcome = calculate_trust(input.attestations, registry, &config.engine)?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
