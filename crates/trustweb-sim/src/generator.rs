use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use trustweb_core::{Attestation, EngineConfig};
use trustweb_engine::{calculate_trust, IdentityRegistry, TrustOutcome};

use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::wallet::{generate_wallets, random_value, Wallet, Wallets};

/// Append `config.num_attestations` synthetic attestations to `existing`.
///
/// Uids continue after the last existing uid. With probability
/// `meta_ratio` an attester corroborates an earlier direct attestation
/// instead of making a new claim. Truthful attesters only corroborate
/// statements that match the recipient's ground truth; dishonest ones
/// corroborate anything.
pub fn generate_attestations<R: Rng + ?Sized>(
    wallets: &Wallets,
    claims: &[String],
    config: &SimulationConfig,
    rng: &mut R,
    existing: Vec<Attestation>,
) -> Result<Vec<Attestation>, SimError> {
    config.validate()?;
    if wallets.len() < 2 {
        return Err(SimError::InvalidConfig(
            "at least two wallets are needed to attest".into(),
        ));
    }
    if claims.is_empty() {
        return Err(SimError::InvalidConfig("claim vocabulary is empty".into()));
    }

    let mut attestations = existing;
    let mut next_uid = attestations.last().map_or(1, |a| a.uid + 1);
    let mut direct: Vec<usize> = attestations
        .iter()
        .enumerate()
        .filter(|(_, a)| !a.is_meta())
        .map(|(i, _)| i)
        .collect();
    let pool = wallets.as_slice();

    for _ in 0..config.num_attestations {
        let attester_idx = rng.gen_range(0..pool.len());
        let attester = &pool[attester_idx];

        if rng.gen_bool(config.meta_ratio) {
            if let Some(&target_idx) = direct.choose(rng) {
                let target = &attestations[target_idx];
                if target.attester != attester.address && endorses(attester, target, wallets) {
                    let meta = Attestation::meta(next_uid, attester.address.clone(), target);
                    attestations.push(meta);
                    next_uid += 1;
                    continue;
                }
            }
        }

        let mut recipient_idx = rng.gen_range(0..pool.len() - 1);
        if recipient_idx >= attester_idx {
            recipient_idx += 1;
        }
        let recipient = &pool[recipient_idx];

        let claim = claims[rng.gen_range(0..claims.len())].as_str();
        let value = match recipient.fact(claim) {
            Some(fact) if attester.is_truthful() => fact.clone(),
            _ => random_value(claim, rng),
        };

        direct.push(attestations.len());
        attestations.push(Attestation::direct(
            next_uid,
            attester.address.clone(),
            recipient.address.clone(),
            claim,
            value,
        ));
        next_uid += 1;
    }

    tracing::debug!(
        total = attestations.len(),
        direct = direct.len(),
        "generated attestations"
    );
    Ok(attestations)
}

/// Whether `attester` is willing to corroborate `target`.
fn endorses(attester: &Wallet, target: &Attestation, wallets: &Wallets) -> bool {
    if !attester.is_truthful() {
        return true;
    }
    let Some(recipient) = target.recipient.as_ref().and_then(|r| wallets.get(r)) else {
        return false;
    };
    target
        .data
        .iter()
        .all(|(claim, value)| recipient.fact(claim) == Some(value))
}

/// A generated population together with its attestations.
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub wallets: Wallets,
    pub attestations: Vec<Attestation>,
}

impl Scenario {
    /// Generate wallets and attestations for `claims`.
    ///
    /// A configured seed makes the scenario reproducible.
    pub fn generate(config: &SimulationConfig, claims: &[String]) -> Result<Self, SimError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let wallets = generate_wallets(config, &mut rng);
        let attestations = generate_attestations(&wallets, claims, config, &mut rng, Vec::new())?;

        tracing::info!(
            wallets = wallets.len(),
            attestations = attestations.len(),
            seed = ?config.seed,
            "generated scenario"
        );
        Ok(Self {
            wallets,
            attestations,
        })
    }

    /// Fresh registry holding every wallet.
    pub fn registry(&self, claims: &[String]) -> Result<IdentityRegistry, SimError> {
        Ok(self.wallets.to_registry(claims)?)
    }

    /// Run the trust engine over the scenario.
    pub fn propagate(self, config: &EngineConfig) -> Result<TrustOutcome, SimError> {
        let registry = self.registry(&config.predefined_claims)?;
        Ok(calculate_trust(self.attestations, registry, config)?)
    }
}
