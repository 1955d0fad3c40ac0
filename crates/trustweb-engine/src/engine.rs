use serde::Serialize;
use std::collections::HashSet;

use trustweb_core::{Address, Attestation, EngineConfig, TrustError, TrustResult};

use crate::convergence::max_delta;
use crate::initializer::initialize;
use crate::registry::IdentityRegistry;
use crate::scoring::{attestation_trust, claim_trust, corroboration_utility, identity_trust};
use crate::store::AttestationStore;

/// Summary of a propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropagationReport {
    /// Rounds actually executed.
    pub rounds: usize,
    /// Whether the last round moved every value by less than the threshold.
    pub converged: bool,
}

/// Final state of a propagation run.
#[derive(Debug, Clone, Serialize)]
pub struct TrustOutcome {
    pub attestations: Vec<Attestation>,
    pub registry: IdentityRegistry,
    pub report: PropagationReport,
}

/// Fixed-point trust relaxation over an attestation store.
///
/// Rounds walk the store in order and update each attestation in place:
/// attester trust, then attestation trust (`ta`), claim trust (`tc`) and
/// finally the recipient's identity trust, which is written straight back
/// to the registry. Later attestations in a round see the writes of earlier
/// ones (Gauss-Seidel), so store order matters for intermediate states.
#[derive(Debug, Clone)]
pub struct PropagationEngine {
    config: EngineConfig,
}

impl PropagationEngine {
    /// Create an engine after validating `config`.
    pub fn new(config: EngineConfig) -> TrustResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed the trust state, then relax until convergence or until the
    /// round budget runs out.
    ///
    /// Running out of rounds is not an error; the report says whether the
    /// state converged.
    pub fn run(
        &self,
        store: &mut AttestationStore,
        registry: &mut IdentityRegistry,
    ) -> TrustResult<PropagationReport> {
        initialize(store, registry, &self.config.predefined_claims)?;

        for round in 1..=self.config.num_rounds {
            let previous = store.snapshot();
            self.run_round(store, registry)?;

            let delta = max_delta(&previous, store.as_slice())?;
            tracing::debug!(round, max_delta = delta, "trust propagation round complete");

            if delta < self.config.convergence_threshold {
                tracing::info!(rounds = round, "trust propagation converged");
                return Ok(PropagationReport {
                    rounds: round,
                    converged: true,
                });
            }
        }

        tracing::warn!(
            rounds = self.config.num_rounds,
            threshold = self.config.convergence_threshold,
            "trust propagation did not converge"
        );
        Ok(PropagationReport {
            rounds: self.config.num_rounds,
            converged: false,
        })
    }

    /// Run a single round over every attestation in store order.
    ///
    /// Expects state seeded by [`initialize`]; an error aborts the round.
    pub fn run_round(
        &self,
        store: &mut AttestationStore,
        registry: &mut IdentityRegistry,
    ) -> TrustResult<()> {
        for position in 0..store.len() {
            self.update_attestation(store, registry, position)?;
        }
        Ok(())
    }

    fn update_attestation(
        &self,
        store: &mut AttestationStore,
        registry: &mut IdentityRegistry,
        position: usize,
    ) -> TrustResult<()> {
        let attestation = &store.as_slice()[position];
        let uid = attestation.uid;
        let key = attestation.claim_key()?.to_string();
        let claim = attestation
            .resolve_claim(&self.config.predefined_claims)?
            .to_string();

        let attester_trust = registry.get_trust(&attestation.attester, &claim)?;
        let ta = attestation_trust(attester_trust, self.config.noise_threshold);

        let (corroborations, corroborating_ta) = store
            .linked_by_is_true(uid)
            .fold((0_usize, 0.0_f64), |(count, sum), meta| {
                (count + 1, sum + meta.ta)
            });
        let tc = claim_trust(ta + corroborating_ta, corroborations + 1);

        let identity_update = match &attestation.recipient {
            Some(recipient) => {
                let ti = self.recipient_trust(store, attestation, recipient, &key, tc)?;
                Some((recipient.clone(), ti))
            }
            None => None,
        };

        let attestation = store.get_index_mut(position);
        attestation.ti_attester.insert(key.clone(), attester_trust);
        attestation.ta = ta;
        attestation.tc.insert(key.clone(), tc);

        if let Some((recipient, ti)) = identity_update {
            attestation.ti_recipient.insert(key, ti);
            if !registry.role(&recipient)?.is_pinned() {
                registry.set_trust(&recipient, &claim, ti)?;
            }
        }
        Ok(())
    }

    /// Identity trust for the recipient of a direct attestation, from the
    /// claim trust of every attestation making the identical claim about it.
    fn recipient_trust(
        &self,
        store: &AttestationStore,
        attestation: &Attestation,
        recipient: &Address,
        key: &str,
        tc: f64,
    ) -> TrustResult<f64> {
        let mut claim_trust_sum = tc;
        let mut corroborators = 0;
        let mut attesters = HashSet::new();

        for peer in store
            .linked_by_identity_and_claim(recipient, &attestation.data)
            .filter(|peer| peer.uid != attestation.uid)
        {
            claim_trust_sum += peer.tc.get(key).copied().ok_or_else(|| {
                TrustError::MalformedAttestation(format!(
                    "attestation {} has no claim trust for '{}'",
                    peer.uid, key
                ))
            })?;
            corroborators += 1;
            attesters.insert(&peer.attester);
        }

        Ok(identity_trust(corroboration_utility(
            claim_trust_sum,
            corroborators,
            attesters.len(),
        )))
    }
}

/// Run a full propagation over owned inputs and hand back the final state.
pub fn calculate_trust(
    attestations: Vec<Attestation>,
    mut registry: IdentityRegistry,
    config: &EngineConfig,
) -> TrustResult<TrustOutcome> {
    let engine = PropagationEngine::new(config.clone())?;
    let mut store = AttestationStore::from_attestations(attestations)?;
    let report = engine.run(&mut store, &mut registry)?;
    Ok(TrustOutcome {
        attestations: store.into_vec(),
        registry,
        report,
    })
}
