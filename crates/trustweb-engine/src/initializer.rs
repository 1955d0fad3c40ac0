use trustweb_core::{TrustResult, TrustVector};

use crate::registry::IdentityRegistry;
use crate::store::AttestationStore;

/// Seed registry vectors and attestation trust fields before round 1.
///
/// Every attester and recipient must already be registered, so identity
/// errors surface here rather than midway through a round.
pub fn initialize(
    store: &mut AttestationStore,
    registry: &mut IdentityRegistry,
    claims: &[String],
) -> TrustResult<()> {
    registry.seed(claims);

    for position in 0..store.len() {
        let attestation = &store.as_slice()[position];
        let key = attestation.claim_key()?.to_string();
        let claim = attestation.resolve_claim(claims)?;

        let attester_trust = if registry.role(&attestation.attester)?.is_pinned() {
            registry.get_trust(&attestation.attester, claim)?
        } else {
            0.0
        };

        let mut ti_recipient = TrustVector::new();
        if let Some(recipient) = &attestation.recipient {
            ti_recipient.insert(key.clone(), registry.get_trust(recipient, claim)?);
        }

        let attestation = store.get_index_mut(position);
        attestation.ta = 0.0;
        attestation.tc = TrustVector::from([(key.clone(), 0.0)]);
        attestation.ti_attester = TrustVector::from([(key, attester_trust)]);
        attestation.ti_recipient = ti_recipient;
    }

    tracing::debug!(
        attestations = store.len(),
        identities = registry.len(),
        "trust state initialized"
    );
    Ok(())
}
