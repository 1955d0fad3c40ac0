use std::collections::HashMap;

use trustweb_core::{Address, Attestation, ClaimData, ClaimValue, TrustError, TrustResult};

/// Ordered collection of attestations with backlink and subject indexes.
///
/// Insertion order is the processing order of the propagation engine.
/// Structural fields are validated on insertion and never change afterwards;
/// only the trust fields are mutated, and only from inside this crate.
#[derive(Debug, Clone, Default)]
pub struct AttestationStore {
    attestations: Vec<Attestation>,
    /// uid -> position.
    positions: HashMap<u64, usize>,
    /// Corroborated uid -> positions of meta-attestations pointing at it.
    by_is_true: HashMap<u64, Vec<usize>>,
    /// Recipient -> claim data -> positions of direct attestations.
    by_subject: HashMap<Address, HashMap<ClaimData, Vec<usize>>>,
}

impl AttestationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from attestations in processing order.
    pub fn from_attestations(attestations: Vec<Attestation>) -> TrustResult<Self> {
        let mut store = Self::new();
        for attestation in attestations {
            store.push(attestation)?;
        }
        Ok(store)
    }

    /// Append an attestation after checking its structure.
    pub fn push(&mut self, attestation: Attestation) -> TrustResult<()> {
        self.validate(&attestation)?;

        let position = self.attestations.len();
        self.positions.insert(attestation.uid, position);
        if let Some(target) = attestation.is_true {
            self.by_is_true.entry(target).or_default().push(position);
        }
        if let Some(recipient) = &attestation.recipient {
            self.by_subject
                .entry(recipient.clone())
                .or_default()
                .entry(attestation.data.clone())
                .or_default()
                .push(position);
        }
        self.attestations.push(attestation);
        Ok(())
    }

    fn validate(&self, attestation: &Attestation) -> TrustResult<()> {
        let uid = attestation.uid;
        if let Some(last) = self.attestations.last() {
            if uid <= last.uid {
                return Err(TrustError::MalformedAttestation(format!(
                    "uid {} does not follow uid {}",
                    uid, last.uid
                )));
            }
        }
        let key = attestation.claim_key()?;

        match (&attestation.recipient, attestation.is_true) {
            (Some(_), None) => Ok(()),
            (None, None) => Err(TrustError::MalformedAttestation(format!(
                "direct attestation {} has no recipient",
                uid
            ))),
            (Some(_), Some(_)) => Err(TrustError::MalformedAttestation(format!(
                "meta-attestation {} must not carry a recipient",
                uid
            ))),
            (None, Some(target_uid)) => {
                let target = self.get(target_uid).ok_or_else(|| {
                    TrustError::MalformedAttestation(format!(
                        "meta-attestation {} references unknown attestation {}",
                        uid, target_uid
                    ))
                })?;
                if target.is_meta() {
                    return Err(TrustError::MalformedAttestation(format!(
                        "meta-attestation {} targets meta-attestation {}; nesting is limited to one level",
                        uid, target_uid
                    )));
                }
                let expected = ClaimValue::Nested(target.data.clone());
                if key != target_uid.to_string() || attestation.data.get(key) != Some(&expected) {
                    return Err(TrustError::MalformedAttestation(format!(
                        "meta-attestation {} payload does not match attestation {}",
                        uid, target_uid
                    )));
                }
                Ok(())
            }
        }
    }

    /// Meta-attestations corroborating `uid`, in store order.
    pub fn linked_by_is_true(&self, uid: u64) -> impl Iterator<Item = &Attestation> + '_ {
        self.by_is_true
            .get(&uid)
            .into_iter()
            .flatten()
            .map(move |&position| &self.attestations[position])
    }

    /// Direct attestations about `recipient` carrying exactly `data`, in
    /// store order. Includes the querying attestation itself.
    pub fn linked_by_identity_and_claim<'a>(
        &'a self,
        recipient: &Address,
        data: &ClaimData,
    ) -> impl Iterator<Item = &'a Attestation> + 'a {
        self.by_subject
            .get(recipient)
            .and_then(|claims| claims.get(data))
            .into_iter()
            .flatten()
            .map(move |&position| &self.attestations[position])
    }

    /// Look up an attestation by uid.
    pub fn get(&self, uid: u64) -> Option<&Attestation> {
        self.positions
            .get(&uid)
            .map(|&position| &self.attestations[position])
    }

    pub(crate) fn get_index_mut(&mut self, position: usize) -> &mut Attestation {
        &mut self.attestations[position]
    }

    /// Iterate attestations in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attestation> {
        self.attestations.iter()
    }

    /// All attestations in store order.
    pub fn as_slice(&self) -> &[Attestation] {
        &self.attestations
    }

    /// Deep copy of every attestation, for round-to-round comparison.
    pub fn snapshot(&self) -> Vec<Attestation> {
        self.attestations.clone()
    }

    /// Consume the store, returning the attestations in store order.
    pub fn into_vec(self) -> Vec<Attestation> {
        self.attestations
    }

    /// Number of attestations.
    pub fn len(&self) -> usize {
        self.attestations.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.attestations.is_empty()
    }
}
