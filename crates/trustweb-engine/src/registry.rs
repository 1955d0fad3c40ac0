use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use trustweb_core::{Address, Identity, Role, TrustError, TrustResult};

/// Outcome of a registry trust write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustWrite {
    /// The value was stored.
    Applied,
    /// The address is pinned; the value was dropped.
    IgnoredPinned,
}

/// Mapping from address to role and per-claim trust vector.
///
/// Every identity carries a value for each claim in the vocabulary installed
/// by [`IdentityRegistry::seed`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityRegistry {
    claims: Vec<String>,
    identities: BTreeMap<Address, Identity>,
}

impl IdentityRegistry {
    /// Create an empty registry with no claim vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry for the given claim vocabulary.
    pub fn with_claims(claims: &[String]) -> Self {
        Self {
            claims: claims.to_vec(),
            identities: BTreeMap::new(),
        }
    }

    /// Register an identity, seeding its trust vector from its role.
    pub fn register(&mut self, address: impl Into<Address>, role: Role) -> TrustResult<()> {
        let address = address.into();
        if self.identities.contains_key(&address) {
            return Err(TrustError::DuplicateIdentity(address));
        }
        self.identities
            .insert(address, Identity::seeded(role, &self.claims));
        Ok(())
    }

    /// Install `claims` as the vocabulary and reset every trust vector.
    ///
    /// Trusted identities get 1.0 per claim, everyone else 0.0.
    pub fn seed(&mut self, claims: &[String]) {
        self.claims = claims.to_vec();
        for identity in self.identities.values_mut() {
            *identity = Identity::seeded(identity.role, &self.claims);
        }
    }

    /// Role of a registered identity.
    pub fn role(&self, address: &Address) -> TrustResult<Role> {
        self.get(address).map(|identity| identity.role)
    }

    /// Current trust of `address` in `claim`.
    pub fn get_trust(&self, address: &Address, claim: &str) -> TrustResult<f64> {
        self.get(address)?
            .calculated_trust
            .get(claim)
            .copied()
            .ok_or_else(|| unknown_claim(address, claim))
    }

    /// Store a new trust value for a non-pinned identity.
    ///
    /// Writes to trusted identities are dropped and reported as
    /// [`TrustWrite::IgnoredPinned`].
    pub fn set_trust(
        &mut self,
        address: &Address,
        claim: &str,
        value: f64,
    ) -> TrustResult<TrustWrite> {
        if !(0.0..=1.0).contains(&value) {
            return Err(TrustError::InvalidTrustValue(value));
        }

        let identity = self
            .identities
            .get_mut(address)
            .ok_or_else(|| TrustError::UnknownIdentity(address.clone()))?;

        let slot = identity
            .calculated_trust
            .get_mut(claim)
            .ok_or_else(|| unknown_claim(address, claim))?;

        if identity.role.is_pinned() {
            tracing::warn!(%address, claim, value, "ignoring trust write to pinned identity");
            return Ok(TrustWrite::IgnoredPinned);
        }

        *slot = value;
        Ok(TrustWrite::Applied)
    }

    /// Look up a registered identity.
    pub fn get(&self, address: &Address) -> TrustResult<&Identity> {
        self.identities
            .get(address)
            .ok_or_else(|| TrustError::UnknownIdentity(address.clone()))
    }

    /// Whether `address` is registered.
    pub fn contains(&self, address: &Address) -> bool {
        self.identities.contains_key(address)
    }

    /// Iterate identities in address order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Identity)> {
        self.identities.iter()
    }

    /// The installed claim vocabulary.
    pub fn claims(&self) -> &[String] {
        &self.claims
    }

    /// Number of registered identities.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

fn unknown_claim(address: &Address, claim: &str) -> TrustError {
    TrustError::MalformedAttestation(format!(
        "claim '{}' is not tracked for identity {}",
        claim, address
    ))
}
