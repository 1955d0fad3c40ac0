use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{TrustError, TrustResult};

/// Wallet address identifying a participant in the attestation graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    /// Create a new address.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Get the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Role of an identity in the registry.
///
/// `Trusted` identities are pinned: their trust vector is fixed at 1.0 for
/// every claim and propagation never overwrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Trusted,
    Honest,
    Dishonest,
}

impl Role {
    /// Whether identities with this role are immune to propagation updates.
    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::Trusted)
    }

    /// Trust value every claim is seeded with before the first round.
    pub fn seed_trust(&self) -> f64 {
        match self {
            Self::Trusted => 1.0,
            Self::Honest | Self::Dishonest => 0.0,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trusted => write!(f, "trusted"),
            Self::Honest => write!(f, "honest"),
            Self::Dishonest => write!(f, "dishonest"),
        }
    }
}

/// Claim name → claim value. Ordered so "first key" is well defined.
pub type ClaimData = BTreeMap<String, ClaimValue>;

/// Claim name → trust value in `[0.0, 1.0]`.
pub type TrustVector = BTreeMap<String, f64>;

/// Value of a claim carried by an attestation.
///
/// A meta-attestation carries the corroborated attestation's whole `data`
/// as a `Nested` value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Boolean(bool),
    Integer(i64),
    Text(String),
    Nested(ClaimData),
}

impl fmt::Display for ClaimValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Text(s) => write!(f, "{}", s),
            Self::Nested(data) => {
                write!(f, "{{")?;
                for (i, (name, value)) in data.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", name, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// A single signed statement by `attester`, either about `recipient`
/// (direct) or about a prior attestation referenced by `is_true` (meta).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attestation {
    /// Unique, strictly increasing identifier.
    pub uid: u64,
    /// Creation time. Informational only.
    pub timestamp: DateTime<Utc>,
    /// Identity making the statement.
    pub attester: Address,
    /// Subject of a direct attestation; `None` for meta-attestations.
    pub recipient: Option<Address>,
    /// Exactly one claim.
    pub data: ClaimData,
    /// Uid of the attestation this one corroborates.
    pub is_true: Option<u64>,
    /// Attestation trust.
    #[serde(default)]
    pub ta: f64,
    /// Claim trust, keyed by the data key.
    #[serde(default)]
    pub tc: TrustVector,
    /// Attester's trust in the claim, refreshed every round.
    #[serde(default)]
    pub ti_attester: TrustVector,
    /// Identity trust computed for the recipient. Empty for meta-attestations.
    #[serde(default)]
    pub ti_recipient: TrustVector,
}

impl Attestation {
    /// Create a direct attestation making one claim about `recipient`.
    pub fn direct(
        uid: u64,
        attester: impl Into<Address>,
        recipient: impl Into<Address>,
        claim: impl Into<String>,
        value: ClaimValue,
    ) -> Self {
        let mut data = ClaimData::new();
        data.insert(claim.into(), value);
        Self::with_fields(uid, attester.into(), Some(recipient.into()), data, None)
    }

    /// Create a meta-attestation corroborating `target`.
    ///
    /// The payload is keyed by the target's uid and carries its data.
    pub fn meta(uid: u64, attester: impl Into<Address>, target: &Attestation) -> Self {
        let mut data = ClaimData::new();
        data.insert(
            target.uid.to_string(),
            ClaimValue::Nested(target.data.clone()),
        );
        Self::with_fields(uid, attester.into(), None, data, Some(target.uid))
    }

    fn with_fields(
        uid: u64,
        attester: Address,
        recipient: Option<Address>,
        data: ClaimData,
        is_true: Option<u64>,
    ) -> Self {
        Self {
            uid,
            timestamp: Utc::now(),
            attester,
            recipient,
            data,
            is_true,
            ta: 0.0,
            tc: TrustVector::new(),
            ti_attester: TrustVector::new(),
            ti_recipient: TrustVector::new(),
        }
    }

    /// Set the timestamp.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Whether this attestation corroborates another attestation.
    pub fn is_meta(&self) -> bool {
        self.is_true.is_some()
    }

    /// The single key of `data`.
    pub fn claim_key(&self) -> TrustResult<&str> {
        let mut keys = self.data.keys();
        match (keys.next(), keys.next()) {
            (Some(key), None) => Ok(key.as_str()),
            (None, _) => Err(TrustError::MalformedAttestation(format!(
                "attestation {} carries no claim",
                self.uid
            ))),
            (Some(_), Some(_)) => Err(TrustError::MalformedAttestation(format!(
                "attestation {} carries {} claims, expected one",
                self.uid,
                self.data.len()
            ))),
        }
    }

    /// Resolve the registry claim this attestation is scored against.
    ///
    /// A key in `vocabulary` resolves to itself. Any other key must hold a
    /// nested payload, and resolves to the payload's first claim name.
    pub fn resolve_claim<'a>(&'a self, vocabulary: &[String]) -> TrustResult<&'a str> {
        let key = self.claim_key()?;
        if vocabulary.iter().any(|c| c == key) {
            return Ok(key);
        }
        match self.data.get(key) {
            Some(ClaimValue::Nested(payload)) => payload
                .keys()
                .next()
                .map(String::as_str)
                .ok_or_else(|| {
                    TrustError::MalformedAttestation(format!(
                        "attestation {} has an empty nested payload",
                        self.uid
                    ))
                }),
            _ => Err(TrustError::MalformedAttestation(format!(
                "attestation {} claim '{}' is not in the claim vocabulary",
                self.uid, key
            ))),
        }
    }
}

/// Registry entry for one address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub role: Role,
    /// Per-claim reputation.
    pub calculated_trust: TrustVector,
}

impl Identity {
    /// Create an identity seeded for `claims` according to its role.
    pub fn seeded(role: Role, claims: &[String]) -> Self {
        let seed = role.seed_trust();
        Self {
            role,
            calculated_trust: claims.iter().map(|c| (c.clone(), seed)).collect(),
        }
    }
}
