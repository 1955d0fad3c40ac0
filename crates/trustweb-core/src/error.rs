use crate::types::Address;

/// Trust engine errors.
#[derive(Debug, thiserror::Error)]
pub enum TrustError {
    #[error("malformed attestation: {0}")]
    MalformedAttestation(String),

    #[error("unknown identity: {0}")]
    UnknownIdentity(Address),

    #[error("convergence key mismatch: attestation {uid} has claim '{claim}' missing from the previous round")]
    ConvergenceKeyMismatch { uid: u64, claim: String },

    #[error("duplicate identity: {0}")]
    DuplicateIdentity(Address),

    #[error("invalid trust value: {0} (must be between 0.0 and 1.0)")]
    InvalidTrustValue(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type TrustResult<T> = Result<T, TrustError>;
