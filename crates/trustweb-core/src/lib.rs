//! Trustweb Core — Fundamental types, errors, and configuration for the
//! Trustweb attestation trust engine.

pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{TrustError, TrustResult};
pub use types::{Address, Attestation, ClaimData, ClaimValue, Identity, Role, TrustVector};
