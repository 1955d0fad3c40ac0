//! Trustweb Simulation
//!
//! Fabricates synthetic inputs for the trust engine:
//! - Wallets with roles and ground-truth attributes
//! - Direct attestations, truthful for honest attesters and random for
//!   dishonest ones
//! - Meta-attestations corroborating earlier direct attestations
//! - Per-role summaries of the propagated registry

pub mod config;
pub mod error;
pub mod generator;
pub mod summary;
pub mod wallet;

pub use config::SimulationConfig;
pub use error::SimError;
pub use generator::{generate_attestations, Scenario};
pub use summary::{summarize, RoleSummary};
pub use wallet::{generate_wallets, Wallet, Wallets};
