//! Fixtures shared by the cross-crate trust propagation tests.

use trustweb_core::{Address, EngineConfig, Role};
use trustweb_engine::IdentityRegistry;
use trustweb_sim::{Scenario, SimulationConfig};

/// Tolerance for comparing two-decimal trust values.
pub const TOLERANCE: f64 = 1e-9;

/// Owned claim vocabulary.
pub fn claims(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Engine config for `names` with default limits.
pub fn engine_config(names: &[&str]) -> EngineConfig {
    EngineConfig::with_claims(claims(names))
}

/// Registry for `names` holding the given identities.
pub fn registry(names: &[&str], identities: &[(&str, Role)]) -> IdentityRegistry {
    let mut registry = IdentityRegistry::with_claims(&claims(names));
    for (address, role) in identities {
        registry
            .register(*address, *role)
            .expect("fixture identities are unique");
    }
    registry
}

/// Current trust of `address` in `claim`.
pub fn trust(registry: &IdentityRegistry, address: &str, claim: &str) -> f64 {
    registry
        .get_trust(&Address::new(address), claim)
        .expect("identity and claim are registered")
}

/// Assert two trust values are equal within [`TOLERANCE`].
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

/// Reproducible simulated scenario over the default vocabulary.
pub fn seeded_scenario(seed: u64, wallets: usize, attestations: usize) -> Scenario {
    let config = SimulationConfig {
        num_wallets: wallets,
        num_attestations: attestations,
        seed: Some(seed),
        ..Default::default()
    };
    Scenario::generate(&config, &EngineConfig::default().predefined_claims)
        .expect("valid simulation config")
}
