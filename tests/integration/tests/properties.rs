//! Integration test: invariants that hold for any attestation web.
//!
//! Runs the engine round by round over simulated scenarios and checks
//! pinning, value bounds, corroboration and fixed-point stability.

use trustweb_core::{Attestation, ClaimValue, EngineConfig, Role};
use trustweb_engine::{
    calculate_trust, check_convergence, initialize, AttestationStore, IdentityRegistry,
    PropagationEngine,
};
use trustweb_integration_tests::{assert_close, engine_config, registry, seeded_scenario};

fn stepwise_engine(
    seed: u64,
) -> (PropagationEngine, AttestationStore, IdentityRegistry, Vec<String>) {
    let scenario = seeded_scenario(seed, 12, 80);
    let config = EngineConfig::default();
    let claims = config.predefined_claims.clone();
    let mut registry = scenario.registry(&claims).unwrap();
    let mut store = AttestationStore::from_attestations(scenario.attestations).unwrap();
    initialize(&mut store, &mut registry, &claims).unwrap();
    (PropagationEngine::new(config).unwrap(), store, registry, claims)
}

#[test]
fn test_trusted_identities_stay_pinned_every_round() {
    let (engine, mut store, mut registry, claims) = stepwise_engine(101);
    let trusted: Vec<_> = registry
        .iter()
        .filter(|(_, identity)| identity.role == Role::Trusted)
        .map(|(address, _)| address.clone())
        .collect();
    assert!(!trusted.is_empty());

    for _ in 0..10 {
        engine.run_round(&mut store, &mut registry).unwrap();
        for address in &trusted {
            for claim in &claims {
                assert_close(registry.get_trust(address, claim).unwrap(), 1.0);
            }
        }
    }
}

#[test]
fn test_trust_values_stay_bounded() {
    let (engine, mut store, mut registry, _) = stepwise_engine(202);

    for _ in 0..10 {
        engine.run_round(&mut store, &mut registry).unwrap();
        for attestation in store.iter() {
            assert!((0.0..=1.0).contains(&attestation.ta), "ta {}", attestation.ta);
            for tc in attestation.tc.values() {
                assert!((0.0..=1.0).contains(tc), "tc {tc}");
            }
            for ti in attestation.ti_recipient.values() {
                assert!((0.5..=1.0).contains(ti), "ti {ti}");
            }
            if attestation.is_meta() {
                assert!(attestation.ti_recipient.is_empty());
            }
        }
        for (_, identity) in registry.iter() {
            for trust in identity.calculated_trust.values() {
                assert!((0.0..=1.0).contains(trust));
            }
        }
    }
}

#[test]
fn test_corroboration_never_lowers_claim_trust() {
    let claims = ["is_human"];
    let identities = [
        ("t", Role::Trusted),
        ("h", Role::Honest),
        ("b", Role::Honest),
        ("c", Role::Honest),
    ];
    let target = Attestation::direct(1, "t", "b", "is_human", ClaimValue::Boolean(true));
    let base = vec![
        target.clone(),
        Attestation::direct(2, "t", "h", "is_human", ClaimValue::Boolean(true)),
    ];

    let mut corroborated = base.clone();
    corroborated.push(Attestation::meta(3, "h", &target));
    let mut doubly = corroborated.clone();
    doubly.push(Attestation::meta(4, "c", &target));

    let tc_of = |attestations: Vec<Attestation>| {
        let outcome = calculate_trust(
            attestations,
            registry(&claims, &identities),
            &engine_config(&claims),
        )
        .unwrap();
        outcome.attestations[0].tc["is_human"]
    };

    let alone = tc_of(base);
    let once = tc_of(corroborated);
    let twice = tc_of(doubly);
    assert!(once >= alone, "{once} < {alone}");
    assert!(twice >= once, "{twice} < {once}");
    assert!(twice > alone);
}

#[test]
fn test_converged_state_is_a_fixed_point() {
    let (engine, mut store, mut registry, _) = stepwise_engine(303);
    let threshold = engine.config().convergence_threshold;

    let mut converged = false;
    for _ in 0..engine.config().num_rounds {
        let previous = store.snapshot();
        engine.run_round(&mut store, &mut registry).unwrap();
        if check_convergence(&previous, store.as_slice(), threshold).unwrap() {
            converged = true;
            break;
        }
    }
    assert!(converged);

    let settled = store.snapshot();
    engine.run_round(&mut store, &mut registry).unwrap();
    assert!(check_convergence(&settled, store.as_slice(), threshold).unwrap());
}
