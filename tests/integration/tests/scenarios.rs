//! Integration test: hand-built attestation webs with known outcomes.

use trustweb_core::{Attestation, ClaimValue, Role, TrustError};
use trustweb_engine::{calculate_trust, initialize, AttestationStore, PropagationEngine};
use trustweb_integration_tests::{assert_close, engine_config, registry, trust};

fn is_safe(uid: u64, attester: &str, recipient: &str) -> Attestation {
    Attestation::direct(uid, attester, recipient, "is_safe", ClaimValue::Boolean(true))
}

// =========================================================================
// Single trusted attestation
// =========================================================================

#[test]
fn test_trusted_attests_honest_first_round() {
    let config = engine_config(&["is_safe"]);
    let mut registry = registry(&["is_safe"], &[("a", Role::Trusted), ("b", Role::Honest)]);
    let mut store = AttestationStore::from_attestations(vec![is_safe(1, "a", "b")]).unwrap();

    let engine = PropagationEngine::new(config.clone()).unwrap();
    initialize(&mut store, &mut registry, &config.predefined_claims).unwrap();
    engine.run_round(&mut store, &mut registry).unwrap();

    let attestation = store.get(1).unwrap();
    assert_close(attestation.ti_attester["is_safe"], 1.0);
    assert_close(attestation.ta, 0.9);
    assert_close(attestation.tc["is_safe"], 0.03);
    assert_close(attestation.ti_recipient["is_safe"], 0.5);
    assert_close(trust(&registry, "b", "is_safe"), 0.5);
    assert_close(trust(&registry, "a", "is_safe"), 1.0);
}

#[test]
fn test_trusted_attests_honest_full_run() {
    let outcome = calculate_trust(
        vec![is_safe(1, "a", "b")],
        registry(&["is_safe"], &[("a", Role::Trusted), ("b", Role::Honest)]),
        &engine_config(&["is_safe"]),
    )
    .unwrap();

    assert!(outcome.report.converged);
    assert_eq!(outcome.report.rounds, 2);
    assert_close(outcome.attestations[0].ta, 0.9);
    assert_close(trust(&outcome.registry, "b", "is_safe"), 0.5);
}

// =========================================================================
// Dishonest attesters
// =========================================================================

#[test]
fn test_dishonest_attester_yields_zero_trust() {
    let outcome = calculate_trust(
        vec![is_safe(1, "d", "b"), is_safe(2, "d", "c")],
        registry(
            &["is_safe"],
            &[("d", Role::Dishonest), ("b", Role::Honest), ("c", Role::Honest)],
        ),
        &engine_config(&["is_safe"]),
    )
    .unwrap();

    for attestation in &outcome.attestations {
        assert_close(attestation.ta, 0.0);
        assert_close(attestation.tc["is_safe"], 0.0);
        assert_close(attestation.ti_attester["is_safe"], 0.0);
    }
    assert_close(trust(&outcome.registry, "d", "is_safe"), 0.0);
}

#[test]
fn test_dishonest_attestation_rescued_by_trusted_corroboration() {
    let target = is_safe(1, "d", "b");
    let meta = Attestation::meta(2, "t", &target);
    let outcome = calculate_trust(
        vec![target, meta],
        registry(
            &["is_safe"],
            &[("d", Role::Dishonest), ("b", Role::Honest), ("t", Role::Trusted)],
        ),
        &engine_config(&["is_safe"]),
    )
    .unwrap();

    let target = &outcome.attestations[0];
    assert_close(target.ta, 0.0);
    assert!(target.tc["is_safe"] > 0.0);
    assert_close(outcome.attestations[1].ta, 0.9);
}

#[test]
fn test_attested_dishonest_identity_rises_to_floor() {
    // m -> d lifts d to the 0.5 identity floor even with zero claim trust,
    // so d's own attestation clears the noise threshold.
    let outcome = calculate_trust(
        vec![is_safe(1, "m", "d"), is_safe(2, "d", "h")],
        registry(
            &["is_safe"],
            &[("m", Role::Dishonest), ("d", Role::Dishonest), ("h", Role::Honest)],
        ),
        &engine_config(&["is_safe"]),
    )
    .unwrap();

    assert!(outcome.report.converged);
    assert_eq!(outcome.report.rounds, 2);

    let first = &outcome.attestations[0];
    assert_close(first.ta, 0.0);
    assert_close(first.tc["is_safe"], 0.0);
    assert_close(first.ti_recipient["is_safe"], 0.5);

    let second = &outcome.attestations[1];
    assert_close(second.ti_attester["is_safe"], 0.5);
    assert_close(second.ta, 0.45);
    assert_close(second.tc["is_safe"], 0.02);

    assert_close(trust(&outcome.registry, "m", "is_safe"), 0.0);
    assert_close(trust(&outcome.registry, "d", "is_safe"), 0.5);
    assert_close(trust(&outcome.registry, "h", "is_safe"), 0.5);
}

// =========================================================================
// Corroborating attestations about the same subject
// =========================================================================

#[test]
fn test_independent_attesters_raise_identity_trust() {
    let claims = ["is_safe"];
    let identities = [
        ("t1", Role::Trusted),
        ("t2", Role::Trusted),
        ("t3", Role::Trusted),
        ("b", Role::Honest),
    ];

    let single = calculate_trust(
        vec![is_safe(1, "t1", "b")],
        registry(&claims, &identities),
        &engine_config(&claims),
    )
    .unwrap();
    let many = calculate_trust(
        vec![is_safe(1, "t1", "b"), is_safe(2, "t2", "b"), is_safe(3, "t3", "b")],
        registry(&claims, &identities),
        &engine_config(&claims),
    )
    .unwrap();

    assert!(trust(&many.registry, "b", "is_safe") >= trust(&single.registry, "b", "is_safe"));
    for attestation in &many.attestations {
        assert_close(attestation.tc["is_safe"], 0.03);
    }
}

#[test]
fn test_conflicting_claims_are_not_peers() {
    let claims = ["is_safe"];
    let outcome = calculate_trust(
        vec![
            is_safe(1, "t1", "b"),
            Attestation::direct(2, "t2", "b", "is_safe", ClaimValue::Boolean(false)),
        ],
        registry(
            &claims,
            &[("t1", Role::Trusted), ("t2", Role::Trusted), ("b", Role::Honest)],
        ),
        &engine_config(&claims),
    )
    .unwrap();

    // Each attestation sees only itself, so both land on the floor.
    for attestation in &outcome.attestations {
        assert_close(attestation.ti_recipient["is_safe"], 0.5);
    }
}

// =========================================================================
// Rejected inputs
// =========================================================================

#[test]
fn test_nested_meta_rejected_before_any_round() {
    let target = is_safe(1, "a", "b");
    let meta = Attestation::meta(2, "c", &target);
    let nested = Attestation::meta(3, "a", &meta);

    let result = calculate_trust(
        vec![target, meta, nested],
        registry(
            &["is_safe"],
            &[("a", Role::Trusted), ("b", Role::Honest), ("c", Role::Honest)],
        ),
        &engine_config(&["is_safe"]),
    );
    assert!(matches!(result, Err(TrustError::MalformedAttestation(_))));
}

#[test]
fn test_unknown_attester_aborts() {
    let result = calculate_trust(
        vec![is_safe(1, "ghost", "b")],
        registry(&["is_safe"], &[("b", Role::Honest)]),
        &engine_config(&["is_safe"]),
    );
    assert!(matches!(result, Err(TrustError::UnknownIdentity(_))));
}

#[test]
fn test_unknown_claim_aborts() {
    let result = calculate_trust(
        vec![Attestation::direct(
            1,
            "a",
            "b",
            "is_tall",
            ClaimValue::Boolean(true),
        )],
        registry(&["is_safe"], &[("a", Role::Trusted), ("b", Role::Honest)]),
        &engine_config(&["is_safe"]),
    );
    assert!(matches!(result, Err(TrustError::MalformedAttestation(_))));
}
