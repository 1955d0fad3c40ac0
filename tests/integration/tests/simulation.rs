//! Integration test: generated scenarios through the full pipeline.

use trustweb_core::{EngineConfig, Role};
use trustweb_engine::{AttestationStore, PropagationEngine, TrustGraphView};
use trustweb_integration_tests::{assert_close, seeded_scenario};
use trustweb_sim::summarize;

#[test]
fn test_simulated_scenario_propagates() {
    let scenario = seeded_scenario(7, 10, 100);
    let config = EngineConfig::default();
    let outcome = scenario.propagate(&config).unwrap();

    assert_eq!(outcome.attestations.len(), 100);
    assert_eq!(outcome.registry.len(), 10);
    assert!(outcome.report.rounds >= 1);
    assert!(outcome.report.rounds <= config.num_rounds);

    let summary = summarize(&outcome.registry);
    let trusted = summary.iter().find(|s| s.role == Role::Trusted).unwrap();
    for claim in &config.predefined_claims {
        assert_close(trusted.mean_trust[claim], 1.0);
    }
    assert_eq!(summary.iter().map(|s| s.identities).sum::<usize>(), 10);
}

#[test]
fn test_same_seed_same_outcome() {
    let config = EngineConfig::default();
    let first = seeded_scenario(99, 8, 50).propagate(&config).unwrap();
    let second = seeded_scenario(99, 8, 50).propagate(&config).unwrap();

    assert_eq!(first.report, second.report);
    for ((address, a), (_, b)) in first.registry.iter().zip(second.registry.iter()) {
        assert_eq!(a.calculated_trust, b.calculated_trust, "{address}");
    }
}

#[test]
fn test_outcome_serializes_for_visualisers() {
    let outcome = seeded_scenario(5, 6, 30)
        .propagate(&EngineConfig::default())
        .unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["attestations"].as_array().unwrap().len(), 30);
    assert!(json["report"]["converged"].is_boolean());
    assert!(json["attestations"][0]["tc"].is_object());
}

#[test]
fn test_graph_view_of_simulated_scenario() {
    let scenario = seeded_scenario(11, 8, 60);
    let config = EngineConfig::default();
    let claims = &config.predefined_claims;

    let mut registry = scenario.registry(claims).unwrap();
    let mut store = AttestationStore::from_attestations(scenario.attestations).unwrap();
    PropagationEngine::new(config.clone())
        .unwrap()
        .run(&mut store, &mut registry)
        .unwrap();

    let mut total = 0;
    for claim in claims {
        let view = TrustGraphView::for_claim(&store, &registry, claim).unwrap();
        assert!(view.edges.len() >= view.attestation_count());
        total += view.attestation_count();
    }
    assert_eq!(total, store.len());
}
