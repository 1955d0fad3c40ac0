//! Update curves for attestation, claim and identity trust.

/// Trust lost through the act of attesting.
pub const ATTESTATION_DECAY: f64 = 0.9;

/// Per-attester weighting. Always 1.0 for now.
pub const ATTESTER_CONFIDENCE: f64 = 1.0;

/// Unit-trust corroboration mass at which claim trust reaches 0.5.
pub const CLAIM_HALF_SATURATION: f64 = 20.0;

/// Steepness of the identity trust squash.
pub const IDENTITY_STEEPNESS: f64 = -0.01;

/// Utility at which the identity trust squash is centred.
pub const IDENTITY_MIDPOINT: f64 = 500.0;

/// Lowest identity trust the squash can produce.
pub const IDENTITY_TRUST_FLOOR: f64 = 0.5;

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Attestation trust from the attester's trust in the claim.
///
/// Attester trust at or below `noise_threshold` yields 0.
pub fn attestation_trust(attester_trust: f64, noise_threshold: f64) -> f64 {
    if attester_trust > noise_threshold {
        (attester_trust * ATTESTATION_DECAY * ATTESTER_CONFIDENCE).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Claim trust from the summed attestation trust of `attestations`
/// attestations backing the claim (the attestation itself plus its
/// corroborating meta-attestations).
///
/// Diminishing returns: `1 - exp(s * total * count)` with
/// `s = ln(0.5) / CLAIM_HALF_SATURATION`, rounded to two decimals.
pub fn claim_trust(total_attestation_trust: f64, attestations: usize) -> f64 {
    let s = 0.5_f64.ln() / CLAIM_HALF_SATURATION;
    let value = 1.0 - (s * total_attestation_trust * attestations as f64).exp();
    round2(value.clamp(0.0, 1.0))
}

/// Diversity-weighted utility of the claim trusts backing an identity.
///
/// `claim_trust_sum` includes the attestation's own claim trust;
/// `corroborators` and `distinct_attesters` count only the other
/// attestations.
pub fn corroboration_utility(
    claim_trust_sum: f64,
    corroborators: usize,
    distinct_attesters: usize,
) -> f64 {
    claim_trust_sum * corroborators as f64 * distinct_attesters as f64
}

/// Identity trust from corroboration utility.
///
/// Logistic squash centred at `IDENTITY_MIDPOINT`, mapped onto
/// `[IDENTITY_TRUST_FLOOR, 1]` and rounded to two decimals.
pub fn identity_trust(utility: f64) -> f64 {
    let x = IDENTITY_STEEPNESS * (utility - IDENTITY_MIDPOINT);
    let squashed = (1.0 - x.exp()) / (1.0 + x.exp()) * 0.5 + 0.5;
    round2(squashed.clamp(IDENTITY_TRUST_FLOOR, 1.0))
}
