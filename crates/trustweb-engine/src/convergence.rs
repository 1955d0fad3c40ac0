use trustweb_core::{Attestation, TrustError, TrustResult, TrustVector};

/// Compare two order-aligned snapshots of the attestation list.
///
/// Returns `true` iff every `ta`, and every `tc` / `ti_recipient` entry
/// present in `current`, moved by less than `threshold`. A key present in
/// `current` but absent from `previous` is a contract violation, as is a
/// length or uid mismatch between the snapshots.
pub fn check_convergence(
    previous: &[Attestation],
    current: &[Attestation],
    threshold: f64,
) -> TrustResult<bool> {
    Ok(max_delta(previous, current)? < threshold)
}

/// Largest absolute change of any tracked value between two snapshots.
pub fn max_delta(previous: &[Attestation], current: &[Attestation]) -> TrustResult<f64> {
    if previous.len() != current.len() {
        return Err(TrustError::MalformedAttestation(format!(
            "snapshot length changed from {} to {}",
            previous.len(),
            current.len()
        )));
    }

    let mut max = 0.0_f64;
    for (before, after) in previous.iter().zip(current) {
        if before.uid != after.uid {
            return Err(TrustError::MalformedAttestation(format!(
                "snapshots are not aligned: uid {} vs {}",
                before.uid, after.uid
            )));
        }
        max = max.max((after.ta - before.ta).abs());
        max = max.max(vector_delta(after.uid, &before.tc, &after.tc)?);
        max = max.max(vector_delta(after.uid, &before.ti_recipient, &after.ti_recipient)?);
    }
    Ok(max)
}

fn vector_delta(uid: u64, previous: &TrustVector, current: &TrustVector) -> TrustResult<f64> {
    let mut max = 0.0_f64;
    for (claim, value) in current {
        let before = previous
            .get(claim)
            .ok_or_else(|| TrustError::ConvergenceKeyMismatch {
                uid,
                claim: claim.clone(),
            })?;
        max = max.max((value - before).abs());
    }
    Ok(max)
}
