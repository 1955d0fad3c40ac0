use serde::Serialize;

use trustweb_core::{Role, TrustVector};
use trustweb_engine::IdentityRegistry;

/// Mean trust per claim across all identities holding one role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleSummary {
    pub role: Role,
    pub identities: usize,
    pub mean_trust: TrustVector,
}

/// Summarize a registry by role, in trusted, honest, dishonest order.
/// Roles without identities are omitted.
pub fn summarize(registry: &IdentityRegistry) -> Vec<RoleSummary> {
    [Role::Trusted, Role::Honest, Role::Dishonest]
        .into_iter()
        .filter_map(|role| {
            let members: Vec<_> = registry
                .iter()
                .filter(|(_, identity)| identity.role == role)
                .map(|(_, identity)| identity)
                .collect();
            if members.is_empty() {
                return None;
            }

            let mut mean_trust = TrustVector::new();
            for claim in registry.claims() {
                let total: f64 = members
                    .iter()
                    .filter_map(|identity| identity.calculated_trust.get(claim))
                    .sum();
                mean_trust.insert(claim.clone(), total / members.len() as f64);
            }
            Some(RoleSummary {
                role,
                identities: members.len(),
                mean_trust,
            })
        })
        .collect()
}
