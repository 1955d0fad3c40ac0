use serde::Serialize;
use std::collections::BTreeSet;

use trustweb_core::{Address, Role, TrustResult};

use crate::registry::IdentityRegistry;
use crate::store::AttestationStore;

/// Reference to a node in a [`TrustGraphView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRef {
    Identity(Address),
    Attestation(u64),
}

/// A node of the rendered trust graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphNode {
    Identity {
        address: Address,
        role: Role,
        /// Registry trust for the viewed claim.
        trust: f64,
    },
    Attestation {
        uid: u64,
        meta: bool,
        ta: f64,
        tc: Option<f64>,
        ti_attester: Option<f64>,
        ti_recipient: Option<f64>,
    },
}

/// How two graph nodes relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeRelation {
    AttesterToAttestation,
    AttestationToRecipient,
    Corroborates,
}

/// A directed edge of the rendered trust graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: NodeRef,
    pub to: NodeRef,
    pub relation: EdgeRelation,
}

/// Read-only projection of the attestation graph for one claim, for
/// visualisers. Identities and attestations are both nodes; attesters point
/// at their attestations, attestations at their recipients, and
/// meta-attestations at the attestation they corroborate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustGraphView {
    pub claim: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl TrustGraphView {
    /// Build the view for `claim`. Meta-attestations are included when the
    /// attestation they corroborate makes that claim.
    pub fn for_claim(
        store: &AttestationStore,
        registry: &IdentityRegistry,
        claim: &str,
    ) -> TrustResult<Self> {
        let mut identities = BTreeSet::new();
        let mut attestation_nodes = Vec::new();
        let mut edges = Vec::new();

        for attestation in store.iter() {
            if attestation.resolve_claim(registry.claims())? != claim {
                continue;
            }
            let key = attestation.claim_key()?;
            let node = NodeRef::Attestation(attestation.uid);

            attestation_nodes.push(GraphNode::Attestation {
                uid: attestation.uid,
                meta: attestation.is_meta(),
                ta: attestation.ta,
                tc: attestation.tc.get(key).copied(),
                ti_attester: attestation.ti_attester.get(key).copied(),
                ti_recipient: attestation.ti_recipient.get(key).copied(),
            });

            identities.insert(attestation.attester.clone());
            edges.push(GraphEdge {
                from: NodeRef::Identity(attestation.attester.clone()),
                to: node.clone(),
                relation: EdgeRelation::AttesterToAttestation,
            });

            if let Some(recipient) = &attestation.recipient {
                identities.insert(recipient.clone());
                edges.push(GraphEdge {
                    from: node.clone(),
                    to: NodeRef::Identity(recipient.clone()),
                    relation: EdgeRelation::AttestationToRecipient,
                });
            }
            if let Some(target) = attestation.is_true {
                edges.push(GraphEdge {
                    from: node,
                    to: NodeRef::Attestation(target),
                    relation: EdgeRelation::Corroborates,
                });
            }
        }

        let mut nodes = Vec::with_capacity(identities.len() + attestation_nodes.len());
        for address in identities {
            let identity = registry.get(&address)?;
            let trust = registry.get_trust(&address, claim)?;
            nodes.push(GraphNode::Identity {
                address,
                role: identity.role,
                trust,
            });
        }
        nodes.extend(attestation_nodes);

        Ok(Self {
            claim: claim.to_string(),
            nodes,
            edges,
        })
    }

    /// Number of identity nodes.
    pub fn identity_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, GraphNode::Identity { .. }))
            .count()
    }

    /// Number of attestation nodes.
    pub fn attestation_count(&self) -> usize {
        self.nodes.len() - self.identity_count()
    }

    /// Serialize the view as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
