//! Trustweb Engine
//!
//! Computes trust scores for a web of attestations by fixed-point
//! relaxation:
//! - IdentityRegistry with per-claim trust vectors and pinned trusted roles
//! - AttestationStore with backlink and subject indexes
//! - Trust initialization from registry roles
//! - PropagationEngine running Gauss-Seidel rounds (Ta -> Tc -> Ti)
//! - Convergence checking between round snapshots
//! - TrustGraphView projection for visualisers

pub mod convergence;
pub mod engine;
pub mod initializer;
pub mod registry;
pub mod scoring;
pub mod store;
pub mod view;

pub use convergence::{check_convergence, max_delta};
pub use engine::{calculate_trust, PropagationEngine, PropagationReport, TrustOutcome};
pub use initializer::initialize;
pub use registry::{IdentityRegistry, TrustWrite};
pub use store::AttestationStore;
pub use view::{EdgeRelation, GraphEdge, GraphNode, NodeRef, TrustGraphView};
