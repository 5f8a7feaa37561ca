use sha2::{Digest, Sha256};

use crate::graph::ConceptGraph;
use crate::serialization::GRAPH_SCHEMA;

/// Computes the canonical structural hash of a concept graph.
///
/// Nodes, edges and roots are stored in sorted sets, so the hash does not
/// depend on the order in which the graph was assembled.
pub fn canonical_hash(graph: &ConceptGraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"concept-graph");
    hasher.update(GRAPH_SCHEMA.major.to_le_bytes());
    hasher.update(GRAPH_SCHEMA.minor.to_le_bytes());

    hasher.update(b"nodes");
    hasher.update((graph.nodes().len() as u64).to_le_bytes());
    for node in graph.nodes() {
        hasher.update(node.as_raw().to_le_bytes());
    }
    hasher.update(b"edges");
    hasher.update((graph.edges().len() as u64).to_le_bytes());
    for (parent, child) in graph.edges() {
        hasher.update(parent.as_raw().to_le_bytes());
        hasher.update(child.as_raw().to_le_bytes());
    }
    hasher.update(b"roots");
    hasher.update((graph.roots().len() as u64).to_le_bytes());
    for root in graph.roots() {
        hasher.update(root.as_raw().to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}
