use std::collections::{BTreeMap, BTreeSet};

use mastery_core::errors::{ErrorInfo, MasteryError};
use mastery_core::ConceptId;

pub(crate) fn graph_error(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
}

/// Prerequisite DAG over the concepts of one question or assignment.
///
/// The graph is validated once at construction and never mutated afterwards;
/// traversals derive their own adjacency maps from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptGraph {
    nodes: BTreeSet<ConceptId>,
    edges: BTreeSet<(ConceptId, ConceptId)>,
    roots: BTreeSet<ConceptId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    NotVisited,
    Visiting,
    Done,
}

impl ConceptGraph {
    /// Builds a graph from its nodes, `(parent, child)` edges and roots.
    ///
    /// Fails when an edge endpoint or root is not a node, when an edge is a
    /// self-loop, or when the edges contain a directed cycle.
    pub fn new(
        nodes: impl IntoIterator<Item = ConceptId>,
        edges: impl IntoIterator<Item = (ConceptId, ConceptId)>,
        roots: impl IntoIterator<Item = ConceptId>,
    ) -> Result<Self, MasteryError> {
        let nodes: BTreeSet<ConceptId> = nodes.into_iter().collect();
        let edges: BTreeSet<(ConceptId, ConceptId)> = edges.into_iter().collect();
        let roots: BTreeSet<ConceptId> = roots.into_iter().collect();

        for (parent, child) in &edges {
            if parent == child {
                return Err(MasteryError::Graph(
                    graph_error("self-loop", "concept cannot be its own prerequisite")
                        .with_context("concept", parent),
                ));
            }
            for endpoint in [parent, child] {
                if !nodes.contains(endpoint) {
                    return Err(MasteryError::Graph(
                        graph_error("unknown-endpoint", "edge endpoint is not a graph node")
                            .with_context("parent", parent)
                            .with_context("child", child),
                    ));
                }
            }
        }
        if let Some(root) = roots.iter().find(|root| !nodes.contains(root)) {
            return Err(MasteryError::Graph(
                graph_error("unknown-root", "root is not a graph node").with_context("root", root),
            ));
        }

        let graph = Self {
            nodes,
            edges,
            roots,
        };
        if let Some(node) = graph.find_cycle() {
            return Err(MasteryError::Graph(
                graph_error(
                    "would-create-cycle",
                    "prerequisite edges contain a directed cycle",
                )
                .with_context("concept", node)
                .with_hint("prerequisite graphs must be acyclic"),
            ));
        }
        Ok(graph)
    }

    /// Returns the concepts of the graph in ascending order.
    pub fn nodes(&self) -> &BTreeSet<ConceptId> {
        &self.nodes
    }

    /// Returns the `(parent, child)` prerequisite edges.
    pub fn edges(&self) -> &BTreeSet<(ConceptId, ConceptId)> {
        &self.edges
    }

    /// Returns the entry points of the prerequisite chain.
    pub fn roots(&self) -> &BTreeSet<ConceptId> {
        &self.roots
    }

    /// Returns whether the concept belongs to this graph.
    pub fn contains(&self, concept: &ConceptId) -> bool {
        self.nodes.contains(concept)
    }

    /// Maps each parent to its children, children in ascending order.
    pub fn adjacency(&self) -> BTreeMap<ConceptId, Vec<ConceptId>> {
        let mut adjacency: BTreeMap<ConceptId, Vec<ConceptId>> = BTreeMap::new();
        for (parent, child) in &self.edges {
            adjacency.entry(*parent).or_default().push(*child);
        }
        adjacency
    }

    /// Maps each child to its parents, parents in ascending order.
    pub fn reverse_adjacency(&self) -> BTreeMap<ConceptId, Vec<ConceptId>> {
        let mut reverse: BTreeMap<ConceptId, Vec<ConceptId>> = BTreeMap::new();
        for (parent, child) in &self.edges {
            reverse.entry(*child).or_default().push(*parent);
        }
        for parents in reverse.values_mut() {
            parents.sort();
        }
        reverse
    }

    fn find_cycle(&self) -> Option<ConceptId> {
        let adjacency = self.adjacency();
        let mut states: BTreeMap<ConceptId, VisitState> = self
            .nodes
            .iter()
            .map(|node| (*node, VisitState::NotVisited))
            .collect();
        for node in &self.nodes {
            if dfs(*node, &adjacency, &mut states) {
                return Some(*node);
            }
        }
        None
    }
}

fn dfs(
    node: ConceptId,
    adjacency: &BTreeMap<ConceptId, Vec<ConceptId>>,
    states: &mut BTreeMap<ConceptId, VisitState>,
) -> bool {
    match states.get(&node).copied() {
        Some(VisitState::Visiting) => return true,
        Some(VisitState::Done) => return false,
        _ => {}
    }
    states.insert(node, VisitState::Visiting);
    if let Some(children) = adjacency.get(&node) {
        for child in children {
            if dfs(*child, adjacency, states) {
                return true;
            }
        }
    }
    states.insert(node, VisitState::Done);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<ConceptId> {
        raw.iter().copied().map(ConceptId::from_raw).collect()
    }

    fn edge(parent: u64, child: u64) -> (ConceptId, ConceptId) {
        (ConceptId::from_raw(parent), ConceptId::from_raw(child))
    }

    #[test]
    fn rejects_unknown_endpoint() {
        let err = ConceptGraph::new(ids(&[1, 2]), vec![edge(1, 3)], ids(&[1])).unwrap_err();
        assert_eq!(err.code(), "unknown-endpoint");
    }

    #[test]
    fn rejects_unknown_root() {
        let err = ConceptGraph::new(ids(&[1]), vec![], ids(&[7])).unwrap_err();
        assert_eq!(err.code(), "unknown-root");
    }

    #[test]
    fn rejects_cycles_and_self_loops() {
        let err = ConceptGraph::new(
            ids(&[1, 2, 3]),
            vec![edge(1, 2), edge(2, 3), edge(3, 1)],
            ids(&[1]),
        )
        .unwrap_err();
        assert!(matches!(err, MasteryError::Graph(info) if info.code == "would-create-cycle"));

        let err = ConceptGraph::new(ids(&[1]), vec![edge(1, 1)], ids(&[1])).unwrap_err();
        assert_eq!(err.code(), "self-loop");
    }

    #[test]
    fn adjacency_maps_are_mirrored() {
        let graph = ConceptGraph::new(
            ids(&[1, 2, 3]),
            vec![edge(1, 3), edge(2, 3), edge(1, 2)],
            ids(&[1]),
        )
        .unwrap();
        assert_eq!(graph.adjacency()[&ConceptId::from_raw(1)], ids(&[2, 3]));
        assert_eq!(graph.reverse_adjacency()[&ConceptId::from_raw(3)], ids(&[1, 2]));
        assert!(!graph.reverse_adjacency().contains_key(&ConceptId::from_raw(1)));
    }
}
