use std::collections::{BTreeSet, VecDeque};

use mastery_core::ConceptId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::ConceptGraph;

/// Split of the presented concepts into valid and isolated ones.
///
/// The two lists are disjoint and together contain exactly the presented
/// concepts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MasteryResult {
    /// Concepts whose prerequisite chain is satisfied, in discovery order.
    pub valid_nodes: Vec<ConceptId>,
    /// Presented concepts that could not be reached, in ascending order.
    pub isolated_nodes: Vec<ConceptId>,
}

impl MasteryResult {
    /// Returns whether the concept was validated.
    pub fn is_valid(&self, concept: &ConceptId) -> bool {
        self.valid_nodes.contains(concept)
    }
}

/// Determines which presented concepts are reachable through satisfied
/// prerequisites.
///
/// Traversal starts at the roots and only continues below a concept the
/// student actually presented. A concept with several prerequisites is
/// entered only once every one of them is valid.
#[instrument(skip_all, fields(present = present.len(), roots = graph.roots().len()))]
pub fn propagate(present: &BTreeSet<ConceptId>, graph: &ConceptGraph) -> MasteryResult {
    if !graph.roots().iter().any(|root| present.contains(root)) {
        debug!("no root demonstrated, every presented concept is isolated");
        return MasteryResult {
            valid_nodes: Vec::new(),
            isolated_nodes: present.iter().copied().collect(),
        };
    }

    let adjacency = graph.adjacency();
    let reverse = graph.reverse_adjacency();

    let mut isolated = present.clone();
    let mut valid: Vec<ConceptId> = Vec::new();
    let mut valid_set: BTreeSet<ConceptId> = BTreeSet::new();
    let mut visited: BTreeSet<ConceptId> = BTreeSet::new();
    let mut queue: VecDeque<ConceptId> = graph.roots().iter().copied().collect();

    while let Some(current) = queue.pop_front() {
        if !isolated.remove(&current) {
            continue;
        }
        valid.push(current);
        valid_set.insert(current);

        let Some(children) = adjacency.get(&current) else {
            continue;
        };
        for child in children {
            if visited.contains(child) {
                continue;
            }
            let parents = reverse.get(child).map(Vec::as_slice).unwrap_or_default();
            let ready = parents.len() <= 1
                || parents
                    .iter()
                    .filter(|parent| **parent != current)
                    .all(|parent| valid_set.contains(parent));
            if ready {
                visited.insert(*child);
                queue.push_back(*child);
            } else {
                debug!(concept = %child, "convergent concept waiting on other prerequisites");
            }
        }
    }

    debug!(
        valid = valid.len(),
        isolated = isolated.len(),
        "mastery propagation finished"
    );
    MasteryResult {
        valid_nodes: valid,
        isolated_nodes: isolated.into_iter().collect(),
    }
}

/// Lists the undemonstrated concepts standing between the roots and the
/// isolated concepts.
///
/// Breadth-first from the roots; a branch stops at the first isolated concept
/// it meets, every other concept on the way is reported. Each concept is
/// reported at most once. The result depends on traversal order when several
/// branches lead to the same isolated concept.
pub fn missing_parents_from_isolated(
    isolated_nodes: &[ConceptId],
    graph: &ConceptGraph,
) -> Vec<ConceptId> {
    let stops: BTreeSet<ConceptId> = isolated_nodes.iter().copied().collect();
    walk_missing(graph, &stops, &BTreeSet::new())
}

/// Same walk as [`missing_parents_from_isolated`], except that concepts the
/// student already demonstrated are passed through without being reported.
pub fn missing_prerequisites(result: &MasteryResult, graph: &ConceptGraph) -> Vec<ConceptId> {
    let stops: BTreeSet<ConceptId> = result.isolated_nodes.iter().copied().collect();
    let demonstrated: BTreeSet<ConceptId> = result.valid_nodes.iter().copied().collect();
    walk_missing(graph, &stops, &demonstrated)
}

fn walk_missing(
    graph: &ConceptGraph,
    stops: &BTreeSet<ConceptId>,
    pass_through: &BTreeSet<ConceptId>,
) -> Vec<ConceptId> {
    let adjacency = graph.adjacency();
    let mut missing = Vec::new();
    let mut visited: BTreeSet<ConceptId> = graph.roots().clone();
    let mut queue: VecDeque<ConceptId> = graph.roots().iter().copied().collect();

    while let Some(current) = queue.pop_front() {
        if stops.contains(&current) {
            continue;
        }
        if !pass_through.contains(&current) {
            missing.push(current);
        }
        for child in adjacency.get(&current).into_iter().flatten() {
            if visited.insert(*child) {
                queue.push_back(*child);
            }
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> ConceptId {
        ConceptId::from_raw(raw)
    }

    fn set(raw: &[u64]) -> BTreeSet<ConceptId> {
        raw.iter().copied().map(id).collect()
    }

    fn chain() -> ConceptGraph {
        ConceptGraph::new(set(&[1, 2, 3]), vec![(id(1), id(2)), (id(2), id(3))], set(&[1])).unwrap()
    }

    #[test]
    fn full_chain_is_valid_in_discovery_order() {
        let result = propagate(&set(&[1, 2, 3]), &chain());
        assert_eq!(result.valid_nodes, vec![id(1), id(2), id(3)]);
        assert!(result.isolated_nodes.is_empty());
    }

    #[test]
    fn gap_in_chain_isolates_descendants() {
        let result = propagate(&set(&[1, 3]), &chain());
        assert_eq!(result.valid_nodes, vec![id(1)]);
        assert_eq!(result.isolated_nodes, vec![id(3)]);
    }

    #[test]
    fn graph_without_roots_isolates_everything() {
        let graph = ConceptGraph::new(set(&[5]), vec![], set(&[])).unwrap();
        let result = propagate(&set(&[5]), &graph);
        assert!(result.valid_nodes.is_empty());
        assert_eq!(result.isolated_nodes, vec![id(5)]);
    }

    #[test]
    fn missing_walk_skips_demonstrated_concepts() {
        let result = propagate(&set(&[1, 3]), &chain());
        assert_eq!(missing_prerequisites(&result, &chain()), vec![id(2)]);
        assert_eq!(
            missing_parents_from_isolated(&result.isolated_nodes, &chain()),
            vec![id(1), id(2)]
        );
    }

    #[test]
    fn diamond_reports_shared_child_once() {
        let graph = ConceptGraph::new(
            set(&[1, 2, 3, 4, 5]),
            vec![
                (id(1), id(2)),
                (id(1), id(3)),
                (id(2), id(4)),
                (id(3), id(4)),
                (id(4), id(5)),
            ],
            set(&[1]),
        )
        .unwrap();
        let missing = missing_parents_from_isolated(&[id(5)], &graph);
        assert_eq!(missing, vec![id(1), id(2), id(3), id(4)]);
    }
}
