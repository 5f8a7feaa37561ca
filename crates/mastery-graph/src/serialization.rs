use mastery_core::errors::{ErrorInfo, MasteryError};
use mastery_core::{ConceptId, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::graph::ConceptGraph;

pub(crate) const GRAPH_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &ConceptGraph) -> Result<Vec<u8>, MasteryError> {
    bincode::serialize(&SerializableGraph::from(graph))
        .map_err(|err| MasteryError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<ConceptGraph, MasteryError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| MasteryError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    ConceptGraph::try_from(serializable)
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &ConceptGraph) -> Result<String, MasteryError> {
    serde_json::to_string_pretty(graph)
        .map_err(|err| MasteryError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string, validating its invariants.
pub fn graph_from_json(json: &str) -> Result<ConceptGraph, MasteryError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| MasteryError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    ConceptGraph::try_from(serializable)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SerializableGraph {
    #[serde(default)]
    schema_version: SchemaVersion,
    nodes: Vec<ConceptId>,
    #[serde(default)]
    edges: Vec<SerializableEdge>,
    #[serde(default)]
    roots: Vec<ConceptId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableEdge {
    parent: ConceptId,
    child: ConceptId,
}

impl From<&ConceptGraph> for SerializableGraph {
    fn from(graph: &ConceptGraph) -> Self {
        Self {
            schema_version: GRAPH_SCHEMA,
            nodes: graph.nodes().iter().copied().collect(),
            edges: graph
                .edges()
                .iter()
                .map(|(parent, child)| SerializableEdge {
                    parent: *parent,
                    child: *child,
                })
                .collect(),
            roots: graph.roots().iter().copied().collect(),
        }
    }
}

impl TryFrom<SerializableGraph> for ConceptGraph {
    type Error = MasteryError;

    fn try_from(value: SerializableGraph) -> Result<Self, Self::Error> {
        if !GRAPH_SCHEMA.accepts(&value.schema_version) {
            return Err(MasteryError::Serde(
                ErrorInfo::new("schema-mismatch", "unsupported concept graph schema")
                    .with_context("found", format!("{:?}", value.schema_version))
                    .with_context("expected", format!("{:?}", GRAPH_SCHEMA)),
            ));
        }
        ConceptGraph::new(
            value.nodes,
            value
                .edges
                .into_iter()
                .map(|edge| (edge.parent, edge.child)),
            value.roots,
        )
    }
}

impl Serialize for ConceptGraph {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SerializableGraph::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConceptGraph {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let serializable = SerializableGraph::deserialize(deserializer)?;
        ConceptGraph::try_from(serializable).map_err(serde::de::Error::custom)
    }
}
