use mastery_core::errors::{ErrorInfo, MasteryError};
use mastery_core::{ConceptId, RngHandle};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::graph::ConceptGraph;

/// Generates a layered prerequisite DAG with deterministic randomness.
///
/// Layer zero holds the roots. Every concept in a later layer draws between
/// one and `max_parents` prerequisites from the layer directly above it, so
/// the result mixes single-parent chains with convergent concepts.
pub fn gen_layered_prerequisites(
    layers: usize,
    width: usize,
    max_parents: usize,
    rng: &mut RngHandle,
) -> Result<ConceptGraph, MasteryError> {
    if layers == 0 || width == 0 {
        return Err(MasteryError::Graph(
            ErrorInfo::new(
                "empty-graph",
                "layered generator requires at least one layer and one concept per layer",
            )
            .with_context("layers", layers)
            .with_context("width", width),
        ));
    }

    let layer_ids: Vec<Vec<ConceptId>> = (0..layers)
        .map(|layer| {
            (0..width)
                .map(|slot| ConceptId::from_raw((layer * width + slot) as u64))
                .collect()
        })
        .collect();

    let mut edges = Vec::new();
    for pair in layer_ids.windows(2) {
        let (above, below) = (&pair[0], &pair[1]);
        for child in below {
            let fan_in = rng.gen_range(1..=max_parents.clamp(1, width));
            for parent in above.choose_multiple(rng, fan_in) {
                edges.push((*parent, *child));
            }
        }
    }

    ConceptGraph::new(
        layer_ids.iter().flatten().copied(),
        edges,
        layer_ids[0].iter().copied(),
    )
}
