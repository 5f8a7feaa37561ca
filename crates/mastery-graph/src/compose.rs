use std::collections::{BTreeMap, BTreeSet};

use mastery_core::ConceptId;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::concept::Concept;

/// Separator placed between alternate phrasings of one concept.
pub const DEFAULT_SEPARATOR: &str = " OR ";

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// Options controlling prompt composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeOpts {
    /// Separator joining a concept's text with its similar concepts' text.
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for ComposeOpts {
    fn default() -> Self {
        Self {
            separator: default_separator(),
        }
    }
}

/// Builds one prompt per concept, merged with its alternate phrasings.
///
/// Concepts already covered by an earlier prompt (directly or as a similar
/// concept) are skipped, so no concept text appears twice in the output.
/// Text comes from `text_by_id` first and the concept's own text second;
/// unresolved concepts contribute nothing to the join.
pub fn compose(
    concept_ids: &[ConceptId],
    separator: &str,
    concepts: &[Concept],
    text_by_id: &BTreeMap<ConceptId, String>,
) -> Vec<String> {
    let by_id: BTreeMap<ConceptId, &Concept> =
        concepts.iter().map(|concept| (concept.id, concept)).collect();
    let resolve = |id: ConceptId| {
        text_by_id
            .get(&id)
            .map(String::as_str)
            .or_else(|| by_id.get(&id).map(|concept| concept.text.as_str()))
            .filter(|text| !text.is_empty())
    };

    let mut covered: BTreeSet<ConceptId> = BTreeSet::new();
    let mut prompts = Vec::new();
    for &concept_id in concept_ids {
        if !covered.insert(concept_id) {
            debug!(concept = %concept_id, "concept already covered by an earlier prompt");
            continue;
        }

        let mut parts: Vec<&str> = Vec::new();
        match resolve(concept_id) {
            Some(text) => parts.push(text),
            None => warn!(concept = %concept_id, "no text for concept, prompt is best effort"),
        }
        if let Some(concept) = by_id.get(&concept_id) {
            for similar in &concept.similar_concepts {
                if !covered.insert(*similar) {
                    continue;
                }
                if let Some(text) = resolve(*similar) {
                    parts.push(text);
                }
            }
        }
        prompts.push(parts.join(separator));
    }
    prompts
}
