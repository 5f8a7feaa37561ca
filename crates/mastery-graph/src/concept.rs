use std::collections::BTreeSet;

use mastery_core::ConceptId;
use serde::{Deserialize, Serialize};

/// Atomic unit of curriculum knowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Identifier of the concept.
    pub id: ConceptId,
    /// Canonical prompt text.
    pub text: String,
    /// Alternate phrasings treated as equivalent for prerequisite purposes.
    #[serde(default)]
    pub similar_concepts: BTreeSet<ConceptId>,
}

impl Concept {
    /// Creates a concept without alternate phrasings.
    pub fn new(id: ConceptId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            similar_concepts: BTreeSet::new(),
        }
    }

    /// Adds alternate phrasings to the concept.
    pub fn with_similar(mut self, similar: impl IntoIterator<Item = ConceptId>) -> Self {
        self.similar_concepts.extend(similar);
        self
    }
}
