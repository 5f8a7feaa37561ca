#![deny(missing_docs)]
#![doc = "Core identifiers, error types and collaborator contracts shared by the mastery engine crates."]

pub mod errors;
pub mod ids;
pub mod rng;
pub mod schema;
pub mod score;
pub mod serde;

use std::collections::BTreeSet;

pub use errors::{ErrorInfo, MasteryError};
pub use ids::{ConceptId, OptionId, PathwayId, StepId};
pub use rng::RngHandle;
pub use schema::SchemaVersion;

/// Maps a student's free-form text onto the concepts it demonstrates.
///
/// Implementations usually compare a text embedding against per-concept
/// reference embeddings and keep the concepts above a similarity threshold.
/// The engine only consumes the resulting set; threshold policy, timeouts and
/// retries belong to the implementor.
pub trait ConceptDetector: Send + Sync {
    /// Returns the identifiers of every concept detected in `text`.
    fn detect(&self, text: &str) -> Result<BTreeSet<ConceptId>, MasteryError>;
}
