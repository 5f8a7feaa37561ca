#![deny(missing_docs)]

//! Concept prerequisite graphs, mastery propagation and follow-up prompt
//! composition.
//!
//! A [`ConceptGraph`] is a validated DAG scoped to one question. Given the set
//! of concepts detected in a student's explanation, [`propagate`] splits them
//! into *valid* concepts (reachable from a demonstrated root with every
//! prerequisite branch satisfied) and *isolated* ones. [`missing_parents_from_isolated`]
//! and [`missing_prerequisites`] extract the next concepts to teach, and
//! [`compose`] turns those into prompt strings for an external generator.

mod assess;
mod compose;
mod concept;
mod generators;
mod graph;
mod hash;
mod propagate;
mod serialization;

pub use assess::{
    assess_batch, assess_explanation, assess_present, AssessJob, BatchOpts, Curriculum,
    MasteryReport,
};
pub use compose::{compose, ComposeOpts, DEFAULT_SEPARATOR};
pub use concept::Concept;
pub use generators::gen_layered_prerequisites;
pub use graph::ConceptGraph;
pub use hash::canonical_hash;
pub use propagate::{
    missing_parents_from_isolated, missing_prerequisites, propagate, MasteryResult,
};
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};
