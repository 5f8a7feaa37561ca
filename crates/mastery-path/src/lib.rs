#![deny(missing_docs)]
#![doc = "Evaluation of ordered option submissions against one or more candidate reasoning pathways."]

/// Phase three: scoring the corrected final pathway.
pub mod final_pass;
/// Phase two: checking which options the student flagged as incorrect.
pub mod incorrect;
/// Phase one: position-tolerant classification of a submitted sequence.
pub mod matcher;
/// Pathway and step definitions.
pub mod pathway;

pub use final_pass::{evaluate_final_pathway, FinalPathwayScore};
pub use incorrect::{evaluate_incorrect_options, IncorrectOptionsReport};
pub use matcher::{evaluate_pathway, PathwayEvaluation, StepResult};
pub use pathway::{PathwayStep, ReasoningPathway};
