#![deny(missing_docs)]
#![doc = "Step-solve evaluation: multiple-choice reasoning and free-form evaluation answers, scored with running averages across repeated submissions."]

/// Accepted-answer matching and its options.
pub mod answer;
/// Running attempt aggregates.
pub mod attempt;
/// Step evaluation entry points.
pub mod evaluate;
/// Step definitions and submissions.
pub mod step;

pub use answer::{answer_matches, matches_any, StepOpts, DEFAULT_NUMERIC_TOLERANCE};
pub use attempt::{QuestionAttempt, TrackTally};
pub use evaluate::{check_step, replay, StepOutcome};
pub use step::{SolveStep, StepOption, StepSubmission};
