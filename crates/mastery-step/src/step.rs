use mastery_core::{OptionId, StepId};
use serde::{Deserialize, Serialize};

/// Multiple-choice option of a step's reasoning track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOption {
    /// Identifier of the option.
    pub id: OptionId,
    /// Whether choosing this option is correct.
    pub is_correct: bool,
}

/// One step of a step-solve question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveStep {
    /// Identifier of the step.
    pub id: StepId,
    /// Reasoning options; empty when the step has no reasoning track.
    #[serde(default)]
    pub options: Vec<StepOption>,
    /// Accepted evaluation answers; empty when the step has no evaluation track.
    #[serde(default)]
    pub accepted_answers: Vec<String>,
}

impl SolveStep {
    /// Looks up one of the step's options.
    pub fn option(&self, id: OptionId) -> Option<&StepOption> {
        self.options.iter().find(|option| option.id == id)
    }
}

/// Student input for one step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepSubmission {
    /// Chosen reasoning option.
    #[serde(default)]
    pub option_id: Option<OptionId>,
    /// Free-form evaluation answer.
    #[serde(default)]
    pub answer: Option<String>,
}
