use mastery_core::{OptionId, PathwayId};
use serde::{Deserialize, Serialize};

use crate::pathway::ReasoningPathway;

/// Score of a corrected pathway submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalPathwayScore {
    /// Pathway the submission was scored against.
    pub pathway_id: PathwayId,
    /// Number of correct positions.
    pub correct: usize,
    /// Number of steps in the pathway.
    pub total: usize,
    /// Correctness per pathway position, in position order.
    pub per_step: Vec<bool>,
}

impl FinalPathwayScore {
    /// Fraction of positions answered correctly.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Scores the final, corrected sequence.
///
/// Correct steps expect their own option; incorrect steps expect their
/// replacement, and never match when no replacement is defined.
pub fn evaluate_final_pathway(
    pathway: &ReasoningPathway,
    submitted: &[OptionId],
) -> FinalPathwayScore {
    let mut steps: Vec<_> = pathway.steps.iter().collect();
    steps.sort_by_key(|step| step.step_number);

    let per_step: Vec<bool> = steps
        .iter()
        .map(|step| {
            let expected = if step.is_correct {
                Some(step.answer_option_id)
            } else {
                step.replacement_option_id
            };
            expected.is_some() && submitted.get(step.step_number).copied() == expected
        })
        .collect();

    FinalPathwayScore {
        pathway_id: pathway.id,
        correct: per_step.iter().filter(|ok| **ok).count(),
        total: per_step.len(),
        per_step,
    }
}
