use std::slice;

use mastery_core::{OptionId, PathwayId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::pathway::ReasoningPathway;

/// Classification of one submitted option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepResult {
    /// Not evaluated yet.
    #[default]
    Pending,
    /// Correct option at the correct position.
    Correct,
    /// Option is not a correct step of any remaining candidate.
    Wrong,
    /// Option is correct, but belongs at another position.
    WrongPosition,
}

impl StepResult {
    /// Stable label used in tabular exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepResult::Pending => "PENDING",
            StepResult::Correct => "CORRECT",
            StepResult::Wrong => "WRONG",
            StepResult::WrongPosition => "WRONG_POSITION",
        }
    }
}

/// Outcome of matching a submitted sequence against candidate pathways.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayEvaluation {
    /// Pathway the submission was matched to; the first candidate when
    /// nothing matched, `None` only when there were no candidates.
    pub pathway_id: Option<PathwayId>,
    /// Classification per submitted position.
    pub results: Vec<StepResult>,
    /// Number of [`StepResult::Correct`] positions.
    pub correct_steps: usize,
}

impl PathwayEvaluation {
    /// Returns whether every submitted position was correct.
    pub fn is_exact(&self) -> bool {
        !self.results.is_empty() && self.correct_steps == self.results.len()
    }
}

/// Classifies one position and returns the candidates left for the next one.
///
/// The first pathway that matches locks the selection: from then on the
/// candidate set is that pathway alone.
fn classify_position<'a>(
    candidates: &'a [ReasoningPathway],
    position: usize,
    option: OptionId,
) -> (StepResult, &'a [ReasoningPathway]) {
    if let Some(matched) = candidates
        .iter()
        .find(|pathway| pathway.is_correct_at(position, option))
    {
        return (StepResult::Correct, slice::from_ref(matched));
    }
    if candidates
        .iter()
        .any(|pathway| pathway.is_correct_elsewhere(position, option))
    {
        (StepResult::WrongPosition, candidates)
    } else {
        (StepResult::Wrong, candidates)
    }
}

/// Evaluates an ordered submission against the question's candidate pathways.
#[instrument(skip_all, fields(candidates = candidates.len(), submitted = submitted.len()))]
pub fn evaluate_pathway(
    candidates: &[ReasoningPathway],
    submitted: &[OptionId],
) -> PathwayEvaluation {
    let mut remaining = candidates;
    let mut selected: Option<PathwayId> = None;
    let mut results = Vec::with_capacity(submitted.len());
    let mut correct_steps = 0;

    for (position, option) in submitted.iter().enumerate() {
        let (result, next) = classify_position(remaining, position, *option);
        if result == StepResult::Correct {
            correct_steps += 1;
            if selected.is_none() {
                let pathway = next[0].id;
                debug!(%pathway, position, "pathway selected");
                selected = Some(pathway);
            }
        }
        remaining = next;
        results.push(result);
    }

    let pathway_id = selected.or_else(|| candidates.first().map(|pathway| pathway.id));
    PathwayEvaluation {
        pathway_id,
        results,
        correct_steps,
    }
}
