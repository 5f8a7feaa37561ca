use mastery_core::errors::{ErrorInfo, MasteryError};
use mastery_core::{OptionId, PathwayId};
use serde::{Deserialize, Serialize};

/// One position of a candidate pathway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayStep {
    /// Zero-based position within the pathway.
    pub step_number: usize,
    /// Option shown at this position.
    pub answer_option_id: OptionId,
    /// Whether the option is the correct choice at this position.
    pub is_correct: bool,
    /// Option that legitimately replaces an incorrect one after correction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement_option_id: Option<OptionId>,
}

impl PathwayStep {
    /// Creates a correct step.
    pub fn correct(step_number: usize, option: OptionId) -> Self {
        Self {
            step_number,
            answer_option_id: option,
            is_correct: true,
            replacement_option_id: None,
        }
    }

    /// Creates an incorrect step and the option that should replace it.
    pub fn incorrect(step_number: usize, option: OptionId, replacement: Option<OptionId>) -> Self {
        Self {
            step_number,
            answer_option_id: option,
            is_correct: false,
            replacement_option_id: replacement,
        }
    }
}

/// Candidate correct ordering of steps for a reasoning question.
///
/// Deserialization goes through [`ReasoningPathway::new`], so loaded
/// pathways obey the same position rule as constructed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPathway")]
pub struct ReasoningPathway {
    /// Identifier of the pathway.
    pub id: PathwayId,
    /// Steps in any order; positions come from [`PathwayStep::step_number`].
    pub steps: Vec<PathwayStep>,
}

#[derive(Deserialize)]
struct RawPathway {
    id: PathwayId,
    steps: Vec<PathwayStep>,
}

impl TryFrom<RawPathway> for ReasoningPathway {
    type Error = MasteryError;

    fn try_from(raw: RawPathway) -> Result<Self, Self::Error> {
        ReasoningPathway::new(raw.id, raw.steps)
    }
}

impl ReasoningPathway {
    /// Creates a pathway, rejecting duplicate step numbers.
    pub fn new(id: PathwayId, steps: Vec<PathwayStep>) -> Result<Self, MasteryError> {
        let mut positions: Vec<usize> = steps.iter().map(|step| step.step_number).collect();
        positions.sort_unstable();
        if let Some(pair) = positions.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(MasteryError::Pathway(
                ErrorInfo::new("duplicate-step", "pathway has two steps at one position")
                    .with_context("pathway", id)
                    .with_context("step_number", pair[0]),
            ));
        }
        Ok(Self { id, steps })
    }

    /// Returns the step at the given position.
    pub fn step_at(&self, position: usize) -> Option<&PathwayStep> {
        self.steps.iter().find(|step| step.step_number == position)
    }

    /// Returns whether `option` is the correct choice at `position`.
    pub fn is_correct_at(&self, position: usize, option: OptionId) -> bool {
        self.step_at(position)
            .is_some_and(|step| step.is_correct && step.answer_option_id == option)
    }

    /// Returns whether `option` is a correct step somewhere other than `position`.
    pub fn is_correct_elsewhere(&self, position: usize, option: OptionId) -> bool {
        self.steps.iter().any(|step| {
            step.step_number != position && step.is_correct && step.answer_option_id == option
        })
    }

    /// Iterates over the steps that hold an incorrect option.
    pub fn incorrect_steps(&self) -> impl Iterator<Item = &PathwayStep> {
        self.steps.iter().filter(|step| !step.is_correct)
    }
}
