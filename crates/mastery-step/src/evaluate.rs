use mastery_core::errors::MasteryError;
use mastery_core::StepId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::answer::{matches_any, StepOpts};
use crate::attempt::QuestionAttempt;
use crate::step::{SolveStep, StepSubmission};

/// Result of checking one step submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Step that was checked.
    pub step_id: StepId,
    /// Both applicable tracks were correct.
    pub is_correct: bool,
    /// Reasoning correctness, `true` when the track did not apply.
    pub reasoning_correct: bool,
    /// Evaluation correctness, `true` when the track did not apply.
    pub evaluation_correct: bool,
    /// Whether the reasoning track applied to this submission.
    pub reasoning_applicable: bool,
    /// Whether the evaluation track applied to this submission.
    pub evaluation_applicable: bool,
    /// Aggregate after this submission.
    pub aggregate: QuestionAttempt,
}

/// Checks a submission and folds it into the running aggregate.
///
/// The reasoning track applies when the step has options and the submission
/// picked one of them; the evaluation track applies when the step has
/// accepted answers. `prior` must be the latest aggregate for this attempt;
/// callers serialize concurrent submissions.
#[instrument(skip_all, fields(step = %step.id))]
pub fn check_step(
    step: &SolveStep,
    submission: &StepSubmission,
    prior: Option<&QuestionAttempt>,
    opts: &StepOpts,
) -> Result<StepOutcome, MasteryError> {
    let chosen = submission.option_id.and_then(|id| step.option(id));
    let reasoning = chosen.map(|option| option.is_correct);

    let evaluation = if step.accepted_answers.is_empty() {
        None
    } else {
        Some(
            submission
                .answer
                .as_deref()
                .is_some_and(|answer| matches_any(answer, &step.accepted_answers, opts)),
        )
    };

    let reasoning_correct = reasoning.unwrap_or(true);
    let evaluation_correct = evaluation.unwrap_or(true);
    let is_correct = reasoning_correct && evaluation_correct;

    let prior = prior.cloned().unwrap_or_default();
    let aggregate = prior.record(is_correct, reasoning, evaluation)?;
    debug!(
        is_correct,
        reasoning = ?reasoning,
        evaluation = ?evaluation,
        attempts = aggregate.overall.attempts,
        "step checked"
    );

    Ok(StepOutcome {
        step_id: step.id,
        is_correct,
        reasoning_correct,
        evaluation_correct,
        reasoning_applicable: reasoning.is_some(),
        evaluation_applicable: evaluation.is_some(),
        aggregate,
    })
}

/// Applies a sequence of submissions in order, starting from `initial`.
pub fn replay<'a>(
    initial: Option<&QuestionAttempt>,
    submissions: impl IntoIterator<Item = (&'a SolveStep, &'a StepSubmission)>,
    opts: &StepOpts,
) -> Result<QuestionAttempt, MasteryError> {
    let mut aggregate = initial.cloned().unwrap_or_default();
    for (step, submission) in submissions {
        aggregate = check_step(step, submission, Some(&aggregate), opts)?.aggregate;
    }
    Ok(aggregate)
}
