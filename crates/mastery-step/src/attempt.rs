use mastery_core::errors::{ErrorInfo, MasteryError};
use mastery_core::score::round_score;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Attempt and correct counts for one scoring track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackTally {
    /// Submissions where the track applied.
    pub attempts: u32,
    /// Submissions where the track was answered correctly.
    pub correct: u32,
}

impl TrackTally {
    /// Returns the tally with one more submission recorded.
    pub fn record(self, correct: bool) -> Result<Self, MasteryError> {
        let attempts = self.attempts.checked_add(1).ok_or_else(|| overflow("attempts"))?;
        let correct = self
            .correct
            .checked_add(u32::from(correct))
            .ok_or_else(|| overflow("correct"))?;
        Ok(Self { attempts, correct })
    }

    /// Running average, `0.0` before the first applicable submission.
    pub fn score(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            round_score(f64::from(self.correct) / f64::from(self.attempts))
        }
    }
}

fn overflow(counter: &str) -> MasteryError {
    MasteryError::Step(
        ErrorInfo::new("attempt-overflow", "attempt counter cannot grow further")
            .with_context("counter", counter),
    )
}

fn inconsistent(message: &str, track: &str, count: u32, limit: u32) -> MasteryError {
    MasteryError::Step(
        ErrorInfo::new("attempt-inconsistent", message)
            .with_context("track", track)
            .with_context("count", count)
            .with_context("limit", limit),
    )
}

/// Running aggregate of a student's submissions for one question.
///
/// Counts only grow. Once finalized the aggregate is read-only history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuestionAttempt {
    /// Every submission.
    pub overall: TrackTally,
    /// Submissions with an applicable reasoning track.
    pub reasoning: TrackTally,
    /// Submissions with an applicable evaluation track.
    pub evaluation: TrackTally,
    /// Number of correct submissions.
    pub steps_completed: u32,
    /// Overall running score.
    pub score: f64,
    /// Reasoning running score.
    pub reasoning_score: f64,
    /// Evaluation running score.
    pub evaluation_score: f64,
    /// Set once the student submitted the final answer.
    #[serde(default)]
    pub finalized: bool,
}

impl QuestionAttempt {
    /// Returns the aggregate after recording one submission.
    ///
    /// `reasoning` and `evaluation` are `None` when the track did not apply.
    pub fn record(
        &self,
        is_correct: bool,
        reasoning: Option<bool>,
        evaluation: Option<bool>,
    ) -> Result<Self, MasteryError> {
        self.ensure_open()?;
        self.validate()?;
        let overall = self.overall.record(is_correct)?;
        let reasoning = match reasoning {
            Some(ok) => self.reasoning.record(ok)?,
            None => self.reasoning,
        };
        let evaluation = match evaluation {
            Some(ok) => self.evaluation.record(ok)?,
            None => self.evaluation,
        };
        let steps_completed = self
            .steps_completed
            .checked_add(u32::from(is_correct))
            .ok_or_else(|| overflow("steps_completed"))?;
        Ok(Self {
            overall,
            reasoning,
            evaluation,
            steps_completed,
            score: overall.score(),
            reasoning_score: reasoning.score(),
            evaluation_score: evaluation.score(),
            finalized: false,
        })
    }

    /// Checks the counts of an aggregate read back from storage.
    ///
    /// Each track's correct count is bounded by its attempts, the per-track
    /// attempts and `steps_completed` by the overall attempts, and the stored
    /// scores must agree with the ones derived from the counts.
    pub fn validate(&self) -> Result<(), MasteryError> {
        for (track, tally) in [
            ("overall", &self.overall),
            ("reasoning", &self.reasoning),
            ("evaluation", &self.evaluation),
        ] {
            if tally.correct > tally.attempts {
                return Err(inconsistent(
                    "more correct submissions than attempts",
                    track,
                    tally.correct,
                    tally.attempts,
                ));
            }
            if tally.attempts > self.overall.attempts {
                return Err(inconsistent(
                    "track attempts exceed overall attempts",
                    track,
                    tally.attempts,
                    self.overall.attempts,
                ));
            }
        }
        if self.steps_completed != self.overall.correct {
            return Err(inconsistent(
                "completed steps differ from correct submissions",
                "overall",
                self.steps_completed,
                self.overall.correct,
            ));
        }
        let derived = [
            self.overall.score(),
            self.reasoning.score(),
            self.evaluation.score(),
        ];
        let stored = [self.score, self.reasoning_score, self.evaluation_score];
        if stored
            .iter()
            .zip(derived)
            .any(|(stored, derived)| (stored - derived).abs() > 1e-9)
        {
            return Err(MasteryError::Step(ErrorInfo::new(
                "attempt-inconsistent",
                "stored scores do not match the recorded counts",
            )));
        }
        Ok(())
    }

    /// Closes the aggregate; later submissions are rejected.
    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    fn ensure_open(&self) -> Result<(), MasteryError> {
        if self.finalized {
            warn!(attempts = self.overall.attempts, "submission against a finalized attempt");
            return Err(MasteryError::Step(
                ErrorInfo::new("attempt-finalized", "attempt was already submitted")
                    .with_context("attempts", self.overall.attempts),
            ));
        }
        Ok(())
    }
}
