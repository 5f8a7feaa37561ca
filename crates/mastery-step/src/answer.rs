use mastery_core::errors::{ErrorInfo, MasteryError};
use mastery_core::score::round_score;
use serde::{Deserialize, Serialize};

/// Absolute tolerance for numeric answers.
pub const DEFAULT_NUMERIC_TOLERANCE: f64 = 0.01;

fn default_numeric_tolerance() -> f64 {
    DEFAULT_NUMERIC_TOLERANCE
}

fn default_case_insensitive() -> bool {
    true
}

/// Options controlling how evaluation answers are compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOpts {
    /// Numeric answers match when they differ by strictly less than this.
    #[serde(default = "default_numeric_tolerance")]
    pub numeric_tolerance: f64,
    /// Compare textual answers without regard to case.
    #[serde(default = "default_case_insensitive")]
    pub case_insensitive: bool,
}

impl Default for StepOpts {
    fn default() -> Self {
        Self {
            numeric_tolerance: default_numeric_tolerance(),
            case_insensitive: default_case_insensitive(),
        }
    }
}

impl StepOpts {
    /// Rejects tolerances that are negative or not finite.
    pub fn validate(&self) -> Result<(), MasteryError> {
        if !self.numeric_tolerance.is_finite() || self.numeric_tolerance < 0.0 {
            return Err(MasteryError::Config(
                ErrorInfo::new("bad-tolerance", "numeric tolerance must be a finite, non-negative number")
                    .with_context("numeric_tolerance", self.numeric_tolerance)
                    .with_hint("the default is 0.01"),
            ));
        }
        Ok(())
    }
}

/// Compares one answer with one accepted answer.
///
/// Trimmed text equality wins first; otherwise both sides are parsed as
/// numbers. A side that does not parse makes this pair a non-match. The
/// difference is rounded before the strict comparison, so decimals exactly
/// one tolerance apart never match.
pub fn answer_matches(answer: &str, accepted: &str, opts: &StepOpts) -> bool {
    let (answer, accepted) = (answer.trim(), accepted.trim());
    let text_equal = if opts.case_insensitive {
        answer.to_lowercase() == accepted.to_lowercase()
    } else {
        answer == accepted
    };
    if text_equal {
        return true;
    }
    match (answer.parse::<f64>(), accepted.parse::<f64>()) {
        (Ok(given), Ok(expected)) => {
            round_score((given - expected).abs()) < opts.numeric_tolerance
        }
        _ => false,
    }
}

/// Returns whether the answer matches any accepted answer.
pub fn matches_any(answer: &str, accepted: &[String], opts: &StepOpts) -> bool {
    accepted
        .iter()
        .any(|candidate| answer_matches(answer, candidate, opts))
}
