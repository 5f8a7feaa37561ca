use std::collections::BTreeSet;
use std::fmt;

use mastery_core::OptionId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pathway::ReasoningPathway;

/// Counts produced when a student flags the options they believe are wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncorrectOptionsReport {
    /// Incorrect steps the student flagged.
    pub identified: usize,
    /// Incorrect steps the student did not flag.
    pub missing_options: usize,
    /// Flagged options that are not incorrect steps of the pathway.
    pub incorrectly_marked: usize,
}

impl IncorrectOptionsReport {
    /// Returns whether the flagged set matches the incorrect steps exactly.
    pub fn is_perfect(&self) -> bool {
        self.missing_options == 0 && self.incorrectly_marked == 0
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

impl fmt::Display for IncorrectOptionsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_perfect() {
            return write!(f, "All incorrect options identified.");
        }
        let mut sentences = Vec::with_capacity(2);
        if self.missing_options > 0 {
            sentences.push(format!(
                "You missed {}.",
                plural(self.missing_options, "incorrect option", "incorrect options")
            ));
        }
        if self.incorrectly_marked > 0 {
            sentences.push(format!(
                "{} marked as incorrect but {} correct.",
                plural(self.incorrectly_marked, "option was", "options were"),
                if self.incorrectly_marked == 1 { "is" } else { "are" }
            ));
        }
        write!(f, "{}", sentences.join(" "))
    }
}

/// Compares the options a student flagged as wrong with the pathway's
/// actual incorrect steps.
pub fn evaluate_incorrect_options(
    pathway: &ReasoningPathway,
    submitted_incorrect: &[OptionId],
) -> IncorrectOptionsReport {
    let mut unmatched: BTreeSet<OptionId> = submitted_incorrect.iter().copied().collect();
    let mut report = IncorrectOptionsReport::default();
    for step in pathway.incorrect_steps() {
        if unmatched.remove(&step.answer_option_id) {
            report.identified += 1;
        } else {
            report.missing_options += 1;
        }
    }
    report.incorrectly_marked = unmatched.len();
    debug!(
        pathway = %pathway.id,
        identified = report.identified,
        missing = report.missing_options,
        marked = report.incorrectly_marked,
        "incorrect options evaluated"
    );
    report
}
