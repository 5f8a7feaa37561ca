//! Score rounding shared by the step evaluator.

/// Rounds a score to the precision used in persisted reports.
///
/// Also absorbs binary representation noise, so `5.01 - 5.00` and
/// `1.24 - 1.23` compare equal after rounding.
pub fn round_score(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}
