//! Fitness evaluation.
//!
//! Converts a [`ViolationReport`] into a scalar in (0, 1] via a
//! weighted penalty model: `fitness = 1 / (1 + penalty)`. The
//! normalization keeps selection probabilities well-defined for
//! arbitrarily bad chromosomes and makes 1.0 the unique score of a
//! conflict-free timetable.

use serde::{Deserialize, Serialize};

use crate::constraints::ViolationReport;

/// Severity weights per violation category.
///
/// Physical impossibilities (room, instructor, and section double
/// bookings) are weighted highest; policy violations (scheme, overload,
/// eligibility, break, same-day) lower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessWeights {
    /// Weight per room conflict.
    pub room_conflict: f64,
    /// Weight per instructor conflict.
    pub instructor_conflict: f64,
    /// Weight per section conflict.
    pub section_conflict: f64,
    /// Weight per daily-scheme violation.
    pub scheme_violation: f64,
    /// Weight per overload violation.
    pub overload_violation: f64,
    /// Weight per eligibility violation.
    pub eligibility_violation: f64,
    /// Weight per break violation.
    pub break_violation: f64,
    /// Weight per same-day lecture/lab pair.
    pub same_day_violation: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            room_conflict: 10.0,
            instructor_conflict: 10.0,
            section_conflict: 10.0,
            scheme_violation: 4.0,
            overload_violation: 3.0,
            eligibility_violation: 3.0,
            break_violation: 2.0,
            same_day_violation: 1.0,
        }
    }
}

impl FitnessWeights {
    /// Total weighted penalty of a report.
    pub fn penalty(&self, report: &ViolationReport) -> f64 {
        f64::from(report.room_conflicts) * self.room_conflict
            + f64::from(report.instructor_conflicts) * self.instructor_conflict
            + f64::from(report.section_conflicts) * self.section_conflict
            + f64::from(report.scheme_violations) * self.scheme_violation
            + f64::from(report.overload_violations) * self.overload_violation
            + f64::from(report.eligibility_violations) * self.eligibility_violation
            + f64::from(report.break_violations) * self.break_violation
            + f64::from(report.same_day_violations) * self.same_day_violation
    }
}

/// Scores a violation report: `1 / (1 + penalty)`.
pub fn score(report: &ViolationReport, weights: &FitnessWeights) -> f64 {
    1.0 / (1.0 + weights.penalty(report))
}
