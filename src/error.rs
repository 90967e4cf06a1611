//! Error types for the timetable engine.
//!
//! Only two things are fatal: a generation request whose parameters are
//! out of range, and input data that cannot produce a complete
//! chromosome. Constraint violations in a generated timetable are not
//! errors — they are reported as data in a
//! [`ViolationReport`](crate::constraints::ViolationReport) and left to
//! the caller to accept, regenerate, or fix manually.

use thiserror::Error;

use crate::models::MeetingKind;

/// Fatal input-data problems detected before evolution starts.
///
/// The engine never silently drops a required subject: any meeting it
/// cannot staff or house aborts the run with one of these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Curriculum lookup returned no required subjects.
    #[error("curriculum has no required subjects for the requested program/year/semester")]
    EmptyCurriculum,

    /// The request named no block sections to schedule.
    #[error("no block sections requested")]
    NoSections,

    /// A required subject has no instructor eligible to teach it.
    #[error("no eligible instructor for subject '{subject_code}'")]
    NoEligibleInstructor {
        /// Catalog code of the unstaffable subject.
        subject_code: String,
    },

    /// A required meeting has no room of a suitable type.
    #[error("no suitable room for {kind:?} meeting of subject '{subject_code}'")]
    NoSuitableRoom {
        /// Catalog code of the subject.
        subject_code: String,
        /// Meeting kind that could not be housed.
        kind: MeetingKind,
    },

    /// A required meeting is longer than the scheduling window allows.
    #[error("{kind:?} meeting of subject '{subject_code}' does not fit the scheduling window")]
    MeetingTooLong {
        /// Catalog code of the subject.
        subject_code: String,
        /// Meeting kind that does not fit.
        kind: MeetingKind,
    },
}

/// Top-level error type for generation runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// Input data cannot produce a complete chromosome.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A GA parameter is outside its allowed range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
