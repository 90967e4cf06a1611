//! Instructor model.
//!
//! Instructors carry the data the constraint checker needs: a daily
//! availability scheme, a contract type that selects which load caps
//! apply, and per-subject eligibility records.

use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// An instructor eligible to be assigned to class meetings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instructor {
    /// Unique instructor identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Employment contract, selects applicable load caps.
    pub contract: ContractType,
    /// Daily availability window.
    pub scheme: DailyScheme,
    /// Subjects this instructor may teach.
    pub eligibilities: Vec<SubjectEligibility>,
}

/// Employment contract classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    /// Permanent faculty: separate lecture-hour and lab-hour caps.
    Permanent,
    /// Contractual faculty under a 27-hour combined cap.
    Contract27,
}

/// The daily window an instructor may be scheduled in.
///
/// Applies uniformly to every teaching day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailyScheme {
    /// Earliest allowed start (minutes since midnight).
    pub start_min: u16,
    /// Latest allowed end (minutes since midnight).
    pub end_min: u16,
}

impl DailyScheme {
    /// Creates a new daily scheme.
    pub fn new(start_min: u16, end_min: u16) -> Self {
        Self { start_min, end_min }
    }

    /// Whether a slot falls entirely inside this scheme.
    #[inline]
    pub fn covers(&self, slot: &TimeSlot) -> bool {
        slot.start_min >= self.start_min && slot.end_min <= self.end_min
    }
}

/// A per-subject teaching eligibility record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectEligibility {
    /// Subject the instructor may teach.
    pub subject_id: String,
    /// Maximum number of sections of this subject.
    pub max_sections: u32,
    /// Maximum load units from this subject.
    pub max_load_units: f64,
}

impl Instructor {
    /// Creates a new instructor with a full-day scheme.
    pub fn new(id: impl Into<String>, contract: ContractType) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            contract,
            scheme: DailyScheme::new(7 * 60, 19 * 60),
            eligibilities: Vec::new(),
        }
    }

    /// Creates a permanent instructor.
    pub fn permanent(id: impl Into<String>) -> Self {
        Self::new(id, ContractType::Permanent)
    }

    /// Creates a contractual instructor under the 27-hour cap.
    pub fn contractual(id: impl Into<String>) -> Self {
        Self::new(id, ContractType::Contract27)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the daily availability window.
    pub fn with_scheme(mut self, start_min: u16, end_min: u16) -> Self {
        self.scheme = DailyScheme::new(start_min, end_min);
        self
    }

    /// Adds a subject eligibility with unlimited caps.
    ///
    /// The sentinels are finite so the record stays JSON-safe.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.eligibilities.push(SubjectEligibility {
            subject_id: subject_id.into(),
            max_sections: u32::MAX,
            max_load_units: f64::MAX,
        });
        self
    }

    /// Adds a subject eligibility with explicit limits.
    pub fn with_eligibility(mut self, eligibility: SubjectEligibility) -> Self {
        self.eligibilities.push(eligibility);
        self
    }

    /// Whether this instructor may teach the given subject.
    pub fn can_teach(&self, subject_id: &str) -> bool {
        self.eligibilities.iter().any(|e| e.subject_id == subject_id)
    }
}
