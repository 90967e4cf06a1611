//! Subject offering model.
//!
//! A subject offering is one curriculum entry for a program/year/semester:
//! its weekly lecture and laboratory hour requirements determine which
//! meetings (genes) the timetable must contain. A subject with both
//! lecture and lab hours produces two independent meetings.
//!
//! Unit accounting follows the common faculty-load convention:
//! 1 lecture hour = 1 unit, 3 lab hours = 1 unit.

use serde::{Deserialize, Serialize};

/// The kind of a weekly class meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeetingKind {
    /// Classroom lecture block.
    Lecture,
    /// Laboratory block.
    Lab,
}

/// A subject as offered in a curriculum term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectOffering {
    /// Unique subject identifier.
    pub id: String,
    /// Catalog code (e.g., "CS101").
    pub code: String,
    /// Descriptive title.
    pub title: String,
    /// Weekly lecture hours.
    pub lecture_hours: u8,
    /// Weekly laboratory hours.
    pub lab_hours: u8,
    /// Credit units.
    pub units: f64,
}

impl SubjectOffering {
    /// Creates a new subject offering.
    pub fn new(id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            title: String::new(),
            lecture_hours: 0,
            lab_hours: 0,
            units: 0.0,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets weekly lecture hours.
    pub fn with_lecture_hours(mut self, hours: u8) -> Self {
        self.lecture_hours = hours;
        self
    }

    /// Sets weekly laboratory hours.
    pub fn with_lab_hours(mut self, hours: u8) -> Self {
        self.lab_hours = hours;
        self
    }

    /// Sets credit units explicitly.
    pub fn with_units(mut self, units: f64) -> Self {
        self.units = units;
        self
    }

    /// Units derived from the hour split (1 lec hr = 1 unit, 3 lab hrs = 1 unit).
    pub fn derived_units(&self) -> f64 {
        f64::from(self.lecture_hours) + f64::from(self.lab_hours) / 3.0
    }

    /// The weekly meetings this subject requires, in curriculum order.
    pub fn required_meetings(&self) -> Vec<MeetingKind> {
        let mut kinds = Vec::with_capacity(2);
        if self.lecture_hours > 0 {
            kinds.push(MeetingKind::Lecture);
        }
        if self.lab_hours > 0 {
            kinds.push(MeetingKind::Lab);
        }
        kinds
    }

    /// Duration of one weekly meeting of the given kind (minutes).
    pub fn meeting_duration_min(&self, kind: MeetingKind) -> u16 {
        let hours = match kind {
            MeetingKind::Lecture => self.lecture_hours,
            MeetingKind::Lab => self.lab_hours,
        };
        u16::from(hours) * 60
    }
}
