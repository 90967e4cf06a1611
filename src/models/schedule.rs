//! Persisted schedule output model.
//!
//! A `Schedule` is the saved result of one generation run: a header row
//! identifying the academic term plus one `ScheduleItem` per gene of the
//! winning chromosome. Items are replaced wholesale when a run is saved
//! over an existing schedule. Persistence itself belongs to the calling
//! application; this crate only produces the value structures.

use serde::{Deserialize, Serialize};

use super::{DayOfWeek, MeetingKind};

/// A saved timetable for one program/year/block in one term.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Academic year identifier.
    pub academic_year_id: String,
    /// Semester within the academic year.
    pub semester: u8,
    /// Program identifier.
    pub program_id: String,
    /// Year level.
    pub year_level: u8,
    /// Scheduled class meetings.
    pub items: Vec<ScheduleItem>,
}

/// One scheduled class meeting (maps 1:1 from a chromosome gene).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// Subject being taught.
    pub subject_id: String,
    /// Lecture or lab block.
    pub kind: MeetingKind,
    /// Block/section attending.
    pub section: String,
    /// Assigned instructor.
    pub instructor_id: String,
    /// Assigned room.
    pub room_id: String,
    /// Day of week.
    pub day: DayOfWeek,
    /// Start time (minutes since midnight).
    pub start_min: u16,
    /// End time (minutes since midnight).
    pub end_min: u16,
}

impl Schedule {
    /// Creates an empty schedule header for a term.
    pub fn new(
        academic_year_id: impl Into<String>,
        semester: u8,
        program_id: impl Into<String>,
        year_level: u8,
    ) -> Self {
        Self {
            academic_year_id: academic_year_id.into(),
            semester,
            program_id: program_id.into(),
            year_level,
            items: Vec::new(),
        }
    }

    /// Replaces all items with the given set.
    pub fn replace_items(&mut self, items: Vec<ScheduleItem>) {
        self.items = items;
    }

    /// Items for a given section.
    pub fn items_for_section(&self, section: &str) -> Vec<&ScheduleItem> {
        self.items.iter().filter(|i| i.section == section).collect()
    }

    /// Items for a given instructor.
    pub fn items_for_instructor(&self, instructor_id: &str) -> Vec<&ScheduleItem> {
        self.items
            .iter()
            .filter(|i| i.instructor_id == instructor_id)
            .collect()
    }

    /// Number of scheduled meetings.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
