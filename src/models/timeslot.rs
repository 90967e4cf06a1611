//! Time slot and scheduling window models.
//!
//! Defines when a class meeting happens: a day of the week plus a
//! half-open interval of minutes since midnight. Source timetable data
//! always falls on whole-hour or half-hour boundaries, so the random
//! slot generator walks a 30-minute grid.
//!
//! # Time Model
//! All times are minutes since midnight (0..1440). Intervals are
//! half-open: a slot includes its start and excludes its end, so
//! back-to-back meetings do not overlap.

use rand::Rng;
use rand::prelude::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Teaching days. Sunday is never scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// All schedulable days, Monday through Saturday.
    pub const ALL: [DayOfWeek; 6] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Short label ("Mon", "Tue", ...).
    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Mon",
            DayOfWeek::Tuesday => "Tue",
            DayOfWeek::Wednesday => "Wed",
            DayOfWeek::Thursday => "Thu",
            DayOfWeek::Friday => "Fri",
            DayOfWeek::Saturday => "Sat",
        }
    }
}

/// A scheduled meeting time: day plus [start, end) in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day of week.
    pub day: DayOfWeek,
    /// Start time (minutes since midnight, inclusive).
    pub start_min: u16,
    /// End time (minutes since midnight, exclusive).
    pub end_min: u16,
}

impl TimeSlot {
    /// Creates a new time slot.
    pub fn new(day: DayOfWeek, start_min: u16, end_min: u16) -> Self {
        Self {
            day,
            start_min,
            end_min,
        }
    }

    /// Duration of this slot (minutes).
    #[inline]
    pub fn duration_min(&self) -> u16 {
        self.end_min - self.start_min
    }

    /// Whether two slots overlap in time on the same day.
    ///
    /// Half-open semantics: a slot ending at 10:00 does not overlap one
    /// starting at 10:00.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start_min < other.end_min && other.start_min < self.end_min
    }
}

/// The window within which random slots are generated.
///
/// Defaults to Monday–Saturday, 07:00–19:00, on a 30-minute grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingWindow {
    /// Days eligible for scheduling.
    pub days: Vec<DayOfWeek>,
    /// Earliest start of any meeting (minutes since midnight).
    pub day_start_min: u16,
    /// Latest end of any meeting (minutes since midnight).
    pub day_end_min: u16,
    /// Grid step for start times (minutes).
    pub step_min: u16,
}

impl Default for SchedulingWindow {
    fn default() -> Self {
        Self {
            days: DayOfWeek::ALL.to_vec(),
            day_start_min: 7 * 60,
            day_end_min: 19 * 60,
            step_min: 30,
        }
    }
}

impl SchedulingWindow {
    /// Restricts the window to the given days.
    pub fn with_days(mut self, days: Vec<DayOfWeek>) -> Self {
        self.days = days;
        self
    }

    /// Sets the daily start/end bounds.
    pub fn with_daily_bounds(mut self, start_min: u16, end_min: u16) -> Self {
        self.day_start_min = start_min;
        self.day_end_min = end_min;
        self
    }

    /// Whether a meeting of `duration_min` fits anywhere in this window.
    pub fn fits(&self, duration_min: u16) -> bool {
        !self.days.is_empty()
            && self.day_start_min + duration_min <= self.day_end_min
            && self.step_min > 0
    }

    /// Draws a uniformly random slot of the given duration.
    ///
    /// Returns `None` if the duration does not fit in the daily window.
    pub fn random_slot<R: Rng>(&self, duration_min: u16, rng: &mut R) -> Option<TimeSlot> {
        if !self.fits(duration_min) {
            return None;
        }
        let day = *self.days.choose(rng)?;
        let latest_start = self.day_end_min - duration_min;
        let steps = (latest_start - self.day_start_min) / self.step_min;
        let start = self.day_start_min + rng.random_range(0..=steps) * self.step_min;
        Some(TimeSlot::new(day, start, start + duration_min))
    }
}
