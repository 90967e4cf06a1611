//! Timetabling domain models.
//!
//! Provides the value types the GA engine consumes and produces. All
//! curriculum, instructor, and room data is fetched once by the caller
//! and passed in as these plain structures — the engine has no ambient
//! data access.
//!
//! # Types
//!
//! | Type | Role |
//! |------|------|
//! | `SubjectOffering` | Curriculum entry with lecture/lab hour split |
//! | `Instructor` | Availability scheme, contract, subject eligibility |
//! | `Room` | Typed physical space |
//! | `TimeSlot` | Day + half-open minute interval |
//! | `Schedule` / `ScheduleItem` | Persisted output of a run |

mod instructor;
mod room;
mod schedule;
mod subject;
mod timeslot;

pub use instructor::{ContractType, DailyScheme, Instructor, SubjectEligibility};
pub use room::{Room, RoomType};
pub use schedule::{Schedule, ScheduleItem};
pub use subject::{MeetingKind, SubjectOffering};
pub use timeslot::{DayOfWeek, SchedulingWindow, TimeSlot};
