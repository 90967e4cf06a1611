//! GA encoding for timetable generation.
//!
//! # Encoding
//!
//! One gene per required (subject, meeting-kind, section) combination;
//! gene order is fixed by the curriculum-derived requirement list, so
//! same-length crossover is always well-defined and no meeting can be
//! lost or duplicated. Only assignments (instructor, room, time slot)
//! evolve.
//!
//! # Submodules
//!
//! - [`operators`]: runtime-selectable selection/crossover strategies
//!   plus assignment mutation

mod chromosome;
pub mod operators;
mod problem;

pub use chromosome::{Chromosome, Gene};
pub use operators::{
    mutate, mutate_gene, roulette_select, single_point_crossover, tournament_select,
    uniform_crossover, CrossoverType, GeneticOperators, SelectionType,
};
pub use problem::{MeetingRequirement, TimetableProblem};
