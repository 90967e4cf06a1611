//! Timetable chromosome encoding.
//!
//! # Encoding
//!
//! A chromosome is a flat, fixed-length gene sequence with one gene per
//! (subject, meeting-kind, section) combination the curriculum requires.
//! Gene order mirrors the curriculum-derived requirement list and never
//! changes; only the *assignments* (instructor, room, time slot) vary
//! under the genetic operators. Subjects needing both lecture and lab
//! hours contribute two genes, each independently constraint-checked.

use rand::Rng;
use rand::prelude::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::models::{MeetingKind, SchedulingWindow, ScheduleItem, TimeSlot};

use super::problem::MeetingRequirement;

/// One scheduled meeting: a requirement plus its current assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    /// Subject being scheduled (identity, never mutated).
    pub subject_id: String,
    /// Lecture or lab block (identity, never mutated).
    pub kind: MeetingKind,
    /// Block/section attending (identity, never mutated).
    pub section: String,
    /// Assigned instructor.
    pub instructor_id: String,
    /// Assigned room.
    pub room_id: String,
    /// Assigned meeting time.
    pub slot: TimeSlot,
}

impl Gene {
    /// Converts this gene into a persistable schedule item.
    pub fn to_schedule_item(&self) -> ScheduleItem {
        ScheduleItem {
            subject_id: self.subject_id.clone(),
            kind: self.kind,
            section: self.section.clone(),
            instructor_id: self.instructor_id.clone(),
            room_id: self.room_id.clone(),
            day: self.slot.day,
            start_min: self.slot.start_min,
            end_min: self.slot.end_min,
        }
    }
}

/// A full candidate timetable.
///
/// Fitness is cached after evaluation; operators that change genes
/// reset it to `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chromosome {
    /// Genes, one per required meeting, in requirement order.
    pub genes: Vec<Gene>,
    /// Cached fitness in (0, 1], `None` until evaluated.
    pub fitness: Option<f64>,
}

impl Chromosome {
    /// Creates a chromosome with uniformly random assignments.
    ///
    /// Each gene gets a random eligible instructor, a random suitable
    /// room, and a random slot from the scheduling window. Requirements
    /// are guaranteed non-empty candidate lists by problem construction.
    pub fn random<R: Rng>(
        requirements: &[MeetingRequirement],
        window: &SchedulingWindow,
        rng: &mut R,
    ) -> Self {
        let genes = requirements
            .iter()
            .map(|req| {
                let instructor_id = req
                    .candidate_instructors
                    .choose(rng)
                    .cloned()
                    .unwrap_or_default();
                let room_id = req.candidate_rooms.choose(rng).cloned().unwrap_or_default();
                let slot = window
                    .random_slot(req.duration_min, rng)
                    .unwrap_or_else(|| TimeSlot::new(crate::models::DayOfWeek::Monday, 0, 0));
                Gene {
                    subject_id: req.subject_id.clone(),
                    kind: req.kind,
                    section: req.section.clone(),
                    instructor_id,
                    room_id,
                    slot,
                }
            })
            .collect();

        Self {
            genes,
            fitness: None,
        }
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Clears the cached fitness after a structural change.
    pub fn invalidate_fitness(&mut self) {
        self.fitness = None;
    }

    /// Validates this chromosome against the requirement list.
    ///
    /// Checks length, positional identity (subject/kind/section), and
    /// candidate membership of every assignment.
    pub fn matches_requirements(&self, requirements: &[MeetingRequirement]) -> bool {
        if self.genes.len() != requirements.len() {
            return false;
        }
        self.genes.iter().zip(requirements).all(|(gene, req)| {
            gene.subject_id == req.subject_id
                && gene.kind == req.kind
                && gene.section == req.section
                && req.candidate_instructors.contains(&gene.instructor_id)
                && req.candidate_rooms.contains(&gene.room_id)
        })
    }

    /// Converts all genes into schedule items, in gene order.
    pub fn to_schedule_items(&self) -> Vec<ScheduleItem> {
        self.genes.iter().map(Gene::to_schedule_item).collect()
    }
}
