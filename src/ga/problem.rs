//! Timetabling GA problem definition.
//!
//! Bridges the domain models (curriculum, instructors, rooms) to the
//! genetic encoding. Construction is the fail-fast gate: a problem is
//! only built if every required meeting has at least one eligible
//! instructor, at least one suitable room, and fits the scheduling
//! window — otherwise a [`ConfigurationError`] aborts the run before
//! any evolution happens.

use std::collections::HashMap;

use rand::Rng;

use crate::constraints::{check_violations, ConstraintConfig, ViolationReport};
use crate::error::{ConfigurationError, EngineResult};
use crate::fitness::{score, FitnessWeights};
use crate::models::{Instructor, MeetingKind, Room, SchedulingWindow, SubjectOffering};

use super::chromosome::Chromosome;

/// Compact per-gene descriptor derived from the curriculum.
///
/// Extracted once at problem build so operators never touch full
/// domain objects.
#[derive(Debug, Clone)]
pub struct MeetingRequirement {
    /// Subject identifier.
    pub subject_id: String,
    /// Catalog code (for error reporting).
    pub subject_code: String,
    /// Lecture or lab block.
    pub kind: MeetingKind,
    /// Block/section attending.
    pub section: String,
    /// Meeting duration (minutes).
    pub duration_min: u16,
    /// Instructors eligible to teach this subject.
    pub candidate_instructors: Vec<String>,
    /// Rooms whose type suits this meeting kind.
    pub candidate_rooms: Vec<String>,
}

/// A fully assembled timetabling problem.
///
/// Owns everything a generation run reads: the requirement list that
/// fixes chromosome length, the instructor map the constraint checker
/// consults, and the evaluation configuration.
#[derive(Debug, Clone)]
pub struct TimetableProblem {
    /// Required meetings, one per gene, in curriculum order.
    pub requirements: Vec<MeetingRequirement>,
    /// Instructors by id.
    pub instructors: HashMap<String, Instructor>,
    /// Window random slots are drawn from.
    pub window: SchedulingWindow,
    /// Hard-constraint thresholds.
    pub constraint_config: ConstraintConfig,
    /// Violation severity weights.
    pub weights: FitnessWeights,
}

impl TimetableProblem {
    /// Builds a problem from curriculum and resource pools.
    ///
    /// One requirement is produced per (subject, meeting-kind, section).
    /// Fails with a [`ConfigurationError`] if the curriculum or section
    /// list is empty, or if any meeting cannot be staffed, housed, or
    /// fitted into the window.
    pub fn build(
        curriculum: &[SubjectOffering],
        sections: &[String],
        instructors: &[Instructor],
        rooms: &[Room],
        window: SchedulingWindow,
    ) -> EngineResult<Self> {
        if curriculum.is_empty() {
            return Err(ConfigurationError::EmptyCurriculum.into());
        }
        if sections.is_empty() {
            return Err(ConfigurationError::NoSections.into());
        }

        let mut requirements = Vec::new();
        for subject in curriculum {
            let candidate_instructors: Vec<String> = instructors
                .iter()
                .filter(|i| i.can_teach(&subject.id))
                .map(|i| i.id.clone())
                .collect();
            if candidate_instructors.is_empty() {
                return Err(ConfigurationError::NoEligibleInstructor {
                    subject_code: subject.code.clone(),
                }
                .into());
            }

            for kind in subject.required_meetings() {
                let candidate_rooms: Vec<String> = rooms
                    .iter()
                    .filter(|r| r.suits(kind))
                    .map(|r| r.id.clone())
                    .collect();
                if candidate_rooms.is_empty() {
                    return Err(ConfigurationError::NoSuitableRoom {
                        subject_code: subject.code.clone(),
                        kind,
                    }
                    .into());
                }

                let duration_min = subject.meeting_duration_min(kind);
                if !window.fits(duration_min) {
                    return Err(ConfigurationError::MeetingTooLong {
                        subject_code: subject.code.clone(),
                        kind,
                    }
                    .into());
                }

                for section in sections {
                    requirements.push(MeetingRequirement {
                        subject_id: subject.id.clone(),
                        subject_code: subject.code.clone(),
                        kind,
                        section: section.clone(),
                        duration_min,
                        candidate_instructors: candidate_instructors.clone(),
                        candidate_rooms: candidate_rooms.clone(),
                    });
                }
            }
        }

        let instructors = instructors
            .iter()
            .map(|i| (i.id.clone(), i.clone()))
            .collect();

        Ok(Self {
            requirements,
            instructors,
            window,
            constraint_config: ConstraintConfig::default(),
            weights: FitnessWeights::default(),
        })
    }

    /// Overrides the constraint thresholds.
    pub fn with_constraint_config(mut self, config: ConstraintConfig) -> Self {
        self.constraint_config = config;
        self
    }

    /// Overrides the violation weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// The fixed chromosome length for this problem.
    pub fn gene_count(&self) -> usize {
        self.requirements.len()
    }

    /// Creates a random chromosome for this problem.
    pub fn random_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome {
        Chromosome::random(&self.requirements, &self.window, rng)
    }

    /// Runs the constraint checker over a chromosome.
    pub fn check(&self, chromosome: &Chromosome) -> ViolationReport {
        check_violations(&chromosome.genes, &self.instructors, &self.constraint_config)
    }

    /// Evaluates a chromosome: violation report plus scalar fitness.
    pub fn evaluate(&self, chromosome: &Chromosome) -> (ViolationReport, f64) {
        let report = self.check(chromosome);
        let fitness = score(&report, &self.weights);
        (report, fitness)
    }
}
