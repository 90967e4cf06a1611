//! Hard-constraint checking for candidate timetables.
//!
//! [`check_violations`] is a pure, stateless scan over a gene sequence:
//! the same chromosome always yields the same report. Violations are
//! counted, never raised — an imperfect timetable is a valid output
//! whose quality the fitness evaluator scores.
//!
//! # Checks
//!
//! | Category | Rule |
//! |----------|------|
//! | Room conflict | Two meetings share a room at overlapping times |
//! | Instructor conflict | One instructor in two places at once |
//! | Section conflict | One section double-booked |
//! | Scheme violation | Meeting outside the instructor's daily window |
//! | Overload violation | Weekly hours beyond the contract cap |
//! | Eligibility violation | Sections or load units beyond a subject eligibility cap |
//! | Break violation | Contiguous teaching block longer than allowed |
//! | Same-day violation | Lecture and lab of a subject on one day (policy) |
//!
//! Conflict scans are O(n²) pairwise, which is fine at the expected
//! gene counts (tens to low hundreds per run).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::ga::Gene;
use crate::models::{ContractType, DayOfWeek, Instructor, MeetingKind};

/// Caller-supplied constraint thresholds.
///
/// The load caps are institutional policy, not derivable from the
/// data model, so they are configuration. The defaults below are
/// placeholders a real deployment overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintConfig {
    /// Weekly lecture-hour cap for permanent faculty.
    pub max_lecture_hours_permanent: f64,
    /// Weekly lab-hour cap for permanent faculty.
    pub max_lab_hours_permanent: f64,
    /// Combined weekly hour cap for 27-hour contractual faculty.
    pub max_hours_contract27: f64,
    /// Gaps shorter than this merge into one contiguous teaching block (minutes).
    pub min_break_min: u16,
    /// Longest allowed contiguous teaching block (minutes).
    ///
    /// 270 = 4.5 hours: a 4-hour policy limit with rounding tolerance.
    pub max_contiguous_min: u16,
    /// When set, a subject's lecture and lab must fall on different days.
    pub lab_on_separate_day: bool,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            max_lecture_hours_permanent: 18.0,
            max_lab_hours_permanent: 12.0,
            max_hours_contract27: 27.0,
            min_break_min: 60,
            max_contiguous_min: 270,
            lab_on_separate_day: false,
        }
    }
}

/// Per-category violation counts for one chromosome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationReport {
    /// Pairs of meetings sharing a room at overlapping times.
    pub room_conflicts: u32,
    /// Pairs of meetings sharing an instructor at overlapping times.
    pub instructor_conflicts: u32,
    /// Pairs of meetings double-booking a section.
    pub section_conflicts: u32,
    /// Meetings outside their instructor's daily scheme.
    pub scheme_violations: u32,
    /// Instructors loaded beyond their contract caps.
    pub overload_violations: u32,
    /// Instructor-subject assignments beyond their eligibility limits.
    pub eligibility_violations: u32,
    /// Contiguous teaching blocks longer than allowed.
    pub break_violations: u32,
    /// Same-day lecture/lab pairs (only counted under the policy).
    pub same_day_violations: u32,
}

impl ViolationReport {
    /// Whether every count is zero.
    pub fn all_valid(&self) -> bool {
        self.total() == 0
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.room_conflicts
            + self.instructor_conflicts
            + self.section_conflicts
            + self.scheme_violations
            + self.overload_violations
            + self.eligibility_violations
            + self.break_violations
            + self.same_day_violations
    }
}

/// Checks a gene sequence against every hard constraint.
pub fn check_violations(
    genes: &[Gene],
    instructors: &HashMap<String, Instructor>,
    config: &ConstraintConfig,
) -> ViolationReport {
    let mut report = ViolationReport::default();

    // Pairwise overlap scans
    for (i, a) in genes.iter().enumerate() {
        for b in &genes[i + 1..] {
            if !a.slot.overlaps(&b.slot) {
                continue;
            }
            if a.room_id == b.room_id {
                report.room_conflicts += 1;
            }
            if a.instructor_id == b.instructor_id {
                report.instructor_conflicts += 1;
            }
            if a.section == b.section {
                report.section_conflicts += 1;
            }
        }
    }

    // Daily-scheme check
    for gene in genes {
        if let Some(instructor) = instructors.get(&gene.instructor_id) {
            if !instructor.scheme.covers(&gene.slot) {
                report.scheme_violations += 1;
            }
        }
    }

    report.overload_violations = count_overloads(genes, instructors, config);
    report.eligibility_violations = count_eligibility_breaches(genes, instructors);
    report.break_violations = count_missing_breaks(genes, config);

    if config.lab_on_separate_day {
        report.same_day_violations = count_same_day_pairs(genes);
    }

    report
}

/// Counts instructors whose accumulated weekly hours breach their caps.
///
/// Permanent faculty have independent lecture and lab caps; a breach of
/// either (or both) counts once per cap. Contractual faculty have one
/// combined cap.
fn count_overloads(
    genes: &[Gene],
    instructors: &HashMap<String, Instructor>,
    config: &ConstraintConfig,
) -> u32 {
    let mut minutes: HashMap<&str, (u32, u32)> = HashMap::new();
    for gene in genes {
        let entry = minutes.entry(gene.instructor_id.as_str()).or_default();
        match gene.kind {
            MeetingKind::Lecture => entry.0 += u32::from(gene.slot.duration_min()),
            MeetingKind::Lab => entry.1 += u32::from(gene.slot.duration_min()),
        }
    }

    let mut violations = 0;
    for (id, (lecture_min, lab_min)) in minutes {
        let Some(instructor) = instructors.get(id) else {
            continue;
        };
        let lecture_hours = f64::from(lecture_min) / 60.0;
        let lab_hours = f64::from(lab_min) / 60.0;
        match instructor.contract {
            ContractType::Permanent => {
                if lecture_hours > config.max_lecture_hours_permanent {
                    violations += 1;
                }
                if lab_hours > config.max_lab_hours_permanent {
                    violations += 1;
                }
            }
            ContractType::Contract27 => {
                if lecture_hours + lab_hours > config.max_hours_contract27 {
                    violations += 1;
                }
            }
        }
    }
    violations
}

/// Counts per-(instructor, subject) eligibility breaches.
///
/// An eligibility record may cap how many sections of a subject an
/// instructor takes and how many load units the subject contributes.
/// Each breached cap counts once. Units follow the curriculum rule:
/// one lecture hour is one unit, three lab hours are one unit.
fn count_eligibility_breaches(
    genes: &[Gene],
    instructors: &HashMap<String, Instructor>,
) -> u32 {
    let mut per_subject: HashMap<(&str, &str), (HashSet<&str>, f64)> = HashMap::new();
    for gene in genes {
        let entry = per_subject
            .entry((gene.instructor_id.as_str(), gene.subject_id.as_str()))
            .or_default();
        entry.0.insert(gene.section.as_str());
        let hours = f64::from(gene.slot.duration_min()) / 60.0;
        entry.1 += match gene.kind {
            MeetingKind::Lecture => hours,
            MeetingKind::Lab => hours / 3.0,
        };
    }

    let mut violations = 0;
    for ((instructor_id, subject_id), (sections, units)) in per_subject {
        let Some(instructor) = instructors.get(instructor_id) else {
            continue;
        };
        let Some(eligibility) = instructor
            .eligibilities
            .iter()
            .find(|e| e.subject_id == subject_id)
        else {
            continue;
        };
        if sections.len() as u32 > eligibility.max_sections {
            violations += 1;
        }
        if units > eligibility.max_load_units {
            violations += 1;
        }
    }
    violations
}

/// Counts over-long contiguous teaching blocks per instructor per day.
///
/// Meetings separated by less than `min_break_min` merge into one
/// block; every merged block spanning more than `max_contiguous_min`
/// counts once.
fn count_missing_breaks(genes: &[Gene], config: &ConstraintConfig) -> u32 {
    let mut by_day: HashMap<(&str, DayOfWeek), Vec<(u16, u16)>> = HashMap::new();
    for gene in genes {
        by_day
            .entry((gene.instructor_id.as_str(), gene.slot.day))
            .or_default()
            .push((gene.slot.start_min, gene.slot.end_min));
    }

    let mut violations = 0;
    for intervals in by_day.values_mut() {
        intervals.sort_unstable();

        let mut block_start = intervals[0].0;
        let mut block_end = intervals[0].1;
        for &(start, end) in &intervals[1..] {
            if start >= block_end && start - block_end >= config.min_break_min {
                if block_end - block_start > config.max_contiguous_min {
                    violations += 1;
                }
                block_start = start;
                block_end = end;
            } else {
                block_end = block_end.max(end);
            }
        }
        if block_end - block_start > config.max_contiguous_min {
            violations += 1;
        }
    }
    violations
}

/// Counts (subject, section) pairs whose lecture and lab share a day.
fn count_same_day_pairs(genes: &[Gene]) -> u32 {
    let mut violations = 0;
    for (i, a) in genes.iter().enumerate() {
        for b in &genes[i + 1..] {
            if a.subject_id == b.subject_id
                && a.section == b.section
                && a.kind != b.kind
                && a.slot.day == b.slot.day
            {
                violations += 1;
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SubjectEligibility, TimeSlot};

    fn gene(
        subject: &str,
        kind: MeetingKind,
        section: &str,
        instructor: &str,
        room: &str,
        day: DayOfWeek,
        start_h: u16,
        end_h: u16,
    ) -> Gene {
        Gene {
            subject_id: subject.into(),
            kind,
            section: section.into(),
            instructor_id: instructor.into(),
            room_id: room.into(),
            slot: TimeSlot::new(day, start_h * 60, end_h * 60),
        }
    }

    fn instructor_map(instructors: Vec<Instructor>) -> HashMap<String, Instructor> {
        instructors.into_iter().map(|i| (i.id.clone(), i)).collect()
    }

    fn wide_open(id: &str) -> Instructor {
        Instructor::permanent(id).with_scheme(7 * 60, 19 * 60)
    }

    #[test]
    fn test_clean_schedule_is_all_valid() {
        let genes = vec![
            gene("S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 10),
            gene("S2", MeetingKind::Lecture, "A", "I2", "R2", DayOfWeek::Monday, 10, 12),
            gene("S3", MeetingKind::Lecture, "B", "I1", "R1", DayOfWeek::Tuesday, 8, 10),
        ];
        let instructors = instructor_map(vec![wide_open("I1"), wide_open("I2")]);
        let report = check_violations(&genes, &instructors, &ConstraintConfig::default());
        assert!(report.all_valid(), "unexpected violations: {report:?}");
    }

    #[test]
    fn test_room_conflict() {
        let genes = vec![
            gene("S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 10),
            gene("S2", MeetingKind::Lecture, "B", "I2", "R1", DayOfWeek::Monday, 9, 11),
        ];
        let instructors = instructor_map(vec![wide_open("I1"), wide_open("I2")]);
        let report = check_violations(&genes, &instructors, &ConstraintConfig::default());
        assert_eq!(report.room_conflicts, 1);
        assert_eq!(report.instructor_conflicts, 0);
        assert_eq!(report.section_conflicts, 0);
        assert!(!report.all_valid());
    }

    #[test]
    fn test_instructor_conflict() {
        let genes = vec![
            gene("S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 10),
            gene("S2", MeetingKind::Lecture, "B", "I1", "R2", DayOfWeek::Monday, 9, 11),
        ];
        let instructors = instructor_map(vec![wide_open("I1")]);
        let report = check_violations(&genes, &instructors, &ConstraintConfig::default());
        assert_eq!(report.instructor_conflicts, 1);
        assert_eq!(report.room_conflicts, 0);
    }

    #[test]
    fn test_section_conflict() {
        let genes = vec![
            gene("S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 10),
            gene("S2", MeetingKind::Lecture, "A", "I2", "R2", DayOfWeek::Monday, 9, 11),
        ];
        let instructors = instructor_map(vec![wide_open("I1"), wide_open("I2")]);
        let report = check_violations(&genes, &instructors, &ConstraintConfig::default());
        assert_eq!(report.section_conflicts, 1);
    }

    #[test]
    fn test_back_to_back_is_not_a_conflict() {
        let genes = vec![
            gene("S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 10),
            gene("S2", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 10, 12),
        ];
        let instructors = instructor_map(vec![wide_open("I1")]);
        let report = check_violations(&genes, &instructors, &ConstraintConfig::default());
        assert_eq!(report.room_conflicts, 0);
        assert_eq!(report.instructor_conflicts, 0);
        assert_eq!(report.section_conflicts, 0);
    }

    #[test]
    fn test_scheme_violation() {
        let genes = vec![gene(
            "S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 7, 9,
        )];
        let instructors =
            instructor_map(vec![Instructor::permanent("I1").with_scheme(8 * 60, 17 * 60)]);
        let report = check_violations(&genes, &instructors, &ConstraintConfig::default());
        assert_eq!(report.scheme_violations, 1);
    }

    #[test]
    fn test_permanent_overload_counts_each_cap() {
        // 8h lecture + 4h lab on separate days, caps of 6h each
        let genes = vec![
            gene("S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 12),
            gene("S2", MeetingKind::Lecture, "B", "I1", "R1", DayOfWeek::Tuesday, 8, 12),
            gene("S3", MeetingKind::Lab, "A", "I1", "L1", DayOfWeek::Wednesday, 8, 12),
        ];
        let instructors = instructor_map(vec![wide_open("I1")]);
        let config = ConstraintConfig {
            max_lecture_hours_permanent: 6.0,
            max_lab_hours_permanent: 6.0,
            ..ConstraintConfig::default()
        };
        let report = check_violations(&genes, &instructors, &config);
        // Lecture cap breached (8 > 6), lab within cap (4 <= 6)
        assert_eq!(report.overload_violations, 1);
    }

    #[test]
    fn test_contract27_overload_is_combined() {
        let genes = vec![
            gene("S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 12),
            gene("S2", MeetingKind::Lab, "B", "I1", "L1", DayOfWeek::Tuesday, 8, 11),
        ];
        let instructors =
            instructor_map(vec![Instructor::contractual("I1").with_scheme(7 * 60, 19 * 60)]);
        let config = ConstraintConfig {
            max_hours_contract27: 6.0,
            ..ConstraintConfig::default()
        };
        // 4h + 3h = 7h > 6h
        let report = check_violations(&genes, &instructors, &config);
        assert_eq!(report.overload_violations, 1);

        // Same hours under the real 27-hour cap pass
        let report = check_violations(&genes, &instructors, &ConstraintConfig::default());
        assert_eq!(report.overload_violations, 0);
    }

    #[test]
    fn test_eligibility_section_cap() {
        // Two sections of S1 on an instructor capped at one section.
        let genes = vec![
            gene("S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 10),
            gene("S1", MeetingKind::Lecture, "B", "I1", "R1", DayOfWeek::Tuesday, 8, 10),
        ];
        let instructors =
            instructor_map(vec![wide_open("I1").with_eligibility(SubjectEligibility {
                subject_id: "S1".into(),
                max_sections: 1,
                max_load_units: 100.0,
            })]);
        let report = check_violations(&genes, &instructors, &ConstraintConfig::default());
        assert_eq!(report.eligibility_violations, 1);
        assert!(!report.all_valid());
    }

    #[test]
    fn test_eligibility_unit_cap() {
        // 2h lecture + 3h lab of S1 = 3 units, over a 2-unit cap.
        let genes = vec![
            gene("S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 10),
            gene("S1", MeetingKind::Lab, "A", "I1", "L1", DayOfWeek::Tuesday, 8, 11),
        ];
        let capped = instructor_map(vec![wide_open("I1").with_eligibility(SubjectEligibility {
            subject_id: "S1".into(),
            max_sections: 10,
            max_load_units: 2.0,
        })]);
        let report = check_violations(&genes, &capped, &ConstraintConfig::default());
        assert_eq!(report.eligibility_violations, 1);

        // The same load under a 3-unit cap passes.
        let roomy = instructor_map(vec![wide_open("I1").with_eligibility(SubjectEligibility {
            subject_id: "S1".into(),
            max_sections: 10,
            max_load_units: 3.0,
        })]);
        let report = check_violations(&genes, &roomy, &ConstraintConfig::default());
        assert_eq!(report.eligibility_violations, 0);
    }

    #[test]
    fn test_default_eligibility_is_unlimited() {
        let genes = vec![
            gene("S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 10),
            gene("S1", MeetingKind::Lecture, "B", "I1", "R2", DayOfWeek::Tuesday, 8, 10),
            gene("S1", MeetingKind::Lecture, "C", "I1", "R1", DayOfWeek::Wednesday, 8, 10),
        ];
        let instructors = instructor_map(vec![wide_open("I1").with_subject("S1")]);
        let report = check_violations(&genes, &instructors, &ConstraintConfig::default());
        assert_eq!(report.eligibility_violations, 0);
    }

    #[test]
    fn test_break_violation_merges_short_gaps() {
        // 08:00-10:00 and 10:30-13:00 with a 30-minute gap merge into a
        // 5-hour block, over the 4.5-hour limit.
        let mut late = gene("S2", MeetingKind::Lecture, "B", "I1", "R2", DayOfWeek::Monday, 10, 13);
        late.slot.start_min = 10 * 60 + 30;
        let genes = vec![
            gene("S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 10),
            late,
        ];

        let instructors = instructor_map(vec![wide_open("I1")]);
        let report = check_violations(&genes, &instructors, &ConstraintConfig::default());
        assert_eq!(report.break_violations, 1);
    }

    #[test]
    fn test_real_break_splits_blocks() {
        // 08:00-10:00, 11:00-13:00: a full hour apart, two blocks of 2h each.
        let genes = vec![
            gene("S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 10),
            gene("S2", MeetingKind::Lecture, "B", "I1", "R2", DayOfWeek::Monday, 11, 13),
        ];
        let instructors = instructor_map(vec![wide_open("I1")]);
        let report = check_violations(&genes, &instructors, &ConstraintConfig::default());
        assert_eq!(report.break_violations, 0);
    }

    #[test]
    fn test_long_single_block_violates() {
        let genes = vec![gene(
            "S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 13,
        )];
        let instructors = instructor_map(vec![wide_open("I1")]);
        let report = check_violations(&genes, &instructors, &ConstraintConfig::default());
        assert_eq!(report.break_violations, 1);
    }

    #[test]
    fn test_same_day_policy() {
        let genes = vec![
            gene("S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 10),
            gene("S1", MeetingKind::Lab, "A", "I1", "L1", DayOfWeek::Monday, 13, 16),
        ];
        let instructors = instructor_map(vec![wide_open("I1")]);

        // Off by default
        let report = check_violations(&genes, &instructors, &ConstraintConfig::default());
        assert_eq!(report.same_day_violations, 0);

        let config = ConstraintConfig {
            lab_on_separate_day: true,
            ..ConstraintConfig::default()
        };
        let report = check_violations(&genes, &instructors, &config);
        assert_eq!(report.same_day_violations, 1);
    }

    #[test]
    fn test_checker_is_pure() {
        let genes = vec![
            gene("S1", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 8, 10),
            gene("S2", MeetingKind::Lecture, "A", "I1", "R1", DayOfWeek::Monday, 9, 11),
        ];
        let instructors = instructor_map(vec![wide_open("I1")]);
        let config = ConstraintConfig::default();

        let first = check_violations(&genes, &instructors, &config);
        let second = check_violations(&genes, &instructors, &config);
        assert_eq!(first, second);
    }
}
