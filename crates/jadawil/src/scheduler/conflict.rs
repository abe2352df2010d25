//! Pairwise conflict detection between sections, schedules, and exam slots.

use serde::Serialize;

use crate::catalog::CandidateSet;
use crate::types::Section;

/// Why a pair of sections collides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConflictKind {
    /// Shared meeting day with overlapping meeting times.
    TimeOverlap,
    /// Same final-exam date with overlapping exam times.
    FinalExam,
}

/// An unordered pair of colliding sections.
///
/// Advisory only: conflict pairs are reported to the caller so a student can
/// see why pools collide, never used to reject a whole request.
#[derive(Debug, Clone, Serialize)]
pub struct ConflictPair {
    pub first: Section,
    pub second: Section,
    pub kind: ConflictKind,
}

impl ConflictPair {
    /// Stores the sections in CRN order so the symmetric duplicate of a pair
    /// compares and prints the same.
    fn new(a: &Section, b: &Section, kind: ConflictKind) -> ConflictPair {
        let (first, second) = if a.crn <= b.crn { (a, b) } else { (b, a) };
        ConflictPair {
            first: first.clone(),
            second: second.clone(),
            kind,
        }
    }

    pub fn crns(&self) -> (&str, &str) {
        (&self.first.crn, &self.second.crn)
    }
}

/// True iff the two sections meet on at least one shared day with overlapping
/// times. Symmetric; endpoints count, so back-to-back periods conflict.
pub fn sections_conflict(a: &Section, b: &Section) -> bool {
    a.days.intersects(&b.days) && a.meeting.overlaps(&b.meeting)
}

/// True iff any two picks in a prospective schedule conflict.
///
/// Scans every unordered pair, so k picks cost k·(k-1)/2 tests. The caller
/// guarantees picks come from distinct requirement groups.
pub fn schedule_has_conflict(picks: &[&Section]) -> bool {
    for (i, a) in picks.iter().enumerate() {
        for b in &picks[i + 1..] {
            if sections_conflict(a, b) {
                return true;
            }
        }
    }
    false
}

/// Every conflicting pair of sections drawn from two different requirement
/// groups, deduplicated by construction (each unordered group pair is visited
/// once).
///
/// Computed over the full pools before the search runs: it tells the student
/// which section pairs can never coexist, whatever the search finds.
pub fn cross_group_conflicts(sets: &[CandidateSet]) -> Vec<ConflictPair> {
    let mut pairs = Vec::new();
    for (i, left) in sets.iter().enumerate() {
        for right in &sets[i + 1..] {
            for a in &left.sections {
                for b in &right.sections {
                    if sections_conflict(a, b) {
                        pairs.push(ConflictPair::new(a, b, ConflictKind::TimeOverlap));
                    }
                }
            }
        }
    }
    pairs
}

/// True iff both sections sit a final exam on the same date with overlapping
/// times. Sections without a complete exam slot never collide.
pub fn exams_conflict(a: &Section, b: &Section) -> bool {
    match (&a.final_exam, &b.final_exam) {
        (Some(x), Some(y)) => x.date == y.date && x.time.overlaps(&y.time),
        _ => false,
    }
}

/// Final-exam collisions between requirement groups, one representative per
/// group.
///
/// Exam slots are scheduled per course, not per section, so the first
/// candidate of each group stands in for the whole group. Groups whose
/// representative has no exam slot are skipped.
pub fn final_exam_conflicts(sets: &[CandidateSet]) -> Vec<ConflictPair> {
    let representatives: Vec<&Section> =
        sets.iter().filter_map(|set| set.sections.first()).collect();

    let mut pairs = Vec::new();
    for (i, a) in representatives.iter().enumerate() {
        for b in &representatives[i + 1..] {
            if exams_conflict(a, b) {
                pairs.push(ConflictPair::new(a, b, ConflictKind::FinalExam));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::interval::TimeInterval;
    use crate::types::{CourseKey, DaySet, ExamSlot, GroupKey};

    fn section(crn: &str, course: &str, days: &str, time: &str) -> Section {
        Section {
            crn: crn.into(),
            course: CourseKey::parse(course).unwrap(),
            label: "01".into(),
            title: "Course Title".into(),
            track: "B".into(),
            credits: "3.00".into(),
            days: DaySet::parse(days),
            meeting: TimeInterval::parse_range(time).unwrap(),
            instructor: "Staff".into(),
            location: "H1-012".into(),
            seats_total: 30,
            seats_available: 12,
            final_exam: None,
        }
    }

    fn with_exam(mut section: Section, date: &str, time: &str) -> Section {
        section.final_exam = Some(ExamSlot {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            time: TimeInterval::parse_range(time).unwrap(),
        });
        section
    }

    fn group_of(course: &str, sections: Vec<Section>) -> CandidateSet {
        CandidateSet {
            group: GroupKey::Course(CourseKey::parse(course).unwrap()),
            sections,
        }
    }

    #[test]
    fn test_conflict_requires_a_shared_day() {
        let a = section("10001", "MATH 101", "UT", "09:00 am-10:15 am");
        let b = section("20001", "PHYS 110", "MW", "09:00 am-10:15 am");
        assert!(!sections_conflict(&a, &b));

        let c = section("30001", "CHEM 111", "TR", "09:30 am-10:45 am");
        assert!(sections_conflict(&a, &c));
    }

    #[test]
    fn test_conflict_is_symmetric_for_contained_ranges() {
        // One meeting entirely inside the other, tried in both argument
        // orders.
        let outer = section("10001", "MATH 101", "MW", "08:00 am-12:00 pm");
        let inner = section("20001", "PHYS 110", "MW", "09:00 am-11:00 am");
        assert!(sections_conflict(&outer, &inner));
        assert!(sections_conflict(&inner, &outer));
    }

    #[test]
    fn test_back_to_back_periods_conflict() {
        let first = section("10001", "MATH 101", "U", "09:00 am-10:00 am");
        let second = section("20001", "PHYS 110", "U", "10:00 am-11:00 am");
        assert!(sections_conflict(&first, &second));
    }

    #[test]
    fn test_schedule_conflict_scans_every_pair() {
        let a = section("10001", "MATH 101", "UT", "09:00 am-09:50 am");
        let b = section("20001", "PHYS 110", "MW", "10:00 am-10:50 am");
        let c = section("30001", "CHEM 111", "W", "10:30 am-11:20 am");
        // Only the second and third collide.
        assert!(!schedule_has_conflict(&[&a, &b]));
        assert!(schedule_has_conflict(&[&a, &b, &c]));
        assert!(!schedule_has_conflict(&[&a]));
        assert!(!schedule_has_conflict(&[]));
    }

    #[test]
    fn test_cross_group_conflicts_reports_each_pair_once() {
        let math = group_of(
            "MATH 101",
            vec![
                section("10001", "MATH 101", "UT", "09:00 am-09:50 am"),
                section("10002", "MATH 101", "MW", "09:00 am-09:50 am"),
            ],
        );
        let phys = group_of(
            "PHYS 110",
            vec![
                section("20001", "PHYS 110", "T", "09:30 am-10:20 am"),
                section("20002", "PHYS 110", "R", "01:00 pm-01:50 pm"),
            ],
        );

        let pairs = cross_group_conflicts(&[math, phys]);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].crns(), ("10001", "20001"));
        assert_eq!(pairs[0].kind, ConflictKind::TimeOverlap);
    }

    #[test]
    fn test_cross_group_conflicts_ignores_same_group_overlaps() {
        // Two sections of one course always clash; that is not a conflict,
        // the search just never picks both.
        let math = group_of(
            "MATH 101",
            vec![
                section("10001", "MATH 101", "UT", "09:00 am-09:50 am"),
                section("10002", "MATH 101", "UT", "09:00 am-09:50 am"),
            ],
        );
        assert!(cross_group_conflicts(&[math]).is_empty());
    }

    #[test]
    fn test_exam_conflict_needs_same_date_and_overlap() {
        let base_a = section("10001", "MATH 101", "UT", "09:00 am-09:50 am");
        let base_b = section("20001", "PHYS 110", "MW", "10:00 am-10:50 am");

        let a = with_exam(base_a.clone(), "2026-05-10", "09:00 am-11:00 am");
        let same_day = with_exam(base_b.clone(), "2026-05-10", "10:00 am-12:00 pm");
        assert!(exams_conflict(&a, &same_day));
        assert!(exams_conflict(&same_day, &a));

        let other_day = with_exam(base_b.clone(), "2026-05-11", "10:00 am-12:00 pm");
        assert!(!exams_conflict(&a, &other_day));

        assert!(!exams_conflict(&a, &base_b));
        assert!(!exams_conflict(&base_a, &base_b));
    }

    #[test]
    fn test_exam_slots_touching_at_the_boundary_conflict() {
        // Same inclusive rule as meetings: a 9-11 exam and an 11-1 exam on
        // one date collide.
        let a = with_exam(
            section("10001", "MATH 101", "UT", "09:00 am-09:50 am"),
            "2026-05-10",
            "09:00 am-11:00 am",
        );
        let b = with_exam(
            section("20001", "PHYS 110", "MW", "10:00 am-10:50 am"),
            "2026-05-10",
            "11:00 am-01:00 pm",
        );
        assert!(exams_conflict(&a, &b));
    }

    #[test]
    fn test_final_exam_conflicts_use_first_candidate_per_group() {
        let math = group_of(
            "MATH 101",
            vec![
                with_exam(
                    section("10001", "MATH 101", "UT", "09:00 am-09:50 am"),
                    "2026-05-10",
                    "09:00 am-11:00 am",
                ),
                // Later candidates never enter the exam scan.
                with_exam(
                    section("10002", "MATH 101", "MW", "01:00 pm-01:50 pm"),
                    "2026-05-12",
                    "09:00 am-11:00 am",
                ),
            ],
        );
        let phys = group_of(
            "PHYS 110",
            vec![with_exam(
                section("20001", "PHYS 110", "MW", "10:00 am-10:50 am"),
                "2026-05-10",
                "10:00 am-12:00 pm",
            )],
        );
        let chem = group_of(
            "CHEM 111",
            vec![with_exam(
                section("30001", "CHEM 111", "R", "02:00 pm-02:50 pm"),
                "2026-05-12",
                "09:00 am-11:00 am",
            )],
        );

        let pairs = final_exam_conflicts(&[math, phys, chem]);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].crns(), ("10001", "20001"));
        assert_eq!(pairs[0].kind, ConflictKind::FinalExam);
    }
}
