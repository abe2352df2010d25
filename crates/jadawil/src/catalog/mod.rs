//! Catalog view: turns a term's raw section records into per-requirement
//! candidate pools, and checks requests against the catalog before a search.
//!
//! The view is read-only and request-scoped. Each call regroups the records
//! it is handed; nothing here caches across requests or mutates the feed.

mod types;

pub use types::{CandidateSet, TrackFilter, ValidationReport};

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::ScheduleError;
use crate::interval::{IntervalParser, TimeInterval};
use crate::types::{CourseKey, DaySet, ExamSlot, GroupKey, RawSection, Section};

/// Feed format for final-exam dates.
const EXAM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Checks a request against the catalog without running a search.
///
/// Reports requested course codes the term does not offer (or that do not
/// parse as `SUBJECT NUMBER`), and pinned CRNs that appear on no section of
/// any requested course that was found. Existence is judged on the full
/// record set, before any track or availability filtering, so a pin on a
/// closed section is still a known pin.
pub fn validate(
    raw: &[RawSection],
    requested: &[String],
    pins: &BTreeSet<String>,
) -> ValidationReport {
    let index = index_by_course(raw);

    let mut unknown_courses = BTreeSet::new();
    let mut found = Vec::new();
    for code in requested {
        match CourseKey::parse(code) {
            Some(key) if index.contains_key(&key) => found.push(key),
            _ => {
                unknown_courses.insert(code.clone());
            }
        }
    }

    let mut unknown_crns = BTreeSet::new();
    for crn in pins {
        let known = found.iter().any(|key| {
            index[key].iter().any(|record| record.crn == *crn)
        });
        if !known {
            unknown_crns.insert(crn.clone());
        }
    }

    ValidationReport {
        unknown_courses,
        unknown_crns,
    }
}

/// Builds the candidate pool for every requirement group in the request.
///
/// Each requested course contributes its admissible lecture sections: open,
/// concretely scheduled, and on the requested track. Records whose labels
/// carry an `L` are lab sections; when a course has any, they form a second
/// group chosen independently of the lecture. Pinned CRNs then restrict any
/// group they appear in to exactly the pinned sections; pins matching no
/// group leave every pool untouched.
///
/// Fails with [`ScheduleError::UnknownCourse`] for a code the term does not
/// offer and [`ScheduleError::MissingInfo`] when a course's lecture pool
/// filters down to nothing. The emptiness check runs before pins apply.
pub fn build_candidate_sets(
    raw: &[RawSection],
    requested: &[String],
    filter: &TrackFilter,
    pins: &BTreeSet<String>,
) -> Result<Vec<CandidateSet>, ScheduleError> {
    let index = index_by_course(raw);
    let mut parser = IntervalParser::new();
    let mut sets = Vec::new();

    for key in normalize_requested(requested)? {
        let records = index.get(&key).ok_or_else(|| ScheduleError::UnknownCourse {
            code: key.to_string(),
        })?;

        let mut lectures = Vec::new();
        let mut labs = Vec::new();
        for record in records {
            if !record.open || !record.is_scheduled() || !filter.admits(&record.track) {
                continue;
            }
            let Some(section) = build_section(record, &mut parser) else {
                continue;
            };
            if record.is_lab() {
                labs.push(section);
            } else {
                lectures.push(section);
            }
        }

        if lectures.is_empty() {
            return Err(ScheduleError::MissingInfo {
                group: GroupKey::Course(key),
            });
        }

        debug!(
            course = %key,
            lectures = lectures.len(),
            labs = labs.len(),
            "candidate pool built"
        );
        sets.push(CandidateSet {
            group: GroupKey::Course(key.clone()),
            sections: lectures,
        });
        if !labs.is_empty() {
            sets.push(CandidateSet {
                group: GroupKey::Lab(key),
                sections: labs,
            });
        }
    }

    for set in &mut sets {
        let pinned: Vec<Section> = set
            .sections
            .iter()
            .filter(|section| pins.contains(&section.crn))
            .cloned()
            .collect();
        if !pinned.is_empty() {
            debug!(group = %set.group, pinned = pinned.len(), "pin restricts pool");
            set.sections = pinned;
        }
    }

    Ok(sets)
}

/// Finds the scheduled sections of the given courses whose meeting time lies
/// entirely within `window`, endpoints included.
///
/// Built for elective hunting ("what fits my free 10:00-12:15 slot?"), so it
/// is deliberately lenient: codes that do not parse or are not offered are
/// skipped rather than reported, and seat availability is ignored.
pub fn sections_within(
    raw: &[RawSection],
    course_codes: &[String],
    filter: &TrackFilter,
    window: TimeInterval,
) -> Vec<Section> {
    let index = index_by_course(raw);
    let mut parser = IntervalParser::new();
    let mut matches = Vec::new();

    for code in course_codes {
        let Some(key) = CourseKey::parse(code) else {
            continue;
        };
        let Some(records) = index.get(&key) else {
            continue;
        };
        for record in records {
            if !record.is_scheduled() || !filter.admits(&record.track) {
                continue;
            }
            let Some(section) = build_section(record, &mut parser) else {
                continue;
            };
            if window.encloses(&section.meeting) {
                matches.push(section);
            }
        }
    }

    matches
}

/// Groups the term's records by course key, preserving feed order within
/// each course.
fn index_by_course(raw: &[RawSection]) -> HashMap<CourseKey, Vec<&RawSection>> {
    let mut index: HashMap<CourseKey, Vec<&RawSection>> = HashMap::new();
    for record in raw {
        index.entry(record.course_key()).or_default().push(record);
    }
    index
}

/// Parses the requested codes into keys, dropping duplicates while keeping
/// first-seen order.
fn normalize_requested(requested: &[String]) -> Result<Vec<CourseKey>, ScheduleError> {
    let mut keys: Vec<CourseKey> = Vec::new();
    for code in requested {
        let key = CourseKey::parse(code).ok_or_else(|| ScheduleError::UnknownCourse {
            code: code.clone(),
        })?;
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    Ok(keys)
}

/// Builds a schedulable section from a raw record, or `None` when the meeting
/// time does not parse.
///
/// The final-exam slot is kept only when the record carries both a parseable
/// date and a concrete, parseable time; a partial or placeholder exam entry
/// degrades to no exam rather than failing the section.
fn build_section(record: &RawSection, parser: &mut IntervalParser) -> Option<Section> {
    let meeting = parser.parse_range(&record.time)?;

    let final_exam = match (&record.final_date, &record.final_time) {
        (Some(date), Some(time)) if !time.contains("TBA") => {
            let date = NaiveDate::parse_from_str(date.trim(), EXAM_DATE_FORMAT).ok();
            date.zip(parser.parse_range(time))
                .map(|(date, time)| ExamSlot { date, time })
        }
        _ => None,
    };

    Some(Section {
        crn: record.crn.clone(),
        course: record.course_key(),
        label: record.section.clone(),
        title: record.title.clone(),
        track: record.track.clone(),
        credits: record.credits.clone(),
        days: DaySet::parse(&record.days),
        meeting,
        instructor: record.instructor.clone(),
        location: record.location.clone(),
        seats_total: record.seats_total,
        seats_available: record.seats_available,
        final_exam,
    })
}
