//! Schedule search pipeline.
//!
//! One request flows through four stages: candidate pools are built from the
//! term's records, the pools are scanned for advisory cross-course and
//! final-exam conflicts, the bounded randomized search enumerates
//! combinations, and each conflict-free combination is projected into a
//! weekly view.

mod config;
mod conflict;
mod search;
mod weekly;

pub use config::{SearchLimits, MAX_COMBINATIONS, RESULT_CAP, TIME_BUDGET};
pub use conflict::{
    cross_group_conflicts, exams_conflict, final_exam_conflicts, schedule_has_conflict,
    sections_conflict, ConflictKind, ConflictPair,
};
pub use search::SearchStats;
pub use weekly::{DayTimetable, WeeklyView};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{self, TrackFilter};
use crate::error::ScheduleError;
use crate::types::RawSection;

/// One schedule request as the student states it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Required course codes, e.g. `"MATH 1110"`. Case and spacing are
    /// forgiven; duplicates collapse.
    pub courses: Vec<String>,
    /// Pinned CRNs. A pin that matches sections of a requested course makes
    /// those sections the only candidates for that course; pins matching
    /// nothing change nothing.
    #[serde(default)]
    pub pins: BTreeSet<String>,
    /// Track the sections must be offered under.
    #[serde(default)]
    pub filter: TrackFilter,
}

/// Everything one search produces.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Conflict-free schedules, at most [`SearchLimits::result_cap`], in the
    /// shuffled order the search found them.
    pub schedules: Vec<WeeklyView>,
    /// Advisory: every cross-course section pair in the pools that can never
    /// coexist.
    pub conflicts: Vec<ConflictPair>,
    /// Advisory: final-exam collisions between the requested courses.
    pub final_conflicts: Vec<ConflictPair>,
    pub stats: SearchStats,
}

/// The engine's entry point. Owns nothing but the stopping limits; every
/// search is independent and reads only the records it is handed.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    limits: SearchLimits,
}

impl Scheduler {
    pub fn new() -> Scheduler {
        Scheduler::default()
    }

    pub fn with_limits(limits: SearchLimits) -> Scheduler {
        Scheduler { limits }
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Runs the full pipeline for one request over the term's records.
    ///
    /// Callers are expected to run [`catalog::validate`] first and surface
    /// its report; a request that validation would have flagged fails here
    /// with the matching [`ScheduleError`]. The advisory conflict lists are
    /// returned even when the search finds nothing, and a search stopped by
    /// its time budget still returns what it accepted.
    pub fn search(
        &self,
        raw: &[RawSection],
        request: &ScheduleRequest,
    ) -> Result<SearchOutcome, ScheduleError> {
        let sets =
            catalog::build_candidate_sets(raw, &request.courses, &request.filter, &request.pins)?;
        info!(
            courses = request.courses.len(),
            groups = sets.len(),
            pins = request.pins.len(),
            "candidate pools ready"
        );

        let conflicts = cross_group_conflicts(&sets);
        let final_conflicts = final_exam_conflicts(&sets);

        let (accepted, stats) = search::run(&sets, &self.limits)?;
        info!(
            schedules = accepted.len(),
            tried = stats.combinations_tried,
            total = stats.combinations_total,
            elapsed = ?stats.elapsed,
            "search finished"
        );

        let schedules = accepted
            .iter()
            .map(|picks| WeeklyView::assemble(picks))
            .collect();

        Ok(SearchOutcome {
            schedules,
            conflicts,
            final_conflicts,
            stats,
        })
    }
}
