//! Weekly projection of an accepted schedule.

use serde::Serialize;

use crate::types::{Section, Weekday};

/// One weekday's sections in chronological placement order.
#[derive(Debug, Clone, Serialize)]
pub struct DayTimetable {
    pub day: Weekday,
    pub sections: Vec<Section>,
}

/// A display-ready, weekday-keyed view of one accepted schedule.
///
/// Days run Sunday through Friday; Saturday is omitted because nothing meets
/// then. A section appears once under every day it meets.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyView {
    pub days: Vec<DayTimetable>,
    /// CRNs to enter at registration. Lab pseudo-CRNs (they carry an `L`)
    /// are left out: registering the lecture registers its lab.
    pub registration_crns: Vec<String>,
    /// Credit hours the schedule carries, lab and lecture parts counted
    /// separately.
    pub total_credits: f32,
}

impl WeeklyView {
    /// Projects one pick per requirement group into per-day listings.
    pub fn assemble(picks: &[&Section]) -> WeeklyView {
        let mut days: Vec<DayTimetable> = Weekday::TEACHING_WEEK
            .into_iter()
            .map(|day| DayTimetable {
                day,
                sections: Vec::new(),
            })
            .collect();

        for section in picks {
            for slot in &mut days {
                if section.days.contains(slot.day) {
                    place_chronologically(&mut slot.sections, section);
                }
            }
        }

        let registration_crns = picks
            .iter()
            .filter(|section| !section.crn.contains('L'))
            .map(|section| section.crn.clone())
            .collect();
        let total_credits = picks.iter().map(|section| section.credit_hours()).sum();

        WeeklyView {
            days,
            registration_crns,
            total_credits,
        }
    }

    /// The timetable for one day, if it is part of the view.
    pub fn day(&self, day: Weekday) -> Option<&DayTimetable> {
        self.days.iter().find(|slot| slot.day == day)
    }
}

/// Inserts `section` at the number of already-placed sections it starts
/// strictly after.
///
/// Deliberately not a sort: strictly-after is only a partial order (ranges
/// that touch or overlap are mutually unordered), and counting placed
/// predecessors keeps placement deterministic in exactly those ties.
fn place_chronologically(placed: &mut Vec<Section>, section: &Section) {
    let position = placed
        .iter()
        .filter(|earlier| section.meeting.is_strictly_after(&earlier.meeting))
        .count();
    placed.insert(position, section.clone());
}
