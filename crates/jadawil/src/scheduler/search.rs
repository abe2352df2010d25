//! Bounded, randomized enumeration of section combinations.
//!
//! The candidate pools are never materialized as tuples. The search shuffles
//! the flat index space `0..N` (N is the product of pool sizes, capped well
//! below memory trouble) and decodes each index into one pick per group, so
//! combinations arrive in uniformly random order and early stops still leave
//! a representative sample.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::CandidateSet;
use crate::error::ScheduleError;
use crate::types::Section;

use super::config::SearchLimits;
use super::conflict::schedule_has_conflict;

/// One pick per requirement group, in group order.
pub(crate) type Picks<'a> = Vec<&'a Section>;

/// Counters from one search run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SearchStats {
    /// Size of the full combination space.
    pub combinations_total: u64,
    /// Combinations actually decoded and conflict-checked before a stop
    /// condition hit.
    pub combinations_tried: u64,
    /// Wall-clock time the enumeration took.
    pub elapsed: Duration,
}

/// Multiplies out the pool sizes, refusing past the ceiling.
///
/// The product saturates rather than wraps, so absurd inputs still compare
/// correctly against the limit. A product exactly at the ceiling is allowed.
pub(crate) fn combination_count(
    sets: &[CandidateSet],
    limit: u64,
) -> Result<u64, ScheduleError> {
    let product = sets
        .iter()
        .fold(1u64, |product, set| product.saturating_mul(set.len() as u64));
    if product > limit {
        warn!(product, limit, "combination space too large, refusing to enumerate");
        return Err(ScheduleError::CombinationOverflow { product, limit });
    }
    Ok(product)
}

/// Runs the bounded search over the candidate pools.
///
/// Both stop conditions (result cap, time budget) are re-checked after every
/// decoded combination, so one slow conflict scan can overrun the budget by
/// at most a single iteration. Results accepted before a stop are kept.
pub(crate) fn run<'a>(
    sets: &'a [CandidateSet],
    limits: &SearchLimits,
) -> Result<(Vec<Picks<'a>>, SearchStats), ScheduleError> {
    if sets.is_empty() {
        let stats = SearchStats {
            combinations_total: 0,
            combinations_tried: 0,
            elapsed: Duration::ZERO,
        };
        return Ok((Vec::new(), stats));
    }

    let total = combination_count(sets, limits.max_combinations)?;

    let mut order: Vec<u64> = (0..total).collect();
    order.shuffle(&mut rand::thread_rng());
    debug!(combinations = total, "search space shuffled");

    let started = Instant::now();
    let mut accepted: Vec<Picks<'a>> = Vec::new();
    let mut tried = 0u64;

    for index in order {
        let picks = decode(sets, index);
        tried += 1;
        if !schedule_has_conflict(&picks) {
            accepted.push(picks);
        }
        if accepted.len() >= limits.result_cap || started.elapsed() >= limits.time_budget {
            break;
        }
    }

    let stats = SearchStats {
        combinations_total: total,
        combinations_tried: tried,
        elapsed: started.elapsed(),
    };
    debug!(
        accepted = accepted.len(),
        tried = stats.combinations_tried,
        elapsed = ?stats.elapsed,
        "enumeration stopped"
    );
    Ok((accepted, stats))
}

/// Decodes a flat index into one pick per group, mixed radix with the first
/// group most significant. Distinct indices yield distinct combinations.
fn decode(sets: &[CandidateSet], mut index: u64) -> Picks<'_> {
    let mut picks = Vec::with_capacity(sets.len());
    for set in sets.iter().rev() {
        let size = set.len() as u64;
        picks.push(&set.sections[(index % size) as usize]);
        index /= size;
    }
    picks.reverse();
    picks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::TimeInterval;
    use crate::types::{CourseKey, DaySet, GroupKey};
    use std::collections::BTreeSet;

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

    fn group_of(course: &str, sections: Vec<Section>) -> CandidateSet {
        CandidateSet {
            group: GroupKey::Course(CourseKey::parse(course).unwrap()),
            sections,
        }
    }

    /// A pool of `size` interchangeable sections, all meeting at the same
    /// slot on `days`.
    fn pool(course: &str, size: usize, days: &str, time: &str) -> CandidateSet {
        let sections = (0..size)
            .map(|i| section(&format!("{course}-{i}"), course, days, time))
            .collect();
        group_of(course, sections)
    }

    fn crn_sets(accepted: &[Picks<'_>]) -> BTreeSet<Vec<String>> {
        accepted
            .iter()
            .map(|picks| picks.iter().map(|s| s.crn.clone()).collect())
            .collect()
    }

    #[test]
    fn test_combination_count_allows_the_exact_ceiling() {
        let sets = vec![
            pool("MATH 101", 2000, "U", "09:00 am-09:50 am"),
            pool("PHYS 110", 1000, "M", "09:00 am-09:50 am"),
        ];
        assert_eq!(combination_count(&sets, 2_000_000).unwrap(), 2_000_000);
    }

    #[test]
    fn test_combination_count_rejects_one_past_the_ceiling() {
        let sets = vec![
            pool("MATH 101", 3, "U", "09:00 am-09:50 am"),
            pool("PHYS 110", 3, "M", "09:00 am-09:50 am"),
        ];
        let err = combination_count(&sets, 8).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::CombinationOverflow {
                product: 9,
                limit: 8
            }
        );
    }

    #[test]
    fn test_search_accepts_only_conflict_free_combinations() {
        let math = group_of(
            "MATH 101",
            vec![
                section("M1", "MATH 101", "U", "09:00 am-09:50 am"),
                section("M2", "MATH 101", "M", "09:00 am-09:50 am"),
            ],
        );
        let phys = group_of(
            "PHYS 110",
            vec![
                // Collides with M1 on Sunday mornings.
                section("P1", "PHYS 110", "U", "09:30 am-10:20 am"),
                section("P2", "PHYS 110", "T", "09:00 am-09:50 am"),
            ],
        );

        let sets = [math, phys];
        let (accepted, stats) = run(&sets, &SearchLimits::default()).unwrap();

        let expected: BTreeSet<Vec<String>> = [
            vec!["M1".to_string(), "P2".to_string()],
            vec!["M2".to_string(), "P1".to_string()],
            vec!["M2".to_string(), "P2".to_string()],
        ]
        .into_iter()
        .collect();
        assert_eq!(crn_sets(&accepted), expected);
        assert_eq!(stats.combinations_total, 4);
        assert_eq!(stats.combinations_tried, 4);
    }

    #[test]
    fn test_search_visits_every_combination_when_nothing_stops_it() {
        let sets = vec![
            pool("MATH 101", 2, "U", "09:00 am-09:50 am"),
            pool("PHYS 110", 3, "M", "09:00 am-09:50 am"),
        ];
        let (accepted, stats) = run(&sets, &SearchLimits::default()).unwrap();
        assert_eq!(accepted.len(), 6);
        assert_eq!(crn_sets(&accepted).len(), 6);
        assert_eq!(stats.combinations_tried, 6);
    }

    #[test]
    fn test_result_cap_stops_the_enumeration() {
        let sets = vec![
            pool("MATH 101", 3, "U", "09:00 am-09:50 am"),
            pool("PHYS 110", 3, "M", "09:00 am-09:50 am"),
        ];
        let limits = SearchLimits {
            result_cap: 4,
            ..SearchLimits::default()
        };
        let (accepted, stats) = run(&sets, &limits).unwrap();
        // Every combination is conflict-free, so the cap is the stop.
        assert_eq!(accepted.len(), 4);
        assert_eq!(stats.combinations_tried, 4);
        assert_eq!(stats.combinations_total, 9);
    }

    #[test]
    fn test_exhausted_time_budget_stops_after_the_current_combination() {
        let sets = vec![
            pool("MATH 101", 2, "U", "09:00 am-09:50 am"),
            pool("PHYS 110", 2, "M", "09:00 am-09:50 am"),
        ];
        let limits = SearchLimits {
            time_budget: Duration::ZERO,
            ..SearchLimits::default()
        };
        let (accepted, stats) = run(&sets, &limits).unwrap();
        // The budget is checked after each combination, so exactly one is
        // tried, and what was accepted is kept.
        assert_eq!(stats.combinations_tried, 1);
        assert_eq!(accepted.len(), 1);
    }

    #[test]
    fn test_no_groups_means_no_schedules() {
        let (accepted, stats) = run(&[], &SearchLimits::default()).unwrap();
        assert!(accepted.is_empty());
        assert_eq!(stats.combinations_total, 0);
        assert_eq!(stats.combinations_tried, 0);
    }
}
