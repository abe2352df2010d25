//! Stopping limits for the combination search.

use std::time::Duration;

/// Ceiling on the Cartesian product of the candidate pools. Past it the
/// search refuses to enumerate at all rather than degrade.
pub const MAX_COMBINATIONS: u64 = 2_000_000;

/// Wall-clock budget for one search.
pub const TIME_BUDGET: Duration = Duration::from_secs(10);

/// Upper bound on the conflict-free schedules one search returns.
pub const RESULT_CAP: usize = 50;

/// Limits under which one search runs. The defaults suit an interactive
/// caller; batch callers can widen them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLimits {
    /// Wall-clock budget, measured on a monotonic clock and re-checked after
    /// every combination.
    pub time_budget: Duration,
    /// Stop as soon as this many conflict-free schedules are in hand.
    pub result_cap: usize,
    /// Refuse outright when the pools multiply out past this many
    /// combinations.
    pub max_combinations: u64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            time_budget: TIME_BUDGET,
            result_cap: RESULT_CAP,
            max_combinations: MAX_COMBINATIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = SearchLimits::default();
        assert_eq!(limits.time_budget, Duration::from_secs(10));
        assert_eq!(limits.result_cap, 50);
        assert_eq!(limits.max_combinations, 2_000_000);
    }
}
