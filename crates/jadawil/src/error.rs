//! Error types for the schedule search engine.

use thiserror::Error;

use crate::types::GroupKey;

/// Conditions that abort a schedule search outright.
///
/// Unknown courses and unknown pinned CRNs are normally surfaced through
/// [`ValidationReport`](crate::catalog::ValidationReport) before a search is
/// attempted; `UnknownCourse` fires here only when a caller skips that step.
/// None of these conditions is transient, so there is nothing to retry: the
/// request itself has to change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The requested course code is unparseable or absent from the term's
    /// catalog.
    #[error("course {code:?} is not offered this term")]
    UnknownCourse { code: String },

    /// A requirement group has no admissible sections once closed,
    /// unscheduled, and off-track records are filtered out. Reported before
    /// pins apply, so pinning cannot mask an empty pool.
    #[error("no open scheduled sections remain for {group}")]
    MissingInfo { group: GroupKey },

    /// The candidate pools multiply out past the enumeration ceiling.
    #[error("{product} section combinations exceed the ceiling of {limit}")]
    CombinationOverflow { product: u64, limit: u64 },
}

impl ScheduleError {
    /// True when loosening the request (dropping a course, widening the
    /// track) could change the outcome, as opposed to the code simply not
    /// existing.
    pub fn is_over_constrained(&self) -> bool {
        matches!(
            self,
            ScheduleError::MissingInfo { .. } | ScheduleError::CombinationOverflow { .. }
        )
    }
}
