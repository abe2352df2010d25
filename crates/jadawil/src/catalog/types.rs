//! Request and report types for catalog filtering and validation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{GroupKey, Section};

/// Campus/gender track filter applied while building candidate pools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackFilter {
    /// Tag a section's `track` must equal exactly; `None` admits every track.
    pub track: Option<String>,
}

impl TrackFilter {
    /// Admits only sections carrying the given tag.
    pub fn only(track: impl Into<String>) -> Self {
        TrackFilter {
            track: Some(track.into()),
        }
    }

    /// Admits every section regardless of track.
    pub fn any() -> Self {
        TrackFilter::default()
    }

    pub fn admits(&self, track: &str) -> bool {
        self.track.as_deref().map_or(true, |required| required == track)
    }
}

/// The admissible sections for one requirement group, in catalog order,
/// after filtering and after any pin restriction.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateSet {
    pub group: GroupKey,
    pub sections: Vec<Section>,
}

impl CandidateSet {
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn contains_crn(&self, crn: &str) -> bool {
        self.sections.iter().any(|section| section.crn == crn)
    }
}

/// Outcome of pre-search request validation.
///
/// Purely diagnostic: building the report never fails, and an unclean report
/// does not stop a caller from searching anyway (the search then aborts with
/// the matching error).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Requested course codes that are unparseable or absent from the term's
    /// catalog, as entered.
    pub unknown_courses: BTreeSet<String>,
    /// Pinned CRNs that none of the requested, found courses carries on any
    /// of its sections.
    pub unknown_crns: BTreeSet<String>,
}

impl ValidationReport {
    /// True when the request references only known courses and known CRNs.
    pub fn is_clean(&self) -> bool {
        self.unknown_courses.is_empty() && self.unknown_crns.is_empty()
    }
}
