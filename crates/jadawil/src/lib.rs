//! Schedule search and conflict detection over a university section catalog.
//!
//! Given a term's published section records, the required course codes, an
//! optional set of pinned CRNs, and a campus/gender track, the engine
//! assembles per-course candidate pools, enumerates section combinations in
//! random order under a wall-clock budget and a result cap, and returns the
//! conflict-free ones as display-ready weekly timetables. Alongside the
//! schedules it reports which cross-course section pairs can never coexist
//! and which courses sit overlapping final exams.
//!
//! Catalog acquisition, persistence, and any user-facing front end live
//! elsewhere. The engine consumes already-fetched [`RawSection`] records and
//! holds no state between requests.
//!
//! ```no_run
//! use jadawil::{ScheduleRequest, Scheduler, TrackFilter};
//!
//! # fn load_records() -> Vec<jadawil::RawSection> { Vec::new() }
//! let records = load_records();
//! let request = ScheduleRequest {
//!     courses: vec!["MATH 1110".into(), "PHYS 1105".into()],
//!     pins: Default::default(),
//!     filter: TrackFilter::only("B"),
//! };
//!
//! let report = jadawil::validate(&records, &request.courses, &request.pins);
//! assert!(report.is_clean());
//!
//! let outcome = Scheduler::new().search(&records, &request)?;
//! println!("{} schedules", outcome.schedules.len());
//! # Ok::<(), jadawil::ScheduleError>(())
//! ```

pub mod catalog;
pub mod error;
pub mod interval;
pub mod scheduler;
pub mod types;

pub use catalog::{validate, CandidateSet, TrackFilter, ValidationReport};
pub use error::ScheduleError;
pub use interval::TimeInterval;
pub use scheduler::{
    ConflictKind, ConflictPair, ScheduleRequest, Scheduler, SearchLimits, SearchOutcome,
    SearchStats, WeeklyView,
};
pub use types::{CourseKey, GroupKey, RawSection, Section, Weekday};
