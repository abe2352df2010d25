//! Clock-time intervals and the request-scoped parse memo.
//!
//! Every time in the catalog feed uses the registrar's 12-hour format
//! (`"10:00 am"`), and meeting ranges join two of them with a dash
//! (`"10:00 am-11:15 am"`). Final-exam times use the same format, so one
//! parser instance serves a whole request.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveTime;
use serde::{Serialize, Serializer};

/// Parse format for a single clock time. Meridiem matching is
/// case-insensitive, so `"10:00 AM"` and `"10:00 am"` both parse.
const TIME_FORMAT: &str = "%I:%M %p";

/// Display format; lowercase meridiem, matching the feed.
const TIME_DISPLAY_FORMAT: &str = "%I:%M %P";

/// An inclusive clock-time range within a single day.
///
/// Both endpoints belong to the interval, so two ranges that merely touch
/// (one ends exactly when the other starts) count as overlapping. Back-to-back
/// periods therefore register as conflicts.
///
/// `start <= end` always holds; ranges that would cross midnight do not
/// construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeInterval {
    /// Builds an interval from two clock times, requiring `start <= end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<TimeInterval> {
        (start <= end).then_some(TimeInterval { start, end })
    }

    /// Parses one clock time in the feed format, e.g. `"09:30 am"`.
    pub fn parse_time(text: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(text.trim(), TIME_FORMAT).ok()
    }

    /// Parses a meeting range like `"10:00 am-11:15 am"`.
    ///
    /// Returns `None` for anything else: placeholder values (`"TBA"`),
    /// missing dashes, unparseable clock times, or a range whose end precedes
    /// its start.
    pub fn parse_range(text: &str) -> Option<TimeInterval> {
        let (start, end) = text.split_once('-')?;
        TimeInterval::new(Self::parse_time(start)?, Self::parse_time(end)?)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// True iff `point` lies within the interval, endpoints included.
    pub fn contains(&self, point: NaiveTime) -> bool {
        self.start <= point && point <= self.end
    }

    /// True iff the two intervals share at least one instant.
    ///
    /// Symmetric, and inclusive at the endpoints: `09:00-11:00` overlaps
    /// `11:00-13:00`.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// True iff `self` begins strictly after `other` has ended.
    ///
    /// Only a partial order: two intervals that overlap or touch are neither
    /// before nor after one another. Day assembly relies on exactly that when
    /// placing sections chronologically.
    pub fn is_strictly_after(&self, other: &TimeInterval) -> bool {
        self.start > other.end
    }

    /// True iff `other` lies entirely within `self`, endpoints included.
    pub fn encloses(&self, other: &TimeInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(TIME_DISPLAY_FORMAT),
            self.end.format(TIME_DISPLAY_FORMAT)
        )
    }
}

impl Serialize for TimeInterval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Request-scoped memo for interval parsing.
///
/// The same handful of time strings repeats across hundreds of catalog
/// records, so a request parses each distinct string once and reuses the
/// result. The memo is owned by a single request and dropped with it; results
/// are identical with or without it.
#[derive(Debug, Default)]
pub struct IntervalParser {
    memo: HashMap<String, TimeInterval>,
}

impl IntervalParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a meeting range, consulting the memo first.
    ///
    /// Only successful parses are memoized; a string that fails once simply
    /// fails again.
    pub fn parse_range(&mut self, text: &str) -> Option<TimeInterval> {
        if let Some(hit) = self.memo.get(text) {
            return Some(*hit);
        }
        let interval = TimeInterval::parse_range(text)?;
        self.memo.insert(text.to_string(), interval);
        Some(interval)
    }

    /// Number of distinct range strings parsed so far.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}
