//! Core domain types shared by the catalog and scheduler subsystems.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use crate::interval::TimeInterval;

/// Days of the week in the order the timetable displays them, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Days on which sections can meet, in display order. The teaching week
    /// runs Sunday through Thursday with occasional Friday meetings; nothing
    /// meets on Saturday.
    pub const TEACHING_WEEK: [Weekday; 6] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Maps a feed day letter to its weekday. The feed marks Sunday `U` and
    /// Thursday `R`.
    pub fn from_letter(letter: char) -> Option<Weekday> {
        match letter.to_ascii_uppercase() {
            'U' => Some(Weekday::Sunday),
            'M' => Some(Weekday::Monday),
            'T' => Some(Weekday::Tuesday),
            'W' => Some(Weekday::Wednesday),
            'R' => Some(Weekday::Thursday),
            'F' => Some(Weekday::Friday),
            'S' => Some(Weekday::Saturday),
            _ => None,
        }
    }

    /// The feed letter for this weekday.
    pub fn letter(self) -> char {
        match self {
            Weekday::Sunday => 'U',
            Weekday::Monday => 'M',
            Weekday::Tuesday => 'T',
            Weekday::Wednesday => 'W',
            Weekday::Thursday => 'R',
            Weekday::Friday => 'F',
            Weekday::Saturday => 'S',
        }
    }

    fn bit(self) -> u8 {
        match self {
            Weekday::Sunday => 1 << 0,
            Weekday::Monday => 1 << 1,
            Weekday::Tuesday => 1 << 2,
            Weekday::Wednesday => 1 << 3,
            Weekday::Thursday => 1 << 4,
            Weekday::Friday => 1 << 5,
            Weekday::Saturday => 1 << 6,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        };
        f.write_str(name)
    }
}

/// The set of weekdays a section meets, parsed from feed letters like `"UTR"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySet(u8);

impl DaySet {
    /// Parses a feed day string. Characters that are not day letters are
    /// skipped, so padded or lightly malformed strings still yield the days
    /// they do name.
    pub fn parse(days: &str) -> DaySet {
        let mut set = DaySet::default();
        for day in days.chars().filter_map(Weekday::from_letter) {
            set.0 |= day.bit();
        }
        set
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & day.bit() != 0
    }

    /// True iff the two sets share at least one day.
    pub fn intersects(&self, other: &DaySet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Member days in display order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::TEACHING_WEEK
            .into_iter()
            .chain([Weekday::Saturday])
            .filter(|day| self.contains(*day))
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self.iter() {
            write!(f, "{}", day.letter())?;
        }
        Ok(())
    }
}

impl Serialize for DaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Subject code plus course number; identifies a course independent of its
/// sections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseKey {
    pub subject: String,
    pub number: String,
}

impl CourseKey {
    /// Parses user-entered text like `" math 1110 "` into a key.
    ///
    /// Uppercases and splits on whitespace the way the feed keys its records.
    /// Returns `None` unless the text is exactly `SUBJECT NUMBER`.
    pub fn parse(text: &str) -> Option<CourseKey> {
        let mut parts = text.split_whitespace();
        let subject = parts.next()?;
        let number = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(CourseKey {
            subject: subject.to_uppercase(),
            number: number.to_uppercase(),
        })
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.subject, self.number)
    }
}

impl Serialize for CourseKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One slot the search must fill.
///
/// Most courses contribute a single lecture group. A course whose catalog
/// entry also lists lab sections (their labels carry an `L`) contributes a
/// second, independent group, so the search picks its lecture and its lab
/// separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKey {
    Course(CourseKey),
    Lab(CourseKey),
}

impl GroupKey {
    pub fn course(&self) -> &CourseKey {
        match self {
            GroupKey::Course(key) | GroupKey::Lab(key) => key,
        }
    }

    pub fn is_lab(&self) -> bool {
        matches!(self, GroupKey::Lab(_))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Course(key) => write!(f, "{key}"),
            GroupKey::Lab(key) => write!(f, "{key} Lab"),
        }
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One section record as handed over by the catalog-acquisition side.
///
/// Times use the registrar's 12-hour format (`"10:00 am-11:15 am"`) and the
/// placeholder `"TBA"` marks anything not yet scheduled. Final-exam fields are
/// absent for courses without a sit-down exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSection {
    pub crn: String,
    pub subject: String,
    pub number: String,
    /// Section label, e.g. `"01"`; lab sections carry an `L`.
    pub section: String,
    pub title: String,
    /// Campus/gender track tag this section is offered under.
    pub track: String,
    /// Credit hours as published; lab/lecture splits read `"0.00/3.00"`.
    pub credits: String,
    /// Meeting day letters, e.g. `"UTR"`.
    pub days: String,
    /// Meeting time range, or `"TBA"`.
    pub time: String,
    pub instructor: String,
    pub location: String,
    pub seats_total: u32,
    pub seats_available: u32,
    /// Registrar's open flag; closed sections are never candidates.
    pub open: bool,
    /// Final-exam date, ISO `YYYY-MM-DD`.
    #[serde(default)]
    pub final_date: Option<String>,
    /// Final-exam time range in the usual feed format.
    #[serde(default)]
    pub final_time: Option<String>,
}

impl RawSection {
    pub fn course_key(&self) -> CourseKey {
        CourseKey {
            subject: self.subject.trim().to_uppercase(),
            number: self.number.trim().to_uppercase(),
        }
    }

    /// True when the record carries a concrete meeting time.
    pub fn is_scheduled(&self) -> bool {
        !self.time.contains("TBA") && !self.time.trim().is_empty()
    }

    pub fn is_lab(&self) -> bool {
        self.section.contains('L')
    }
}

/// A section whose meeting time parsed, ready for conflict tests and display.
///
/// Built by the catalog view; a record without a concrete meeting time never
/// becomes a `Section`, so times in here are always real intervals. Seat
/// counts ride along for display.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub crn: String,
    pub course: CourseKey,
    pub label: String,
    pub title: String,
    pub track: String,
    pub credits: String,
    pub days: DaySet,
    pub meeting: TimeInterval,
    pub instructor: String,
    pub location: String,
    pub seats_total: u32,
    pub seats_available: u32,
    pub final_exam: Option<ExamSlot>,
}

impl Section {
    pub fn is_lab(&self) -> bool {
        self.label.contains('L')
    }

    /// Credit hours this pick contributes to a schedule total.
    ///
    /// Split strings like `"0.00/3.00"` carry the lab hours before the slash
    /// and the lecture hours after it; plain strings apply as-is. Anything
    /// unparseable counts zero.
    pub fn credit_hours(&self) -> f32 {
        let text = match self.credits.split_once('/') {
            Some((lab, lecture)) => {
                if self.is_lab() {
                    lab
                } else {
                    lecture
                }
            }
            None => self.credits.as_str(),
        };
        text.trim().parse().unwrap_or(0.0)
    }
}

/// A section's final-exam sitting.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExamSlot {
    pub date: NaiveDate,
    pub time: TimeInterval,
}
