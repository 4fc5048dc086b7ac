//! Domain entities. Pure data structures for the closed-day calendar.
//!
//! Date keys are always `YYYY-MM-DD` and month keys `YYYY-MM`, zero-padded,
//! so that ASCII order and chronological order agree.

use crate::domain::DomainError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A calendar date with no time of day and no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDate(NaiveDate);

impl CivilDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a strict `YYYY-MM-DD` date key. Anything else is `InvalidDate`.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidDate(s.to_string());
        let bytes = s.as_bytes();
        if !s.is_ascii() || bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(invalid());
        }
        let number = |part: &str| -> Option<u32> {
            if part.bytes().all(|b| b.is_ascii_digit()) {
                part.parse().ok()
            } else {
                None
            }
        };
        let (Some(year), Some(month), Some(day)) =
            (number(&s[0..4]), number(&s[5..7]), number(&s[8..10]))
        else {
            return Err(invalid());
        };
        Self::from_ymd(year as i32, month, day).ok_or_else(invalid)
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// The month this date belongs to.
    pub fn month_key(self) -> MonthKey {
        MonthKey {
            year: self.year(),
            month: self.month(),
        }
    }

    /// Fixed-width `YYYY-MM-DD` wire form.
    pub fn date_key(self) -> String {
        self.to_string()
    }
}

impl From<NaiveDate> for CivilDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl Serialize for CivilDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CivilDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A (year, month) pair. Grouping and display key only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Returns `None` unless `month` is in 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// The following month; December wraps to January of the next year.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Every date of the month in ascending order.
    pub fn days(self) -> impl Iterator<Item = CivilDate> {
        (1..=31).map_while(move |day| CivilDate::from_ymd(self.year, self.month, day))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A manual exception to the recurrence rule for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideStatus {
    ForcedClosed,
    ForcedOpen,
}

impl OverrideStatus {
    /// Map a stored or submitted textual tag. Legacy Japanese labels are accepted
    /// alongside the canonical `closed` / `open`; anything else is no override.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "休業日" | "closed" => Some(Self::ForcedClosed),
            "営業日" | "open" => Some(Self::ForcedOpen),
            _ => None,
        }
    }

    /// Canonical tag written back to storage.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::ForcedClosed => "closed",
            Self::ForcedOpen => "open",
        }
    }
}

impl fmt::Display for OverrideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Persisted date -> override map. At most one entry per date.
///
/// An entry whose value is `None` carries a stored tag that is not a known
/// status. It never forces a closure; the merger treats it as "open".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideLedger {
    entries: BTreeMap<CivilDate, Option<OverrideStatus>>,
}

impl OverrideLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from raw stored (key, tag) pairs.
    ///
    /// Returns the ledger and the keys that were dropped because they are not
    /// valid `YYYY-MM-DD` dates.
    pub fn from_tags<I>(raw: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        let mut ledger = Self::new();
        let mut rejected = Vec::new();
        for (key, tag) in raw {
            match CivilDate::parse(&key) {
                Ok(date) => {
                    let status = tag.as_deref().and_then(OverrideStatus::from_tag);
                    ledger.entries.insert(date, status);
                }
                Err(_) => rejected.push(key),
            }
        }
        (ledger, rejected)
    }

    /// Effective override for `date`; `None` if absent or unrecognized.
    pub fn status(&self, date: CivilDate) -> Option<OverrideStatus> {
        self.entries.get(&date).copied().flatten()
    }

    pub fn contains(&self, date: CivilDate) -> bool {
        self.entries.contains_key(&date)
    }

    pub fn set(&mut self, date: CivilDate, status: OverrideStatus) {
        self.entries.insert(date, Some(status));
    }

    /// Delete the entry for `date`. Returns whether one existed.
    pub fn remove(&mut self, date: CivilDate) -> bool {
        self.entries.remove(&date).is_some()
    }

    /// Entries in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (CivilDate, Option<OverrideStatus>)> + '_ {
        self.entries.iter().map(|(d, s)| (*d, *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for OverrideLedger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.entries
                .iter()
                .map(|(date, status)| (date, status.map(OverrideStatus::as_tag))),
        )
    }
}

/// Final published calendar: month -> ascending closed dates.
///
/// Serializes as `{"YYYY-MM": ["YYYY-MM-DD", ...], ...}`. Every requested
/// month is present; a fully open month maps to an empty sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CalendarWindow {
    months: BTreeMap<MonthKey, Vec<CivilDate>>,
}

impl CalendarWindow {
    /// Closed dates of `month`, or `None` if the month is outside the window.
    pub fn get(&self, month: MonthKey) -> Option<&[CivilDate]> {
        self.months.get(&month).map(Vec::as_slice)
    }

    pub fn contains(&self, date: CivilDate) -> bool {
        self.get(date.month_key())
            .is_some_and(|days| days.binary_search(&date).is_ok())
    }

    pub fn months(&self) -> impl Iterator<Item = (MonthKey, &[CivilDate])> + '_ {
        self.months.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn month_keys(&self) -> Vec<String> {
        self.months.keys().map(ToString::to_string).collect()
    }

    /// Date keys for `month` in ascending order.
    pub fn date_keys(&self, month: MonthKey) -> Vec<String> {
        self.get(month)
            .map(|days| days.iter().map(|d| d.date_key()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

impl From<BTreeMap<MonthKey, Vec<CivilDate>>> for CalendarWindow {
    fn from(months: BTreeMap<MonthKey, Vec<CivilDate>>) -> Self {
        Self { months }
    }
}
