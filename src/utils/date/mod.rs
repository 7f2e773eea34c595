// Date utility functions
// Calendar arithmetic shared by the index builder, navigation and view grids

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical `YYYY-MM-DD` key identifying one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), Self::FORMAT).map(Self)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Number of days in the given month (the last valid day).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Weekday of day 1 of the given month.
pub fn first_weekday_of_month(year: i32, month: u32) -> Option<Weekday> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|first| first.weekday())
}

/// Number of empty cells before day 1 in a grid whose columns start at
/// `first_day_of_week` (0 = Sunday, 1 = Monday, ...).
pub fn leading_blank_days(year: i32, month: u32, first_day_of_week: u8) -> u32 {
    first_weekday_of_month(year, month).map_or(0, |weekday| {
        let weekday = weekday.num_days_from_sunday();
        (weekday + 7 - u32::from(first_day_of_week % 7)) % 7
    })
}

/// Monday-to-Sunday bounds of the week containing `date`, clamped to the
/// representable calendar at either end.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = match date.weekday() {
        Weekday::Sun => 6,
        other => i64::from(other.number_from_monday()) - 1,
    };
    let start = date
        .checked_sub_signed(Duration::days(back))
        .unwrap_or(NaiveDate::MIN);
    let end = date
        .checked_add_signed(Duration::days(6 - back))
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Shift by whole months, normalized to day 1 of the resulting month.
pub fn shift_months(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let first = date.with_day(1)?;
    let months = Months::new(delta.unsigned_abs());
    if delta >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    }
}

/// Shift by whole years, normalized to January 1 of the resulting year.
pub fn shift_years(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(delta)?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Shift by whole days.
pub fn shift_days(date: NaiveDate, delta: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(delta)?)
}

/// Split a raw timestamp into its date part and optional time part.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` and `YYYY-MM-DD HH:MM[:SS]`.
pub fn split_timestamp(raw: &str) -> (&str, Option<&str>) {
    let raw = raw.trim();
    match raw.find(|c: char| c == 'T' || c == ' ') {
        Some(index) => (&raw[..index], Some(&raw[index + 1..])),
        None => (raw, None),
    }
}

pub fn parse_date_part(raw: &str) -> Option<NaiveDate> {
    let (date_part, _) = split_timestamp(raw);
    NaiveDate::parse_from_str(date_part, DateKey::FORMAT).ok()
}

/// Parse `H:MM`, `HH:MM` or `HH:MM:SS`; anything after the clock digits
/// (fractional seconds, offsets) is ignored.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    let end = raw
        .find(|c: char| !(c.is_ascii_digit() || c == ':'))
        .unwrap_or(raw.len());
    let mut parts = raw[..end].split(':');

    let hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = parts.next()?.parse().ok()?;
    let second: u32 = match parts.next() {
        Some(second) if !second.is_empty() => second.parse().ok()?,
        _ => 0,
    };

    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Time-of-day carried by a combined timestamp, if any.
pub fn parse_timestamp_time(raw: &str) -> Option<NaiveTime> {
    split_timestamp(raw).1.and_then(parse_time_of_day)
}

/// Every day from `start` to `end` inclusive. Empty when `end < start`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}
