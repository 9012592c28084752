//! Calendar date parsing and half-open date ranges.
//!
//! Stays are expressed as `[start, end)`: the guest occupies the room on the
//! night of `start` and leaves on `end`, so a stay ending on a given day does
//! not collide with one starting that same day.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Wire and form format for every date in the application.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` value, naming `field` in the error.
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        CoreError::Validation(format!("{field} must be a date in YYYY-MM-DD format"))
    })
}

/// Format a date the way forms and URLs expect it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A validated `[start, end)` range of calendar dates.
///
/// `end` is never before `start`. The fields are private so every range in
/// the system went through [`DateRange::new`], including ranges read back from
/// session storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = CoreError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Build a range, rejecting an end date before the start date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if end < start {
            return Err(CoreError::Validation(format!(
                "End date {} is before start date {}",
                format_date(end),
                format_date(start)
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse both ends from `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, CoreError> {
        let start = parse_date(start, "Start date")?;
        let end = parse_date(end, "End date")?;
        Self::new(start, end)
    }

    /// Parse a guest stay, which must cover at least one night.
    ///
    /// A `[d, d)` range holds no nights but still matches the overlap
    /// predicate for any stay spanning `d`, so it is never booked.
    pub fn parse_stay(start: &str, end: &str) -> Result<Self, CoreError> {
        let range = Self::parse(start, end)?;
        if range.is_empty() {
            return Err(CoreError::Validation(
                "End date must be after start date".to_string(),
            ));
        }
        Ok(range)
    }

    /// A single-night range starting on `day`.
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day + Duration::days(1),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Half-open overlap test: `self.start < other.end && self.end > other.start`.
    ///
    /// This is the same predicate the availability queries run in SQL.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Whether `day` is one of the occupied days.
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day < self.end
    }

    /// Number of nights covered by the range.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn is_empty(&self) -> bool {
        self.nights() == 0
    }

    /// Every occupied day, `start` inclusive, `end` exclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d < end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, DATE_FORMAT).unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::parse(start, end).unwrap()
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2050-01-01", "start").unwrap(), d("2050-01-01"));
        assert_eq!(parse_date(" 2050-01-01 ", "start").unwrap(), d("2050-01-01"));
    }

    #[test]
    fn rejects_malformed_dates() {
        let err = parse_date("invalid", "Start date").unwrap_err();
        assert!(err.to_string().contains("Start date"));
        assert!(parse_date("01/02/2050", "start").is_err());
        assert!(parse_date("", "start").is_err());
    }

    #[test]
    fn end_before_start_is_rejected() {
        assert!(DateRange::parse("2050-01-05", "2050-01-04").is_err());
    }

    #[test]
    fn end_equal_to_start_is_an_empty_range() {
        let r = range("2050-01-05", "2050-01-05");
        assert!(r.is_empty());
        assert_eq!(r.days().count(), 0);
        // Still overlaps a stay across the 5th under the half-open predicate.
        assert!(r.overlaps(&range("2050-01-04", "2050-01-06")));
    }

    #[test]
    fn stays_need_at_least_one_night() {
        let err = DateRange::parse_stay("2050-01-05", "2050-01-05").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("must be after start date"));
        assert!(DateRange::parse_stay("2050-01-05", "2050-01-04").is_err());

        let stay = DateRange::parse_stay("2050-01-05", "2050-01-06").unwrap();
        assert!(!stay.is_empty());
        assert_eq!(stay.nights(), 1);
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let existing = range("2024-01-01", "2024-01-05");
        let requested = range("2024-01-05", "2024-01-10");
        assert!(!existing.overlaps(&requested));
        assert!(!requested.overlaps(&existing));
    }

    #[test]
    fn straddling_ranges_overlap() {
        let existing = range("2024-01-01", "2024-01-05");
        let requested = range("2024-01-04", "2024-01-06");
        assert!(existing.overlaps(&requested));
        assert!(requested.overlaps(&existing));
    }

    #[test]
    fn contained_range_overlaps() {
        let existing = range("2024-01-01", "2024-01-10");
        assert!(existing.overlaps(&range("2024-01-03", "2024-01-04")));
    }

    #[test]
    fn days_excludes_checkout_day() {
        let days: Vec<_> = range("2050-01-30", "2050-02-02").days().collect();
        assert_eq!(days, vec![d("2050-01-30"), d("2050-01-31"), d("2050-02-01")]);
    }

    #[test]
    fn single_day_spans_one_night() {
        let r = DateRange::single_day(d("2050-12-31"));
        assert_eq!(r.end(), d("2051-01-01"));
        assert_eq!(r.nights(), 1);
    }

    #[test]
    fn deserialize_rejects_inverted_range() {
        let json = r#"{"start":"2050-01-05","end":"2050-01-01"}"#;
        assert!(serde_json::from_str::<DateRange>(json).is_err());

        let json = r#"{"start":"2050-01-01","end":"2050-01-05"}"#;
        let r: DateRange = serde_json::from_str(json).unwrap();
        assert_eq!(r.nights(), 4);
    }
}
