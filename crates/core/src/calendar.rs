//! Month arithmetic and block bookkeeping for the admin reservations calendar.
//!
//! The calendar form names its checkboxes after the room and day they
//! control:
//!
//! - `remove_block_{room_id}_{YYYY-MM-DD}`: rendered checked for an existing
//!   block; unchecking it (so the field is not posted) removes the block.
//! - `add_block_{room_id}_{YYYY-MM-DD}`: rendered unchecked for a free day;
//!   checking it adds a one-day block.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::LazyLock;

use chrono::{Datelike, Months, NaiveDate};
use regex::Regex;

use crate::dates::{format_date, DateRange, DATE_FORMAT};
use crate::error::CoreError;
use crate::types::DbId;

static ADD_BLOCK_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^add_block_(\d+)_(\d{4}-\d{2}-\d{2})$").expect("static regex is valid")
});

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    first_day: NaiveDate,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(|| CoreError::Validation(format!("Invalid month {year}-{month}")))
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// Resolve the `?y=&m=` query pair, falling back to the month of `today`
    /// when either is absent.
    pub fn from_query(
        year: Option<i32>,
        month: Option<u32>,
        today: NaiveDate,
    ) -> Result<Self, CoreError> {
        match (year, month) {
            (Some(y), Some(m)) => Self::new(y, m),
            _ => Ok(Self::containing(today)),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day.pred_opt().unwrap_or(self.first_day)
    }

    /// The whole month as a `[first, first of next month)` range.
    pub fn range(&self) -> DateRange {
        // first_day < next().first_day always holds.
        DateRange::new(self.first_day, self.next().first_day)
            .unwrap_or_else(|_| DateRange::single_day(self.first_day))
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.range().days()
    }

    pub fn next(&self) -> Self {
        Self {
            first_day: self
                .first_day
                .checked_add_months(Months::new(1))
                .unwrap_or(self.first_day),
        }
    }

    pub fn previous(&self) -> Self {
        Self {
            first_day: self
                .first_day
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.first_day),
        }
    }

    /// Display label such as `January 2050`.
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }
}

/// The slice of a `room_restrictions` row the calendar needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestrictionSpan {
    pub id: DbId,
    pub dates: DateRange,
    /// `None` for a manual block.
    pub reservation_id: Option<DbId>,
}

/// Per-day occupancy of one room within one month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomOccupancy {
    /// Day -> id of the reservation occupying it.
    pub reservations: BTreeMap<NaiveDate, DbId>,
    /// Day -> id of the block restriction covering it.
    pub blocks: BTreeMap<NaiveDate, DbId>,
}

impl RoomOccupancy {
    /// Spread every restriction over the days of `month` it covers.
    pub fn for_month(month: CalendarMonth, spans: &[RestrictionSpan]) -> Self {
        let window = month.range();
        let mut occupancy = Self::default();
        for span in spans {
            for day in span.dates.days().filter(|d| window.contains(*d)) {
                match span.reservation_id {
                    Some(reservation_id) => {
                        occupancy.reservations.insert(day, reservation_id);
                    }
                    None => {
                        occupancy.blocks.insert(day, span.id);
                    }
                }
            }
        }
        occupancy
    }
}

pub fn remove_block_field(room_id: DbId, day: NaiveDate) -> String {
    format!("remove_block_{room_id}_{}", format_date(day))
}

pub fn add_block_field(room_id: DbId, day: NaiveDate) -> String {
    format!("add_block_{room_id}_{}", format_date(day))
}

/// Block ids present in `prior` whose keep-checkbox was not posted back.
///
/// A multi-day block appears under several days but is reported once.
pub fn blocks_to_remove(
    room_id: DbId,
    prior: &BTreeMap<NaiveDate, DbId>,
    posted: &HashSet<String>,
) -> Vec<DbId> {
    let mut removed = BTreeSet::new();
    let mut kept = BTreeSet::new();
    for (day, block_id) in prior {
        if posted.contains(&remove_block_field(room_id, *day)) {
            kept.insert(*block_id);
        } else {
            removed.insert(*block_id);
        }
    }
    removed.difference(&kept).copied().collect()
}

/// `(room_id, day)` pairs for every posted `add_block_*` field.
pub fn blocks_to_add<'a>(posted: impl IntoIterator<Item = &'a str>) -> Vec<(DbId, NaiveDate)> {
    let mut additions = BTreeSet::new();
    for field in posted {
        let Some(caps) = ADD_BLOCK_FIELD.captures(field) else {
            continue;
        };
        let room_id = caps[1].parse::<DbId>();
        let day = NaiveDate::parse_from_str(&caps[2], DATE_FORMAT);
        if let (Ok(room_id), Ok(day)) = (room_id, day) {
            additions.insert((room_id, day));
        }
    }
    additions.into_iter().collect()
}
