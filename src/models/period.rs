//! Timesheet period model.
//!
//! This module contains the [`TimesheetPeriod`] type, the calendar month a
//! timesheet covers.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The calendar month covered by a timesheet.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::TimesheetPeriod;
///
/// let period = TimesheetPeriod::new(2023, 11).unwrap();
/// assert_eq!(period.days_in_month(), 30);
/// assert!(period.contains_day(30));
/// assert!(!period.contains_day(31));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct TimesheetPeriod {
    /// The calendar year.
    pub year: i32,
    /// The month of the year (1-12).
    pub month: u32,
    days_in_month: u32,
}

#[derive(Deserialize)]
struct RawPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriod> for TimesheetPeriod {
    type Error = EngineError;

    fn try_from(raw: RawPeriod) -> EngineResult<Self> {
        TimesheetPeriod::new(raw.year, raw.month)
    }
}

impl TimesheetPeriod {
    /// Creates a period for the given month, validating it against the calendar.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPeriod { year, month };

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;
        let last = next_month.pred_opt().ok_or_else(invalid)?;

        debug_assert_eq!(first.month(), last.month());

        Ok(Self {
            year,
            month,
            days_in_month: last.day(),
        })
    }

    /// Returns the number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    /// Returns every day of the month, starting at 1.
    pub fn days(&self) -> RangeInclusive<u32> {
        1..=self.days_in_month
    }

    /// Checks whether a day of month belongs to the period.
    pub fn contains_day(&self, day: u32) -> bool {
        self.days().contains(&day)
    }

    /// Returns the calendar date of a day in the period.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Returns `DayOutOfRange` unless the day belongs to the period.
    pub fn require_day(&self, day: u32) -> EngineResult<()> {
        if self.contains_day(day) {
            Ok(())
        } else {
            Err(EngineError::DayOutOfRange {
                day,
                days_in_month: self.days_in_month,
            })
        }
    }

    /// Returns the period label used in file names, e.g. `2023-11`.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}
