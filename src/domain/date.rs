use std::fmt;

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::app::{BirthboardError, Result};

/// A day picked in the calendar, as the calendar reports it.
///
/// `month0` is zero-based (January is 0). Out-of-range values are kept as-is:
/// the request parameters pass them through, and [`calendar_date`](Self::calendar_date)
/// rolls them over the way a JavaScript `Date` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSelection {
    pub year: i32,
    pub month0: u32,
    pub day: u32,
}

impl DateSelection {
    pub fn new(year: i32, month0: u32, day: u32) -> Self {
        Self { year, month0, day }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
            day: date.day(),
        }
    }

    /// 1-based month, zero-padded to two characters.
    pub fn month_param(&self) -> String {
        format!("{:02}", u64::from(self.month0) + 1)
    }

    /// Day of month, zero-padded to two characters.
    pub fn day_param(&self) -> String {
        format!("{:02}", self.day)
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let months = i64::from(self.year) * 12 + i64::from(self.month0);
        let year = i32::try_from(months.div_euclid(12)).ok()?;
        let month = u32::try_from(months.rem_euclid(12) + 1).ok()?;
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        first.checked_add_signed(TimeDelta::try_days(i64::from(self.day) - 1)?)
    }
}

/// Display form of the chosen day, e.g. `January 05`. The year is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedDate(String);

impl SelectedDate {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn from_selection(selection: &DateSelection) -> Result<Self> {
        let date = selection.calendar_date().ok_or_else(|| {
            BirthboardError::InvalidDate(format!(
                "{}-{}-{}",
                selection.year,
                selection.month_param(),
                selection.day_param()
            ))
        })?;
        Ok(Self::from_date(date))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%B %d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SelectedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
