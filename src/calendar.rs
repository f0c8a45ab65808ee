// 🌙 Calendar Collaborator - lunar ↔ solar conversion behind a trait
//
// The engines only ever see solar dates. Lunar input is converted first by a
// `CalendarConverter`; the bundled implementation reads a table of lunar month
// start dates, so the supported range is whatever the data file covers.

use crate::error::{Result, SajuError};
use anyhow::{bail, Context as AnyhowContext};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

// ============================================================================
// LUNAR DATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub is_leap_month: bool,
}

impl LunarDate {
    /// Parse `YYYY-MM-DD`; lunar months never exceed 30 days
    pub fn parse(value: &str, is_leap_month: bool) -> Result<Self> {
        let invalid = || SajuError::InvalidLunarDate {
            value: value.to_string(),
        };

        let parts: Vec<&str> = value.trim().split('-').collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(invalid());
        };

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let day: u32 = day.parse().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
            return Err(invalid());
        }

        Ok(LunarDate {
            year,
            month,
            day,
            is_leap_month,
        })
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        if self.is_leap_month {
            write!(f, " (leap)")?;
        }
        Ok(())
    }
}

// ============================================================================
// CONVERTER TRAIT
// ============================================================================

/// Must behave as a pure function from the caller's perspective
pub trait CalendarConverter: Send + Sync {
    fn lunar_to_solar(&self, date: &LunarDate) -> Result<NaiveDate>;

    fn solar_to_lunar(&self, date: NaiveDate) -> Result<LunarDate>;
}

impl<T: CalendarConverter + ?Sized> CalendarConverter for Box<T> {
    fn lunar_to_solar(&self, date: &LunarDate) -> Result<NaiveDate> {
        (**self).lunar_to_solar(date)
    }

    fn solar_to_lunar(&self, date: NaiveDate) -> Result<LunarDate> {
        (**self).solar_to_lunar(date)
    }
}

/// Rejects every conversion; used when no lunar table is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLunarCalendar;

impl CalendarConverter for NoLunarCalendar {
    fn lunar_to_solar(&self, date: &LunarDate) -> Result<NaiveDate> {
        Err(SajuError::conversion(format!(
            "no lunar calendar table configured to convert {date}"
        )))
    }

    fn solar_to_lunar(&self, date: NaiveDate) -> Result<LunarDate> {
        Err(SajuError::conversion(format!(
            "no lunar calendar table configured to convert {date}"
        )))
    }
}

// ============================================================================
// MONTH TABLE CONVERTER
// ============================================================================

/// One lunar month and the solar date of its first day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarMonth {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub leap: bool,
    pub start: NaiveDate,
    pub days: u32,
}

#[derive(Debug, Deserialize)]
struct MonthTableFile {
    months: Vec<LunarMonth>,
}

pub struct MonthTableConverter {
    /// Sorted by `start`
    months: Vec<LunarMonth>,
}

impl MonthTableConverter {
    /// Load a month table from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read lunar table: {:?}", path.as_ref()))?;

        Self::from_json(&content)
            .with_context(|| format!("Invalid lunar table: {:?}", path.as_ref()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let file: MonthTableFile =
            serde_json::from_str(content).context("Failed to parse lunar table JSON")?;

        for m in &file.months {
            if !(1..=12).contains(&m.month) || !(1..=30).contains(&m.days) {
                bail!(
                    "lunar month {}-{:02} has month/day count out of range ({} days)",
                    m.year,
                    m.month,
                    m.days
                );
            }
        }

        Ok(Self::from_months(file.months))
    }

    pub fn from_months(mut months: Vec<LunarMonth>) -> Self {
        months.sort_by_key(|m| m.start);
        MonthTableConverter { months }
    }

    pub fn month_count(&self) -> usize {
        self.months.len()
    }

    /// First and last solar day covered
    pub fn solar_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.months.first()?;
        let last = self.months.last()?;
        let end = last
            .start
            .checked_add_days(Days::new(u64::from(last.days.saturating_sub(1))))?;
        Some((first.start, end))
    }
}

impl CalendarConverter for MonthTableConverter {
    fn lunar_to_solar(&self, date: &LunarDate) -> Result<NaiveDate> {
        let month = self
            .months
            .iter()
            .find(|m| m.year == date.year && m.month == date.month && m.leap == date.is_leap_month)
            .ok_or_else(|| {
                SajuError::conversion(format!("lunar date {date} is outside the supported range"))
            })?;

        let offset = date
            .day
            .checked_sub(1)
            .filter(|&offset| offset < month.days)
            .ok_or_else(|| {
                SajuError::conversion(format!(
                    "lunar date {date} does not exist: month has {} days",
                    month.days
                ))
            })?;

        month
            .start
            .checked_add_days(Days::new(u64::from(offset)))
            .ok_or_else(|| SajuError::conversion(format!("lunar date {date} overflows")))
    }

    fn solar_to_lunar(&self, date: NaiveDate) -> Result<LunarDate> {
        let out_of_range =
            || SajuError::conversion(format!("solar date {date} is outside the supported range"));

        let idx = self.months.partition_point(|m| m.start <= date);
        let month = idx
            .checked_sub(1)
            .and_then(|i| self.months.get(i))
            .ok_or_else(out_of_range)?;

        let offset = (date - month.start).num_days();
        if offset >= i64::from(month.days) {
            return Err(out_of_range());
        }

        Ok(LunarDate {
            year: month.year,
            month: month.month,
            day: offset as u32 + 1,
            is_leap_month: month.leap,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
