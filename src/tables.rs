// 📜 Lookup Tables - solar terms, start of spring, five-tiger and five-rat rules
//
// Everything here is const data. Solar-term instants are approximated by a
// fixed calendar day per month; only the start of spring has a per-year table.

use crate::error::{Result, SajuError};
use crate::symbols::{Branch, Stem};
use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// SEXAGENARY EPOCHS
// ============================================================================

/// Year 4 CE opened a Gap-Ja year, so `year - 4` is the cycle position
pub const YEAR_EPOCH: i64 = 4;

/// 2024-02-10 is a Gap-Jin day, as days since 0001-01-01 counting that day as 1
pub const DAY_EPOCH_DAYS_FROM_CE: i64 = 738_926;
pub const DAY_EPOCH_STEM: i64 = 0;
pub const DAY_EPOCH_BRANCH: i64 = 4;

// ============================================================================
// START OF SPRING (입춘)
// ============================================================================

const SPRING_TABLE_FIRST_YEAR: i32 = 1940;

/// February day of 입춘 for 1940..=2060
const SPRING_PIVOT_DAYS: [u8; 121] = [
    5, 4, 4, 5, 5, 4, 4, 4, 5, 4, // 1940
    4, 4, 5, 4, 4, 4, 5, 4, 4, 4, // 1950
    5, 4, 4, 4, 5, 4, 4, 4, 5, 4, // 1960
    4, 4, 5, 4, 4, 4, 5, 4, 4, 4, // 1970
    5, 4, 4, 4, 4, 4, 4, 4, 4, 4, // 1980
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, // 1990
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, // 2000
    4, 4, 4, 4, 4, 4, 4, 3, 4, 4, // 2010
    4, 3, 4, 4, 4, 3, 4, 4, 4, 3, // 2020
    4, 4, 4, 3, 4, 4, 4, 3, 4, 4, // 2030
    4, 3, 4, 4, 4, 3, 4, 4, 4, 3, // 2040
    4, 4, 4, 3, 4, 4, 4, 3, 4, 4, // 2050
    4, // 2060
];

/// Fallback outside the table range
const SPRING_PIVOT_DEFAULT_DAY: u8 = 4;

/// February day the sexagenary year turns over in `year`
pub fn spring_pivot_day(year: i32) -> u32 {
    let day = usize::try_from(year - SPRING_TABLE_FIRST_YEAR)
        .ok()
        .and_then(|offset| SPRING_PIVOT_DAYS.get(offset).copied())
        .unwrap_or(SPRING_PIVOT_DEFAULT_DAY);
    u32::from(day)
}

pub fn spring_pivot(year: i32) -> Result<NaiveDate> {
    ymd(year, 2, spring_pivot_day(year))
}

// ============================================================================
// SOLAR TERMS (절기)
// ============================================================================

/// One month-opening solar term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarTerm {
    /// Chart month opened by this term: 1 = tiger month (In) ... 12 = ox month (Chuk)
    pub month_index: u8,
    pub name: &'static str,
    pub korean: &'static str,
    /// Approximate day of the solar month the term falls on
    pub approx_day: u32,
    pub solar_month: u32,
}

/// In calendar order, January first
#[rustfmt::skip]
pub const SOLAR_TERMS: [SolarTerm; 12] = [
    SolarTerm { month_index: 12, name: "Minor Cold", korean: "소한", approx_day: 6, solar_month: 1 },
    SolarTerm { month_index: 1, name: "Start of Spring", korean: "입춘", approx_day: 4, solar_month: 2 },
    SolarTerm { month_index: 2, name: "Awakening of Insects", korean: "경칩", approx_day: 6, solar_month: 3 },
    SolarTerm { month_index: 3, name: "Clear and Bright", korean: "청명", approx_day: 5, solar_month: 4 },
    SolarTerm { month_index: 4, name: "Start of Summer", korean: "입하", approx_day: 6, solar_month: 5 },
    SolarTerm { month_index: 5, name: "Grain in Ear", korean: "망종", approx_day: 6, solar_month: 6 },
    SolarTerm { month_index: 6, name: "Minor Heat", korean: "소서", approx_day: 7, solar_month: 7 },
    SolarTerm { month_index: 7, name: "Start of Autumn", korean: "입추", approx_day: 7, solar_month: 8 },
    SolarTerm { month_index: 8, name: "White Dew", korean: "백로", approx_day: 8, solar_month: 9 },
    SolarTerm { month_index: 9, name: "Cold Dew", korean: "한로", approx_day: 8, solar_month: 10 },
    SolarTerm { month_index: 10, name: "Start of Winter", korean: "입동", approx_day: 7, solar_month: 11 },
    SolarTerm { month_index: 11, name: "Major Snow", korean: "대설", approx_day: 7, solar_month: 12 },
];

impl SolarTerm {
    /// Boundary date in a given calendar year. Start of spring follows the
    /// per-year pivot so month and year pillars turn over together.
    pub fn boundary_in(&self, year: i32) -> Result<NaiveDate> {
        let day = if self.month_index == 1 {
            spring_pivot_day(year)
        } else {
            self.approx_day
        };
        ymd(year, self.solar_month, day)
    }
}

/// A solar term pinned to a concrete date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermBoundary {
    pub term: SolarTerm,
    pub date: NaiveDate,
}

/// Most recent boundary at or before `date`. Dates before Minor Cold wrap to
/// the previous year's Major Snow.
pub fn governing_term(date: NaiveDate) -> Result<TermBoundary> {
    let year = date.year();
    for term in SOLAR_TERMS.iter().rev() {
        let boundary = term.boundary_in(year)?;
        if boundary <= date {
            return Ok(TermBoundary { term: *term, date: boundary });
        }
    }

    let last = SOLAR_TERMS[SOLAR_TERMS.len() - 1];
    Ok(TermBoundary {
        term: last,
        date: last.boundary_in(year - 1)?,
    })
}

/// First boundary strictly after `date`
pub fn next_term(date: NaiveDate) -> Result<TermBoundary> {
    let year = date.year();
    for term in SOLAR_TERMS.iter() {
        let boundary = term.boundary_in(year)?;
        if boundary > date {
            return Ok(TermBoundary { term: *term, date: boundary });
        }
    }

    let first = SOLAR_TERMS[0];
    Ok(TermBoundary {
        term: first,
        date: first.boundary_in(year + 1)?,
    })
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| SajuError::OutOfRange {
        date: format!("{year:04}-{month:02}-{day:02}"),
    })
}

// ============================================================================
// FIVE-TIGER AND FIVE-RAT RULES
// ============================================================================

/// 연상기월법: year stem → stem of the tiger month (month index 1)
pub const FIVE_TIGER: [Stem; 10] = [
    Stem::Byeong, // Gap
    Stem::Mu,     // Eul
    Stem::Gyeong, // Byeong
    Stem::Im,     // Jeong
    Stem::Gap,    // Mu
    Stem::Byeong, // Gi
    Stem::Mu,     // Gyeong
    Stem::Gyeong, // Sin
    Stem::Im,     // Im
    Stem::Gap,    // Gye
];

/// 시두법: day stem → stem of the rat slot (slot 0, around midnight)
pub const FIVE_RAT: [Stem; 10] = [
    Stem::Gap,    // Gap
    Stem::Byeong, // Eul
    Stem::Mu,     // Byeong
    Stem::Gyeong, // Jeong
    Stem::Im,     // Mu
    Stem::Gap,    // Gi
    Stem::Byeong, // Gyeong
    Stem::Mu,     // Sin
    Stem::Gyeong, // Im
    Stem::Im,     // Gye
];

// ============================================================================
// TIME SLOTS (시진)
// ============================================================================

pub const TIME_SLOT_TOKENS: [&str; 12] = [
    "ja", "chuk", "in", "myo", "jin", "sa", "oh", "mi", "shin", "yu", "sul", "hae",
];

const TIME_SLOT_HOURS: [&str; 12] = [
    "23:00-01:00",
    "01:00-03:00",
    "03:00-05:00",
    "05:00-07:00",
    "07:00-09:00",
    "09:00-11:00",
    "11:00-13:00",
    "13:00-15:00",
    "15:00-17:00",
    "17:00-19:00",
    "19:00-21:00",
    "21:00-23:00",
];

pub const UNKNOWN_TIME_SLOT: &str = "unknown";

/// Two-hour birth window, or the explicit "unknown" sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeSlot {
    Known(Branch),
    #[default]
    Unknown,
}

impl TimeSlot {
    pub fn branch(self) -> Option<Branch> {
        match self {
            TimeSlot::Known(branch) => Some(branch),
            TimeSlot::Unknown => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            TimeSlot::Known(branch) => TIME_SLOT_TOKENS[branch.index()],
            TimeSlot::Unknown => UNKNOWN_TIME_SLOT,
        }
    }

    pub fn hours(self) -> Option<&'static str> {
        self.branch().map(|branch| TIME_SLOT_HOURS[branch.index()])
    }

    /// Slot covering a clock hour (0-23); 23:00 belongs to the next day's rat slot
    pub fn from_hour(hour: u32) -> TimeSlot {
        TimeSlot::Known(Branch::from_index(i64::from((hour % 24 + 1) / 2)))
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hours() {
            Some(hours) => write!(f, "{} ({})", self.token(), hours),
            None => write!(f, "{}", self.token()),
        }
    }
}

impl FromStr for TimeSlot {
    type Err = SajuError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        if token.is_empty() || token == UNKNOWN_TIME_SLOT {
            return Ok(TimeSlot::Unknown);
        }
        TIME_SLOT_TOKENS
            .iter()
            .position(|candidate| *candidate == token)
            .map(|index| TimeSlot::Known(Branch::ALL[index]))
            .ok_or_else(|| SajuError::InvalidTimeSlot {
                value: s.to_string(),
            })
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}
