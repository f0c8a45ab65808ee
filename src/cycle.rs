// 🔄 Fortune Cycles (대운 / 大運) and year fortune (세운 / 歲運)
//
// Decade pillars step away from the month pillar one sexagenary position per
// decade, forward or backward depending on gender and year polarity.

use crate::error::{Result, SajuError};
use crate::pillar::{Chart, Pillar};
use crate::symbols::{ElementRelation, Polarity, Stem};
use crate::tables;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_CYCLE_COUNT: usize = 10;

/// Twelve decades cover 120 years
pub const MAX_CYCLE_COUNT: usize = 12;

/// Years covered by one fortune cycle
pub const CYCLE_SPAN: i32 = 10;

const MIN_START_AGE: i64 = 1;
const MAX_START_AGE: i64 = 10;

// ============================================================================
// GENDER AND DIRECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = SajuError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "남" | "남자" => Ok(Gender::Male),
            "female" | "f" | "여" | "여자" => Ok(Gender::Female),
            "" => Err(SajuError::MissingGender),
            _ => Err(SajuError::InvalidGender {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

// ============================================================================
// CYCLE TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FortuneCycle {
    /// 1-based position in the sequence
    pub ordinal: u32,
    pub pillar: Pillar,
    pub start_age: i32,
    /// Inclusive
    pub end_age: i32,
}

impl FortuneCycle {
    pub fn contains(&self, age: i32) -> bool {
        (self.start_age..=self.end_age).contains(&age)
    }
}

/// Relation of a year's stem to the day master
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum YearOutlook {
    SelfReinforcing,
    DayMasterFeedsYear,
    YearFeedsDayMaster,
    DayMasterDominatesYear,
    YearDominatesDayMaster,
}

impl YearOutlook {
    pub fn sentence(self) -> &'static str {
        match self {
            YearOutlook::SelfReinforcing => {
                "The year's energy matches the day master: a year in which the sense of self grows stronger."
            }
            YearOutlook::DayMasterFeedsYear => {
                "The day master nourishes the year, so energy may be spent more freely than usual."
            }
            YearOutlook::YearFeedsDayMaster => {
                "The year nourishes the day master: a year of help and support from others."
            }
            YearOutlook::DayMasterDominatesYear => {
                "The day master controls the year, bringing chances for wealth and achievement."
            }
            YearOutlook::YearDominatesDayMaster => {
                "The year controls the day master, so outside pressure and challenges may arise."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearFortune {
    pub year: i32,
    pub pillar: Pillar,
    pub outlook: YearOutlook,
    pub narrative: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FortuneReport {
    pub direction: Direction,
    pub start_age: u8,
    pub cycles: Vec<FortuneCycle>,
    /// Age used for the current-cycle lookup
    pub age: i32,
    pub current: Option<FortuneCycle>,
    pub year_fortune: YearFortune,
}

/// Korean count: one at birth, plus one per elapsed calendar year.
/// `None` when the difference does not fit in an `i32`.
pub fn korean_age(birth_year: i32, reference_year: i32) -> Option<i32> {
    reference_year.checked_sub(birth_year)?.checked_add(1)
}

// ============================================================================
// CYCLE ENGINE
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct CycleEngine {
    cycle_count: usize,
}

impl Default for CycleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleEngine {
    pub fn new() -> Self {
        CycleEngine {
            cycle_count: DEFAULT_CYCLE_COUNT,
        }
    }

    /// Clamped to 1..=MAX_CYCLE_COUNT
    pub fn with_cycle_count(cycle_count: usize) -> Self {
        CycleEngine {
            cycle_count: cycle_count.clamp(1, MAX_CYCLE_COUNT),
        }
    }

    pub fn cycle_count(&self) -> usize {
        self.cycle_count
    }

    /// Forward for a yang-year man or a yin-year woman
    pub fn direction(&self, gender: Gender, year_polarity: Polarity) -> Direction {
        match (gender, year_polarity) {
            (Gender::Male, Polarity::Yang) | (Gender::Female, Polarity::Yin) => Direction::Forward,
            (Gender::Male, Polarity::Yin) | (Gender::Female, Polarity::Yang) => Direction::Reverse,
        }
    }

    /// Days to the next (forward) or previous (reverse) solar-term boundary,
    /// three days to a year, rounded and clamped to 1..=10
    pub fn start_age(&self, birth: NaiveDate, direction: Direction) -> Result<u8> {
        let days = match direction {
            Direction::Forward => (tables::next_term(birth)?.date - birth).num_days(),
            Direction::Reverse => (birth - tables::governing_term(birth)?.date).num_days(),
        };
        // round(days / 3) for non-negative days
        let years = (2 * days + 3) / 6;
        let age = years.clamp(MIN_START_AGE, MAX_START_AGE) as u8;
        debug!(%birth, ?direction, days, age, "fortune cycle start age");
        Ok(age)
    }

    pub fn generate_cycles(
        &self,
        month_pillar: &Pillar,
        direction: Direction,
        start_age: u8,
        count: usize,
    ) -> Vec<FortuneCycle> {
        (1..=count)
            .map(|i| {
                let step = i as i64;
                let start = i32::from(start_age) + (step as i32 - 1) * CYCLE_SPAN;
                FortuneCycle {
                    ordinal: step as u32,
                    pillar: month_pillar.step(step * direction.sign()),
                    start_age: start,
                    end_age: start + CYCLE_SPAN - 1,
                }
            })
            .collect()
    }

    /// Cycle containing `age`; the first cycle when no range contains it
    pub fn current_cycle<'a>(
        &self,
        cycles: &'a [FortuneCycle],
        age: i32,
    ) -> Option<&'a FortuneCycle> {
        cycles
            .iter()
            .find(|cycle| cycle.contains(age))
            .or_else(|| cycles.first())
    }

    pub fn year_pillar(&self, year: i32) -> Pillar {
        Pillar::for_sexagenary_year(year)
    }

    /// Day master against the year stem's element
    pub fn year_narrative(&self, year_pillar: &Pillar, day_master: Stem) -> YearOutlook {
        match day_master.element().relation_to(year_pillar.element) {
            ElementRelation::Same => YearOutlook::SelfReinforcing,
            ElementRelation::IGenerate => YearOutlook::DayMasterFeedsYear,
            ElementRelation::GeneratesMe => YearOutlook::YearFeedsDayMaster,
            ElementRelation::IControl => YearOutlook::DayMasterDominatesYear,
            ElementRelation::ControlsMe => YearOutlook::YearDominatesDayMaster,
        }
    }

    pub fn year_fortune(&self, year: i32, day_master: Stem) -> YearFortune {
        let pillar = self.year_pillar(year);
        let outlook = self.year_narrative(&pillar, day_master);
        YearFortune {
            year,
            pillar,
            outlook,
            narrative: vec![outlook.sentence()],
        }
    }

    /// Full fortune section for a chart, looked up at an explicit age and year
    pub fn report(
        &self,
        chart: &Chart,
        birth: NaiveDate,
        gender: Gender,
        age: i32,
        reference_year: i32,
    ) -> Result<FortuneReport> {
        let direction = self.direction(gender, chart.year.stem.polarity());
        let start_age = self.start_age(birth, direction)?;
        let cycles = self.generate_cycles(&chart.month, direction, start_age, self.cycle_count);
        let current = self.current_cycle(&cycles, age).copied();

        Ok(FortuneReport {
            direction,
            start_age,
            cycles,
            age,
            current,
            year_fortune: self.year_fortune(reference_year, chart.day_master()),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
