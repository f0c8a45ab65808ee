// 🧭 Saju Analyzer - validates birth input and composes the three engines
//
// Lunar input is resolved to a solar date through the calendar collaborator
// before any engine runs; everything after that is pure table arithmetic.

use crate::calendar::{CalendarConverter, LunarDate};
use crate::cycle::{korean_age, CycleEngine, FortuneReport, Gender, YearFortune};
use crate::elements::ElementTally;
use crate::error::{Result, SajuError};
use crate::pillar::{Chart, Pillar, PillarEngine};
use crate::relation::{RelationEngine, TenGodReport};
use crate::symbols::Stem;
use crate::tables::TimeSlot;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ============================================================================
// INPUT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    #[default]
    Solar,
    Lunar,
}

/// Raw birth data as submitted by a caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BirthInput {
    /// `YYYY-MM-DD`, interpreted in `calendar_type`
    pub birth_date: String,
    #[serde(default)]
    pub calendar_type: CalendarType,
    #[serde(default)]
    pub is_leap_month: bool,
    /// Branch token or "unknown"; absent means unknown
    #[serde(default)]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl BirthInput {
    pub fn solar(birth_date: &str, time_slot: &str, gender: &str) -> Self {
        BirthInput {
            birth_date: birth_date.to_string(),
            time_slot: Some(time_slot.to_string()),
            gender: Some(gender.to_string()),
            ..BirthInput::default()
        }
    }

    pub fn lunar(birth_date: &str, is_leap_month: bool, time_slot: &str, gender: &str) -> Self {
        BirthInput {
            calendar_type: CalendarType::Lunar,
            is_leap_month,
            ..BirthInput::solar(birth_date, time_slot, gender)
        }
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SajuAnalysis {
    pub name: Option<String>,
    pub gender: Gender,
    pub calendar_type: CalendarType,
    pub solar_date: NaiveDate,
    /// Input date for lunar births, best-effort conversion for solar births
    pub lunar_date: Option<LunarDate>,
    pub time_slot: TimeSlot,
    pub chart: Chart,
    pub day_master: Stem,
    pub ganji: String,
    pub elements: ElementTally,
    pub ten_gods: TenGodReport,
    pub fortune: FortuneReport,
}

/// Annual pillar, plus its reading when a day master is known
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearLookup {
    pub year: i32,
    pub pillar: Pillar,
    pub fortune: Option<YearFortune>,
}

// ============================================================================
// ANALYZER
// ============================================================================

pub struct SajuAnalyzer<C> {
    pillars: PillarEngine,
    relations: RelationEngine,
    cycles: CycleEngine,
    calendar: C,
}

impl<C: CalendarConverter> SajuAnalyzer<C> {
    pub fn new(calendar: C) -> Self {
        Self::with_cycle_engine(calendar, CycleEngine::new())
    }

    pub fn with_cycle_engine(calendar: C, cycles: CycleEngine) -> Self {
        SajuAnalyzer {
            pillars: PillarEngine::new(),
            relations: RelationEngine::new(),
            cycles,
            calendar,
        }
    }

    /// Full chart for `input`; `age` defaults to the Korean age in `reference_year`
    pub fn analyze(
        &self,
        input: &BirthInput,
        reference_year: i32,
        age: Option<i32>,
    ) -> Result<SajuAnalysis> {
        let gender = parse_gender(input.gender.as_deref())?;
        let time_slot = parse_time_slot(input.time_slot.as_deref())?;
        let (solar_date, lunar_date) = self.resolve_date(input)?;

        let chart = self.pillars.chart(solar_date, time_slot)?;
        let elements = self.pillars.analyze_elements(&chart);
        let ten_gods = self.relations.report(&chart);

        let age = match age {
            Some(age) => age,
            None => korean_age(solar_date.year(), reference_year)
                .ok_or(SajuError::InvalidReferenceYear { year: reference_year })?,
        };
        let fortune = self
            .cycles
            .report(&chart, solar_date, gender, age, reference_year)?;

        debug!(
            %solar_date,
            ganji = %chart.ganji(),
            direction = ?fortune.direction,
            start_age = fortune.start_age,
            "analysis complete"
        );

        Ok(SajuAnalysis {
            name: input
                .name
                .as_ref()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            gender,
            calendar_type: input.calendar_type,
            solar_date,
            lunar_date,
            time_slot,
            day_master: chart.day_master(),
            ganji: chart.ganji(),
            chart,
            elements,
            ten_gods,
            fortune,
        })
    }

    pub fn year_lookup(&self, year: i32, day_master: Option<Stem>) -> YearLookup {
        YearLookup {
            year,
            pillar: self.cycles.year_pillar(year),
            fortune: day_master.map(|stem| self.cycles.year_fortune(year, stem)),
        }
    }

    fn resolve_date(&self, input: &BirthInput) -> Result<(NaiveDate, Option<LunarDate>)> {
        match input.calendar_type {
            CalendarType::Solar => {
                let solar = parse_solar_date(&input.birth_date)?;
                let lunar = match self.calendar.solar_to_lunar(solar) {
                    Ok(lunar) => Some(lunar),
                    Err(e) => {
                        warn!(%solar, error = %e, "lunar date unavailable");
                        None
                    }
                };
                Ok((solar, lunar))
            }
            CalendarType::Lunar => {
                let lunar = LunarDate::parse(&input.birth_date, input.is_leap_month)?;
                let solar = self.calendar.lunar_to_solar(&lunar)?;
                debug!(%lunar, %solar, "lunar birth date converted");
                Ok((solar, Some(lunar)))
            }
        }
    }
}

fn parse_solar_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| SajuError::InvalidDate {
        value: value.to_string(),
    })
}

fn parse_gender(value: Option<&str>) -> Result<Gender> {
    value.ok_or(SajuError::MissingGender)?.parse()
}

fn parse_time_slot(value: Option<&str>) -> Result<TimeSlot> {
    value.map_or(Ok(TimeSlot::Unknown), str::parse)
}

// ============================================================================
// TESTS
// ============================================================================
