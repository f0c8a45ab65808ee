// 🏛️ Pillar Engine - year / month / day / hour pillars from a solar date
//
// Index arithmetic is floor-modulo throughout (`rem_euclid` inside
// `Stem::from_index` / `Branch::from_index`), so negative day offsets before
// the epoch resolve the same way as positive ones.

use crate::elements::ElementTally;
use crate::error::Result;
use crate::symbols::{Branch, Element, Stem};
use crate::tables::{
    self, TimeSlot, DAY_EPOCH_BRANCH, DAY_EPOCH_DAYS_FROM_CE, DAY_EPOCH_STEM, FIVE_RAT,
    FIVE_TIGER, YEAR_EPOCH,
};
use chrono::{Datelike, NaiveDate};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use tracing::debug;

// ============================================================================
// PILLAR
// ============================================================================

/// A stem/branch pair with its derived attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
    pub element: Element,
    pub branch_element: Element,
    pub hidden_stems: &'static [Stem],
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Pillar {
            stem,
            branch,
            element: stem.element(),
            branch_element: branch.element(),
            hidden_stems: branch.hidden_stems(),
        }
    }

    pub fn from_indices(stem_index: i64, branch_index: i64) -> Self {
        Pillar::new(Stem::from_index(stem_index), Branch::from_index(branch_index))
    }

    /// Pillar of a sexagenary year (already resolved against the spring pivot)
    pub fn for_sexagenary_year(year: i32) -> Self {
        let offset = i64::from(year) - YEAR_EPOCH;
        Pillar::from_indices(offset, offset)
    }

    /// Advance stem and branch together; `step(60)` is the identity
    pub fn step(&self, steps: i64) -> Pillar {
        Pillar::new(self.stem.offset(steps), self.branch.offset(steps))
    }

    /// Hanja form, e.g. 甲子
    pub fn hanja(&self) -> String {
        format!("{}{}", self.stem.hanja(), self.branch.hanja())
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

impl Serialize for Pillar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Pillar", 7)?;
        state.serialize_field("stem", &self.stem)?;
        state.serialize_field("branch", &self.branch)?;
        state.serialize_field("display", &self.to_string())?;
        state.serialize_field("hanja", &self.hanja())?;
        state.serialize_field("element", &self.element)?;
        state.serialize_field("branch_element", &self.branch_element)?;
        state.serialize_field("hidden_stems", self.hidden_stems)?;
        state.end()
    }
}

// ============================================================================
// CHART
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Year,
    Month,
    Day,
    Hour,
}

/// Three or four pillars; the hour pillar is absent when birth time is unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Chart {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Option<Pillar>,
}

impl Chart {
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }

    /// Present pillars in chart order
    pub fn pillars(&self) -> Vec<(Position, Pillar)> {
        let mut pillars = vec![
            (Position::Year, self.year),
            (Position::Month, self.month),
            (Position::Day, self.day),
        ];
        if let Some(hour) = self.hour {
            pillars.push((Position::Hour, hour));
        }
        pillars
    }

    pub fn pillar_count(&self) -> usize {
        if self.hour.is_some() {
            4
        } else {
            3
        }
    }

    /// Space-separated label, year first, e.g. "갑진 기사 병인 (미상)"
    pub fn ganji(&self) -> String {
        let hour = self
            .hour
            .map(|p| p.to_string())
            .unwrap_or_else(|| "(미상)".to_string());
        format!("{} {} {} {}", self.year, self.month, self.day, hour)
    }
}

// ============================================================================
// PILLAR ENGINE
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct PillarEngine;

impl PillarEngine {
    pub fn new() -> Self {
        PillarEngine
    }

    /// Calendar year, or the previous one before that year's start of spring
    pub fn sexagenary_year(&self, date: NaiveDate) -> Result<i32> {
        let year = date.year();
        if date < tables::spring_pivot(year)? {
            Ok(year - 1)
        } else {
            Ok(year)
        }
    }

    pub fn year_pillar(&self, date: NaiveDate) -> Result<Pillar> {
        Ok(Pillar::for_sexagenary_year(self.sexagenary_year(date)?))
    }

    /// Chart month 1-12 (1 = tiger month) from the governing solar term
    pub fn month_index(&self, date: NaiveDate) -> Result<u8> {
        Ok(tables::governing_term(date)?.term.month_index)
    }

    /// Five-tiger rule applied to the resolved chart month
    pub fn month_pillar(&self, date: NaiveDate, year_stem: Stem) -> Result<Pillar> {
        let month_index = i64::from(self.month_index(date)?);
        let tiger_stem = FIVE_TIGER[year_stem.index()];
        Ok(Pillar::new(
            tiger_stem.offset(month_index - 1),
            Branch::from_index(month_index + 1),
        ))
    }

    pub fn day_pillar(&self, date: NaiveDate) -> Pillar {
        let diff_days = i64::from(date.num_days_from_ce()) - DAY_EPOCH_DAYS_FROM_CE;
        Pillar::from_indices(DAY_EPOCH_STEM + diff_days, DAY_EPOCH_BRANCH + diff_days)
    }

    /// Five-rat rule; `None` for an unknown birth time
    pub fn hour_pillar(&self, slot: TimeSlot, day_stem: Stem) -> Option<Pillar> {
        slot.branch().map(|branch| {
            let rat_stem = FIVE_RAT[day_stem.index()];
            Pillar::new(rat_stem.offset(branch.index() as i64), branch)
        })
    }

    pub fn chart(&self, date: NaiveDate, slot: TimeSlot) -> Result<Chart> {
        let year = self.year_pillar(date)?;
        let month = self.month_pillar(date, year.stem)?;
        let day = self.day_pillar(date);
        let hour = self.hour_pillar(slot, day.stem);

        debug!(
            %date,
            year = %year,
            month = %month,
            day = %day,
            hour = %hour.map(|p| p.to_string()).unwrap_or_default(),
            "resolved chart"
        );

        Ok(Chart { year, month, day, hour })
    }

    pub fn analyze_elements(&self, chart: &Chart) -> ElementTally {
        ElementTally::from_chart(chart)
    }
}

// ============================================================================
// TESTS
// ============================================================================
