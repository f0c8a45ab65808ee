// Saju Engine - Core Library
// Four Pillars chart engines for the CLI, the API server, and tests

pub mod error;
pub mod symbols;     // Stems, branches, elements
pub mod tables;      // Solar terms, spring pivot, five-tiger / five-rat rules
pub mod pillar;      // Pillar Engine
pub mod elements;    // Element balance
pub mod relation;    // Ten Gods (십신)
pub mod cycle;       // Fortune cycles (대운) and year fortune (세운)
pub mod calendar;    // Lunar ↔ solar collaborator
pub mod config;
pub mod analyzer;    // Orchestrator

// Re-export commonly used types
pub use error::{Result, SajuError};
pub use symbols::{Branch, Element, ElementRelation, Polarity, Stem};
pub use tables::TimeSlot;
pub use pillar::{Chart, Pillar, PillarEngine, Position};
pub use elements::{ElementCount, ElementTally};
pub use relation::{
    RelationEngine, TenGod, TenGodCategory, TenGodReport, TenGodTally,
    CategoryRanking, DayMasterProfile,
};
pub use cycle::{
    CycleEngine, Direction, FortuneCycle, FortuneReport, Gender,
    YearFortune, YearOutlook, korean_age,
};
pub use calendar::{
    CalendarConverter, LunarDate, LunarMonth, MonthTableConverter, NoLunarCalendar,
};
pub use config::{SajuConfig, ServerConfig};
pub use analyzer::{
    BirthInput, CalendarType, SajuAnalysis, SajuAnalyzer, YearLookup,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
