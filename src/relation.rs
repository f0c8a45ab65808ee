// 🔟 Ten Gods (십신 / 十神) - every stem classified against the day master
//
// Category comes from the element relation, sub-variant from polarity:
//   same element         → Companion (비겁)
//   day master produces  → Output    (식상)
//   day master dominates → Wealth    (재성)
//   dominates day master → Officer   (관성)
//   produces day master  → Resource  (인성)

use crate::pillar::{Chart, Position};
use crate::symbols::{Element, ElementRelation, Polarity, Stem};
use serde::Serialize;
use std::fmt;

/// Category total at which a trait sentence is emitted
pub const TRAIT_THRESHOLD: u8 = 3;

// ============================================================================
// TEN GOD VARIANTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TenGodCategory {
    Companion,
    Output,
    Wealth,
    Officer,
    Resource,
}

impl TenGodCategory {
    /// Precedence order, used to break ranking ties
    pub const ALL: [TenGodCategory; 5] = [
        TenGodCategory::Companion,
        TenGodCategory::Output,
        TenGodCategory::Wealth,
        TenGodCategory::Officer,
        TenGodCategory::Resource,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_relation(relation: ElementRelation) -> Self {
        match relation {
            ElementRelation::Same => TenGodCategory::Companion,
            ElementRelation::IGenerate => TenGodCategory::Output,
            ElementRelation::IControl => TenGodCategory::Wealth,
            ElementRelation::ControlsMe => TenGodCategory::Officer,
            ElementRelation::GeneratesMe => TenGodCategory::Resource,
        }
    }

    pub fn korean(self) -> &'static str {
        match self {
            TenGodCategory::Companion => "비겁",
            TenGodCategory::Output => "식상",
            TenGodCategory::Wealth => "재성",
            TenGodCategory::Officer => "관성",
            TenGodCategory::Resource => "인성",
        }
    }

    /// One fixed sentence, emitted when the category reaches the threshold
    pub fn trait_sentence(self) -> &'static str {
        match self {
            TenGodCategory::Companion => "Strong sense of self and a fiercely independent streak.",
            TenGodCategory::Output => "Creative, with a gift for expression.",
            TenGodCategory::Wealth => {
                "Fortunate with material things and grounded in practical sense."
            }
            TenGodCategory::Officer => "Highly responsible and skilled at organizing others.",
            TenGodCategory::Resource => "Scholarly, with a capacity for deep thought.",
        }
    }
}

impl fmt::Display for TenGodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TenGodCategory::Companion => "Companion",
            TenGodCategory::Output => "Output",
            TenGodCategory::Wealth => "Wealth",
            TenGodCategory::Officer => "Officer",
            TenGodCategory::Resource => "Resource",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TenGod {
    Friend,
    RobWealth,
    EatingGod,
    HurtingOfficer,
    IndirectWealth,
    DirectWealth,
    SevenKillings,
    DirectOfficer,
    IndirectResource,
    DirectResource,
}

impl TenGod {
    pub const ALL: [TenGod; 10] = [
        TenGod::Friend,
        TenGod::RobWealth,
        TenGod::EatingGod,
        TenGod::HurtingOfficer,
        TenGod::IndirectWealth,
        TenGod::DirectWealth,
        TenGod::SevenKillings,
        TenGod::DirectOfficer,
        TenGod::IndirectResource,
        TenGod::DirectResource,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Exhaustive over category × polarity match
    pub fn from_parts(category: TenGodCategory, same_polarity: bool) -> Self {
        match (category, same_polarity) {
            (TenGodCategory::Companion, true) => TenGod::Friend,
            (TenGodCategory::Companion, false) => TenGod::RobWealth,
            (TenGodCategory::Output, true) => TenGod::EatingGod,
            (TenGodCategory::Output, false) => TenGod::HurtingOfficer,
            (TenGodCategory::Wealth, true) => TenGod::IndirectWealth,
            (TenGodCategory::Wealth, false) => TenGod::DirectWealth,
            (TenGodCategory::Officer, true) => TenGod::SevenKillings,
            (TenGodCategory::Officer, false) => TenGod::DirectOfficer,
            (TenGodCategory::Resource, true) => TenGod::IndirectResource,
            (TenGodCategory::Resource, false) => TenGod::DirectResource,
        }
    }

    pub fn category(self) -> TenGodCategory {
        TenGodCategory::ALL[self.index() / 2]
    }

    pub fn same_polarity(self) -> bool {
        self.index() % 2 == 0
    }

    pub fn korean(self) -> &'static str {
        [
            "비견", "겁재", "식신", "상관", "편재", "정재", "편관", "정관", "편인", "정인",
        ][self.index()]
    }

    pub fn hanja(self) -> &'static str {
        [
            "比肩", "劫財", "食神", "傷官", "偏財", "正財", "偏官", "正官", "偏印", "正印",
        ][self.index()]
    }
}

impl fmt::Display for TenGod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.korean(), self.hanja())
    }
}

// ============================================================================
// TALLY TYPES
// ============================================================================

/// Role of a pillar's own stem; the day stem is the reference point itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StemRole {
    #[serde(rename = "self")]
    DayMaster,
    God(TenGod),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HiddenStemRelation {
    pub stem: Stem,
    pub god: TenGod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionRelations {
    pub position: Position,
    pub stem: Stem,
    pub role: StemRole,
    pub hidden: Vec<HiddenStemRelation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TenGodCount {
    pub god: TenGod,
    pub count: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: TenGodCategory,
    pub count: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenGodTally {
    pub positions: Vec<PositionRelations>,
    /// In `TenGod::ALL` order
    pub variants: [TenGodCount; 10],
    /// In `TenGodCategory::ALL` order
    pub categories: [CategoryCount; 5],
}

impl TenGodTally {
    pub fn count(&self, god: TenGod) -> u8 {
        self.variants[god.index()].count
    }

    pub fn category_total(&self, category: TenGodCategory) -> u8 {
        self.categories[category.index()].count
    }

    /// Number of classified stems (stems other than the day stem, plus all hidden stems)
    pub fn total(&self) -> u8 {
        self.variants.iter().map(|c| c.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRanking {
    /// Descending; ties keep category precedence
    pub ranking: [CategoryCount; 5],
    pub strongest: CategoryCount,
    pub weakest: CategoryCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayMasterProfile {
    pub stem: Stem,
    pub element: Element,
    pub polarity: Polarity,
    pub description: &'static str,
    pub element_description: &'static str,
}

/// Everything the relation engine reports for one chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenGodReport {
    pub tally: TenGodTally,
    pub dominant: CategoryRanking,
    pub traits: Vec<&'static str>,
    pub profile: DayMasterProfile,
}

// ============================================================================
// RELATION ENGINE
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct RelationEngine;

impl RelationEngine {
    pub fn new() -> Self {
        RelationEngine
    }

    /// Ten-god variant of `other` seen from `day_stem`
    pub fn classify(&self, day_stem: Stem, other: Stem) -> TenGod {
        if day_stem == other {
            return TenGod::Friend;
        }
        let relation = day_stem.element().relation_to(other.element());
        let same_polarity = day_stem.polarity() == other.polarity();
        TenGod::from_parts(TenGodCategory::from_relation(relation), same_polarity)
    }

    /// Classify every non-day stem and every hidden stem of the chart
    pub fn tally(&self, chart: &Chart) -> TenGodTally {
        let day_master = chart.day_master();
        let mut raw = [0u8; 10];
        let mut positions = Vec::with_capacity(chart.pillar_count());

        for (position, pillar) in chart.pillars() {
            let role = if position == Position::Day {
                StemRole::DayMaster
            } else {
                let god = self.classify(day_master, pillar.stem);
                raw[god.index()] += 1;
                StemRole::God(god)
            };

            let hidden = pillar
                .hidden_stems
                .iter()
                .map(|&stem| {
                    let god = self.classify(day_master, stem);
                    raw[god.index()] += 1;
                    HiddenStemRelation { stem, god }
                })
                .collect();

            positions.push(PositionRelations {
                position,
                stem: pillar.stem,
                role,
                hidden,
            });
        }

        let variants = TenGod::ALL.map(|god| TenGodCount {
            god,
            count: raw[god.index()],
        });
        let categories = TenGodCategory::ALL.map(|category| CategoryCount {
            category,
            count: variants
                .iter()
                .filter(|c| c.god.category() == category)
                .map(|c| c.count)
                .sum(),
        });

        TenGodTally {
            positions,
            variants,
            categories,
        }
    }

    pub fn dominant(&self, tally: &TenGodTally) -> CategoryRanking {
        let mut ranking = tally.categories;
        ranking.sort_by(|a, b| b.count.cmp(&a.count));
        CategoryRanking {
            ranking,
            strongest: ranking[0],
            weakest: ranking[4],
        }
    }

    /// One sentence per category at or above the threshold, in precedence order
    pub fn traits(&self, tally: &TenGodTally) -> Vec<&'static str> {
        tally
            .categories
            .iter()
            .filter(|c| c.count >= TRAIT_THRESHOLD)
            .map(|c| c.category.trait_sentence())
            .collect()
    }

    pub fn day_master_profile(&self, day_master: Stem) -> DayMasterProfile {
        DayMasterProfile {
            stem: day_master,
            element: day_master.element(),
            polarity: day_master.polarity(),
            description: day_master_description(day_master),
            element_description: element_description(day_master.element(), day_master.polarity()),
        }
    }

    pub fn report(&self, chart: &Chart) -> TenGodReport {
        let tally = self.tally(chart);
        let dominant = self.dominant(&tally);
        let traits = self.traits(&tally);
        TenGodReport {
            tally,
            dominant,
            traits,
            profile: self.day_master_profile(chart.day_master()),
        }
    }
}

// ============================================================================
// FIXED DESCRIPTIONS
// ============================================================================

fn day_master_description(stem: Stem) -> &'static str {
    match stem {
        Stem::Gap => "Gap Wood is a great tree: upright and growing upward. A natural leader with a strong sense of justice and a pioneering spirit.",
        Stem::Eul => "Eul Wood is grass and vine: supple, gentle and highly adaptable. Artistic, delicate and sociable.",
        Stem::Byeong => "Byeong Fire is the sun: bright, warm and overflowing with energy. Passionate and positive, with a charisma that lights up a room.",
        Stem::Jeong => "Jeong Fire is candlelight and moonlight: a soft, warm inner glow. Sensitive, perceptive and intellectually curious.",
        Stem::Mu => "Mu Earth is a great mountain: weighty, stable and dependable. Trustworthy and broad-minded, a natural mediator.",
        Stem::Gi => "Gi Earth is field soil: fertile and embracing. Attentive and practical, with a nurturing warmth.",
        Stem::Gyeong => "Gyeong Metal is raw rock and ore: strong, decisive and loyal. Principled, intolerant of injustice, quick to act.",
        Stem::Sin => "Sin Metal is a jewel: refined, sharp and aesthetically gifted. A perfectionist with strong pride.",
        Stem::Im => "Im Water is the ocean and the great river: wide, deep and accepting. Wise and flexible, with large ambitions.",
        Stem::Gye => "Gye Water is dew and rain: clear, pure and intellectual. Intuitive, emotionally rich and deeply inward.",
    }
}

fn element_description(element: Element, polarity: Polarity) -> &'static str {
    match (element, polarity) {
        (Element::Wood, Polarity::Yang) => "an enterprising, challenge-seeking energy",
        (Element::Wood, Polarity::Yin) => "a flexible, accommodating energy",
        (Element::Fire, Polarity::Yang) => "a bright, passionate energy",
        (Element::Fire, Polarity::Yin) => "a warm, delicate energy",
        (Element::Earth, Polarity::Yang) => "a stable, weighty energy",
        (Element::Earth, Polarity::Yin) => "an attentive, caring energy",
        (Element::Metal, Polarity::Yang) => "a strong, decisive energy",
        (Element::Metal, Polarity::Yin) => "a refined, incisive energy",
        (Element::Water, Polarity::Yang) => "a broad, embracing energy",
        (Element::Water, Polarity::Yin) => "a clear, intellectual energy",
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pillar::Pillar;
    use crate::symbols::Branch;
    use rstest::rstest;

    fn mu_day_chart() -> Chart {
        Chart {
            year: Pillar::new(Stem::Gap, Branch::Ja),
            month: Pillar::new(Stem::Byeong, Branch::In),
            day: Pillar::new(Stem::Mu, Branch::Jin),
            hour: None,
        }
    }

    #[rstest]
    #[case(Stem::Gap, TenGod::Friend)]
    #[case(Stem::Eul, TenGod::RobWealth)]
    #[case(Stem::Byeong, TenGod::EatingGod)]
    #[case(Stem::Jeong, TenGod::HurtingOfficer)]
    #[case(Stem::Mu, TenGod::IndirectWealth)]
    #[case(Stem::Gi, TenGod::DirectWealth)]
    #[case(Stem::Gyeong, TenGod::SevenKillings)]
    #[case(Stem::Sin, TenGod::DirectOfficer)]
    #[case(Stem::Im, TenGod::IndirectResource)]
    #[case(Stem::Gye, TenGod::DirectResource)]
    fn test_classify_against_gap(#[case] other: Stem, #[case] expected: TenGod) {
        assert_eq!(RelationEngine::new().classify(Stem::Gap, other), expected);
    }

    #[test]
    fn test_classify_self_identity() {
        let engine = RelationEngine::new();
        for stem in Stem::ALL {
            assert_eq!(engine.classify(stem, stem), TenGod::Friend);
        }
    }

    #[test]
    fn test_classify_is_a_bijection_per_day_master() {
        let engine = RelationEngine::new();
        for day in Stem::ALL {
            let mut seen = [0u8; 10];
            for other in Stem::ALL {
                seen[engine.classify(day, other).index()] += 1;
            }
            assert_eq!(seen, [1; 10], "day master {:?}", day);
        }
    }

    #[test]
    fn test_classify_inverse_consistency() {
        let engine = RelationEngine::new();
        for a in Stem::ALL {
            for b in Stem::ALL {
                let god = engine.classify(a, b);
                let seen_from_b = b.element().relation_to(a.element());
                match god.category() {
                    TenGodCategory::Output => assert_eq!(seen_from_b, ElementRelation::GeneratesMe),
                    TenGodCategory::Resource => assert_eq!(seen_from_b, ElementRelation::IGenerate),
                    TenGodCategory::Wealth => assert_eq!(seen_from_b, ElementRelation::ControlsMe),
                    TenGodCategory::Officer => assert_eq!(seen_from_b, ElementRelation::IControl),
                    TenGodCategory::Companion => assert_eq!(seen_from_b, ElementRelation::Same),
                }
                assert_eq!(god.same_polarity(), a.polarity() == b.polarity());
            }
        }
    }

    #[test]
    fn test_from_parts_round_trips_category() {
        for god in TenGod::ALL {
            assert_eq!(TenGod::from_parts(god.category(), god.same_polarity()), god);
        }
    }

    #[test]
    fn test_tally_three_pillar_chart() {
        let engine = RelationEngine::new();
        let tally = engine.tally(&mu_day_chart());

        assert_eq!(tally.positions.len(), 3);
        assert_eq!(tally.positions[2].role, StemRole::DayMaster);
        assert_eq!(tally.positions[0].role, StemRole::God(TenGod::SevenKillings));
        assert_eq!(tally.positions[1].role, StemRole::God(TenGod::IndirectResource));

        // 2 visible stems + 1 + 3 + 3 hidden stems
        assert_eq!(tally.total(), 9);
        assert_eq!(tally.count(TenGod::SevenKillings), 2);
        assert_eq!(tally.count(TenGod::IndirectResource), 2);
        assert_eq!(tally.count(TenGod::DirectWealth), 2);
        assert_eq!(tally.count(TenGod::Friend), 2);
        assert_eq!(tally.count(TenGod::DirectOfficer), 1);

        assert_eq!(tally.category_total(TenGodCategory::Officer), 3);
        assert_eq!(tally.category_total(TenGodCategory::Output), 0);
    }

    #[test]
    fn test_day_branch_hidden_stems_are_counted() {
        let engine = RelationEngine::new();
        let tally = engine.tally(&mu_day_chart());
        let day = &tally.positions[2];
        assert_eq!(day.hidden.len(), 3);
        assert_eq!(day.hidden[0].god, TenGod::Friend);
        assert_eq!(day.hidden[1].god, TenGod::DirectOfficer);
    }

    #[test]
    fn test_dominant_and_traits() {
        let engine = RelationEngine::new();
        let tally = engine.tally(&mu_day_chart());
        let dominant = engine.dominant(&tally);

        assert_eq!(dominant.strongest.category, TenGodCategory::Officer);
        assert_eq!(dominant.weakest.category, TenGodCategory::Output);
        assert_eq!(dominant.ranking[1].category, TenGodCategory::Companion);

        let traits = engine.traits(&tally);
        assert_eq!(traits, vec![TenGodCategory::Officer.trait_sentence()]);
    }

    #[test]
    fn test_hour_pillar_changes_tally() {
        let engine = RelationEngine::new();
        let mut chart = mu_day_chart();
        chart.hour = Some(Pillar::new(Stem::Gyeong, Branch::Sin));
        let tally = engine.tally(&chart);

        assert_eq!(tally.total(), 13);
        assert_eq!(tally.count(TenGod::EatingGod), 2);
        assert_eq!(tally.count(TenGod::IndirectWealth), 1);

        let dominant = engine.dominant(&tally);
        // three categories tie at 3; precedence decides
        assert_eq!(dominant.strongest.category, TenGodCategory::Companion);
        assert_eq!(dominant.weakest.category, TenGodCategory::Resource);
        assert_eq!(engine.traits(&tally).len(), 3);
    }

    #[test]
    fn test_day_master_profile() {
        let profile = RelationEngine::new().day_master_profile(Stem::Im);
        assert_eq!(profile.element, Element::Water);
        assert_eq!(profile.polarity, Polarity::Yang);
        assert!(profile.description.starts_with("Im Water"));
        assert_eq!(profile.element_description, "a broad, embracing energy");
    }
}
