// 🔥 Five Elements - production and domination cycle
//
// Wood → Fire → Earth → Metal → Water → Wood (production, +1)
// Wood → Earth → Water → Fire → Metal → Wood (domination, +2)

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ELEMENT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// Declaration order; also the tie-break order for element rankings
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: i64) -> Element {
        Element::ALL[index.rem_euclid(5) as usize]
    }

    /// The element this one produces
    pub fn generates(self) -> Element {
        Element::from_index(self.index() as i64 + 1)
    }

    /// The element this one dominates
    pub fn controls(self) -> Element {
        Element::from_index(self.index() as i64 + 2)
    }

    /// How `other` stands relative to `self` on the cycle
    pub fn relation_to(self, other: Element) -> ElementRelation {
        let offset = (other.index() as i64 - self.index() as i64).rem_euclid(5);
        ElementRelation::BY_OFFSET[offset as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::Wood => "Wood",
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Metal => "Metal",
            Element::Water => "Water",
        }
    }

    pub fn korean(self) -> &'static str {
        match self {
            Element::Wood => "목",
            Element::Fire => "화",
            Element::Earth => "토",
            Element::Metal => "금",
            Element::Water => "수",
        }
    }

    pub fn hanja(self) -> &'static str {
        match self {
            Element::Wood => "木",
            Element::Fire => "火",
            Element::Earth => "土",
            Element::Metal => "金",
            Element::Water => "水",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// ELEMENT RELATION
// ============================================================================

/// Relation of a target element seen from a reference element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementRelation {
    Same,
    /// Reference produces target
    IGenerate,
    /// Reference dominates target
    IControl,
    /// Target dominates reference
    ControlsMe,
    /// Target produces reference
    GeneratesMe,
}

impl ElementRelation {
    /// Indexed by `(target - reference) mod 5`
    const BY_OFFSET: [ElementRelation; 5] = [
        ElementRelation::Same,
        ElementRelation::IGenerate,
        ElementRelation::IControl,
        ElementRelation::ControlsMe,
        ElementRelation::GeneratesMe,
    ];

    /// The same relation seen from the other side
    pub fn inverse(self) -> ElementRelation {
        match self {
            ElementRelation::Same => ElementRelation::Same,
            ElementRelation::IGenerate => ElementRelation::GeneratesMe,
            ElementRelation::GeneratesMe => ElementRelation::IGenerate,
            ElementRelation::IControl => ElementRelation::ControlsMe,
            ElementRelation::ControlsMe => ElementRelation::IControl,
        }
    }
}

// ============================================================================
// POLARITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    pub fn name(self) -> &'static str {
        match self {
            Polarity::Yang => "Yang",
            Polarity::Yin => "Yin",
        }
    }

    pub fn korean(self) -> &'static str {
        match self {
            Polarity::Yang => "양",
            Polarity::Yin => "음",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_cycle() {
        assert_eq!(Element::Wood.generates(), Element::Fire);
        assert_eq!(Element::Metal.generates(), Element::Water);
        assert_eq!(Element::Water.generates(), Element::Wood);
    }

    #[test]
    fn test_domination_cycle() {
        assert_eq!(Element::Wood.controls(), Element::Earth);
        assert_eq!(Element::Earth.controls(), Element::Water);
        assert_eq!(Element::Water.controls(), Element::Fire);
        assert_eq!(Element::Fire.controls(), Element::Metal);
        assert_eq!(Element::Metal.controls(), Element::Wood);
    }

    #[test]
    fn test_relation_matches_cycle() {
        for me in Element::ALL {
            assert_eq!(me.relation_to(me), ElementRelation::Same);
            assert_eq!(me.relation_to(me.generates()), ElementRelation::IGenerate);
            assert_eq!(me.relation_to(me.controls()), ElementRelation::IControl);
        }
    }

    #[test]
    fn test_relation_inverse_consistency() {
        for a in Element::ALL {
            for b in Element::ALL {
                assert_eq!(b.relation_to(a), a.relation_to(b).inverse(), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_from_index_wraps_negative() {
        assert_eq!(Element::from_index(-1), Element::Water);
        assert_eq!(Element::from_index(7), Element::Earth);
    }
}
