// 🐅 Earthly Branches (지지 / 地支) - 12 cyclic symbols with hidden stems

use super::element::Element;
use super::stem::Stem;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

const BRANCH_ELEMENTS: [Element; 12] = [
    Element::Water, // Ja
    Element::Earth, // Chuk
    Element::Wood,  // In
    Element::Wood,  // Myo
    Element::Earth, // Jin
    Element::Fire,  // Sa
    Element::Fire,  // O
    Element::Earth, // Mi
    Element::Metal, // Sin
    Element::Metal, // Yu
    Element::Earth, // Sul
    Element::Water, // Hae
];

/// 지장간: stems stored inside each branch, principal stem not always first
const HIDDEN_STEMS: [&[Stem]; 12] = [
    &[Stem::Gye],
    &[Stem::Gi, Stem::Gye, Stem::Sin],
    &[Stem::Gap, Stem::Byeong, Stem::Mu],
    &[Stem::Eul],
    &[Stem::Mu, Stem::Eul, Stem::Gye],
    &[Stem::Byeong, Stem::Gyeong, Stem::Mu],
    &[Stem::Jeong, Stem::Gi],
    &[Stem::Gi, Stem::Jeong, Stem::Eul],
    &[Stem::Gyeong, Stem::Im, Stem::Mu],
    &[Stem::Sin],
    &[Stem::Mu, Stem::Sin, Stem::Jeong],
    &[Stem::Im, Stem::Gap],
];

impl Branch {
    pub const COUNT: usize = 12;

    pub const ALL: [Branch; 12] = [
        Branch::Ja,
        Branch::Chuk,
        Branch::In,
        Branch::Myo,
        Branch::Jin,
        Branch::Sa,
        Branch::O,
        Branch::Mi,
        Branch::Sin,
        Branch::Yu,
        Branch::Sul,
        Branch::Hae,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Floor-modulo lookup: any integer lands on a branch
    pub fn from_index(index: i64) -> Branch {
        Branch::ALL[index.rem_euclid(Branch::COUNT as i64) as usize]
    }

    pub fn element(self) -> Element {
        BRANCH_ELEMENTS[self.index()]
    }

    pub fn hidden_stems(self) -> &'static [Stem] {
        HIDDEN_STEMS[self.index()]
    }

    pub fn offset(self, steps: i64) -> Branch {
        Branch::from_index(self.index() as i64 + steps)
    }

    pub fn korean(self) -> &'static str {
        ["자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해"][self.index()]
    }

    pub fn hanja(self) -> &'static str {
        ["子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥"][self.index()]
    }

    /// Zodiac animal
    pub fn animal(self) -> &'static str {
        [
            "Rat", "Ox", "Tiger", "Rabbit", "Dragon", "Snake", "Horse", "Goat", "Monkey",
            "Rooster", "Dog", "Pig",
        ][self.index()]
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.korean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_stems_non_empty_and_bounded() {
        for branch in Branch::ALL {
            let hidden = branch.hidden_stems();
            assert!(!hidden.is_empty() && hidden.len() <= 3, "{:?}", branch);
        }
    }

    #[test]
    fn test_hidden_stem_table() {
        assert_eq!(Branch::Ja.hidden_stems(), &[Stem::Gye]);
        assert_eq!(Branch::In.hidden_stems(), &[Stem::Gap, Stem::Byeong, Stem::Mu]);
        assert_eq!(Branch::Hae.hidden_stems(), &[Stem::Im, Stem::Gap]);
    }

    #[test]
    fn test_element_table() {
        assert_eq!(Branch::Ja.element(), Element::Water);
        assert_eq!(Branch::In.element(), Element::Wood);
        assert_eq!(Branch::O.element(), Element::Fire);
        assert_eq!(Branch::Yu.element(), Element::Metal);
        let earth = Branch::ALL
            .into_iter()
            .filter(|b| b.element() == Element::Earth)
            .count();
        assert_eq!(earth, 4);
    }

    #[test]
    fn test_offset_wraps() {
        assert_eq!(Branch::Hae.offset(1), Branch::Ja);
        assert_eq!(Branch::Ja.offset(-1), Branch::Hae);
        assert_eq!(Branch::In.offset(-14), Branch::Ja);
    }
}
