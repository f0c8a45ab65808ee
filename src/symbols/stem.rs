// 🌱 Heavenly Stems (천간 / 天干) - 10 cyclic symbols

use super::element::{Element, Polarity};
use crate::error::SajuError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

impl Stem {
    pub const COUNT: usize = 10;

    pub const ALL: [Stem; 10] = [
        Stem::Gap,
        Stem::Eul,
        Stem::Byeong,
        Stem::Jeong,
        Stem::Mu,
        Stem::Gi,
        Stem::Gyeong,
        Stem::Sin,
        Stem::Im,
        Stem::Gye,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Floor-modulo lookup: any integer lands on a stem
    pub fn from_index(index: i64) -> Stem {
        Stem::ALL[index.rem_euclid(Stem::COUNT as i64) as usize]
    }

    /// Stems pair up per element: Gap/Eul are Wood, Byeong/Jeong Fire, ...
    pub fn element(self) -> Element {
        Element::ALL[self.index() / 2]
    }

    pub fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    pub fn offset(self, steps: i64) -> Stem {
        Stem::from_index(self.index() as i64 + steps)
    }

    pub fn romanized(self) -> &'static str {
        match self {
            Stem::Gap => "gap",
            Stem::Eul => "eul",
            Stem::Byeong => "byeong",
            Stem::Jeong => "jeong",
            Stem::Mu => "mu",
            Stem::Gi => "gi",
            Stem::Gyeong => "gyeong",
            Stem::Sin => "sin",
            Stem::Im => "im",
            Stem::Gye => "gye",
        }
    }

    pub fn korean(self) -> &'static str {
        ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"][self.index()]
    }

    pub fn hanja(self) -> &'static str {
        ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"][self.index()]
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.korean())
    }
}

impl FromStr for Stem {
    type Err = SajuError;

    /// Accepts the romanized name, the Korean reading, or the hanja glyph
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Stem::ALL
            .into_iter()
            .find(|stem| {
                stem.romanized().eq_ignore_ascii_case(needle)
                    || stem.korean() == needle
                    || stem.hanja() == needle
            })
            .ok_or_else(|| SajuError::InvalidStem {
                value: s.to_string(),
            })
    }
}
