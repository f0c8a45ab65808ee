// ⚖️ Element Balance - five-element distribution across a chart

use crate::pillar::Chart;
use crate::symbols::Element;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementCount {
    pub element: Element,
    pub count: u8,
}

/// Stem and branch elements of every present pillar: 6 positions for a
/// three-pillar chart, 8 for four
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementTally {
    /// Declaration order (Wood, Fire, Earth, Metal, Water)
    pub counts: [ElementCount; 5],
    /// Descending by count; ties keep declaration order
    pub ranking: [ElementCount; 5],
    pub strongest: ElementCount,
    pub weakest: ElementCount,
    pub missing: Vec<Element>,
    pub total: u8,
}

impl ElementTally {
    pub fn from_chart(chart: &Chart) -> Self {
        let mut raw = [0u8; 5];
        for (_, pillar) in chart.pillars() {
            raw[pillar.element.index()] += 1;
            raw[pillar.branch_element.index()] += 1;
        }

        let counts = Element::ALL.map(|element| ElementCount {
            element,
            count: raw[element.index()],
        });

        let mut ranking = counts;
        // stable sort keeps declaration order among ties
        ranking.sort_by(|a, b| b.count.cmp(&a.count));

        let missing = counts
            .iter()
            .filter(|c| c.count == 0)
            .map(|c| c.element)
            .collect();

        ElementTally {
            counts,
            ranking,
            strongest: ranking[0],
            weakest: ranking[4],
            missing,
            total: raw.iter().sum(),
        }
    }

    pub fn count(&self, element: Element) -> u8 {
        self.counts[element.index()].count
    }
}
