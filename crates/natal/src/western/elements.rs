//! Weighted element balance of a chart.
//!
//! Seventeen chart factors each contribute a fixed score to the element of
//! the sign they occupy. The scores total exactly 100.

use crate::chart::ChartRecord;
use crate::error::ChartError;
use crate::western::types::{Body, Element, Point, Sign};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One weighted chart factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightItem {
    Ascendant,
    ChartRuler,
    Sun,
    SunRuler,
    Moon,
    MoonRuler,
    Midheaven,
    MidheavenRuler,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    SouthNode,
    Uranus,
    Neptune,
    Pluto,
}

impl WeightItem {
    pub fn label(self) -> &'static str {
        match self {
            WeightItem::Ascendant => "Ascendant",
            WeightItem::ChartRuler => "Chart ruler",
            WeightItem::Sun => "Sun",
            WeightItem::SunRuler => "Sun ruler",
            WeightItem::Moon => "Moon",
            WeightItem::MoonRuler => "Moon ruler",
            WeightItem::Midheaven => "Midheaven",
            WeightItem::MidheavenRuler => "Midheaven ruler",
            WeightItem::Mercury => "Mercury",
            WeightItem::Venus => "Venus",
            WeightItem::Mars => "Mars",
            WeightItem::Jupiter => "Jupiter",
            WeightItem::Saturn => "Saturn",
            WeightItem::SouthNode => "South Node",
            WeightItem::Uranus => "Uranus",
            WeightItem::Neptune => "Neptune",
            WeightItem::Pluto => "Pluto",
        }
    }

    /// The chart point whose sign decides this item's element. Ruler items
    /// resolve to the ruling body, so they follow the sign that body occupies.
    pub fn subject(self, record: &ChartRecord) -> Point {
        let ruler_of = |point: Point| Point::Body(record.sign_of(point).ruler());
        match self {
            WeightItem::Ascendant => Point::Ascendant,
            WeightItem::ChartRuler => ruler_of(Point::Ascendant),
            WeightItem::Sun => Point::Body(Body::Sun),
            WeightItem::SunRuler => ruler_of(Point::Body(Body::Sun)),
            WeightItem::Moon => Point::Body(Body::Moon),
            WeightItem::MoonRuler => ruler_of(Point::Body(Body::Moon)),
            WeightItem::Midheaven => Point::Midheaven,
            WeightItem::MidheavenRuler => ruler_of(Point::Midheaven),
            WeightItem::Mercury => Point::Body(Body::Mercury),
            WeightItem::Venus => Point::Body(Body::Venus),
            WeightItem::Mars => Point::Body(Body::Mars),
            WeightItem::Jupiter => Point::Body(Body::Jupiter),
            WeightItem::Saturn => Point::Body(Body::Saturn),
            WeightItem::SouthNode => Point::SouthNode,
            WeightItem::Uranus => Point::Body(Body::Uranus),
            WeightItem::Neptune => Point::Body(Body::Neptune),
            WeightItem::Pluto => Point::Body(Body::Pluto),
        }
    }
}

impl fmt::Display for WeightItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementWeight {
    pub item: WeightItem,
    pub weight: u32,
}

const fn w(item: WeightItem, weight: u32) -> ElementWeight {
    ElementWeight { item, weight }
}

/// Traditional weighting, in reporting order.
pub const DEFAULT_WEIGHTS: [ElementWeight; 17] = [
    w(WeightItem::Ascendant, 15),
    w(WeightItem::ChartRuler, 10),
    w(WeightItem::Sun, 16),
    w(WeightItem::SunRuler, 4),
    w(WeightItem::Moon, 13),
    w(WeightItem::MoonRuler, 2),
    w(WeightItem::Midheaven, 6),
    w(WeightItem::MidheavenRuler, 4),
    w(WeightItem::Mercury, 5),
    w(WeightItem::Venus, 5),
    w(WeightItem::Mars, 6),
    w(WeightItem::Jupiter, 4),
    w(WeightItem::Saturn, 4),
    w(WeightItem::SouthNode, 3),
    w(WeightItem::Uranus, 1),
    w(WeightItem::Neptune, 1),
    w(WeightItem::Pluto, 1),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ElementTotals {
    pub earth: u32,
    pub water: u32,
    pub fire: u32,
    pub air: u32,
}

impl ElementTotals {
    pub fn get(&self, element: Element) -> u32 {
        match element {
            Element::Earth => self.earth,
            Element::Water => self.water,
            Element::Fire => self.fire,
            Element::Air => self.air,
        }
    }

    pub fn add(&mut self, element: Element, score: u32) {
        match element {
            Element::Earth => self.earth += score,
            Element::Water => self.water += score,
            Element::Fire => self.fire += score,
            Element::Air => self.air += score,
        }
    }

    pub fn sum(&self) -> u32 {
        self.earth + self.water + self.fire + self.air
    }

    /// Element with the highest total; ties go to the earlier summary row.
    pub fn dominant(&self) -> Element {
        let mut best = Element::SUMMARY_ORDER[0];
        for element in Element::SUMMARY_ORDER {
            if self.get(element) > self.get(best) {
                best = element;
            }
        }
        best
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementDetailRow {
    pub item: WeightItem,
    pub label: &'static str,
    pub subject: Point,
    pub glyph: &'static str,
    pub sign: Sign,
    pub element: Element,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSummaryRow {
    pub element: Element,
    pub description: &'static str,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementTable {
    pub details: Vec<ElementDetailRow>,
    pub summary: Vec<ElementSummaryRow>,
    pub totals: ElementTotals,
}

/// Score every weighted item and bucket it by element.
///
/// Fails with [`ChartError::ElementWeightMismatch`] when the weights do not
/// add up to exactly 100.
pub fn weigh_elements(record: &ChartRecord, weights: &[ElementWeight]) -> Result<ElementTable, ChartError> {
    let mut totals = ElementTotals::default();
    let details: Vec<ElementDetailRow> = weights
        .iter()
        .map(|entry| {
            let subject = entry.item.subject(record);
            let sign = record.sign_of(subject);
            let element = sign.element();
            totals.add(element, entry.weight);
            ElementDetailRow {
                item: entry.item,
                label: entry.item.label(),
                subject,
                glyph: subject.glyph(),
                sign,
                element,
                score: entry.weight,
            }
        })
        .collect();

    let sum = totals.sum();
    if sum != 100 {
        return Err(ChartError::ElementWeightMismatch { totals, sum });
    }

    let summary = Element::SUMMARY_ORDER
        .iter()
        .map(|&element| ElementSummaryRow {
            element,
            description: element.description(),
            total: totals.get(element),
        })
        .collect();

    Ok(ElementTable {
        details,
        summary,
        totals,
    })
}
