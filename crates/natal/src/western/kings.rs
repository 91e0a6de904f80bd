//! The Four Kings: Sun, Moon, Ascendant and chart ruler.

use crate::chart::ChartRecord;
use crate::western::rulers::chart_ruler;
use crate::western::types::{Body, Element, House, Point, Sign};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KingRow {
    pub label: String,
    pub point: Point,
    pub sign: Sign,
    pub house: House,
    pub element: Element,
    /// Filled in by the narrative layer; empty otherwise.
    pub interpretation: String,
}

impl KingRow {
    fn new(record: &ChartRecord, label: String, point: Point) -> Self {
        let sign = record.sign_of(point);
        Self {
            label,
            point,
            sign,
            house: record.house_of(point),
            element: sign.element(),
            interpretation: String::new(),
        }
    }
}

pub fn four_kings(record: &ChartRecord) -> Vec<KingRow> {
    let ruler = chart_ruler(record);
    vec![
        KingRow::new(record, "Sun".to_string(), Point::Body(Body::Sun)),
        KingRow::new(record, "Moon".to_string(), Point::Body(Body::Moon)),
        KingRow::new(record, "Ascendant".to_string(), Point::Ascendant),
        KingRow::new(record, format!("Chart ruler ({})", ruler), Point::Body(ruler)),
    ]
}
