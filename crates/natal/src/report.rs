//! Serializable chart output.

use crate::aspects::AspectRow;
use crate::chart::ChartRecord;
use crate::classification::{BodyDignity, Classification};
use crate::ephemeris::HouseSystem;
use crate::geocode::GeoResolution;
use crate::time::JulianDay;
use crate::western::elements::{ElementDetailRow, ElementSummaryRow, ElementTotals};
use crate::western::{Body, House, HouseRow, HouseRuler, KingRow, Point, PositionRow, Sign};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointEntry {
    pub longitude: f64,
    pub sign: Sign,
    pub house: House,
}

impl PointEntry {
    fn of(record: &ChartRecord, point: Point) -> Self {
        let placement = record.placement(point);
        Self {
            longitude: placement.longitude,
            sign: placement.sign,
            house: placement.house,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuspEntry {
    pub house: House,
    pub longitude: f64,
    pub sign: Sign,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyEntry {
    pub body: Body,
    pub glyph: &'static str,
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
    pub sign: Sign,
    pub house: House,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartReport {
    pub geo: GeoResolution,
    pub julian_day: JulianDay,
    pub house_system: HouseSystem,
    pub ascendant: PointEntry,
    pub midheaven: PointEntry,
    pub cusps: Vec<CuspEntry>,
    pub bodies: Vec<BodyEntry>,
    pub north_node: PointEntry,
    pub south_node: PointEntry,
    pub chart_ruler: Body,
    pub four_kings: Vec<KingRow>,
    pub element_details: Vec<ElementDetailRow>,
    pub element_summary: Vec<ElementSummaryRow>,
    pub element_totals: ElementTotals,
    pub houses: Vec<HouseRow>,
    pub house_rulers: Vec<HouseRuler>,
    pub positions: Vec<PositionRow>,
    pub dignities: Vec<BodyDignity>,
    pub aspects: Vec<AspectRow>,
    pub symbols: BTreeMap<&'static str, &'static str>,
    /// Overall reading; empty unless narrative generation succeeded
    pub advice: String,
    pub narrative_generated: bool,
}

impl ChartReport {
    pub fn new(geo: GeoResolution, record: &ChartRecord, classification: Classification) -> Self {
        let cusps = House::all()
            .map(|house| {
                let longitude = record.cusps().cusp(house);
                CuspEntry {
                    house,
                    longitude,
                    sign: Sign::from_longitude(longitude),
                }
            })
            .collect();

        let bodies = Body::ALL
            .iter()
            .map(|&body| {
                let position = record.body(body);
                let placement = record.placement(body.into());
                BodyEntry {
                    body,
                    glyph: body.glyph(),
                    longitude: placement.longitude,
                    latitude: position.lat,
                    distance: position.distance,
                    sign: placement.sign,
                    house: placement.house,
                }
            })
            .collect();

        let symbols = std::iter::once(Point::Ascendant)
            .chain(Point::HOUSE_OCCUPANTS)
            .map(|point| (point.key(), point.glyph()))
            .collect();

        let Classification {
            chart_ruler,
            four_kings,
            elements,
            dignities,
            aspects,
            houses,
            rulership,
            positions,
        } = classification;

        Self {
            geo,
            julian_day: record.julian_day(),
            house_system: record.house_system(),
            ascendant: PointEntry::of(record, Point::Ascendant),
            midheaven: PointEntry::of(record, Point::Midheaven),
            cusps,
            bodies,
            north_node: PointEntry::of(record, Point::NorthNode),
            south_node: PointEntry::of(record, Point::SouthNode),
            chart_ruler,
            four_kings,
            element_details: elements.details,
            element_summary: elements.summary,
            element_totals: elements.totals,
            houses,
            house_rulers: rulership.by_house,
            positions,
            dignities,
            aspects,
            symbols,
            advice: String::new(),
            narrative_generated: false,
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
