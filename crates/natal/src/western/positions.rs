//! Per-point position table: degree in sign, house, ruled houses, dignity.

use crate::chart::ChartRecord;
use crate::util::normalize_360;
use crate::western::dignities::{essential_dignity, Dignity};
use crate::western::rulers::HouseRulership;
use crate::western::types::{Body, House, Point, Sign};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionRow {
    pub point: Point,
    pub longitude: f64,
    pub sign: Sign,
    /// e.g. `"☉ 12°05′ Leo"`
    pub position: String,
    pub house: House,
    pub ruled_houses: Vec<House>,
    /// `None` for the Ascendant and Midheaven
    pub dignity: Option<Dignity>,
}

impl PositionRow {
    /// `"1, 8"`, or `"-"` when the point rules no house.
    pub fn ruled_houses_text(&self) -> String {
        if self.ruled_houses.is_empty() {
            return "-".to_string();
        }
        self.ruled_houses
            .iter()
            .map(House::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn dignity_text(&self) -> &'static str {
        self.dignity.map(Dignity::label).unwrap_or("-")
    }
}

/// Whole degrees and rounded minutes within the sign. 59.5′ and above
/// carries into the next degree, which may read 30°00′.
pub fn degrees_in_sign(longitude: f64) -> (u32, u32) {
    let within = normalize_360(longitude) % 30.0;
    let mut degrees = within.floor() as u32;
    let mut minutes = ((within - within.floor()) * 60.0).round() as u32;
    if minutes == 60 {
        degrees += 1;
        minutes = 0;
    }
    (degrees, minutes)
}

pub fn format_position(point: Point, longitude: f64, sign: Sign) -> String {
    let (degrees, minutes) = degrees_in_sign(longitude);
    format!("{} {:02}°{:02}′ {}", point.glyph(), degrees, minutes, sign)
}

/// Ascendant, the ten bodies and the Midheaven.
pub fn position_table(record: &ChartRecord, rulership: &HouseRulership) -> Vec<PositionRow> {
    let points = std::iter::once(Point::Ascendant)
        .chain(Body::ALL.iter().map(|&body| Point::Body(body)))
        .chain(std::iter::once(Point::Midheaven));

    points
        .map(|point| {
            let longitude = record.longitude(point);
            let sign = record.sign_of(point);
            let (ruled_houses, dignity) = match point {
                Point::Body(body) => (
                    rulership.houses_ruled_by(body).to_vec(),
                    Some(essential_dignity(body, sign)),
                ),
                _ => (Vec::new(), None),
            };
            PositionRow {
                point,
                longitude,
                sign,
                position: format_position(point, longitude, sign),
                house: record.house_of(point),
                ruled_houses,
                dignity,
            }
        })
        .collect()
}
