//! The twelve-house table: cusp sign, occupants and traditional meaning.

use crate::chart::ChartRecord;
use crate::western::types::{House, Point, Sign};
use serde::Serialize;

const HOUSE_NAMES: [&str; 12] = [
    "House of Self",
    "House of Value",
    "House of Communication",
    "House of Home",
    "House of Pleasure",
    "House of Service",
    "House of Partnership",
    "House of Transformation",
    "House of Philosophy",
    "House of Career",
    "House of Friendship",
    "House of the Unconscious",
];

const HOUSE_MEANINGS: [&str; 12] = [
    "Self, appearance, natural gifts and first impressions.",
    "Income, finances, acquiring and using resources.",
    "Siblings, relatives, neighbours, early schooling and learning.",
    "Family of origin, father, property and later life.",
    "Children, speculation, creativity, recreation and leisure.",
    "Daily work, labour, subordinates, employees and health.",
    "Marriage, spouse, business partners, lawsuits and open enemies.",
    "Other people's resources, inheritance, death and insurance.",
    "Law, ideals, long journeys and higher education.",
    "Career, mother, public image, reputation and authority.",
    "Friends, groups, hopes, causes and charity.",
    "The unconscious, sacrifice, secrets and hidden enemies.",
];

impl House {
    pub fn traditional_name(self) -> &'static str {
        HOUSE_NAMES[self.index()]
    }

    pub fn meaning(self) -> &'static str {
        HOUSE_MEANINGS[self.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseRow {
    pub house: House,
    pub name: &'static str,
    pub sign: Sign,
    /// Bodies, Midheaven and nodes in the house, in canonical order
    pub occupants: Vec<Point>,
    pub meaning: &'static str,
}

pub fn house_table(record: &ChartRecord) -> Vec<HouseRow> {
    House::all()
        .map(|house| HouseRow {
            house,
            name: house.traditional_name(),
            sign: record.cusp_sign(house),
            occupants: Point::HOUSE_OCCUPANTS
                .iter()
                .copied()
                .filter(|&point| record.house_of(point) == house)
                .collect(),
            meaning: house.meaning(),
        })
        .collect()
}
