//! Sign rulers for Western astrology.
//!
//! Only traditional rulerships are used: Scorpio stays with Mars, Aquarius with
//! Saturn and Pisces with Jupiter.

use crate::chart::ChartRecord;
use crate::western::types::{Body, House, Point, Sign};
use serde::Serialize;
use std::collections::BTreeMap;

/// Traditional ruler of the Ascendant's sign.
pub fn chart_ruler(record: &ChartRecord) -> Body {
    record.sign_of(Point::Ascendant).ruler()
}

#[derive(Debug, Clone, Serialize)]
pub struct HouseRuler {
    pub house: House,
    pub cusp_sign: Sign,
    pub ruler: Body,
}

/// Which body rules each house, and the inverse: which houses each body rules.
#[derive(Debug, Clone, Serialize)]
pub struct HouseRulership {
    pub by_house: Vec<HouseRuler>,
    pub by_body: BTreeMap<Body, Vec<House>>,
}

impl HouseRulership {
    pub fn from_record(record: &ChartRecord) -> Self {
        let by_house: Vec<HouseRuler> = House::all()
            .map(|house| {
                let cusp_sign = record.cusp_sign(house);
                HouseRuler {
                    house,
                    cusp_sign,
                    ruler: cusp_sign.ruler(),
                }
            })
            .collect();

        let mut by_body: BTreeMap<Body, Vec<House>> = BTreeMap::new();
        for entry in &by_house {
            by_body.entry(entry.ruler).or_default().push(entry.house);
        }

        Self { by_house, by_body }
    }

    /// Houses ruled by `body`, ascending; empty for bodies ruling no cusp.
    pub fn houses_ruled_by(&self, body: Body) -> &[House] {
        self.by_body.get(&body).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn ruler_of(&self, house: House) -> Body {
        self.by_house[house.index()].ruler
    }
}
