//! Every derived table of a chart, computed in one pass.

use crate::aspects::{AspectCalculator, AspectRow};
use crate::chart::ChartRecord;
use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::western::{
    chart_ruler, essential_dignity, four_kings, house_table, position_table, weigh_elements, Body, Dignity,
    ElementTable, HouseRow, HouseRulership, KingRow, PositionRow,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyDignity {
    pub body: Body,
    pub dignity: Dignity,
}

#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub chart_ruler: Body,
    pub four_kings: Vec<KingRow>,
    pub elements: ElementTable,
    pub dignities: Vec<BodyDignity>,
    pub aspects: Vec<AspectRow>,
    pub houses: Vec<HouseRow>,
    pub rulership: HouseRulership,
    pub positions: Vec<PositionRow>,
}

pub fn classify(record: &ChartRecord, config: &ChartConfig) -> Result<Classification, ChartError> {
    let elements = weigh_elements(record, &config.element_weights)?;
    let rulership = HouseRulership::from_record(record);

    let dignities = Body::ALL
        .iter()
        .map(|&body| BodyDignity {
            body,
            dignity: essential_dignity(body, record.sign_of(body.into())),
        })
        .collect();

    let aspects = AspectCalculator::new(&config.aspects).compute_natal_aspects(record);
    log::debug!("{} aspects found", aspects.len());

    Ok(Classification {
        chart_ruler: chart_ruler(record),
        four_kings: four_kings(record),
        elements,
        dignities,
        aspects,
        houses: house_table(record),
        positions: position_table(record, &rulership),
        rulership,
    })
}
