use crate::ephemeris::HouseSystem;
use crate::western::Body;
use serde::{Deserialize, Serialize};

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// What to ask the ephemeris for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Body(Body),
    /// Mean lunar ascending node.
    MeanNode,
}

impl Target {
    pub fn name(self) -> &'static str {
        match self {
            Target::Body(body) => body.name(),
            Target::MeanNode => "mean node",
        }
    }
}

/// Ecliptic position of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Longitude in degrees (0-360)
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Distance in AU
    pub distance: f64,
}

/// House cusps and angles for one instant and place
#[derive(Debug, Clone, PartialEq)]
pub struct HouseFrame {
    /// Cusps of houses 1..=12, in degrees
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
    /// Sidereal time expressed as right ascension of the MC, in degrees
    pub armc: f64,
}

/// Arguments for a house-position query.
///
/// `obliquity`, `lat` and `distance` are optional so adapters that only take
/// a longitude can still answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HousePositionQuery {
    pub armc: f64,
    pub geo_lat: f64,
    pub obliquity: Option<f64>,
    pub system: HouseSystem,
    pub lon: f64,
    pub lat: Option<f64>,
    pub distance: Option<f64>,
}
