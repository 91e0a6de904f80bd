//! House placement of a single point.
//!
//! Strategies are tried in configured order. A strategy the ephemeris does
//! not support is dropped for the rest of the chart and the next one is
//! tried; any other failure aborts the chart.

use crate::chart::record::Cusps;
use crate::ephemeris::{Ephemeris, EphemerisError, HousePositionQuery, HouseSystem};
use crate::error::ChartError;
use crate::time::JulianDay;
use crate::western::House;
use serde::{Deserialize, Serialize};

/// Mean obliquity of the ecliptic at J2000, in degrees.
pub const J2000_OBLIQUITY: f64 = 23.439_291_1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Ephemeris house position from longitude, latitude, distance and obliquity.
    EclipticQuery,
    /// Ephemeris house position from longitude alone.
    LongitudeQuery,
    /// Local interval test against the cusps. Always available.
    CuspInterval,
}

impl PlacementStrategy {
    pub const DEFAULT_CHAIN: [PlacementStrategy; 3] = [
        PlacementStrategy::EclipticQuery,
        PlacementStrategy::LongitudeQuery,
        PlacementStrategy::CuspInterval,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlacementStrategy::EclipticQuery => "ecliptic house-position query",
            PlacementStrategy::LongitudeQuery => "longitude house-position query",
            PlacementStrategy::CuspInterval => "cusp interval test",
        }
    }
}

/// Ecliptic coordinates of the point being placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCoordinates {
    pub lon: f64,
    pub lat: f64,
    pub distance: f64,
}

impl PointCoordinates {
    /// A point on the ecliptic at unit distance: angles and nodes.
    pub fn on_ecliptic(lon: f64) -> Self {
        Self {
            lon,
            lat: 0.0,
            distance: 1.0,
        }
    }
}

/// Placement state for one chart build.
pub(crate) struct Placer<'a, E: Ephemeris> {
    ephemeris: &'a E,
    julian_day: JulianDay,
    system: HouseSystem,
    armc: f64,
    geo_lat: f64,
    cusps: &'a Cusps,
    active: Vec<PlacementStrategy>,
    obliquity: Option<f64>,
}

impl<'a, E: Ephemeris> Placer<'a, E> {
    pub(crate) fn new(
        ephemeris: &'a E,
        julian_day: JulianDay,
        system: HouseSystem,
        armc: f64,
        geo_lat: f64,
        cusps: &'a Cusps,
        chain: &[PlacementStrategy],
    ) -> Self {
        Self {
            ephemeris,
            julian_day,
            system,
            armc,
            geo_lat,
            cusps,
            active: chain.to_vec(),
            obliquity: None,
        }
    }

    pub(crate) fn place(&mut self, point: &str, coords: PointCoordinates) -> Result<House, ChartError> {
        let mut i = 0;
        while i < self.active.len() {
            let strategy = self.active[i];
            match self.attempt(strategy, coords) {
                Ok(house) => {
                    log::debug!("{} placed in house {} by {}", point, house, strategy.name());
                    return Ok(house);
                }
                Err(EphemerisError::Unsupported { query }) => {
                    log::warn!(
                        "{} unavailable ({} not supported), falling back for the rest of this chart",
                        strategy.name(),
                        query
                    );
                    self.active.remove(i);
                }
                Err(e) => return Err(ChartError::from_ephemeris(format!("house of {}", point), e)),
            }
        }

        Err(ChartError::EphemerisUnavailable {
            stage: format!("house of {}", point),
            source: EphemerisError::Unsupported {
                query: "house placement",
            },
        })
    }

    fn attempt(&mut self, strategy: PlacementStrategy, coords: PointCoordinates) -> Result<House, EphemerisError> {
        let fractional = match strategy {
            PlacementStrategy::CuspInterval => {
                return self
                    .cusps
                    .house_of(coords.lon)
                    .ok_or_else(|| EphemerisError::HouseCalculationFailed {
                        message: format!("no cusp interval contains {:.6}", coords.lon),
                    });
            }
            PlacementStrategy::EclipticQuery => {
                let obliquity = self.obliquity();
                self.ephemeris.house_position(&HousePositionQuery {
                    armc: self.armc,
                    geo_lat: self.geo_lat,
                    obliquity: Some(obliquity),
                    system: self.system,
                    lon: coords.lon,
                    lat: Some(coords.lat),
                    distance: Some(coords.distance),
                })?
            }
            PlacementStrategy::LongitudeQuery => self.ephemeris.house_position(&HousePositionQuery {
                armc: self.armc,
                geo_lat: self.geo_lat,
                obliquity: None,
                system: self.system,
                lon: coords.lon,
                lat: None,
                distance: None,
            })?,
        };

        House::from_fractional(fractional).ok_or_else(|| EphemerisError::HouseCalculationFailed {
            message: format!("house position {} is not a number", fractional),
        })
    }

    /// True obliquity for the chart instant, queried once. Falls back to the
    /// J2000 mean value when the ephemeris cannot provide it.
    fn obliquity(&mut self) -> f64 {
        if let Some(eps) = self.obliquity {
            return eps;
        }
        let eps = match self.ephemeris.obliquity(self.julian_day) {
            Ok(eps) if eps.is_finite() => eps,
            Ok(_) | Err(_) => {
                log::debug!("obliquity unavailable, using J2000 mean {}", J2000_OBLIQUITY);
                J2000_OBLIQUITY
            }
        };
        self.obliquity = Some(eps);
        eps
    }
}
