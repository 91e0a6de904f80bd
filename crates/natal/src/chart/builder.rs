use crate::chart::placement::{Placer, PointCoordinates};
use crate::chart::record::{ChartParts, ChartRecord, Cusps, Placement};
use crate::config::ChartConfig;
use crate::ephemeris::{BodyPosition, Ephemeris, EphemerisError, GeoLocation, HouseSystem, Target};
use crate::error::ChartError;
use crate::time::JulianDay;
use crate::util::normalize_360;
use crate::western::{Body, House, Point};

/// Assembles a [`ChartRecord`] from ephemeris queries.
pub struct ChartBuilder<'a, E: Ephemeris> {
    ephemeris: &'a E,
    config: &'a ChartConfig,
}

impl<'a, E: Ephemeris> ChartBuilder<'a, E> {
    pub fn new(ephemeris: &'a E, config: &'a ChartConfig) -> Self {
        Self { ephemeris, config }
    }

    /// Compute cusps, angles, bodies and nodes, then place every point.
    /// Either the whole chart is returned or an error; never a partial chart.
    pub fn build(
        &self,
        julian_day: JulianDay,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<ChartRecord, ChartError> {
        let frame = self
            .ephemeris
            .houses(julian_day, location, system)
            .map_err(|e| ChartError::from_ephemeris("house cusps", e))?;

        for (name, value) in [
            ("ascendant", frame.ascendant),
            ("midheaven", frame.midheaven),
            ("armc", frame.armc),
        ] {
            if !value.is_finite() {
                return Err(ChartError::from_ephemeris(
                    "house cusps",
                    EphemerisError::HouseCalculationFailed {
                        message: format!("{} is not a finite number", name),
                    },
                ));
            }
        }

        let cusps = Cusps::new(frame.cusps).map_err(|reason| ChartError::HouseSystemUndefined {
            system,
            latitude: location.lat,
            reason,
        })?;
        log::debug!(
            "{} cusps at JD {}: ASC {:.4} MC {:.4}",
            system,
            julian_day,
            frame.ascendant,
            frame.midheaven
        );

        let mut bodies = [BodyPosition {
            lon: 0.0,
            lat: 0.0,
            distance: 0.0,
        }; 10];
        for (slot, body) in bodies.iter_mut().zip(Body::ALL) {
            *slot = self.query(julian_day, Target::Body(body))?;
        }

        let north = self.query(julian_day, Target::MeanNode)?.lon;
        let south = normalize_360(north + 180.0);

        let mut placer = Placer::new(
            self.ephemeris,
            julian_day,
            system,
            frame.armc,
            location.lat,
            &cusps,
            &self.config.placement,
        );

        let mut body_placements = [Placement::new(0.0, House::FIRST); 10];
        for ((slot, body), position) in body_placements.iter_mut().zip(Body::ALL).zip(&bodies) {
            let coords = PointCoordinates {
                lon: position.lon,
                lat: position.lat,
                distance: position.distance,
            };
            let house = placer.place(body.name(), coords)?;
            *slot = Placement::new(position.lon, house);
        }

        let north_house = placer.place(Point::NorthNode.name(), PointCoordinates::on_ecliptic(north))?;
        let south_house = placer.place(Point::SouthNode.name(), PointCoordinates::on_ecliptic(south))?;
        let mc_house = placer.place(Point::Midheaven.name(), PointCoordinates::on_ecliptic(frame.midheaven))?;

        Ok(ChartRecord::from_parts(ChartParts {
            julian_day,
            location: *location,
            house_system: system,
            armc: normalize_360(frame.armc),
            cusps,
            bodies,
            // The Ascendant opens the first house by definition
            ascendant: Placement::new(frame.ascendant, House::FIRST),
            midheaven: Placement::new(frame.midheaven, mc_house),
            north_node: Placement::new(north, north_house),
            south_node: Placement::new(south, south_house),
            body_placements,
        }))
    }

    fn query(&self, julian_day: JulianDay, target: Target) -> Result<BodyPosition, ChartError> {
        let stage = || format!("{} position", target.name());
        let position = self
            .ephemeris
            .position(julian_day, target)
            .map_err(|e| ChartError::from_ephemeris(stage(), e))?;

        if !(position.lon.is_finite() && position.lat.is_finite() && position.distance.is_finite()) {
            return Err(ChartError::from_ephemeris(
                stage(),
                EphemerisError::CalculationFailed {
                    target: target.name().to_string(),
                    julian_day: julian_day.value(),
                    message: "non-finite coordinates".to_string(),
                },
            ));
        }

        Ok(BodyPosition {
            lon: normalize_360(position.lon),
            ..position
        })
    }
}
