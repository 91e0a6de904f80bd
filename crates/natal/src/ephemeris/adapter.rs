use crate::ephemeris::types::{BodyPosition, GeoLocation, HouseFrame, HousePositionQuery, Target};
use crate::ephemeris::HouseSystem;
use crate::time::JulianDay;
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {target} at JD {julian_day}: {message}")]
    CalculationFailed {
        target: String,
        julian_day: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("{system} houses are undefined at latitude {latitude}")]
    HouseSystemUndefined { system: HouseSystem, latitude: f64 },
    #[error("{query} is not supported by this ephemeris")]
    Unsupported { query: &'static str },
}

/// Contract the chart builder relies on.
///
/// `houses` and `position` are required. `house_position` and `obliquity`
/// are optional capabilities: the default implementations report
/// [`EphemerisError::Unsupported`] and the builder degrades to its own
/// fallbacks.
pub trait Ephemeris {
    /// House cusps, Ascendant, Midheaven and ARMC for an instant and place.
    fn houses(
        &self,
        julian_day: JulianDay,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError>;

    /// Ecliptic longitude, latitude and distance of a body.
    fn position(&self, julian_day: JulianDay, target: Target) -> Result<BodyPosition, EphemerisError>;

    /// Fractional house position (1.0 ..< 13.0) of an ecliptic point.
    fn house_position(&self, _query: &HousePositionQuery) -> Result<f64, EphemerisError> {
        Err(EphemerisError::Unsupported {
            query: "house position",
        })
    }

    /// True obliquity of the ecliptic, in degrees.
    fn obliquity(&self, _julian_day: JulianDay) -> Result<f64, EphemerisError> {
        Err(EphemerisError::Unsupported { query: "obliquity" })
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn houses(
        &self,
        julian_day: JulianDay,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        (**self).houses(julian_day, location, system)
    }

    fn position(&self, julian_day: JulianDay, target: Target) -> Result<BodyPosition, EphemerisError> {
        (**self).position(julian_day, target)
    }

    fn house_position(&self, query: &HousePositionQuery) -> Result<f64, EphemerisError> {
        (**self).house_position(query)
    }

    fn obliquity(&self, julian_day: JulianDay) -> Result<f64, EphemerisError> {
        (**self).obliquity(julian_day)
    }
}
