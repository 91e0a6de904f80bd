//! Place name → coordinates + timezone.
//!
//! Real geocoding services live outside this crate behind [`Geocoder`]. The
//! bundled [`StaticGeocoder`] answers from a configured gazetteer and also
//! accepts literal `"lat,lon,Area/City"` text.

use crate::ephemeris::GeoLocation;
use crate::time::parse_timezone;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodeError {
    #[error("No match for {place:?}")]
    NotFound { place: String },
    #[error("Invalid resolution for {place:?}: {message}")]
    Invalid { place: String, message: String },
    #[error("Geocoding service failed: {message}")]
    Service { message: String },
}

/// Coordinates and IANA timezone of a resolved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResolution {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl GeoResolution {
    /// Validated constructor: latitude in [-90, 90], longitude in
    /// [-180, 180], timezone known to the tz database.
    pub fn new(latitude: f64, longitude: f64, timezone: impl Into<String>) -> Result<Self, String> {
        let timezone = timezone.into();
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("latitude {} outside -90..90", latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("longitude {} outside -180..180", longitude));
        }
        parse_timezone(&timezone).map_err(|e| e.to_string())?;
        Ok(Self {
            latitude,
            longitude,
            timezone,
        })
    }

    pub fn location(&self) -> GeoLocation {
        GeoLocation {
            lat: self.latitude,
            lon: self.longitude,
        }
    }
}

pub trait Geocoder {
    /// Resolve free text to a single best match.
    fn resolve(&self, place: &str) -> Result<GeoResolution, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn resolve(&self, place: &str) -> Result<GeoResolution, GeocodeError> {
        (**self).resolve(place)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub lat: f64,
    pub lon: f64,
    pub tz: String,
}

impl Place {
    fn matches(&self, query: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(query)
            || self.aliases.iter().any(|a| a.trim().eq_ignore_ascii_case(query))
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    places: Vec<Place>,
}

impl StaticGeocoder {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }
}

impl Geocoder for StaticGeocoder {
    fn resolve(&self, place: &str) -> Result<GeoResolution, GeocodeError> {
        let query = place.trim();
        if query.is_empty() {
            return Err(GeocodeError::NotFound {
                place: place.to_string(),
            });
        }

        let (lat, lon, tz) = if let Some(entry) = self.places.iter().find(|p| p.matches(query)) {
            (entry.lat, entry.lon, entry.tz.clone())
        } else if let Some(literal) = parse_coordinates(query) {
            literal
        } else {
            return Err(GeocodeError::NotFound {
                place: place.to_string(),
            });
        };

        GeoResolution::new(lat, lon, tz).map_err(|message| GeocodeError::Invalid {
            place: place.to_string(),
            message,
        })
    }
}

/// Parse `"25.03, 121.56, Asia/Taipei"`.
fn parse_coordinates(text: &str) -> Option<(f64, f64, String)> {
    let mut parts = text.split(',').map(str::trim);
    let lat = parts.next()?.parse::<f64>().ok()?;
    let lon = parts.next()?.parse::<f64>().ok()?;
    let tz = parts.next().filter(|s| !s.is_empty())?.to_string();
    if parts.next().is_some() {
        return None;
    }
    Some((lat, lon, tz))
}
