
pub mod aspects;
pub mod chart;
pub mod classification;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod geocode;
pub mod narrative;
pub mod report;
pub mod service;
pub mod time;
pub mod util;
pub mod western;

pub use chart::{ChartBuilder, ChartRecord};
pub use classification::{classify, Classification};
pub use config::ChartConfig;
pub use ephemeris::{Ephemeris, HouseSystem};
pub use error::ChartError;
pub use geocode::{GeoResolution, Geocoder, StaticGeocoder};
pub use report::ChartReport;
pub use service::{ChartRequest, ChartService};
pub use time::{CivilDateTime, JulianDay};
pub use western::{Body, Element, House, Point, Sign};

#[cfg(feature = "swiss")]
pub use ephemeris::SwissEphemerisAdapter;
