//! Request-scoped chart pipeline: geocode, normalize time, build, classify,
//! report, optionally narrate.

use crate::chart::ChartBuilder;
use crate::classification::classify;
use crate::config::ChartConfig;
use crate::ephemeris::{Ephemeris, HouseSystem};
use crate::error::ChartError;
use crate::geocode::Geocoder;
use crate::narrative::{narrate, Narrator};
use crate::report::ChartReport;
use crate::time::{to_julian_day, CivilDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub location: String,
    /// House system name or one-letter code; unknown values select the default
    #[serde(default)]
    pub house_system: Option<String>,
}

impl ChartRequest {
    pub fn civil(&self) -> CivilDateTime {
        CivilDateTime::new(self.year, self.month, self.day, self.hour, self.minute)
    }
}

pub struct ChartService<G: Geocoder, E: Ephemeris> {
    geocoder: G,
    ephemeris: E,
    config: ChartConfig,
    narrator: Option<Box<dyn Narrator + Send + Sync>>,
}

impl<G: Geocoder, E: Ephemeris> ChartService<G, E> {
    pub fn new(geocoder: G, ephemeris: E, config: ChartConfig) -> Self {
        Self {
            geocoder,
            ephemeris,
            config,
            narrator: None,
        }
    }

    pub fn with_narrator(mut self, narrator: Box<dyn Narrator + Send + Sync>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn compute(&self, request: &ChartRequest) -> Result<ChartReport, ChartError> {
        let civil = request.civil();
        // Reject bad dates before any external lookup
        civil.to_naive()?;

        let geo = self
            .geocoder
            .resolve(&request.location)
            .map_err(|e| ChartError::PlaceNotFound {
                place: request.location.clone(),
                reason: e.to_string(),
            })?;
        log::info!(
            "Resolved {:?} to {:.4}, {:.4} ({})",
            request.location,
            geo.latitude,
            geo.longitude,
            geo.timezone
        );

        let julian_day = to_julian_day(&civil, &geo.timezone)?;
        let system = HouseSystem::resolve_or(request.house_system.as_deref(), self.config.default_house_system);
        log::info!("House system: {}", system);

        let record = ChartBuilder::new(&self.ephemeris, &self.config).build(julian_day, &geo.location(), system)?;
        let classification = classify(&record, &self.config)?;
        let mut report = ChartReport::new(geo, &record, classification);

        if let Some(narrator) = &self.narrator {
            narrate(&**narrator, &mut report);
        }
        Ok(report)
    }
}
