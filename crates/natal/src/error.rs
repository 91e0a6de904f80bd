use crate::ephemeris::{EphemerisError, HouseSystem};
use crate::western::elements::ElementTotals;
use thiserror::Error;

/// Errors that abort a chart computation. No partial chart is ever returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid civil time: {field} = {value} ({reason})")]
    InvalidCivilTime {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("Place not found: {place:?} ({reason})")]
    PlaceNotFound { place: String, reason: String },
    #[error("Ephemeris unavailable while computing {stage}: {source}")]
    EphemerisUnavailable {
        stage: String,
        #[source]
        source: EphemerisError,
    },
    #[error("{system} houses are undefined at latitude {latitude}: {reason}")]
    HouseSystemUndefined {
        system: HouseSystem,
        latitude: f64,
        reason: String,
    },
    #[error("Element weights total {sum} instead of 100: {totals:?}")]
    ElementWeightMismatch { totals: ElementTotals, sum: u32 },
}

impl ChartError {
    pub(crate) fn civil_time(field: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        ChartError::InvalidCivilTime {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Map an adapter failure at `stage`, keeping degenerate house geometry
    /// distinct from plain unavailability.
    pub(crate) fn from_ephemeris(stage: impl Into<String>, error: EphemerisError) -> Self {
        match error {
            EphemerisError::HouseSystemUndefined { system, latitude } => ChartError::HouseSystemUndefined {
                system,
                latitude,
                reason: "the ephemeris has no solution for this latitude".to_string(),
            },
            source => ChartError::EphemerisUnavailable {
                stage: stage.into(),
                source,
            },
        }
    }
}
