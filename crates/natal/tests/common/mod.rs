#![allow(dead_code)]

use natal::ephemeris::{
    BodyPosition, Ephemeris, EphemerisError, GeoLocation, HouseFrame, HousePositionQuery, HouseSystem, Target,
};
use natal::geocode::Place;
use natal::util::normalize_360;
use natal::{JulianDay, StaticGeocoder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// How the fixture answers house-position queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HousePositionMode {
    Unsupported,
    /// Only the longitude-only form is answered, with this fractional house
    LongitudeOnly(f64),
    /// Both forms are answered, with this fractional house
    Always(f64),
    Failing,
}

/// In-memory ephemeris returning fixed longitudes.
pub struct FixedEphemeris {
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
    pub armc: f64,
    pub bodies: [f64; 10],
    pub node: f64,
    pub mode: HousePositionMode,
    pub obliquity: Option<f64>,
    pub undefined_polar: bool,
    pub failing_target: Option<Target>,
    pub ecliptic_queries: AtomicUsize,
    pub longitude_queries: AtomicUsize,
    pub seen_obliquity: Mutex<Option<f64>>,
}

impl FixedEphemeris {
    /// Whole-sign frame: the first cusp is 0° of the Ascendant's sign.
    pub fn whole_sign(ascendant: f64) -> Self {
        let first = (normalize_360(ascendant) / 30.0).floor() * 30.0;
        Self {
            cusps: std::array::from_fn(|i| normalize_360(first + 30.0 * i as f64)),
            ascendant,
            midheaven: normalize_360(ascendant + 270.0),
            armc: normalize_360(ascendant + 268.0),
            bodies: [10.0, 130.0, 35.0, 70.0, 100.0, 160.0, 200.0, 250.0, 290.0, 330.0],
            node: 45.0,
            mode: HousePositionMode::Unsupported,
            obliquity: None,
            undefined_polar: false,
            failing_target: None,
            ecliptic_queries: AtomicUsize::new(0),
            longitude_queries: AtomicUsize::new(0),
            seen_obliquity: Mutex::new(None),
        }
    }

    pub fn with_cusps(mut self, cusps: [f64; 12]) -> Self {
        self.cusps = cusps;
        self
    }

    pub fn with_bodies(mut self, bodies: [f64; 10]) -> Self {
        self.bodies = bodies;
        self
    }

    pub fn with_node(mut self, node: f64) -> Self {
        self.node = node;
        self
    }

    pub fn with_mode(mut self, mode: HousePositionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_obliquity(mut self, obliquity: f64) -> Self {
        self.obliquity = Some(obliquity);
        self
    }

    pub fn polar_undefined(mut self) -> Self {
        self.undefined_polar = true;
        self
    }

    pub fn failing(mut self, target: Target) -> Self {
        self.failing_target = Some(target);
        self
    }

    pub fn ecliptic_queries(&self) -> usize {
        self.ecliptic_queries.load(Ordering::SeqCst)
    }

    pub fn longitude_queries(&self) -> usize {
        self.longitude_queries.load(Ordering::SeqCst)
    }
}

impl Ephemeris for FixedEphemeris {
    fn houses(
        &self,
        _julian_day: JulianDay,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        if self.undefined_polar && system.is_semi_arc_time_based() && location.lat.abs() > 66.0 {
            return Err(EphemerisError::HouseSystemUndefined {
                system,
                latitude: location.lat,
            });
        }
        Ok(HouseFrame {
            cusps: self.cusps,
            ascendant: self.ascendant,
            midheaven: self.midheaven,
            armc: self.armc,
        })
    }

    fn position(&self, julian_day: JulianDay, target: Target) -> Result<BodyPosition, EphemerisError> {
        if self.failing_target == Some(target) {
            return Err(EphemerisError::CalculationFailed {
                target: target.name().to_string(),
                julian_day: julian_day.value(),
                message: "fixture failure".to_string(),
            });
        }
        let lon = match target {
            Target::Body(body) => self.bodies[body as usize],
            Target::MeanNode => self.node,
        };
        Ok(BodyPosition {
            lon,
            lat: 0.5,
            distance: 1.2,
        })
    }

    fn house_position(&self, query: &HousePositionQuery) -> Result<f64, EphemerisError> {
        let ecliptic = query.obliquity.is_some();
        if ecliptic {
            self.ecliptic_queries.fetch_add(1, Ordering::SeqCst);
            *self.seen_obliquity.lock().unwrap() = query.obliquity;
        } else {
            self.longitude_queries.fetch_add(1, Ordering::SeqCst);
        }
        match self.mode {
            HousePositionMode::Unsupported => Err(EphemerisError::Unsupported {
                query: "house position",
            }),
            HousePositionMode::LongitudeOnly(_) if ecliptic => Err(EphemerisError::Unsupported {
                query: "house position with obliquity",
            }),
            HousePositionMode::LongitudeOnly(h) | HousePositionMode::Always(h) => Ok(h),
            HousePositionMode::Failing => Err(EphemerisError::HouseCalculationFailed {
                message: "fixture failure".to_string(),
            }),
        }
    }

    fn obliquity(&self, _julian_day: JulianDay) -> Result<f64, EphemerisError> {
        self.obliquity
            .ok_or(EphemerisError::Unsupported { query: "obliquity" })
    }
}

pub fn london() -> GeoLocation {
    GeoLocation { lat: 51.48, lon: 0.0 }
}

pub fn gazetteer() -> StaticGeocoder {
    StaticGeocoder::new(vec![
        Place {
            name: "Taipei".to_string(),
            aliases: vec!["Taipei City".to_string()],
            lat: 25.0330,
            lon: 121.5654,
            tz: "Asia/Taipei".to_string(),
        },
        Place {
            name: "New York".to_string(),
            aliases: vec!["NYC".to_string()],
            lat: 40.7128,
            lon: -74.0060,
            tz: "America/New_York".to_string(),
        },
        Place {
            name: "Tromsø".to_string(),
            aliases: vec!["Tromso".to_string()],
            lat: 69.6492,
            lon: 18.9553,
            tz: "Europe/Oslo".to_string(),
        },
    ])
}
