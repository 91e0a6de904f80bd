use crate::ephemeris::adapter::{Ephemeris, EphemerisError};
use crate::chart::J2000_OBLIQUITY;
use crate::ephemeris::types::{BodyPosition, GeoLocation, HouseFrame, HousePositionQuery, Target};
use crate::ephemeris::HouseSystem;
use crate::time::JulianDay;
use crate::util::normalize_360;
use crate::western::Body;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use swisseph::swe::{calc_ut, house_pos, houses_ex, set_ephe_path};
use swisseph::{AscMc, Cusp};

// FLG_SWIEPH = 2 (data files), FLG_MOSEPH = 4 (built-in analytical theory)
const FLG_SWIEPH: i32 = 2;
const FLG_MOSEPH: i32 = 4;
const SE_MEAN_NODE: i32 = 10;
const SE_ECL_NUT: i32 = -1;

/// Inside the polar circles the time-based semi-arc systems have no solution.
const POLAR_CIRCLE_LATITUDE: f64 = 90.0 - 23.4392911;

// libswe keeps its ephemeris state in process globals
static SWE_LOCK: Mutex<()> = Mutex::new(());

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: Option<PathBuf>,
    flags: i32,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// Falls back to `SWISS_EPHEMERIS_PATH`; with neither set the built-in
    /// Moshier theory is used.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.or_else(|| env::var("SWISS_EPHEMERIS_PATH").ok().map(PathBuf::from));

        let flags = match &path {
            Some(path) => {
                if !path.exists() {
                    return Err(EphemerisError::FileNotFound {
                        path: path.display().to_string(),
                        message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
                    });
                }
                let Some(text) = path.to_str().filter(|p| !p.contains('\0')) else {
                    return Err(EphemerisError::FileNotFound {
                        path: path.display().to_string(),
                        message: "Ephemeris path is not valid UTF-8".to_string(),
                    });
                };
                {
                    let _guard = SWE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                    set_ephe_path(text);
                }
                log::debug!("Swiss Ephemeris data path: {}", path.display());
                FLG_SWIEPH
            }
            None => {
                log::debug!("No Swiss Ephemeris data path configured, using Moshier ephemeris");
                FLG_MOSEPH
            }
        };

        Ok(Self {
            ephemeris_path: path,
            flags,
        })
    }

    pub fn ephemeris_path(&self) -> Option<&Path> {
        self.ephemeris_path.as_deref()
    }

    fn calc(&self, julian_day: JulianDay, code: i32, flags: i32, what: &str) -> Result<[f64; 3], EphemerisError> {
        let _guard = SWE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let result = calc_ut(julian_day.value(), code as u32, flags as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                target: what.to_string(),
                julian_day: julian_day.value(),
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;
        let out = result.out;
        Ok([out[0], out[1], out[2]])
    }
}

impl Ephemeris for SwissEphemerisAdapter {
    fn houses(
        &self,
        julian_day: JulianDay,
        location: &GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        // libswe silently substitutes Porphyry here; refuse instead.
        if system.is_semi_arc_time_based() && location.lat.abs() >= POLAR_CIRCLE_LATITUDE {
            return Err(EphemerisError::HouseSystemUndefined {
                system,
                latitude: location.lat,
            });
        }

        let (c, a) = {
            let _guard = SWE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            houses_ex(
                julian_day.value(),
                self.flags,
                location.lat,
                location.lon,
                system.code() as i32,
            )
        };
        let armc = a[2];
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if cusp_values.iter().chain([&ascmc.ascendant, &ascmc.mc, &armc]).any(|v| !v.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("non-finite {} cusps at latitude {}", system, location.lat),
            });
        }

        Ok(HouseFrame {
            cusps: cusp_values.map(normalize_360),
            ascendant: normalize_360(ascmc.ascendant),
            midheaven: normalize_360(ascmc.mc),
            armc: normalize_360(armc),
        })
    }

    fn position(&self, julian_day: JulianDay, target: Target) -> Result<BodyPosition, EphemerisError> {
        let code = match target {
            Target::Body(body) => body_code(body),
            Target::MeanNode => SE_MEAN_NODE,
        };
        let [lon, lat, distance] = self.calc(julian_day, code, self.flags, target.name())?;
        Ok(BodyPosition { lon, lat, distance })
    }

    fn house_position(&self, query: &HousePositionQuery) -> Result<f64, EphemerisError> {
        let position = {
            let _guard = SWE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            house_pos(
                query.armc,
                query.geo_lat,
                query.obliquity.unwrap_or(J2000_OBLIQUITY),
                query.system.code() as i32,
                query.lon,
                query.lat.unwrap_or(0.0),
            )
        };
        position.map_err(|e| EphemerisError::HouseCalculationFailed {
            message: format!("house position of {:.4} in {} houses: {}", query.lon, query.system, e),
        })
    }

    fn obliquity(&self, julian_day: JulianDay) -> Result<f64, EphemerisError> {
        let [true_obliquity, _, _] = self.calc(julian_day, SE_ECL_NUT, self.flags, "obliquity")?;
        Ok(true_obliquity)
    }
}

/// Swiss Ephemeris planet IDs: SUN=0 through PLUTO=9
fn body_code(body: Body) -> i32 {
    match body {
        Body::Sun => 0,
        Body::Moon => 1,
        Body::Mercury => 2,
        Body::Venus => 3,
        Body::Mars => 4,
        Body::Jupiter => 5,
        Body::Saturn => 6,
        Body::Uranus => 7,
        Body::Neptune => 8,
        Body::Pluto => 9,
    }
}
