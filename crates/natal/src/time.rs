//! Civil time → UTC → Julian Day.
//!
//! Daylight-saving rules come entirely from the tz database shipped with
//! `chrono-tz`; nothing here knows about offsets.

use crate::error::ChartError;
use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Julian Day of the Unix epoch, 1970-01-01T00:00:00Z.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Continuous day count (UT) used for every ephemeris query.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JulianDay(f64);

impl JulianDay {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        let seconds = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1e9;
        Self(UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for JulianDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// Wall-clock birth time as entered, before any timezone is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl CivilDateTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    /// Validate field by field so the error names the offending input.
    pub fn to_naive(&self) -> Result<NaiveDateTime, ChartError> {
        if !(1..=12).contains(&self.month) {
            return Err(ChartError::civil_time("month", self.month, "month must be in 1..=12"));
        }
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| {
            ChartError::civil_time(
                "day",
                self.day,
                format!("no such day in {:04}-{:02}", self.year, self.month),
            )
        })?;
        if self.hour > 23 {
            return Err(ChartError::civil_time("hour", self.hour, "hour must be in 0..=23"));
        }
        if self.minute > 59 {
            return Err(ChartError::civil_time("minute", self.minute, "minute must be in 0..=59"));
        }
        date.and_hms_opt(self.hour, self.minute, 0)
            .ok_or_else(|| ChartError::civil_time("time", self, "not a valid time of day"))
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

pub fn parse_timezone(timezone: &str) -> Result<Tz, ChartError> {
    timezone
        .parse::<Tz>()
        .map_err(|e| ChartError::civil_time("timezone", timezone, e.to_string()))
}

/// Interpret `civil` as wall-clock time in `timezone` and convert to UTC.
///
/// A time repeated by a backward transition resolves to its standard-time
/// reading (the later instant). A time skipped by a forward transition is
/// read with the offset in force just before the transition.
pub fn localize(civil: &CivilDateTime, timezone: &str) -> Result<DateTime<Utc>, ChartError> {
    let naive = civil.to_naive()?;
    let tz = parse_timezone(timezone)?;

    let local = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(_earliest, latest) => {
            log::debug!("{} is ambiguous in {}, using the standard-time reading", civil, timezone);
            latest
        }
        LocalResult::None => {
            log::debug!("{} is skipped in {}, using the pre-transition offset", civil, timezone);
            return before_gap(&tz, naive).ok_or_else(|| {
                ChartError::civil_time("time", civil, format!("no usable offset in {}", timezone))
            });
        }
    };
    Ok(local.with_timezone(&Utc))
}

/// Read `naive` with the offset in force a few hours earlier, which is the
/// offset the transition skipped away from.
fn before_gap(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    let earlier = tz.from_local_datetime(&(naive - Duration::hours(3))).earliest()?;
    let offset = earlier.offset().fix();
    let shifted = offset.from_local_datetime(&naive).single()?;
    Some(shifted.with_timezone(&Utc))
}

/// Julian Day (UT) for a civil time in an IANA timezone.
pub fn to_julian_day(civil: &CivilDateTime, timezone: &str) -> Result<JulianDay, ChartError> {
    let utc = localize(civil, timezone)?;
    let jd = JulianDay::from_utc(utc);
    log::debug!("{} {} -> {} UTC -> JD {}", civil, timezone, utc, jd);
    Ok(jd)
}
