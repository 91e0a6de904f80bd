use crate::ephemeris::{BodyPosition, GeoLocation, HouseSystem};
use crate::time::JulianDay;
use crate::util::{arc_forward, normalize_360};
use crate::western::{Body, House, Point, Sign};
use serde::Serialize;

/// Minimum forward arc between consecutive cusps, in degrees.
const CUSP_EPSILON: f64 = 1e-9;

/// Twelve house cusps, normalized and strictly increasing around the circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cusps([f64; 12]);

impl Cusps {
    /// Validate raw cusps. Fails when a cusp is not finite, when two cusps
    /// coincide, or when the cusps do not advance once around the zodiac.
    pub fn new(raw: [f64; 12]) -> Result<Self, String> {
        if let Some(i) = raw.iter().position(|c| !c.is_finite()) {
            return Err(format!("cusp {} is not a finite number", i + 1));
        }
        let cusps = raw.map(normalize_360);

        let mut turn = 0.0;
        for i in 0..12 {
            let span = arc_forward(cusps[i], cusps[(i + 1) % 12]);
            if span < CUSP_EPSILON {
                return Err(format!("cusps {} and {} coincide at {:.6}", i + 1, (i + 1) % 12 + 1, cusps[i]));
            }
            turn += span;
        }
        if (turn - 360.0).abs() > 1e-6 {
            return Err(format!("cusps are not in zodiacal order (total arc {:.3})", turn));
        }
        Ok(Self(cusps))
    }

    pub fn as_array(&self) -> &[f64; 12] {
        &self.0
    }

    pub fn cusp(&self, house: House) -> f64 {
        self.0[house.index()]
    }

    /// House whose span `[start, end)` contains `longitude`. Spans that cross
    /// 0° are measured as forward arcs, so a longitude exactly on a cusp
    /// belongs to the house that cusp opens.
    pub fn house_of(&self, longitude: f64) -> Option<House> {
        let lon = normalize_360(longitude);
        (0..12).find_map(|i| {
            let start = self.0[i];
            let span = arc_forward(start, self.0[(i + 1) % 12]);
            (arc_forward(start, lon) < span).then(|| House::from_index(i))
        })
    }
}

/// Where a point sits: longitude, sign and house.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub longitude: f64,
    pub sign: Sign,
    pub house: House,
}

impl Placement {
    pub(crate) fn new(longitude: f64, house: House) -> Self {
        let longitude = normalize_360(longitude);
        Self {
            longitude,
            sign: Sign::from_longitude(longitude),
            house,
        }
    }
}

const SLOTS: usize = 14;

fn slot(point: Point) -> usize {
    match point {
        Point::Ascendant => 0,
        Point::Midheaven => 1,
        Point::NorthNode => 2,
        Point::SouthNode => 3,
        Point::Body(body) => 4 + body as usize,
    }
}

/// A computed natal chart. Immutable once built; every sign and house is
/// resolved by the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRecord {
    julian_day: JulianDay,
    location: GeoLocation,
    house_system: HouseSystem,
    armc: f64,
    cusps: Cusps,
    bodies: [BodyPosition; 10],
    placements: [Placement; SLOTS],
}

pub(crate) struct ChartParts {
    pub julian_day: JulianDay,
    pub location: GeoLocation,
    pub house_system: HouseSystem,
    pub armc: f64,
    pub cusps: Cusps,
    pub bodies: [BodyPosition; 10],
    pub ascendant: Placement,
    pub midheaven: Placement,
    pub north_node: Placement,
    pub south_node: Placement,
    pub body_placements: [Placement; 10],
}

impl ChartRecord {
    pub(crate) fn from_parts(parts: ChartParts) -> Self {
        let mut placements = [parts.ascendant; SLOTS];
        placements[slot(Point::Midheaven)] = parts.midheaven;
        placements[slot(Point::NorthNode)] = parts.north_node;
        placements[slot(Point::SouthNode)] = parts.south_node;
        for (body, placement) in Body::ALL.iter().zip(parts.body_placements) {
            placements[slot(Point::Body(*body))] = placement;
        }
        Self {
            julian_day: parts.julian_day,
            location: parts.location,
            house_system: parts.house_system,
            armc: parts.armc,
            cusps: parts.cusps,
            bodies: parts.bodies,
            placements,
        }
    }

    pub fn julian_day(&self) -> JulianDay {
        self.julian_day
    }

    pub fn location(&self) -> GeoLocation {
        self.location
    }

    pub fn house_system(&self) -> HouseSystem {
        self.house_system
    }

    pub fn ascendant(&self) -> f64 {
        self.longitude(Point::Ascendant)
    }

    pub fn midheaven(&self) -> f64 {
        self.longitude(Point::Midheaven)
    }

    pub fn armc(&self) -> f64 {
        self.armc
    }

    pub fn cusps(&self) -> &Cusps {
        &self.cusps
    }

    /// Raw ephemeris position of a body, longitude normalized.
    pub fn body(&self, body: Body) -> &BodyPosition {
        &self.bodies[body as usize]
    }

    pub fn north_node(&self) -> f64 {
        self.longitude(Point::NorthNode)
    }

    pub fn south_node(&self) -> f64 {
        self.longitude(Point::SouthNode)
    }

    pub fn placement(&self, point: Point) -> &Placement {
        &self.placements[slot(point)]
    }

    pub fn longitude(&self, point: Point) -> f64 {
        self.placement(point).longitude
    }

    pub fn sign_of(&self, point: Point) -> Sign {
        self.placement(point).sign
    }

    pub fn house_of(&self, point: Point) -> House {
        self.placement(point).house
    }

    pub fn cusp_sign(&self, house: House) -> Sign {
        Sign::from_longitude(self.cusps.cusp(house))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whole_sign() -> [f64; 12] {
        std::array::from_fn(|i| i as f64 * 30.0)
    }

    #[test]
    fn test_cusp_interval_lower_edge_inclusive() {
        let cusps = Cusps::new(whole_sign()).unwrap();
        assert_eq!(cusps.house_of(0.0), House::new(1));
        assert_eq!(cusps.house_of(29.99), House::new(1));
        assert_eq!(cusps.house_of(30.0), House::new(2));
        assert_eq!(cusps.house_of(359.99), House::new(12));
    }

    #[test]
    fn test_cusp_interval_wraps_past_zero() {
        // First house runs from 350° to 20°
        let raw = [350.0, 20.0, 50.0, 80.0, 110.0, 140.0, 170.0, 200.0, 230.0, 260.0, 290.0, 320.0];
        let cusps = Cusps::new(raw).unwrap();
        assert_eq!(cusps.house_of(350.0), House::new(1));
        assert_eq!(cusps.house_of(359.5), House::new(1));
        assert_eq!(cusps.house_of(0.0), House::new(1));
        assert_eq!(cusps.house_of(19.999), House::new(1));
        assert_eq!(cusps.house_of(20.0), House::new(2));
        assert_eq!(cusps.house_of(349.999), House::new(12));
    }

    #[test]
    fn test_degenerate_cusps_rejected() {
        let mut raw = whole_sign();
        raw[3] = raw[2];
        assert!(Cusps::new(raw).is_err());

        let mut raw = whole_sign();
        raw.swap(4, 5);
        assert!(Cusps::new(raw).is_err());

        let mut raw = whole_sign();
        raw[7] = f64::NAN;
        assert!(Cusps::new(raw).is_err());
    }

    #[test]
    fn test_cusps_are_normalized() {
        let raw: [f64; 12] = std::array::from_fn(|i| i as f64 * 30.0 + 365.0);
        let cusps = Cusps::new(raw).unwrap();
        assert!((cusps.as_array()[0] - 5.0).abs() < 1e-9);
        assert!((cusps.as_array()[11] - 335.0).abs() < 1e-9);
    }
}
