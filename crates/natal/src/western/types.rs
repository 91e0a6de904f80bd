//! Western astrology types: signs, elements, bodies, chart points and houses.

use crate::util::normalize_360;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    /// Summary order used by the element tables.
    pub const SUMMARY_ORDER: [Element; 4] =
        [Element::Earth, Element::Water, Element::Fire, Element::Air];

    pub fn name(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Element::Earth => "Practical, sensual, pragmatic, responsible",
            Element::Water => "Emotional, feeling, spiritual, empathetic, understanding",
            Element::Fire => "Direct, active, enthusiastic, impatient, candid, intuitive",
            Element::Air => "Rational, fair, abstract thinking, sociable, cultured, communicative",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The twelve tropical signs, in zodiac order starting at 0° Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    pub fn from_index(index: usize) -> Sign {
        Self::ALL[index % 12]
    }

    /// Sign containing an ecliptic longitude; each sign owns [30k, 30k + 30).
    pub fn from_longitude(longitude: f64) -> Sign {
        let lon = normalize_360(longitude);
        Self::from_index((lon / 30.0).floor() as usize)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn start_degree(self) -> f64 {
        self.index() as f64 * 30.0
    }

    pub fn opposite(self) -> Sign {
        Self::from_index(self.index() + 6)
    }

    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Traditional (pre-modern) ruler; outer planets never rule a sign here.
    pub fn ruler(self) -> Body {
        match self {
            Sign::Aries | Sign::Scorpio => Body::Mars,
            Sign::Taurus | Sign::Libra => Body::Venus,
            Sign::Gemini | Sign::Virgo => Body::Mercury,
            Sign::Cancer => Body::Moon,
            Sign::Leo => Body::Sun,
            Sign::Sagittarius | Sign::Pisces => Body::Jupiter,
            Sign::Capricorn | Sign::Aquarius => Body::Saturn,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The ten bodies queried from the ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Uranus, Neptune and Pluto have no traditional rulership or dignity.
    pub fn is_outer(self) -> bool {
        matches!(self, Body::Uranus | Body::Neptune | Body::Pluto)
    }

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Body::Sun => "☉",
            Body::Moon => "☾",
            Body::Mercury => "☿",
            Body::Venus => "♀",
            Body::Mars => "♂",
            Body::Jupiter => "♃",
            Body::Saturn => "♄",
            Body::Uranus => "♅",
            Body::Neptune => "♆",
            Body::Pluto => "♇",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that gets a sign and a house: a body, an angle or a lunar node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Point {
    Ascendant,
    Midheaven,
    Body(Body),
    NorthNode,
    SouthNode,
}

impl Point {
    /// Points listed as house occupants, in canonical order.
    pub const HOUSE_OCCUPANTS: [Point; 13] = [
        Point::Body(Body::Sun),
        Point::Body(Body::Moon),
        Point::Body(Body::Mercury),
        Point::Body(Body::Venus),
        Point::Body(Body::Mars),
        Point::Body(Body::Jupiter),
        Point::Body(Body::Saturn),
        Point::Body(Body::Uranus),
        Point::Body(Body::Neptune),
        Point::Body(Body::Pluto),
        Point::Midheaven,
        Point::NorthNode,
        Point::SouthNode,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Point::Ascendant => "ascendant",
            Point::Midheaven => "midheaven",
            Point::NorthNode => "north_node",
            Point::SouthNode => "south_node",
            Point::Body(body) => match body {
                Body::Sun => "sun",
                Body::Moon => "moon",
                Body::Mercury => "mercury",
                Body::Venus => "venus",
                Body::Mars => "mars",
                Body::Jupiter => "jupiter",
                Body::Saturn => "saturn",
                Body::Uranus => "uranus",
                Body::Neptune => "neptune",
                Body::Pluto => "pluto",
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Point::Ascendant => "Ascendant",
            Point::Midheaven => "Midheaven",
            Point::NorthNode => "North Node",
            Point::SouthNode => "South Node",
            Point::Body(body) => body.name(),
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Point::Ascendant => "ASC",
            Point::Midheaven => "MC",
            Point::NorthNode => "☊",
            Point::SouthNode => "☋",
            Point::Body(body) => body.glyph(),
        }
    }
}

impl From<Body> for Point {
    fn from(body: Body) -> Self {
        Point::Body(body)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// House number, always in 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct House(u8);

impl House {
    pub const FIRST: House = House(1);

    pub fn new(number: u8) -> Option<House> {
        (1..=12).contains(&number).then_some(House(number))
    }

    /// House from a zero-based cusp index; wraps past twelve.
    pub fn from_index(index: usize) -> House {
        House((index % 12) as u8 + 1)
    }

    /// House from a fractional house position such as `3.72` (→ house 3).
    pub fn from_fractional(position: f64) -> Option<House> {
        if !position.is_finite() {
            return None;
        }
        let whole = position.floor() as i64;
        Some(House(((whole - 1).rem_euclid(12) + 1) as u8))
    }

    pub fn all() -> impl Iterator<Item = House> {
        (1..=12).map(House)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
