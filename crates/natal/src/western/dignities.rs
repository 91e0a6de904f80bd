//! Essential dignities for Western astrology.
//!
//! Domicile signs come from the traditional rulership table, detriment is the
//! sign opposite each domicile, fall the sign opposite the exaltation.

use crate::western::types::{Body, Sign};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dignity {
    Domicile,
    Exaltation,
    Detriment,
    Fall,
    Neutral,
    /// Outer planets, which have no traditional rulership or exaltation.
    NoTraditional,
}

impl Dignity {
    pub fn label(self) -> &'static str {
        match self {
            Dignity::Domicile => "Domicile",
            Dignity::Exaltation => "Exaltation",
            Dignity::Detriment => "Detriment",
            Dignity::Fall => "Fall",
            Dignity::Neutral => "Neutral",
            Dignity::NoTraditional => "No traditional dignity",
        }
    }
}

impl fmt::Display for Dignity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct BodyDignities {
    pub domicile: Vec<Sign>,
    pub exaltation: Sign,
    pub detriment: Vec<Sign>,
    pub fall: Sign,
}

const EXALTATIONS: &[(Body, Sign)] = &[
    (Body::Sun, Sign::Aries),
    (Body::Moon, Sign::Taurus),
    (Body::Mercury, Sign::Virgo),
    (Body::Venus, Sign::Pisces),
    (Body::Mars, Sign::Capricorn),
    (Body::Jupiter, Sign::Cancer),
    (Body::Saturn, Sign::Libra),
];

lazy_static::lazy_static! {
    static ref DIGNITY_TABLE: HashMap<Body, BodyDignities> = {
        let mut table = HashMap::new();
        for &(body, exaltation) in EXALTATIONS {
            let domicile: Vec<Sign> = Sign::ALL
                .iter()
                .copied()
                .filter(|sign| sign.ruler() == body)
                .collect();
            let detriment = domicile.iter().map(|sign| sign.opposite()).collect();
            table.insert(
                body,
                BodyDignities {
                    domicile,
                    exaltation,
                    detriment,
                    fall: exaltation.opposite(),
                },
            );
        }
        table
    };
}

/// Dignity table entry for a classical body; `None` for the outer planets.
pub fn dignities_of(body: Body) -> Option<&'static BodyDignities> {
    DIGNITY_TABLE.get(&body)
}

/// Classify `body` occupying `sign`.
///
/// Checked in precedence order Domicile, Exaltation, Detriment, Fall, so a
/// body yields exactly one category even where tables coincide (Mercury both
/// rules and is exalted in Virgo).
pub fn essential_dignity(body: Body, sign: Sign) -> Dignity {
    if body.is_outer() {
        return Dignity::NoTraditional;
    }
    let Some(entry) = dignities_of(body) else {
        return Dignity::NoTraditional;
    };

    if entry.domicile.contains(&sign) {
        Dignity::Domicile
    } else if entry.exaltation == sign {
        Dignity::Exaltation
    } else if entry.detriment.contains(&sign) {
        Dignity::Detriment
    } else if entry.fall == sign {
        Dignity::Fall
    } else {
        Dignity::Neutral
    }
}
