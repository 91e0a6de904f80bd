//! House system selector.
//!
//! Accepts a canonical name (`"placidus"`, `"Whole Sign"`, `"whole-sign"`) or
//! a one-letter code (`"P"`, `"w"`). Anything unrecognized selects the
//! fallback system instead of failing.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HouseSystem {
    #[default]
    WholeSign,
    Equal,
    Placidus,
    Koch,
    Campanus,
    Regiomontanus,
    Porphyry,
    Alcabitius,
}

lazy_static::lazy_static! {
    static ref HOUSE_SYSTEM_NAMES: HashMap<&'static str, HouseSystem> = {
        let mut names = HashMap::new();
        for system in HouseSystem::ALL {
            names.insert(system.key_compact(), system);
        }
        names.insert("alcabitus", HouseSystem::Alcabitius);
        names.insert("porphyrius", HouseSystem::Porphyry);
        names
    };
}

impl HouseSystem {
    pub const ALL: [HouseSystem; 8] = [
        HouseSystem::WholeSign,
        HouseSystem::Equal,
        HouseSystem::Placidus,
        HouseSystem::Koch,
        HouseSystem::Campanus,
        HouseSystem::Regiomontanus,
        HouseSystem::Porphyry,
        HouseSystem::Alcabitius,
    ];

    /// Single-letter code, as understood by the Swiss Ephemeris.
    pub fn code(self) -> char {
        match self {
            HouseSystem::WholeSign => 'W',
            HouseSystem::Equal => 'E',
            HouseSystem::Placidus => 'P',
            HouseSystem::Koch => 'K',
            HouseSystem::Campanus => 'C',
            HouseSystem::Regiomontanus => 'R',
            HouseSystem::Porphyry => 'O',
            HouseSystem::Alcabitius => 'B',
        }
    }

    pub fn from_code(code: char) -> Option<HouseSystem> {
        let code = code.to_ascii_uppercase();
        Self::ALL.into_iter().find(|system| system.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            HouseSystem::WholeSign => "Whole Sign",
            HouseSystem::Equal => "Equal",
            HouseSystem::Placidus => "Placidus",
            HouseSystem::Koch => "Koch",
            HouseSystem::Campanus => "Campanus",
            HouseSystem::Regiomontanus => "Regiomontanus",
            HouseSystem::Porphyry => "Porphyry",
            HouseSystem::Alcabitius => "Alcabitius",
        }
    }

    fn key_compact(self) -> &'static str {
        match self {
            HouseSystem::WholeSign => "wholesign",
            HouseSystem::Equal => "equal",
            HouseSystem::Placidus => "placidus",
            HouseSystem::Koch => "koch",
            HouseSystem::Campanus => "campanus",
            HouseSystem::Regiomontanus => "regiomontanus",
            HouseSystem::Porphyry => "porphyry",
            HouseSystem::Alcabitius => "alcabitius",
        }
    }

    /// Systems that divide diurnal semi-arcs in time and break down inside
    /// the polar circles.
    pub fn is_semi_arc_time_based(self) -> bool {
        matches!(self, HouseSystem::Placidus | HouseSystem::Koch)
    }

    /// Strict lookup by canonical name or one-letter code.
    pub fn lookup(input: &str) -> Option<HouseSystem> {
        let trimmed = input.trim();
        let compact: String = trimmed
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        if let Some(system) = HOUSE_SYSTEM_NAMES.get(compact.as_str()) {
            return Some(*system);
        }
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Self::from_code(code),
            _ => None,
        }
    }

    /// Lenient selection: a known name, else the leading letter read as a
    /// code, else `fallback`. Missing or blank input also yields `fallback`.
    pub fn resolve_or(input: Option<&str>, fallback: HouseSystem) -> HouseSystem {
        let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
            return fallback;
        };
        if let Some(system) = Self::lookup(raw) {
            return system;
        }
        raw.chars()
            .next()
            .and_then(Self::from_code)
            .unwrap_or(fallback)
    }

    /// Lenient selection falling back to Whole Sign.
    pub fn resolve(input: Option<&str>) -> HouseSystem {
        Self::resolve_or(input, HouseSystem::WholeSign)
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| {
            format!(
                "Invalid house system: {}. Valid systems: {:?}",
                s,
                Self::ALL.iter().map(|h| h.name()).collect::<Vec<_>>()
            )
        })
    }
}

impl Serialize for HouseSystem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
