use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

/// Gazetteer entry for the built-in geocoder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceSettings {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub lat: f64,
    pub lon: f64,
    pub tz: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NatalSettings {
    pub ephemeris_path: Option<PathBuf>,
    pub house_system: String,
    /// Orb overrides keyed by lowercase aspect name
    pub orbs: BTreeMap<String, f64>,
    pub narrative_enabled: bool,
    pub places: Vec<PlaceSettings>,
}

impl Default for NatalSettings {
    fn default() -> Self {
        Self {
            ephemeris_path: None,
            house_system: default_house_system(),
            orbs: BTreeMap::new(),
            narrative_enabled: false,
            places: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartToml {
    #[serde(default = "default_house_system")]
    house_system: String,
}

impl Default for ChartToml {
    fn default() -> Self {
        Self {
            house_system: default_house_system(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct NarrativeToml {
    #[serde(default)]
    enabled: bool,
}

fn default_house_system() -> String {
    "whole_sign".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    chart: ChartToml,
    #[serde(default)]
    aspects: BTreeMap<String, f64>,
    #[serde(default)]
    narrative: NarrativeToml,
    #[serde(default)]
    places: Vec<PlaceSettings>,
}

const ASPECT_NAMES: [&str; 5] = ["conjunction", "trine", "sextile", "square", "opposition"];

/// Try common relative paths for `configs/natal.toml`, from the workspace
/// root and from a crate directory.
pub fn find_natal_toml() -> Option<PathBuf> {
    let paths = ["configs/natal.toml", "../../configs/natal.toml"];
    paths.iter().map(PathBuf::from).find(|p| p.is_file())
}

pub fn parse_natal_settings(text: &str) -> anyhow::Result<NatalSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse natal.toml: {e}"))?;

    let mut orbs = BTreeMap::new();
    for (name, orb) in root.aspects {
        let key = name.trim().to_ascii_lowercase();
        if !ASPECT_NAMES.contains(&key.as_str()) {
            anyhow::bail!("aspects.{name}: unknown aspect (expected one of {:?})", ASPECT_NAMES);
        }
        if !orb.is_finite() || orb < 0.0 {
            anyhow::bail!("aspects.{name}: orb must be a non-negative number, got {orb}");
        }
        orbs.insert(key, orb);
    }

    for (i, place) in root.places.iter().enumerate() {
        if place.name.trim().is_empty() {
            anyhow::bail!("places[{i}].name must not be empty");
        }
        if !(-90.0..=90.0).contains(&place.lat) {
            anyhow::bail!("places[{i}].lat out of range for {:?}: {}", place.name, place.lat);
        }
        if !(-180.0..=180.0).contains(&place.lon) {
            anyhow::bail!("places[{i}].lon out of range for {:?}: {}", place.name, place.lon);
        }
        if place.tz.trim().is_empty() {
            anyhow::bail!("places[{i}].tz must not be empty for {:?}", place.name);
        }
    }

    Ok(NatalSettings {
        ephemeris_path: root.ephemeris.path,
        house_system: root.chart.house_system,
        orbs,
        narrative_enabled: root.narrative.enabled,
        places: root.places,
    })
}

/// Load settings from `explicit`, or from the first `configs/natal.toml`
/// found. With no explicit path and no file, defaults are used.
/// `SWISS_EPHEMERIS_PATH` overrides `[ephemeris] path`.
pub fn load_natal_settings(explicit: Option<&Path>) -> anyhow::Result<NatalSettings> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => find_natal_toml(),
    };

    let mut settings = match path {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
            log::debug!("Loaded settings from {}", path.display());
            parse_natal_settings(&text)?
        }
        None => {
            log::debug!("No natal.toml found, using defaults");
            NatalSettings::default()
        }
    };

    if let Some(path) = env::var_os(EPHEMERIS_PATH_ENV).filter(|v| !v.is_empty()) {
        settings.ephemeris_path = Some(PathBuf::from(path));
    }
    Ok(settings)
}
