use anyhow::Context;
use clap::Parser;
use natal::aspects::AspectKind;
use natal::ephemeris::HouseSystem;
use natal::geocode::Place;
use natal::narrative::TemplateNarrator;
use natal::{ChartConfig, ChartRequest, ChartService, StaticGeocoder, SwissEphemerisAdapter};
use natal_config::NatalSettings;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute a natal chart and print it as JSON")]
struct Args {
    #[arg(long)]
    year: i32,

    /// Month, 1-12.
    #[arg(long)]
    month: u32,

    #[arg(long)]
    day: u32,

    /// Hour of local wall-clock time, 0-23.
    #[arg(long)]
    hour: u32,

    #[arg(long)]
    minute: u32,

    /// Birth place: a gazetteer name from natal.toml, or "lat,lon,Area/City".
    #[arg(long)]
    location: String,

    /// House system name or one-letter code (unknown values fall back to the configured default).
    #[arg(long)]
    house_system: Option<String>,

    /// Config file (default: configs/natal.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Add interpretive text to the Four Kings and an overall reading.
    #[arg(long)]
    narrative: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn aspect_kind(name: &str) -> Option<AspectKind> {
    match name {
        "conjunction" => Some(AspectKind::Conjunction),
        "trine" => Some(AspectKind::Trine),
        "sextile" => Some(AspectKind::Sextile),
        "square" => Some(AspectKind::Square),
        "opposition" => Some(AspectKind::Opposition),
        _ => None,
    }
}

fn chart_config(settings: &NatalSettings) -> ChartConfig {
    let orbs = settings
        .orbs
        .iter()
        .filter_map(|(name, orb)| aspect_kind(name).map(|kind| (kind, *orb)));
    let config = ChartConfig::default()
        .with_orbs(orbs)
        .with_default_house_system(HouseSystem::resolve(Some(settings.house_system.as_str())));

    for (a, b) in config.aspects.overlaps() {
        log::warn!("{} and {} orbs overlap; {} takes priority", a, b, a);
    }
    config
}

fn geocoder(settings: &NatalSettings) -> StaticGeocoder {
    StaticGeocoder::new(
        settings
            .places
            .iter()
            .map(|p| Place {
                name: p.name.clone(),
                aliases: p.aliases.clone(),
                lat: p.lat,
                lon: p.lon,
                tz: p.tz.clone(),
            })
            .collect(),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    let settings = natal_config::load_natal_settings(args.config.as_deref())?;

    let ephemeris = SwissEphemerisAdapter::new(settings.ephemeris_path.clone())
        .context("Failed to initialize the Swiss Ephemeris")?;
    let mut service = ChartService::new(geocoder(&settings), ephemeris, chart_config(&settings));
    if args.narrative || settings.narrative_enabled {
        service = service.with_narrator(Box::new(TemplateNarrator));
    }

    let request = ChartRequest {
        year: args.year,
        month: args.month,
        day: args.day,
        hour: args.hour,
        minute: args.minute,
        location: args.location,
        house_system: args.house_system,
    };

    // Ephemeris and geocoding calls block; keep them off the async runtime
    let report = tokio::task::spawn_blocking(move || service.compute(&request))
        .await
        .context("Chart computation panicked")?
        .context("Chart computation failed")?;

    println!("{}", report.to_json(args.pretty)?);
    Ok(())
}
