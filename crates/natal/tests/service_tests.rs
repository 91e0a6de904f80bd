mod common;

use common::{gazetteer, FixedEphemeris, HousePositionMode};
use natal::geocode::{GeoResolution, GeocodeError, Geocoder};
use natal::narrative::{
    advice_prompt, king_prompts, DisabledNarrator, NarrativeError, NarrativePrompt, Narrator, TemplateNarrator, Topic,
};
use natal::time::to_julian_day;
use natal::{ChartConfig, ChartError, ChartRequest, ChartService, CivilDateTime, HouseSystem};
use std::sync::atomic::{AtomicUsize, Ordering};

fn request(location: &str) -> ChartRequest {
    ChartRequest {
        year: 1990,
        month: 5,
        day: 17,
        hour: 8,
        minute: 30,
        location: location.to_string(),
        house_system: None,
    }
}

struct CountingGeocoder {
    calls: AtomicUsize,
}

impl Geocoder for CountingGeocoder {
    fn resolve(&self, _place: &str) -> Result<GeoResolution, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GeoResolution::new(25.03, 121.56, "Asia/Taipei").unwrap())
    }
}

struct FailingNarrator;

impl Narrator for FailingNarrator {
    fn generate(&self, _prompt: &NarrativePrompt) -> Result<String, NarrativeError> {
        Err(NarrativeError::Failed {
            message: "quota exceeded".to_string(),
        })
    }
}

#[test]
fn test_invalid_date_rejected_before_geocoding() {
    let geocoder = CountingGeocoder {
        calls: AtomicUsize::new(0),
    };
    let service = ChartService::new(&geocoder, FixedEphemeris::whole_sign(5.0), ChartConfig::default());
    let mut req = request("anywhere");
    req.month = 2;
    req.day = 30;

    match service.compute(&req) {
        Err(ChartError::InvalidCivilTime { field, value, .. }) => {
            assert_eq!(field, "day");
            assert_eq!(value, "30");
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unknown_place() {
    let service = ChartService::new(gazetteer(), FixedEphemeris::whole_sign(5.0), ChartConfig::default());
    match service.compute(&request("Atlantis")) {
        Err(ChartError::PlaceNotFound { place, .. }) => assert_eq!(place, "Atlantis"),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_full_pipeline() {
    let service = ChartService::new(gazetteer(), FixedEphemeris::whole_sign(5.0), ChartConfig::default());
    let report = service.compute(&request("taipei city")).unwrap();

    assert_eq!(report.geo.timezone, "Asia/Taipei");
    assert_eq!(report.house_system, HouseSystem::WholeSign);
    let expected = to_julian_day(&CivilDateTime::new(1990, 5, 17, 8, 30), "Asia/Taipei").unwrap();
    assert_eq!(report.julian_day, expected);
    assert_eq!(report.cusps.len(), 12);
    assert_eq!(report.bodies.len(), 10);
    assert_eq!(report.four_kings.len(), 4);
    assert_eq!(report.element_totals.sum(), 100);
    assert_eq!(report.houses.len(), 12);
    assert_eq!(report.positions.len(), 12);
    assert!(!report.narrative_generated);
    assert!(report.advice.is_empty());
}

#[test]
fn test_house_system_selection() {
    let service = ChartService::new(gazetteer(), FixedEphemeris::whole_sign(5.0), ChartConfig::default());

    let mut req = request("Taipei");
    req.house_system = Some("P".to_string());
    assert_eq!(service.compute(&req).unwrap().house_system, HouseSystem::Placidus);

    req.house_system = Some("no such system".to_string());
    assert_eq!(service.compute(&req).unwrap().house_system, HouseSystem::WholeSign);

    let config = ChartConfig::default().with_default_house_system(HouseSystem::Equal);
    let service = ChartService::new(gazetteer(), FixedEphemeris::whole_sign(5.0), config);
    assert_eq!(service.compute(&request("Taipei")).unwrap().house_system, HouseSystem::Equal);
}

#[test]
fn test_polar_placidus_not_substituted() {
    let service = ChartService::new(
        gazetteer(),
        FixedEphemeris::whole_sign(5.0).polar_undefined(),
        ChartConfig::default(),
    );
    let mut req = request("Tromso");
    req.house_system = Some("placidus".to_string());
    assert!(matches!(
        service.compute(&req),
        Err(ChartError::HouseSystemUndefined {
            system: HouseSystem::Placidus,
            ..
        })
    ));
}

#[test]
fn test_dst_gap_time_still_charted() {
    let service = ChartService::new(gazetteer(), FixedEphemeris::whole_sign(5.0), ChartConfig::default());
    let req = ChartRequest {
        year: 2021,
        month: 3,
        day: 14,
        hour: 2,
        minute: 30,
        location: "NYC".to_string(),
        house_system: None,
    };
    let report = service.compute(&req).unwrap();
    // Read as EST: 07:30 UTC
    let expected = to_julian_day(&CivilDateTime::new(2021, 3, 14, 7, 30), "UTC").unwrap();
    assert!((report.julian_day.value() - expected.value()).abs() < 1e-9);
}

#[test]
fn test_julian_day_monotonic_in_wall_clock_order() {
    let mut previous = None;
    // Walks across the New York spring-forward and fall-back transitions
    for (month, day) in [(3, 13), (3, 14), (3, 15), (11, 6), (11, 7), (11, 8)] {
        for hour in 0..24 {
            for minute in [0, 30] {
                // 02:00-02:59 on March 14 never appears on a New York clock
                if (month, day, hour) == (3, 14, 2) {
                    continue;
                }
                let civil = CivilDateTime::new(2021, month, day, hour, minute);
                let jd = to_julian_day(&civil, "America/New_York").unwrap();
                if let Some(prev) = previous {
                    assert!(jd > prev, "{} not after previous", civil);
                }
                previous = Some(jd);
            }
        }
    }
}

#[test]
fn test_template_narrative_fills_text() {
    let service = ChartService::new(gazetteer(), FixedEphemeris::whole_sign(5.0), ChartConfig::default())
        .with_narrator(Box::new(TemplateNarrator));
    let report = service.compute(&request("Taipei")).unwrap();

    assert!(report.narrative_generated);
    assert!(report.four_kings.iter().all(|k| !k.interpretation.is_empty()));
    assert!(report.four_kings[0].interpretation.starts_with("Sun in Aries, house 1"));
    assert!(report.advice.contains("major aspects"));
}

#[test]
fn test_narrative_failure_yields_empty_text() {
    let narrators: [Box<dyn Narrator + Send + Sync>; 2] = [Box::new(FailingNarrator), Box::new(DisabledNarrator)];
    for narrator in narrators {
        let service = ChartService::new(gazetteer(), FixedEphemeris::whole_sign(5.0), ChartConfig::default())
            .with_narrator(narrator);
        let report = service.compute(&request("Taipei")).unwrap();
        assert!(report.four_kings.iter().all(|k| k.interpretation.is_empty()));
        assert!(report.advice.is_empty());
        assert_eq!(report.element_totals.sum(), 100);
    }
}

#[test]
fn test_prompts() {
    let service = ChartService::new(gazetteer(), FixedEphemeris::whole_sign(5.0), ChartConfig::default());
    let report = service.compute(&request("Taipei")).unwrap();

    let prompts = king_prompts(&report);
    let topics: Vec<Topic> = prompts.iter().map(|p| p.topic).collect();
    assert_eq!(topics, vec![Topic::Sun, Topic::Moon, Topic::Ascendant, Topic::ChartRuler]);
    assert_eq!(
        prompts[3].subject,
        "chart ruler Mars in Cancer, house 4, ruling house 1, house 8"
    );
    assert!(prompts[0].instruction().starts_with("In about 50 words"));

    let advice = advice_prompt(&report);
    assert!(advice.subject.contains("Sun house 1, Moon house 5"));
    assert!(advice.subject.contains("Sun-Moon Trine (0.00°)"));
    let listed = advice.subject.matches("°)").count();
    assert_eq!(listed, report.aspects.len().min(8));
}

#[test]
fn test_report_json() {
    let service = ChartService::new(
        gazetteer(),
        FixedEphemeris::whole_sign(5.0).with_mode(HousePositionMode::LongitudeOnly(4.5)),
        ChartConfig::default(),
    );
    let report = service.compute(&request("Taipei")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json(false).unwrap()).unwrap();

    assert_eq!(json["house_system"], "Whole Sign");
    assert_eq!(json["geo"]["timezone"], "Asia/Taipei");
    assert_eq!(json["cusps"].as_array().unwrap().len(), 12);
    assert_eq!(json["bodies"][0]["body"], "sun");
    assert_eq!(json["bodies"][0]["house"], 4);
    assert_eq!(json["ascendant"]["house"], 1);
    assert_eq!(json["four_kings"][3]["point"], "mars");
    assert_eq!(json["element_summary"][0]["element"], "earth");
    assert_eq!(json["aspects"][0]["kind"], "trine");
    assert_eq!(json["aspects"][0]["first"], "sun");
    assert_eq!(json["aspects"][0]["deviation"], 0.0);
    assert_eq!(json["symbols"]["sun"], "☉");
    assert_eq!(json["narrative_generated"], false);
    assert!(report.to_json(true).unwrap().contains('\n'));
}
