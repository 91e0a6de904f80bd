mod common;

use common::{london, FixedEphemeris, HousePositionMode};
use natal::chart::{PlacementStrategy, J2000_OBLIQUITY};
use natal::ephemeris::{EphemerisError, GeoLocation, HouseSystem, Target};
use natal::util::normalize_360;
use natal::{Body, ChartBuilder, ChartConfig, ChartError, House, JulianDay, Point, Sign};

fn jd() -> JulianDay {
    JulianDay::new(2_451_545.0)
}

fn build(ephemeris: &FixedEphemeris) -> Result<natal::ChartRecord, ChartError> {
    let config = ChartConfig::default();
    ChartBuilder::new(ephemeris, &config).build(jd(), &london(), HouseSystem::WholeSign)
}

#[test]
fn test_whole_sign_houses_equal_signs() {
    let ephemeris = FixedEphemeris::whole_sign(5.0);
    let record = build(&ephemeris).unwrap();

    for (i, cusp) in record.cusps().as_array().iter().enumerate() {
        assert_eq!(*cusp, 30.0 * i as f64);
    }
    for body in Body::ALL {
        let point = Point::Body(body);
        assert_eq!(
            record.house_of(point).number() as usize,
            record.sign_of(point).index() + 1,
            "{} house should match its sign",
            body
        );
    }
    assert_eq!(record.sign_of(Point::Ascendant), Sign::Aries);
}

#[test]
fn test_ascendant_fixed_in_first_house() {
    let ephemeris = FixedEphemeris::whole_sign(5.0).with_mode(HousePositionMode::Always(7.5));
    let record = build(&ephemeris).unwrap();
    assert_eq!(record.house_of(Point::Ascendant), House::FIRST);
    assert_eq!(record.house_of(Point::Midheaven), House::new(7).unwrap());
}

#[test]
fn test_midheaven_gets_a_house() {
    let ephemeris = FixedEphemeris::whole_sign(5.0);
    let record = build(&ephemeris).unwrap();
    // MC at 275° sits in Capricorn, the tenth whole-sign house
    assert_eq!(record.sign_of(Point::Midheaven), Sign::Capricorn);
    assert_eq!(record.house_of(Point::Midheaven), House::new(10).unwrap());
}

#[test]
fn test_south_node_opposes_north_node() {
    for north in [45.0, 200.0, 359.5, 0.0, -10.0, 540.25] {
        let ephemeris = FixedEphemeris::whole_sign(5.0).with_node(north);
        let record = build(&ephemeris).unwrap();
        assert_eq!(record.north_node(), normalize_360(north));
        assert_eq!(record.south_node(), normalize_360(record.north_node() + 180.0));
        assert!((0.0..360.0).contains(&record.south_node()));
    }
}

#[test]
fn test_sign_and_house_are_independent() {
    let mut cusps = [0.0; 12];
    for (i, c) in cusps.iter_mut().enumerate() {
        *c = 15.0 + 30.0 * i as f64;
    }
    let mut bodies = [100.0; 10];
    bodies[0] = 20.0; // Aries, house 1
    bodies[1] = 10.0; // Aries, house 12
    let ephemeris = FixedEphemeris::whole_sign(20.0).with_cusps(cusps).with_bodies(bodies);
    let record = build(&ephemeris).unwrap();

    assert_eq!(record.sign_of(Point::Body(Body::Sun)), Sign::Aries);
    assert_eq!(record.house_of(Point::Body(Body::Sun)), House::new(1).unwrap());
    assert_eq!(record.sign_of(Point::Body(Body::Moon)), Sign::Aries);
    assert_eq!(record.house_of(Point::Body(Body::Moon)), House::new(12).unwrap());
}

#[test]
fn test_cusp_interval_across_zero() {
    let cusps = [350.0, 20.0, 50.0, 80.0, 110.0, 140.0, 170.0, 200.0, 230.0, 260.0, 290.0, 320.0];
    let mut bodies = [100.0; 10];
    bodies[0] = 350.0;
    bodies[1] = 0.0;
    bodies[2] = 20.0;
    bodies[3] = 349.99;
    let ephemeris = FixedEphemeris::whole_sign(355.0).with_cusps(cusps).with_bodies(bodies);
    let record = build(&ephemeris).unwrap();

    assert_eq!(record.house_of(Point::Body(Body::Sun)).number(), 1);
    assert_eq!(record.house_of(Point::Body(Body::Moon)).number(), 1);
    assert_eq!(record.house_of(Point::Body(Body::Mercury)).number(), 2);
    assert_eq!(record.house_of(Point::Body(Body::Venus)).number(), 12);
}

#[test]
fn test_unsupported_strategies_dropped_after_first_refusal() {
    let ephemeris = FixedEphemeris::whole_sign(5.0);
    build(&ephemeris).unwrap();
    // 13 points placed, each query form attempted exactly once
    assert_eq!(ephemeris.ecliptic_queries(), 1);
    assert_eq!(ephemeris.longitude_queries(), 1);
}

#[test]
fn test_longitude_query_used_when_ecliptic_unsupported() {
    let ephemeris = FixedEphemeris::whole_sign(5.0).with_mode(HousePositionMode::LongitudeOnly(3.4));
    let record = build(&ephemeris).unwrap();
    for point in Point::HOUSE_OCCUPANTS {
        assert_eq!(record.house_of(point).number(), 3, "{}", point);
    }
    assert_eq!(ephemeris.ecliptic_queries(), 1);
    assert_eq!(ephemeris.longitude_queries(), 13);
}

#[test]
fn test_fractional_house_wraps_into_range() {
    let ephemeris = FixedEphemeris::whole_sign(5.0).with_mode(HousePositionMode::Always(13.2));
    let record = build(&ephemeris).unwrap();
    assert_eq!(record.house_of(Point::Body(Body::Saturn)).number(), 1);
    assert_eq!(ephemeris.longitude_queries(), 0);
}

#[test]
fn test_obliquity_falls_back_to_j2000() {
    let ephemeris = FixedEphemeris::whole_sign(5.0).with_mode(HousePositionMode::Always(2.0));
    build(&ephemeris).unwrap();
    assert_eq!(*ephemeris.seen_obliquity.lock().unwrap(), Some(J2000_OBLIQUITY));

    let ephemeris = FixedEphemeris::whole_sign(5.0)
        .with_mode(HousePositionMode::Always(2.0))
        .with_obliquity(23.4367);
    build(&ephemeris).unwrap();
    assert_eq!(*ephemeris.seen_obliquity.lock().unwrap(), Some(23.4367));
}

#[test]
fn test_house_position_failure_aborts_chart() {
    let ephemeris = FixedEphemeris::whole_sign(5.0).with_mode(HousePositionMode::Failing);
    let err = build(&ephemeris).unwrap_err();
    assert!(matches!(
        err,
        ChartError::EphemerisUnavailable {
            source: EphemerisError::HouseCalculationFailed { .. },
            ..
        }
    ));
}

#[test]
fn test_interval_only_chain_skips_queries() {
    let ephemeris = FixedEphemeris::whole_sign(5.0).with_mode(HousePositionMode::Always(9.0));
    let config = ChartConfig {
        placement: vec![PlacementStrategy::CuspInterval],
        ..ChartConfig::default()
    };
    let record = ChartBuilder::new(&ephemeris, &config)
        .build(jd(), &london(), HouseSystem::WholeSign)
        .unwrap();
    assert_eq!(record.house_of(Point::Body(Body::Sun)).number(), 1);
    assert_eq!(ephemeris.ecliptic_queries() + ephemeris.longitude_queries(), 0);
}

#[test]
fn test_exhausted_chain_is_unavailable() {
    let ephemeris = FixedEphemeris::whole_sign(5.0);
    let config = ChartConfig {
        placement: vec![PlacementStrategy::EclipticQuery, PlacementStrategy::LongitudeQuery],
        ..ChartConfig::default()
    };
    let err = ChartBuilder::new(&ephemeris, &config)
        .build(jd(), &london(), HouseSystem::WholeSign)
        .unwrap_err();
    assert!(matches!(err, ChartError::EphemerisUnavailable { .. }));
}

#[test]
fn test_polar_semi_arc_houses_undefined() {
    let ephemeris = FixedEphemeris::whole_sign(5.0).polar_undefined();
    let config = ChartConfig::default();
    let tromso = GeoLocation { lat: 69.65, lon: 18.96 };

    let err = ChartBuilder::new(&ephemeris, &config)
        .build(jd(), &tromso, HouseSystem::Placidus)
        .unwrap_err();
    match err {
        ChartError::HouseSystemUndefined { system, latitude, .. } => {
            assert_eq!(system, HouseSystem::Placidus);
            assert_eq!(latitude, 69.65);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Whole Sign is still defined there
    let record = ChartBuilder::new(&ephemeris, &config)
        .build(jd(), &tromso, HouseSystem::WholeSign)
        .unwrap();
    assert_eq!(record.house_system(), HouseSystem::WholeSign);
}

#[test]
fn test_degenerate_cusps_rejected() {
    let mut cusps: [f64; 12] = std::array::from_fn(|i| 30.0 * i as f64);
    cusps[5] = cusps[4];
    let ephemeris = FixedEphemeris::whole_sign(5.0).with_cusps(cusps);
    assert!(matches!(build(&ephemeris), Err(ChartError::HouseSystemUndefined { .. })));
}

#[test]
fn test_body_failure_is_unavailable() {
    let ephemeris = FixedEphemeris::whole_sign(5.0).failing(Target::Body(Body::Mars));
    match build(&ephemeris).unwrap_err() {
        ChartError::EphemerisUnavailable { stage, source } => {
            assert_eq!(stage, "Mars position");
            assert!(matches!(source, EphemerisError::CalculationFailed { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let ephemeris = FixedEphemeris::whole_sign(5.0).failing(Target::MeanNode);
    assert!(matches!(build(&ephemeris), Err(ChartError::EphemerisUnavailable { .. })));
}

#[test]
fn test_longitudes_normalized() {
    let ephemeris = FixedEphemeris::whole_sign(5.0).with_bodies([370.0, -20.0, 35.0, 70.0, 100.0, 160.0, 200.0, 250.0, 290.0, 720.0]);
    let record = build(&ephemeris).unwrap();
    assert!((record.body(Body::Sun).lon - 10.0).abs() < 1e-9);
    assert!((record.body(Body::Moon).lon - 340.0).abs() < 1e-9);
    assert_eq!(record.body(Body::Pluto).lon, 0.0);
    assert_eq!(record.sign_of(Point::Body(Body::Moon)), Sign::Pisces);
}
