use std::{cell::RefCell, rc::Rc};

use time::{Date, Month};

use crate::{FixedClock, Flags, GpsLocation, NmeaParser, NmeaParserBuilder, Outcome, SentenceType};

const GGA: &str = "$GPGGA,013353.00,2234.2187840,N,11356.2551977,E,4,18,1.6,52.6895,M,-3.509,M,02,3397*76";
const RMC: &str = "$GPRMC,013353.00,A,2234.2187840,N,11356.2551977,E,000.013,308.5,020719,0.0,W,D*29";
const VTG: &str = "$GPVTG,308.5,T,,M,000.013,N,000.024,K,D*02";

fn parser<'a>() -> NmeaParser<'a, FixedClock> {
    let now = Date::from_calendar_date(2020, Month::March, 1)
        .unwrap()
        .with_hms(12, 0, 0)
        .unwrap()
        .assume_utc();
    NmeaParserBuilder::new().clock(FixedClock::new(now)).build()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_gga_then_rmc() {
    let deliveries = Rc::new(RefCell::new(Vec::new()));
    let mut parser = parser();

    let sink = Rc::clone(&deliveries);
    parser.on_location(move |location| sink.borrow_mut().push(*location));

    assert_eq!(parser.put_line(GGA), Outcome::Recognized(SentenceType::GGA));
    assert_eq!(parser.put_line(RMC), Outcome::Recognized(SentenceType::RMC));

    let deliveries = deliveries.borrow();
    assert_eq!(deliveries.len(), 2);

    let location = deliveries[1];
    assert_eq!(location.fix_quality, 4);
    assert_eq!(location.satellites_used, 18);
    assert_eq!(location.accuracy, 1.6);
    assert_eq!(location.altitude, 52.6895);
    assert_eq!(location.dgps_age, 2.0);
    assert!(close(location.latitude, 22.0 + 34.218784 / 60.0));
    assert!(close(location.longitude, 113.0 + 56.2551977 / 60.0));
    assert_eq!(location.latitude_hemisphere, Some('N'));
    assert_eq!(location.longitude_hemisphere, Some('E'));
    assert_eq!(location.speed_knots, 0.013);
    assert_eq!(location.bearing, 308.5);
    assert_eq!(location.position_status, Some('A'));
    // 2019-07-02T01:33:53Z
    assert_eq!(location.timestamp, 1_562_031_233);
    assert_eq!(location.flags, Flags::POSITION | Flags::SPEED | Flags::BEARING);

    assert_eq!(*parser.location(), location);
    assert_eq!(parser.utc_year(), Some(2019));
    assert_eq!(parser.utc_month(), Some(7));
    assert_eq!(parser.utc_day(), Some(2));
}

#[test]
fn test_gga_flags() {
    let mut parser = parser();
    parser.put_line(GGA);

    assert_eq!(
        parser.location().flags,
        Flags::POSITION | Flags::FIX_QUALITY | Flags::ACCURACY | Flags::ALTITUDE | Flags::DGPS_AGE
    );
    // seeded from the clock until a sentence carries a date
    assert_eq!(parser.utc_year(), Some(2020));
    // 2020-03-01T01:33:53Z
    assert_eq!(parser.location().timestamp, 1_583_026_433);
}

#[test]
fn test_flags_track_latest_sentence_only() {
    let mut parser = parser();

    parser.put_line(GGA);
    assert!(parser.location().flags.contains(Flags::POSITION));

    parser.put_line(VTG);
    let location = parser.location();
    assert_eq!(location.flags, Flags::BEARING | Flags::SPEED);
    assert!(!location.flags.contains(Flags::POSITION));
    // the values themselves persist
    assert_eq!(location.fix_quality, 4);
    assert!(close(location.latitude, 22.570313066666));
    assert_eq!(location.speed_kmh, 0.024);
    assert_eq!(location.position_mode, Some('D'));
}

#[test]
fn test_empty_fields_keep_previous_values() {
    let mut parser = parser();
    parser.put_line(GGA);
    parser.put_line(RMC);
    parser.put_line(VTG);
    let before = *parser.location();

    let cases = [
        "$GPGGA,,,,,,,,,,M,,M,,*56",
        "$GPGLL,,,,,,,*7C",
        "$GPRMC,,,,,,,,,,,,*4B",
        "$GPVTG,,T,,M,,N,,K,*62",
        "$GPZDA,,,,,,*48",
    ];

    for input in cases {
        parser.put_line(input);
        let location = parser.location();

        assert_eq!(
            GpsLocation {
                flags: before.flags,
                ..*location
            },
            before,
            "Failed: {input:?}"
        );
        assert!(location.flags.is_empty(), "Failed: {input:?}");
        assert_eq!(parser.utc_year(), Some(2019), "Failed: {input:?}");
    }
}

#[test]
fn test_status_and_mode_follow_latest_sentence() {
    let mut parser = parser();

    parser.put_line("$GPGLL,2234.2187840,N,11356.2551977,E,013354.00,A,D*61");
    assert_eq!(parser.location().position_status, Some('A'));
    assert_eq!(parser.location().position_mode, Some('D'));

    parser.put_line("$GPVTG,,T,,M,,N,,K,N*2C");
    assert_eq!(parser.location().position_status, Some('A'));
    assert_eq!(parser.location().position_mode, Some('N'));
    assert!(parser.location().flags.is_empty());
}

#[test]
fn test_talker_prefixes() {
    let cases = ["$GNGGA", "$GLGGA", "$GAGGA", "$BDGGA"];

    for tag in cases {
        let mut parser = parser();
        let line = GGA.replacen("$GPGGA", tag, 1);

        assert_eq!(parser.put_line(&line), Outcome::Recognized(SentenceType::GGA), "Failed: {tag:?}");
        assert_eq!(parser.location().satellites_used, 18, "Failed: {tag:?}");
    }
}
