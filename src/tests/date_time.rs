use time::{Date, Month, UtcOffset};

use crate::{FixedClock, NmeaParser, NmeaParserBuilder};

fn clock() -> FixedClock {
    let now = Date::from_calendar_date(2020, Month::March, 1)
        .unwrap()
        .with_hms(12, 0, 0)
        .unwrap()
        .assume_utc();
    FixedClock::new(now)
}

fn parser<'a>(clock: FixedClock) -> NmeaParser<'a, FixedClock> {
    NmeaParserBuilder::new().clock(clock).build()
}

#[test]
fn test_new_year_rollover() {
    let mut parser = parser(clock());

    parser.put_line("$GPZDA,120000.00,31,12,2020,,*64");
    assert_eq!(parser.utc_year(), Some(2020));
    // 2020-12-31T12:00:00Z
    assert_eq!(parser.location().timestamp, 1_609_416_000);

    parser.put_line("$GPRMC,000001.00,A,,,,,,,010121,,,*26");
    assert_eq!(parser.utc_year(), Some(2021));
    assert_eq!(parser.utc_month(), Some(1));
    assert_eq!(parser.utc_day(), Some(1));
    // 2021-01-01T00:00:01Z
    assert_eq!(parser.location().timestamp, 1_609_459_201);
}

#[test]
fn test_two_digit_year_keeps_century() {
    let mut parser = parser(clock());

    parser.put_line("$GPZDA,120000,15,06,2020,,*49");
    parser.put_line("$GPRMC,235959,A,,,,,,,311299,,,*0A");

    assert_eq!(parser.utc_year(), Some(2099));
    // 2099-12-31T23:59:59Z
    assert_eq!(parser.location().timestamp, 4_102_444_799);
}

#[test]
fn test_time_only_stream_uses_clock_date() {
    let mut parser = parser(clock());

    assert_eq!(parser.utc_year(), None);
    parser.put_line("$GPGGA,235959.50,,,,,,,,,M,,M,,*7C");

    assert_eq!(parser.utc_year(), Some(2020));
    assert_eq!(parser.utc_month(), Some(3));
    assert_eq!(parser.utc_day(), Some(1));
    // fractional seconds dropped: 2020-03-01T23:59:59Z
    assert_eq!(parser.location().timestamp, 1_583_107_199);
}

#[test]
fn test_later_date_replaces_seeded_date() {
    let mut parser = parser(clock());

    parser.put_line("$GPGGA,120000,,,,,,,,,M,,M,,*55");
    assert_eq!(parser.utc_year(), Some(2020));

    parser.put_line("$GPRMC,120000,A,,,,,,,150621,,,*08");
    assert_eq!(parser.utc_year(), Some(2021));
    assert_eq!(parser.utc_month(), Some(6));
    assert_eq!(parser.utc_day(), Some(15));
    // 2021-06-15T12:00:00Z
    assert_eq!(parser.location().timestamp, 1_623_758_400);
}

#[test]
fn test_host_offset_does_not_shift_timestamp() {
    let offsets = [
        UtcOffset::UTC,
        UtcOffset::from_hms(8, 0, 0).unwrap(),
        UtcOffset::from_hms(-5, 0, 0).unwrap(),
        UtcOffset::from_hms(5, 30, 0).unwrap(),
    ];

    for offset in offsets {
        let mut parser = parser(clock().with_offset(offset));
        parser.put_line("$GPZDA,120000.00,31,12,2020,,*64");

        assert_eq!(parser.utc_time_difference(), offset.whole_seconds(), "Failed: {offset}");
        assert_eq!(parser.location().timestamp, 1_609_416_000, "Failed: {offset}");
    }
}

#[test]
fn test_invalid_time_keeps_timestamp() {
    let mut parser = parser(clock());

    parser.put_line("$GPZDA,120000.00,31,12,2020,,*64");
    parser.put_line("$GPZDA,256000.00,,,,,*00");

    assert_eq!(parser.location().timestamp, 1_609_416_000);
    assert_eq!(parser.utc_year(), Some(2020));
}
