//! # Sentence Dispatcher
//!
//! Maps the tag of a tokenized sentence to one of the supported sentence
//! types and runs that type's field decoders, in order, against the
//! accumulated location.

use core::fmt;

use nom::{
    Parser,
    bytes::complete::take,
    character::complete::char,
    combinator::{opt, verify},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Clock, DateState, Error, Fields, Flags, GpsLocation, decode, parsing::whole_field};

/// The sentence types that feed the accumulated location.
///
/// | Variant | Sentence Type                                           | Decoded                                              |
/// |---------|---------------------------------------------------------|------------------------------------------------------|
/// | GGA     | Global Positioning System Fix Data                      | position, quality, satellites, HDOP, altitude, DGPS age, time |
/// | GLL     | Geographic Position - Latitude/Longitude                | position, time, status, mode                         |
/// | RMC     | Recommended Minimum Navigation Information              | status, position, speed, bearing, date and time      |
/// | VTG     | Track made good and Ground speed                        | bearing, speed in knots and km/h, mode               |
/// | ZDA     | Time & Date - UTC, day, month, year and local time zone | date and time                                        |
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceType {
    /// Global Positioning System Fix Data
    GGA,
    /// Geographic Position - Latitude/Longitude
    GLL,
    /// Recommended Minimum Navigation Information
    RMC,
    /// Track made good and Ground speed
    VTG,
    /// Time & Date - UTC, day, month, year and local time zone
    ZDA,
}

impl SentenceType {
    /// Identifies the sentence type from a `$TTSSS` tag.
    ///
    /// The tag is an optional `$`, a two-character talker id and the
    /// three-letter sentence type. Proprietary `$P...` tags and anything else
    /// yield `None`.
    ///
    /// ```rust
    /// use nmea_fix::SentenceType;
    ///
    /// assert_eq!(SentenceType::from_tag("$GPGGA"), Some(SentenceType::GGA));
    /// assert_eq!(SentenceType::from_tag("$GNRMC"), Some(SentenceType::RMC));
    /// assert_eq!(SentenceType::from_tag("$GPGSA"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Self> {
        let talker = verify(take(2u8), |talker: &str| !talker.starts_with('P'));
        let parsed: nom::IResult<&str, &str> =
            whole_field((opt(char('$')), talker, take(3u8)).map(|(_, _, kind)| kind)).parse(tag);
        let (_, kind) = parsed.ok()?;

        match kind {
            "GGA" => Some(Self::GGA),
            "GLL" => Some(Self::GLL),
            "RMC" => Some(Self::RMC),
            "VTG" => Some(Self::VTG),
            "ZDA" => Some(Self::ZDA),
            _ => None,
        }
    }

    /// The three-letter sentence type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GGA => "GGA",
            Self::GLL => "GLL",
            Self::RMC => "RMC",
            Self::VTG => "VTG",
            Self::ZDA => "ZDA",
        }
    }

    /// Runs this sentence type's decoders over `f`.
    ///
    /// The flags are cleared first, so afterwards they hold exactly the
    /// categories this sentence updated. A field that fails to decode is
    /// logged and skipped; the remaining fields are still applied.
    pub(crate) fn apply<C: Clock>(
        self,
        f: &Fields<'_>,
        location: &mut GpsLocation,
        date: &mut DateState,
        clock: &C,
    ) {
        location.flags = Flags::empty();

        let skip = |result: Result<(), Error<&str>>| {
            if let Err(e) = result {
                log::warn!("{}: skipping field: {e}", self);
            }
        };

        match self {
            Self::GGA => {
                skip(decode::lat_lon(location, f.get(2), f.get(3), f.get(4), f.get(5)));
                skip(decode::fix_quality(location, f.get(6)));
                skip(decode::satellites_used(location, f.get(7)));
                skip(decode::accuracy(location, f.get(8)));
                skip(decode::altitude(location, f.get(9)));
                skip(decode::dgps_age(location, f.get(13)));
                skip(date.update_time(f.get(1), clock, location));
            }
            Self::GLL => {
                skip(decode::lat_lon(location, f.get(1), f.get(2), f.get(3), f.get(4)));
                skip(date.update_time(f.get(5), clock, location));
                decode::position_status(location, f.get(6));
                decode::position_mode(location, f.get(7));
            }
            Self::RMC => {
                decode::position_status(location, f.get(2));
                skip(decode::lat_lon(location, f.get(3), f.get(4), f.get(5), f.get(6)));
                skip(decode::speed_knots(location, f.get(7)));
                skip(decode::bearing(location, f.get(8)));
                skip(date.update_date(f.get(9), f.get(1), clock, location));
            }
            Self::VTG => {
                skip(decode::bearing(location, f.get(1)));
                skip(decode::speed_knots(location, f.get(5)));
                skip(decode::speed_kmh(location, f.get(7)));
                decode::position_mode(location, f.get(9));
            }
            Self::ZDA => {
                skip(date.update_day(f.get(2)));
                skip(date.update_month(f.get(3)));
                skip(date.update_year(f.get(4), clock));
                skip(date.update_time(f.get(1), clock, location));
            }
        }
    }
}

impl fmt::Display for SentenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
