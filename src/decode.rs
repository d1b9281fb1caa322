//! # Field Decoders
//!
//! Each decoder takes raw field strings and updates one attribute of a
//! [`GpsLocation`] in place.
//!
//! All decoders share the same policy:
//! - an empty field is "no update": the attribute keeps its previous value
//!   and its flag is not set
//! - a non-empty field must parse completely, otherwise the attribute is left
//!   untouched and [`Error::InvalidField`] is returned
//! - a successful update sets the attribute's [`Flags`] category

use nom::{
    Parser,
    character::complete::i32 as integer32,
    number::complete::{double, float},
};

use crate::{Error, Flags, GpsLocation, IResult, parsing::whole_field};

/// Converts an NMEA `DDDMM.MMMM` degrees-minutes value to decimal degrees.
///
/// ```rust
/// use nmea_fix::decode::degrees_minutes;
///
/// assert!((degrees_minutes(4916.45) - 49.274166666).abs() < 1e-8);
/// assert!((degrees_minutes(12311.12) - 123.18533333).abs() < 1e-8);
/// ```
pub fn degrees_minutes(raw: f64) -> f64 {
    let degrees = (raw / 100.0).floor();
    let minutes = raw - degrees * 100.0;
    degrees + minutes / 60.0
}

pub(crate) fn integer(i: &str) -> IResult<&str, i32> {
    integer32.parse(i)
}

fn real(i: &str) -> IResult<&str, f32> {
    float.parse(i)
}

fn coordinate(i: &str) -> IResult<&str, f64> {
    double.map(degrees_minutes).parse(i)
}

/// Runs `parser` over a non-empty field, yielding `None` for an empty one.
pub(crate) fn optional<'a, O, P>(field: &'a str, parser: P) -> Result<Option<O>, Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = Error<&'a str>>,
{
    if field.is_empty() {
        return Ok(None);
    }

    whole_field(parser)
        .parse(field)
        .map(|(_, value)| Some(value))
        .map_err(|_| Error::InvalidField(field))
}

fn first_char(field: &str) -> Option<char> {
    field.chars().next()
}

/// Decodes latitude, longitude and their hemispheres.
///
/// Each of the four fields is optional on its own. [`Flags::POSITION`] is set
/// when a latitude or longitude value was decoded. An invalid latitude does
/// not prevent the longitude from being decoded; the first error is returned
/// after all four fields were tried.
pub fn lat_lon<'a>(
    location: &mut GpsLocation,
    latitude: &'a str,
    latitude_hemisphere: &'a str,
    longitude: &'a str,
    longitude_hemisphere: &'a str,
) -> Result<(), Error<&'a str>> {
    let lat = optional(latitude, coordinate);
    let lon = optional(longitude, coordinate);

    if let Ok(Some(value)) = lat {
        location.latitude = value;
        location.flags.insert(Flags::POSITION);
    }
    if let Some(hemisphere) = first_char(latitude_hemisphere) {
        location.latitude_hemisphere = Some(hemisphere);
    }
    if let Ok(Some(value)) = lon {
        location.longitude = value;
        location.flags.insert(Flags::POSITION);
    }
    if let Some(hemisphere) = first_char(longitude_hemisphere) {
        location.longitude_hemisphere = Some(hemisphere);
    }

    lat.and(lon).map(|_| ())
}

macro_rules! scalar_decoders {
    ($(
        $(#[$meta:meta])*
        $name:ident => $attribute:ident: $parser:ident $(, $flag:expr)?;
    )*) => {$(
        $(#[$meta])*
        pub fn $name<'a>(location: &mut GpsLocation, field: &'a str) -> Result<(), Error<&'a str>> {
            if let Some(value) = optional(field, $parser)? {
                location.$attribute = value;
                $(location.flags.insert($flag);)?
            }

            Ok(())
        }
    )*};
}

scalar_decoders! {
    /// Decodes the GGA quality indicator, setting [`Flags::FIX_QUALITY`].
    fix_quality => fix_quality: integer, Flags::FIX_QUALITY;
    /// Decodes the number of satellites in use. No flag covers this attribute.
    satellites_used => satellites_used: integer;
    /// Decodes the horizontal dilution of precision, setting [`Flags::ACCURACY`].
    accuracy => accuracy: real, Flags::ACCURACY;
    /// Decodes the altitude in meters, setting [`Flags::ALTITUDE`].
    altitude => altitude: real, Flags::ALTITUDE;
    /// Decodes the age of differential corrections, setting [`Flags::DGPS_AGE`].
    dgps_age => dgps_age: real, Flags::DGPS_AGE;
    /// Decodes the speed in knots, setting [`Flags::SPEED`].
    speed_knots => speed_knots: real, Flags::SPEED;
    /// Decodes the speed in km/h, setting [`Flags::SPEED`].
    speed_kmh => speed_kmh: real, Flags::SPEED;
    /// Decodes the course over ground, setting [`Flags::BEARING`].
    bearing => bearing: real, Flags::BEARING;
}

/// Stores the first character of the status field.
pub fn position_status(location: &mut GpsLocation, field: &str) {
    if let Some(status) = first_char(field) {
        location.position_status = Some(status);
    }
}

/// Stores the first character of the mode field.
pub fn position_mode(location: &mut GpsLocation, field: &str) {
    if let Some(mode) = first_char(field) {
        location.position_mode = Some(mode);
    }
}
