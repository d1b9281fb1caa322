//! # Location Accumulator
//!
//! [`GpsLocation`] is the running merge of every recognized sentence fed to a
//! parser. Each attribute keeps its last decoded value until a later sentence
//! carries a non-empty field for it; [`Flags`] tells which categories the most
//! recent sentence updated.

use core::ops::{BitOr, BitOrAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bitmask of the attribute categories updated by the last processed sentence.
///
/// The mask is cleared at the start of every recognized sentence, so it never
/// accumulates history across sentences.
///
/// ```rust
/// use nmea_fix::Flags;
///
/// let flags = Flags::POSITION | Flags::ALTITUDE;
/// assert!(flags.contains(Flags::POSITION));
/// assert!(!flags.contains(Flags::SPEED));
/// assert_eq!(flags.bits(), 0x03);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flags(u8);

impl Flags {
    /// Latitude and/or longitude
    pub const POSITION: Flags = Flags(0x01);
    /// Altitude
    pub const ALTITUDE: Flags = Flags(0x02);
    /// Speed in knots or km/h
    pub const SPEED: Flags = Flags(0x04);
    /// Bearing (course over ground)
    pub const BEARING: Flags = Flags(0x08);
    /// Horizontal dilution of precision
    pub const ACCURACY: Flags = Flags(0x10);
    /// Fix quality indicator
    pub const FIX_QUALITY: Flags = Flags(0x20);
    /// Age of differential corrections
    pub const DGPS_AGE: Flags = Flags(0x40);

    /// No category updated.
    pub const fn empty() -> Self {
        Flags(0)
    }

    /// Builds a mask from raw bits, dropping unknown ones.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Flags(bits & 0x7F)
    }

    /// The raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// `true` when no category was updated.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` when every category in `other` is set in `self`.
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets every category in `other`.
    pub fn insert(&mut self, other: Flags) {
        self.0 |= other.0;
    }

    /// Clears every category in `other`.
    pub fn remove(&mut self, other: Flags) {
        self.0 &= !other.0;
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.insert(rhs);
    }
}

/// The accumulated GPS fix.
///
/// A fresh parser starts from [`GpsLocation::default`]: zeroed numbers, no
/// hemisphere/status/mode characters and an epoch timestamp of `0`.
/// Latitude and longitude are stored as unsigned magnitudes next to their
/// hemisphere characters, exactly as the receiver reports them; use
/// [`signed_latitude`](GpsLocation::signed_latitude) and
/// [`signed_longitude`](GpsLocation::signed_longitude) for signed degrees.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GpsLocation {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Latitude hemisphere, `N` or `S`
    pub latitude_hemisphere: Option<char>,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Longitude hemisphere, `E` or `W`
    pub longitude_hemisphere: Option<char>,
    /// Altitude above mean sea level in meters
    pub altitude: f32,
    /// Speed over ground in knots
    pub speed_knots: f32,
    /// Speed over ground in kilometers per hour
    pub speed_kmh: f32,
    /// Course over ground in degrees
    pub bearing: f32,
    /// Horizontal dilution of precision
    pub accuracy: f32,
    /// Age of differential GPS data in seconds
    pub dgps_age: f32,
    /// Number of satellites in use
    pub satellites_used: i32,
    /// GPS quality indicator as reported by GGA
    pub fix_quality: i32,
    /// Status indicator, `A` (valid) or `V` (void)
    pub position_status: Option<char>,
    /// FAA mode indicator, e.g. `A` (autonomous) or `D` (differential)
    pub position_mode: Option<char>,
    /// UTC fix time in seconds since the Unix epoch
    pub timestamp: i64,
    /// Categories updated by the last sentence
    pub flags: Flags,
}

impl GpsLocation {
    /// Latitude in degrees, negative in the southern hemisphere.
    pub fn signed_latitude(&self) -> f64 {
        match self.latitude_hemisphere {
            Some('S') => -self.latitude,
            _ => self.latitude,
        }
    }

    /// Longitude in degrees, negative in the western hemisphere.
    pub fn signed_longitude(&self) -> f64 {
        match self.longitude_hemisphere {
            Some('W') => -self.longitude,
            _ => self.longitude,
        }
    }

    /// The fix time as a UTC date and time.
    ///
    /// Returns `None` if the timestamp is outside the range supported by
    /// [`time::OffsetDateTime`].
    pub fn date_time(&self) -> Option<time::OffsetDateTime> {
        time::OffsetDateTime::from_unix_timestamp(self.timestamp).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut flags = Flags::empty();
        assert!(flags.is_empty());

        flags |= Flags::SPEED;
        flags.insert(Flags::BEARING);
        assert!(flags.contains(Flags::SPEED | Flags::BEARING));
        assert!(!flags.contains(Flags::SPEED | Flags::POSITION));

        flags.remove(Flags::SPEED);
        assert_eq!(flags, Flags::BEARING);
        assert_eq!(Flags::from_bits_truncate(0xFF).bits(), 0x7F);
    }

    #[test]
    fn test_signed_coordinates() {
        let location = GpsLocation {
            latitude: 44.0690,
            latitude_hemisphere: Some('S'),
            longitude: 121.3143,
            longitude_hemisphere: Some('W'),
            ..Default::default()
        };

        assert_eq!(location.signed_latitude(), -44.0690);
        assert_eq!(location.signed_longitude(), -121.3143);

        let location = GpsLocation {
            latitude_hemisphere: Some('N'),
            longitude_hemisphere: None,
            ..location
        };

        assert_eq!(location.signed_latitude(), 44.0690);
        assert_eq!(location.signed_longitude(), 121.3143);
    }

    #[test]
    fn test_date_time() {
        let location = GpsLocation {
            timestamp: 1_562_031_233,
            ..Default::default()
        };

        let date_time = location.date_time().unwrap();
        assert_eq!(date_time.year(), 2019);
        assert_eq!(u8::from(date_time.month()), 7);
        assert_eq!(date_time.day(), 2);
        assert_eq!(date_time.hour(), 1);
        assert_eq!(date_time.minute(), 33);
        assert_eq!(date_time.second(), 53);
    }
}
