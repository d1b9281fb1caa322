//! # NMEA 0183 Fix Decoder
//!
//! This library decodes NMEA 0183 sentences of the form
//! `$TTSSS,D1,D2,...,Dn*CC`, one line at a time, into a single accumulated
//! GPS fix.
//!
//! A receiver splits each fix across several sentence types: position in
//! GGA/GLL/RMC, speed and bearing in RMC/VTG, the calendar date in RMC or ZDA
//! (or nowhere at all). [`NmeaParser`] merges whatever each sentence carries
//! into one [`GpsLocation`]:
//! - empty or missing fields leave the previous value untouched
//! - [`Flags`] tell which categories the latest sentence updated
//! - the date is reconstructed across sentences, 2-digit years included,
//!   so every time of day becomes a UTC epoch timestamp
//!
//! Supported sentence types are GGA, GLL, RMC, VTG and ZDA; anything else is
//! ignored.
//!
//! ## Usage
//!
//! ```rust
//! use nmea_fix::{Flags, NmeaParser};
//!
//! let mut parser = NmeaParser::new();
//! parser.on_location(|location| {
//!     if location.flags.contains(Flags::POSITION) {
//!         println!("{}, {}", location.signed_latitude(), location.signed_longitude());
//!     }
//! });
//!
//! parser.put_line("$GPGGA,013353.00,2234.2187840,N,11356.2551977,E,4,18,1.6,52.6895,M,-3.509,M,02,3397*76");
//! parser.put_line("$GPRMC,013353.00,A,2234.2187840,N,11356.2551977,E,000.013,308.5,020719,0.0,W,D*29");
//!
//! assert_eq!(parser.location().bearing, 308.5);
//! assert_eq!(parser.utc_year(), Some(2019));
//! ```

mod clock;
mod datetime;
pub mod decode;
pub mod error;
mod location;
mod nmea0183;
mod parser;
pub mod parsing;
mod sentence;

pub use clock::{Clock, FixedClock, SystemClock};
pub use datetime::DateState;
pub use error::{Error, IResult};
pub use location::{Flags, GpsLocation};
pub use nmea0183::*;
pub use parser::{NmeaParser, NmeaParserBuilder, Outcome};
pub use sentence::SentenceType;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
