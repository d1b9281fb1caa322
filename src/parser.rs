//! # Incremental Parser
//!
//! [`NmeaParser`] owns the accumulated [`GpsLocation`] and the reconstructed
//! date. Each call to [`NmeaParser::put_line`] tokenizes one sentence,
//! dispatches it, and notifies the registered observers.

use crate::{
    ChecksumMode, Clock, DateState, Error, GpsLocation, LineEndingMode, SentenceType,
    SystemClock, tokenize,
};

type NmeaObserver<'a> = dyn FnMut(&str) + 'a;
type LocationObserver<'a> = dyn FnMut(&GpsLocation) + 'a;

/// What a call to [`NmeaParser::put_line`] did with its input.
#[derive(Debug, PartialEq)]
pub enum Outcome<'a> {
    /// A supported sentence was decoded and the location observer notified.
    Recognized(SentenceType),

    /// The sentence was well formed but of an unsupported type. Nothing
    /// changed.
    Unrecognized,

    /// The line could not be tokenized. Nothing changed.
    Malformed(Error<&'a str>),
}

/// Configures and builds an [`NmeaParser`].
///
/// # Examples
///
/// ```rust
/// use nmea_fix::{ChecksumMode, LineEndingMode, NmeaParserBuilder, Outcome, SentenceType};
///
/// let mut parser = NmeaParserBuilder::new()
///     .checksum_mode(ChecksumMode::Verify)
///     .line_ending_mode(LineEndingMode::Required)
///     .on_location(|location| println!("{:?}", location.flags))
///     .build();
///
/// let outcome = parser.put_line("$GPVTG,308.5,T,,M,000.013,N,000.024,K,D*02\r\n");
/// assert_eq!(outcome, Outcome::Recognized(SentenceType::VTG));
///
/// let outcome = parser.put_line("$GPVTG,308.5,T,,M,000.013,N,000.024,K,D*02");
/// assert!(matches!(outcome, Outcome::Malformed(_)));
/// ```
#[must_use]
pub struct NmeaParserBuilder<'a, C = SystemClock> {
    /// Checksum mode for the tokenizer.
    checksum_mode: ChecksumMode,

    /// Line ending mode for the tokenizer.
    line_ending_mode: LineEndingMode,

    /// Time source for date seeding and the UTC offset.
    clock: C,

    nmea_observer: Option<Box<NmeaObserver<'a>>>,
    location_observer: Option<Box<LocationObserver<'a>>>,
}

impl<'a> NmeaParserBuilder<'a> {
    /// Creates a builder with default settings.
    ///
    /// The default settings are:
    /// - Checksum mode: [`ChecksumMode::Ignore`]
    /// - Line ending mode: [`LineEndingMode::Optional`]
    /// - Clock: [`SystemClock`]
    /// - No observers
    pub fn new() -> Self {
        NmeaParserBuilder {
            checksum_mode: ChecksumMode::default(),
            line_ending_mode: LineEndingMode::default(),
            clock: SystemClock,
            nmea_observer: None,
            location_observer: None,
        }
    }
}

impl Default for NmeaParserBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C: Clock> NmeaParserBuilder<'a, C> {
    /// Sets the checksum mode.
    pub fn checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    /// Sets the line ending mode.
    pub fn line_ending_mode(mut self, mode: LineEndingMode) -> Self {
        self.line_ending_mode = mode;
        self
    }

    /// Replaces the time source.
    pub fn clock<D: Clock>(self, clock: D) -> NmeaParserBuilder<'a, D> {
        NmeaParserBuilder {
            checksum_mode: self.checksum_mode,
            line_ending_mode: self.line_ending_mode,
            clock,
            nmea_observer: self.nmea_observer,
            location_observer: self.location_observer,
        }
    }

    /// Registers the raw-line observer.
    pub fn on_nmea<F: FnMut(&str) + 'a>(mut self, observer: F) -> Self {
        self.nmea_observer = Some(Box::new(observer));
        self
    }

    /// Registers the location observer.
    pub fn on_location<F: FnMut(&GpsLocation) + 'a>(mut self, observer: F) -> Self {
        self.location_observer = Some(Box::new(observer));
        self
    }

    /// Builds the parser.
    ///
    /// The UTC offset is read from the clock here, once.
    pub fn build(self) -> NmeaParser<'a, C> {
        NmeaParser {
            checksum_mode: self.checksum_mode,
            line_ending_mode: self.line_ending_mode,
            date: DateState::new(&self.clock),
            clock: self.clock,
            location: GpsLocation::default(),
            nmea_observer: self.nmea_observer,
            location_observer: self.location_observer,
        }
    }
}

/// An incremental NMEA 0183 parser for one GPS stream.
///
/// Sentences must be fed in the order the receiver emitted them: every
/// recognized sentence is merged into the same [`GpsLocation`], and nothing
/// detects a reordered stream. Use one parser per stream.
///
/// # Examples
///
/// ```rust
/// use nmea_fix::{Flags, NmeaParser, Outcome, SentenceType};
///
/// let mut parser = NmeaParser::new();
///
/// let outcome = parser.put_line(
///     "$GPGGA,013353.00,2234.2187840,N,11356.2551977,E,4,18,1.6,52.6895,M,-3.509,M,02,3397*76",
/// );
/// assert_eq!(outcome, Outcome::Recognized(SentenceType::GGA));
/// assert_eq!(parser.location().satellites_used, 18);
/// assert!(parser.location().flags.contains(Flags::POSITION | Flags::ALTITUDE));
///
/// assert_eq!(parser.put_line("$GPGSA,A,3,,,,,,,,,,,,,1.6,1.0,1.2*37"), Outcome::Unrecognized);
/// ```
pub struct NmeaParser<'a, C = SystemClock> {
    checksum_mode: ChecksumMode,
    line_ending_mode: LineEndingMode,
    clock: C,
    location: GpsLocation,
    date: DateState,
    nmea_observer: Option<Box<NmeaObserver<'a>>>,
    location_observer: Option<Box<LocationObserver<'a>>>,
}

impl<'a> NmeaParser<'a> {
    /// A parser with default settings on the system clock.
    pub fn new() -> Self {
        NmeaParserBuilder::new().build()
    }
}

impl Default for NmeaParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C: Clock> NmeaParser<'a, C> {
    /// Feeds one sentence.
    ///
    /// A recognized sentence updates the accumulated location and is
    /// delivered to the location observer; the raw-line observer then sees
    /// every line, whatever its outcome. Never fails: problems are reported
    /// through the returned [`Outcome`] and the log.
    pub fn put_line<'l>(&mut self, line: &'l str) -> Outcome<'l> {
        let outcome = match tokenize(line, self.checksum_mode, self.line_ending_mode) {
            Ok(fields) => match SentenceType::from_tag(fields.tag()) {
                Some(kind) => {
                    log::trace!("{kind}: {} fields", fields.len());
                    kind.apply(&fields, &mut self.location, &mut self.date, &self.clock);

                    if let Some(observer) = self.location_observer.as_mut() {
                        observer(&self.location);
                    }

                    Outcome::Recognized(kind)
                }
                None => {
                    log::debug!("ignoring unsupported sentence {:?}", fields.tag());
                    Outcome::Unrecognized
                }
            },
            Err(e @ Error::ChecksumMismatch { .. }) => {
                log::warn!("dropping sentence {line:?}: {e}");
                Outcome::Malformed(e)
            }
            Err(e) => {
                log::debug!("ignoring malformed sentence {line:?}: {e}");
                Outcome::Malformed(e)
            }
        };

        if let Some(observer) = self.nmea_observer.as_mut() {
            observer(line);
        }

        outcome
    }

    /// Registers the raw-line observer, replacing any previous one.
    pub fn on_nmea<F: FnMut(&str) + 'a>(&mut self, observer: F) {
        self.nmea_observer = Some(Box::new(observer));
    }

    /// Registers the location observer, replacing any previous one.
    pub fn on_location<F: FnMut(&GpsLocation) + 'a>(&mut self, observer: F) {
        self.location_observer = Some(Box::new(observer));
    }

    /// The accumulated location.
    pub fn location(&self) -> &GpsLocation {
        &self.location
    }

    /// The reconstructed year, once known.
    pub fn utc_year(&self) -> Option<i32> {
        self.date.year()
    }

    /// The reconstructed month, once known.
    pub fn utc_month(&self) -> Option<u8> {
        self.date.month()
    }

    /// The reconstructed day of the month, once known.
    pub fn utc_day(&self) -> Option<u8> {
        self.date.day()
    }

    /// Local time minus UTC in seconds, cached when the parser was built.
    pub fn utc_time_difference(&self) -> i32 {
        self.date.utc_time_difference()
    }
}
