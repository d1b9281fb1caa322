//! # Time Source
//!
//! The date/time reconstructor needs the host's current UTC date (to seed
//! sentences that only carry a time of day) and the host's UTC offset. Both
//! come from a [`Clock`] so that replay and tests can pin them.

use time::{OffsetDateTime, UtcOffset};

/// A source of the current time.
pub trait Clock {
    /// The current instant in UTC.
    fn now_utc(&self) -> OffsetDateTime;

    /// The host's offset from UTC (local time minus UTC).
    fn local_offset(&self) -> UtcOffset;
}

/// The host's wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn local_offset(&self) -> UtcOffset {
        // Fails on some Unix hosts while other threads are running.
        UtcOffset::current_local_offset().unwrap_or_else(|e| {
            log::debug!("local UTC offset unavailable ({e}), assuming UTC");
            UtcOffset::UTC
        })
    }
}

/// A clock frozen at one instant.
///
/// ```rust
/// use nmea_fix::{Clock, FixedClock};
/// use time::{Date, Month, UtcOffset};
///
/// let now = Date::from_calendar_date(2020, Month::March, 1)
///     .unwrap()
///     .with_hms(12, 0, 0)
///     .unwrap()
///     .assume_utc();
/// let clock = FixedClock::new(now).with_offset(UtcOffset::from_hms(8, 0, 0).unwrap());
///
/// assert_eq!(clock.now_utc().year(), 2020);
/// assert_eq!(clock.local_offset().whole_seconds(), 8 * 3600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    now: OffsetDateTime,
    offset: UtcOffset,
}

impl FixedClock {
    /// A clock at `now` on a host running in UTC.
    pub fn new(now: OffsetDateTime) -> Self {
        FixedClock {
            now: now.to_offset(UtcOffset::UTC),
            offset: UtcOffset::UTC,
        }
    }

    /// Sets the host's offset from UTC.
    pub fn with_offset(mut self, offset: UtcOffset) -> Self {
        self.offset = offset;
        self
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime {
        self.now
    }

    fn local_offset(&self) -> UtcOffset {
        self.offset
    }
}
