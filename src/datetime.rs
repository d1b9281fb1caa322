//! # Date/Time Reconstructor
//!
//! Most sentences carry only a time of day, RMC adds a `DDMMYY` date and ZDA
//! a full date. [`DateState`] merges whatever fragments arrive into one
//! calendar date and turns each time of day into a UTC epoch timestamp.

use nom::{Parser, bytes::complete::take, character::complete::u8 as digits};
use time::{Date, Month, PrimitiveDateTime, Time};

use crate::{
    Clock, Error, GpsLocation,
    decode::{integer, optional},
    parsing::whole_field,
};

/// The reconstructed calendar date.
///
/// A year below 2000 counts as unknown. Until the year is known, the first
/// time of day seeds year, month and day from the clock's current UTC date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateState {
    year: i32,
    month: u8,
    day: u8,
    utc_time_difference: i32,
}

impl DateState {
    /// An unknown date, caching the clock's UTC offset.
    ///
    /// The offset is read once and never refreshed, not even across a
    /// daylight saving transition.
    pub fn new<C: Clock>(clock: &C) -> Self {
        DateState {
            year: -1,
            month: 0,
            day: 0,
            utc_time_difference: clock.local_offset().whole_seconds(),
        }
    }

    /// The year, once known.
    pub fn year(&self) -> Option<i32> {
        self.year_known().then_some(self.year)
    }

    /// The month, once any sentence or the clock supplied one.
    pub fn month(&self) -> Option<u8> {
        (self.month > 0).then_some(self.month)
    }

    /// The day of the month, once any sentence or the clock supplied one.
    pub fn day(&self) -> Option<u8> {
        (self.day > 0).then_some(self.day)
    }

    /// Local time minus UTC in seconds, as cached at construction.
    pub fn utc_time_difference(&self) -> i32 {
        self.utc_time_difference
    }

    fn year_known(&self) -> bool {
        self.year >= 2000
    }

    /// Updates the year from a 4-digit or 2-digit field.
    ///
    /// A 2-digit year is placed in the century of the known year, or of the
    /// clock's current year while the year is unknown. Zero and negative
    /// values are ignored.
    pub fn update_year<'a, C: Clock>(&mut self, field: &'a str, clock: &C) -> Result<(), Error<&'a str>> {
        if let Some(year) = optional(field, integer)? {
            if year > 0 && year < 100 {
                let known = if self.year_known() {
                    self.year
                } else {
                    clock.now_utc().year()
                };
                self.year = known / 100 * 100 + year;
            } else if year > 0 {
                self.year = year;
            }
        }

        Ok(())
    }

    /// Updates the month. Zero is ignored.
    pub fn update_month<'a>(&mut self, field: &'a str) -> Result<(), Error<&'a str>> {
        if let Some(month) = optional(field, digits)? {
            if month > 0 {
                self.month = month;
            }
        }

        Ok(())
    }

    /// Updates the day of the month. Zero is ignored.
    pub fn update_day<'a>(&mut self, field: &'a str) -> Result<(), Error<&'a str>> {
        if let Some(day) = optional(field, digits)? {
            if day > 0 {
                self.day = day;
            }
        }

        Ok(())
    }

    /// Applies an RMC `DDMMYY` date, then the time of day.
    ///
    /// Day, month and year are updated independently; a short date field
    /// leaves its missing parts untouched. The time of day is applied even if
    /// part of the date is invalid; the first error is returned.
    pub fn update_date<'a, C: Clock>(
        &mut self,
        date: &'a str,
        time: &'a str,
        clock: &C,
        location: &mut GpsLocation,
    ) -> Result<(), Error<&'a str>> {
        let part = |start: usize| date.get(start..start + 2).unwrap_or_default();

        let day = self.update_day(part(0));
        let month = self.update_month(part(2));
        let year = self.update_year(part(4), clock);
        let time = self.update_time(time, clock, location);

        day.and(month).and(year).and(time)
    }

    /// Applies an `HHMMSS[.SS]` time of day to the known date.
    ///
    /// Fractional seconds are dropped. The calendar arithmetic is done in
    /// UTC, so the stored timestamp is UTC seconds whatever the host offset.
    pub fn update_time<'a, C: Clock>(
        &mut self,
        field: &'a str,
        clock: &C,
        location: &mut GpsLocation,
    ) -> Result<(), Error<&'a str>> {
        if field.is_empty() {
            return Ok(());
        }

        if !self.year_known() {
            let today = clock.now_utc().date();
            self.year = today.year();
            self.month = today.month().into();
            self.day = today.day();
        }

        let (_, (hour, minute, second)) = (two_digits, two_digits, two_digits)
            .parse(field)
            .map_err(|_| Error::InvalidField(field))?;
        let time = Time::from_hms(hour, minute, second).map_err(|_| Error::InvalidField(field))?;

        location.timestamp = PrimitiveDateTime::new(self.date()?, time)
            .assume_utc()
            .unix_timestamp();

        Ok(())
    }

    fn date<'a>(&self) -> Result<Date, Error<&'a str>> {
        let invalid = || Error::InvalidDate {
            year: self.year,
            month: self.month,
            day: self.day,
        };

        let month = Month::try_from(self.month).map_err(|_| invalid())?;
        Date::from_calendar_date(self.year, month, self.day).map_err(|_| invalid())
    }
}

fn two_digits(i: &str) -> crate::IResult<&str, u8> {
    take(2u8).and_then(whole_field(digits)).parse(i)
}
