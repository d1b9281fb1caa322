//! # Error Types
//!
//! This module defines the error types used while framing, tokenizing and
//! decoding NMEA 0183 sentences.

use nom::error::{ErrorKind, FromExternalError, ParseError};

/// Holds the result of the field decoders.
///
/// It depends on the input type `I`, the output type `O`, and the error type `E`
/// (by default `nom::error::Error<I>`).
///
/// The `Ok` side is a pair containing the remainder of the input and the produced
/// value. The `Err` side contains an instance of `nom::Err` wrapping [`Error`].
pub type IResult<I, O, E = nom::error::Error<I>> = nom::IResult<I, O, Error<I, E>>;

/// Represents everything that can go wrong with a single sentence.
///
/// None of these conditions are fatal to the parser: a sentence that fails
/// framing is reported as [`Outcome::Malformed`](crate::Outcome::Malformed),
/// and a field that fails to decode is skipped while the remaining fields of
/// the same sentence are still applied.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error<I, E = nom::error::Error<I>> {
    /// The line was empty.
    #[error("empty sentence")]
    Empty,

    /// The line contains non-ASCII characters.
    ///
    /// NMEA sentences are ASCII-only; anything else cannot be split into
    /// fields reliably.
    #[error("sentence contains non-ASCII characters")]
    NonAscii,

    /// No `*` checksum marker was found.
    #[error("missing '*' checksum marker")]
    MissingChecksum,

    /// The checksum digits are not a two-digit hexadecimal number.
    ///
    /// Only reported when checksums are verified.
    #[error("invalid checksum digits {0:?}")]
    InvalidChecksum(I),

    /// The checksum of the sentence was corrupt or incorrect.
    ///
    /// Only reported when checksums are verified.
    #[error("checksum mismatch: expected {expected:02X}, found {found:02X}")]
    ChecksumMismatch {
        /// The checksum calculated from the sentence content
        expected: u8,
        /// The checksum found in the sentence
        found: u8,
    },

    /// The line ending did not match the configured
    /// [`LineEndingMode`](crate::LineEndingMode).
    #[error("unexpected line ending")]
    LineEnding,

    /// The sentence has more fields than a single NMEA sentence can carry.
    #[error("too many fields")]
    TooManyFields,

    /// A field held content that does not fit its type, e.g. letters where a
    /// number is expected.
    #[error("invalid field {0:?}")]
    InvalidField(I),

    /// The accumulated year, month and day do not form a calendar date.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Reconstructed year
        year: i32,
        /// Reconstructed month
        month: u8,
        /// Reconstructed day
        day: u8,
    },

    /// A nom parser failed inside a field decoder.
    #[error("parsing error: {0:?}")]
    ParsingError(E),
}

impl<I, E> ParseError<I> for Error<I, E>
where
    E: ParseError<I>,
{
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Error::ParsingError(E::from_error_kind(input, kind))
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I, E, EX> FromExternalError<I, EX> for Error<I, E>
where
    E: FromExternalError<I, EX>,
{
    fn from_external_error(input: I, kind: ErrorKind, e: EX) -> Self {
        Error::ParsingError(E::from_external_error(input, kind, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error: Error<&str> = Error::ChecksumMismatch {
            expected: 0x76,
            found: 0x0A,
        };
        assert_eq!(error.to_string(), "checksum mismatch: expected 76, found 0A");

        let error: Error<&str> = Error::InvalidField("12a");
        assert_eq!(error.to_string(), "invalid field \"12a\"");
    }

    #[test]
    fn test_error_from_kind() {
        let error: Error<&str> = Error::from_error_kind("x", ErrorKind::Float);
        assert_eq!(
            error,
            Error::ParsingError(nom::error::Error::new("x", ErrorKind::Float))
        );
    }
}
