//! # NMEA 0183 Field Tokenizer
//!
//! This module splits one framed NMEA 0183 sentence, `$TTSSS,D1,D2,...,Dn*CC`,
//! into its comma-delimited fields and the checksum that follows `*`.
//!
//! The tokenizer is configurable to handle:
//! - Ignored or verified checksums
//! - Optional, required or forbidden CRLF line endings

use nom::{
    Parser,
    branch::alt,
    bytes::complete::{take, take_until},
    character::complete::char,
    combinator::rest,
    number::complete::hex_u32,
    sequence::preceded,
};

use crate::{Error, parsing::whole_field};

/// Upper bound on the number of fields in one sentence, tag included.
///
/// An NMEA 0183 sentence is at most 82 characters long, so no valid
/// sentence comes close to this.
pub const MAX_FIELDS: usize = 32;

/// Defines how the tokenizer treats the checksum digits after `*`.
///
/// NMEA 0183 checksums are a two-digit hexadecimal value holding the XOR of
/// all bytes between the `$` prefix and the `*` delimiter.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    /// The checksum digits are extracted verbatim and never checked.
    ///
    /// Sentences with a corrupt checksum are decoded like any other.
    #[default]
    Ignore,

    /// The checksum must be two hexadecimal digits matching the XOR of the
    /// sentence content.
    ///
    /// Use this mode when the byte stream is not already integrity-checked.
    Verify,
}

/// Defines how the tokenizer treats a trailing `\r\n`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineEndingMode {
    /// A trailing `\r\n` is stripped when present.
    #[default]
    Optional,

    /// The sentence must end with `\r\n`.
    ///
    /// Use this mode for lines read straight from a log file or serial port.
    Required,

    /// The sentence must not end with `\r\n`.
    ///
    /// Use this mode for lines whose terminator was already removed by the
    /// line framing.
    Forbidden,
}

/// The fields of one tokenized sentence.
///
/// Index 0 is the talker and sentence type tag exactly as received (e.g.
/// `$GPGGA`), followed by the data fields in order. Empty fields are
/// preserved. The checksum digits are kept apart from the data fields, so a
/// short sentence never hands out its checksum at a data index.
#[derive(Debug, Clone, PartialEq)]
pub struct Fields<'a> {
    fields: heapless::Vec<&'a str, MAX_FIELDS>,
    checksum: &'a str,
}

impl<'a> Fields<'a> {
    /// Returns the field at `index`, or `""` when the sentence is shorter.
    ///
    /// Every decoder treats an empty field as "no update", so an index past
    /// the end of the sentence behaves exactly like an empty field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea_fix::tokenize;
    ///
    /// let fields = tokenize("$GPVTG,308.5,T*26", Default::default(), Default::default()).unwrap();
    /// assert_eq!(fields.get(1), "308.5");
    /// assert_eq!(fields.get(9), "");
    /// ```
    pub fn get(&self, index: usize) -> &'a str {
        self.fields.get(index).copied().unwrap_or_default()
    }

    /// The talker and sentence type tag, e.g. `$GPGGA`.
    pub fn tag(&self) -> &'a str {
        self.get(0)
    }

    /// The two-character talker id from the tag, e.g. `GP`.
    pub fn talker(&self) -> Option<&'a str> {
        self.tag().strip_prefix('$').unwrap_or(self.tag()).get(..2)
    }

    /// The checksum digits as received, without the `*`.
    pub fn checksum(&self) -> &'a str {
        self.checksum
    }

    /// Number of fields including the tag and the trailing checksum.
    pub fn len(&self) -> usize {
        self.fields.len() + 1
    }

    /// Always `false`: a tokenized sentence has at least a tag and a checksum.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the tag, the data fields and finally the checksum.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.fields
            .iter()
            .copied()
            .chain(core::iter::once(self.checksum))
    }
}

/// Splits a sentence into its fields.
///
/// Everything before `*` is split on `,`; up to two characters after `*` are
/// taken as the checksum. With [`ChecksumMode::Verify`] the checksum must match
/// [`checksum`] of the content between `$` and `*`.
///
/// # Errors
///
/// - [`Error::Empty`] for an empty line
/// - [`Error::NonAscii`] for a line with non-ASCII characters
/// - [`Error::LineEnding`] when the line ending violates `le`
/// - [`Error::MissingChecksum`] when there is no `*`
/// - [`Error::InvalidChecksum`] / [`Error::ChecksumMismatch`] when verifying
/// - [`Error::TooManyFields`] for more than [`MAX_FIELDS`] fields
///
/// # Examples
///
/// ```rust
/// use nmea_fix::{ChecksumMode, LineEndingMode, tokenize};
///
/// let fields = tokenize("$GPZDA,013353.00,02,07,2019,,*6E", ChecksumMode::Ignore, LineEndingMode::Optional).unwrap();
/// let all: Vec<_> = fields.iter().collect();
/// assert_eq!(all, ["$GPZDA", "013353.00", "02", "07", "2019", "", "", "6E"]);
///
/// assert!(tokenize("$GPZDA,013353.00", ChecksumMode::Ignore, LineEndingMode::Optional).is_err());
/// ```
pub fn tokenize(
    i: &str,
    cc: ChecksumMode,
    le: LineEndingMode,
) -> Result<Fields<'_>, Error<&str>> {
    if i.is_empty() {
        return Err(Error::Empty);
    }

    if !i.is_ascii() {
        return Err(Error::NonAscii);
    }

    let i = line_ending(i, le)?;

    let (cc_part, content) = take_until::<_, _, nom::error::Error<&str>>("*")
        .parse(i)
        .map_err(|_| Error::MissingChecksum)?;
    let (_, found) = preceded(char('*'), alt((take(2u8), rest)))
        .parse(cc_part)
        .map_err(|_: nom::Err<nom::error::Error<&str>>| Error::MissingChecksum)?;

    if cc == ChecksumMode::Verify {
        verify_checksum(content, found)?;
    }

    let mut fields = heapless::Vec::new();
    for field in content.split(',') {
        fields.push(field).map_err(|_| Error::TooManyFields)?;
    }

    Ok(Fields {
        fields,
        checksum: found,
    })
}

fn line_ending(i: &str, le: LineEndingMode) -> Result<&str, Error<&str>> {
    match (i.strip_suffix("\r\n"), le) {
        (Some(i), LineEndingMode::Optional | LineEndingMode::Required) => Ok(i),
        (None, LineEndingMode::Optional | LineEndingMode::Forbidden) => Ok(i),
        _ => Err(Error::LineEnding),
    }
}

fn verify_checksum<'a>(content: &'a str, found: &'a str) -> Result<(), Error<&'a str>> {
    let found = whole_field(hex_u32::<_, nom::error::Error<&str>>)
        .parse(found)
        .ok()
        .filter(|_| found.len() == 2)
        .map(|(_, cc)| cc as u8)
        .ok_or(Error::InvalidChecksum(found))?;

    let data = content
        .strip_prefix('$')
        .or_else(|| content.strip_prefix('!'))
        .unwrap_or(content);
    let expected = checksum(data);

    if expected != found {
        return Err(Error::ChecksumMismatch { expected, found });
    }

    Ok(())
}

/// Calculates the NMEA 0183 checksum of the sentence content.
///
/// The checksum is the XOR of every byte between the `$` prefix and the `*`
/// delimiter, both excluded.
///
/// # Examples
///
/// ```rust
/// use nmea_fix::checksum;
///
/// assert_eq!(checksum("GPGGA,123456,data"), 0x41);
/// ```
pub fn checksum(content: &str) -> u8 {
    content
        .as_bytes()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}

/// Formats a checksum value as a two-digit uppercase hexadecimal string.
///
/// # Examples
///
/// ```rust
/// use nmea_fix::format_checksum;
///
/// assert_eq!(format_checksum(0x41), "41");
/// assert_eq!(format_checksum(0x0A), "0A");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}
