//! # Parsing Utilities
//!
//! Combinators shared by the field decoders.

use nom::{
    Err, Input, Mode, OutputMode, PResult, Parser,
    error::{ErrorKind, ParseError},
};

/// Runs `f` over a single field and fails unless the whole field was consumed.
///
/// NMEA fields are already isolated by the tokenizer, so a number followed by
/// trailing garbage (`"12a"`) is an invalid field rather than a partial match.
///
/// # Examples
///
/// ```rust
/// use nmea_fix::parsing::whole_field;
/// use nom::{IResult, Parser, character::complete::u8};
///
/// let result: IResult<_, _> = whole_field(u8).parse("18");
/// assert_eq!(result, Ok(("", 18)));
///
/// let result: IResult<_, _> = whole_field(u8).parse("18x");
/// assert!(result.is_err());
/// ```
pub fn whole_field<I, E: ParseError<I>, F>(
    f: F,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = E>
where
    I: Input,
    F: Parser<I, Error = E>,
{
    WholeField { f }
}

struct WholeField<F> {
    f: F,
}

impl<I, F> Parser<I> for WholeField<F>
where
    I: Input,
    F: Parser<I>,
{
    type Output = <F as Parser<I>>::Output;
    type Error = <F as Parser<I>>::Error;

    fn process<OM: OutputMode>(&mut self, i: I) -> PResult<OM, I, Self::Output, Self::Error> {
        let (i, o) = self.f.process::<OM>(i)?;

        if i.input_len() != 0 {
            return Err(Err::Error(OM::Error::bind(|| {
                <F as Parser<I>>::Error::from_error_kind(i, ErrorKind::Eof)
            })));
        }

        Ok((i, o))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::{IResult, number::complete::float};

    #[test]
    fn test_whole_field() {
        let cases = ["1.6", "-3.509", "000.013", "02"];

        for &input in &cases {
            let result: IResult<_, _> = whole_field(float).parse(input);
            assert!(result.is_ok(), "Failed: {input:?}\n\t{result:?}");
        }

        let cases = ["1.6M", "1,6", "abc"];

        for &input in &cases {
            let result: IResult<_, _> = whole_field(float).parse(input);
            assert!(result.is_err(), "Failed: {input:?}\n\t{result:?}");
        }
    }
}
