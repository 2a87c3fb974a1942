// SPDX-License-Identifier: Apache-2.0

use crate::parse_error::ParseError;
use crate::scanner::Span;

/// Convert a scanned number span to an `f64`.
///
/// The scanner has already checked the JSON number grammar, which is a
/// subset of what `f64::from_str` accepts, so a parse failure here means the
/// span was not produced by the scanner. Literals whose magnitude overflows
/// to infinity are rejected; underflow rounds toward zero as usual.
pub fn parse_number(source: &str, span: Span) -> Result<f64, ParseError> {
    let malformed = ParseError::MalformedNumber {
        position: span.start,
    };
    let text = source.get(span.start..span.end).ok_or(malformed.clone())?;
    match text.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(malformed),
    }
}
