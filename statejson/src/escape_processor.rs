// SPDX-License-Identifier: Apache-2.0

use crate::parse_error::ParseError;

/// Decoding of JSON string escape sequences.
///
/// The scanner only records *that* a string contains escapes; this turns
/// the raw span into the final text.
pub struct EscapeProcessor;

impl EscapeProcessor {
    /// Map the character following a backslash to the character it stands for.
    ///
    /// Returns `None` for `u` (handled separately) and for anything that is
    /// not a JSON escape.
    pub fn process_simple_escape(escape_char: u8) -> Option<char> {
        match escape_char {
            b'n' => Some('\n'),
            b't' => Some('\t'),
            b'r' => Some('\r'),
            b'\\' => Some('\\'),
            b'"' => Some('"'),
            b'/' => Some('/'),
            b'b' => Some('\u{08}'), // Backspace
            b'f' => Some('\u{0C}'), // Form feed
            _ => None,
        }
    }

    /// Numeric value (0-15) of a hexadecimal digit.
    pub fn validate_hex_digit(byte: u8) -> Option<u32> {
        match byte {
            b'0'..=b'9' => Some((byte - b'0') as u32),
            b'a'..=b'f' => Some((byte - b'a' + 10) as u32),
            b'A'..=b'F' => Some((byte - b'A' + 10) as u32),
            _ => None,
        }
    }

    /// Check if a UTF-16 code unit is a high surrogate (0xD800-0xDBFF)
    pub fn is_high_surrogate(unit: u32) -> bool {
        (0xD800..=0xDBFF).contains(&unit)
    }

    /// Check if a UTF-16 code unit is a low surrogate (0xDC00-0xDFFF)
    pub fn is_low_surrogate(unit: u32) -> bool {
        (0xDC00..=0xDFFF).contains(&unit)
    }

    /// Combine a high and low surrogate pair into a single character.
    pub fn combine_surrogate_pair(high: u32, low: u32) -> Option<char> {
        if !Self::is_high_surrogate(high) || !Self::is_low_surrogate(low) {
            return None;
        }
        char::from_u32(0x10000 + ((high & 0x3FF) << 10) + (low & 0x3FF))
    }

    /// Read the four hex digits of a `\uXXXX` escape starting at `start`.
    fn hex_unit(bytes: &[u8], start: usize) -> Option<u32> {
        bytes
            .get(start..start + 4)?
            .iter()
            .try_fold(0u32, |unit, &byte| {
                Self::validate_hex_digit(byte).map(|digit| (unit << 4) | digit)
            })
    }

    /// Decode every escape sequence in `raw`.
    ///
    /// `offset` is the position of `raw` within the full source, so errors
    /// point at the offending backslash there. Surrogate pairs combine into
    /// one character; an unpaired surrogate is a `MalformedString`.
    pub fn unescape(raw: &str, offset: usize) -> Result<String, ParseError> {
        let bytes = raw.as_bytes();
        let malformed = |at: usize| ParseError::MalformedString {
            position: offset + at,
        };

        let mut out = String::with_capacity(raw.len());
        let mut run_start = 0;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != b'\\' {
                i += 1;
                continue;
            }
            out.push_str(&raw[run_start..i]);

            let escape = i;
            match bytes.get(escape + 1) {
                Some(b'u') => {
                    let unit = Self::hex_unit(bytes, escape + 2).ok_or(malformed(escape))?;
                    i = escape + 6;
                    if Self::is_high_surrogate(unit) {
                        if bytes.get(i..i + 2) != Some(b"\\u".as_slice()) {
                            return Err(malformed(escape));
                        }
                        let low = Self::hex_unit(bytes, i + 2).ok_or(malformed(i))?;
                        let ch = Self::combine_surrogate_pair(unit, low).ok_or(malformed(i))?;
                        out.push(ch);
                        i += 6;
                    } else {
                        out.push(char::from_u32(unit).ok_or(malformed(escape))?);
                    }
                }
                Some(&kind) => {
                    out.push(Self::process_simple_escape(kind).ok_or(malformed(escape))?);
                    i = escape + 2;
                }
                None => return Err(malformed(escape)),
            }
            run_start = i;
        }
        out.push_str(&raw[run_start..]);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_escapes() {
        assert_eq!(EscapeProcessor::process_simple_escape(b'n'), Some('\n'));
        assert_eq!(EscapeProcessor::process_simple_escape(b't'), Some('\t'));
        assert_eq!(EscapeProcessor::process_simple_escape(b'r'), Some('\r'));
        assert_eq!(EscapeProcessor::process_simple_escape(b'\\'), Some('\\'));
        assert_eq!(EscapeProcessor::process_simple_escape(b'"'), Some('"'));
        assert_eq!(EscapeProcessor::process_simple_escape(b'/'), Some('/'));
        assert_eq!(EscapeProcessor::process_simple_escape(b'b'), Some('\u{08}'));
        assert_eq!(EscapeProcessor::process_simple_escape(b'f'), Some('\u{0C}'));
        assert_eq!(EscapeProcessor::process_simple_escape(b'x'), None);
        assert_eq!(EscapeProcessor::process_simple_escape(b'u'), None);
    }

    #[test]
    fn test_hex_digits() {
        assert_eq!(EscapeProcessor::validate_hex_digit(b'0'), Some(0));
        assert_eq!(EscapeProcessor::validate_hex_digit(b'9'), Some(9));
        assert_eq!(EscapeProcessor::validate_hex_digit(b'a'), Some(10));
        assert_eq!(EscapeProcessor::validate_hex_digit(b'F'), Some(15));
        assert_eq!(EscapeProcessor::validate_hex_digit(b'g'), None);
    }

    #[test]
    fn test_unescape_mixed() {
        let decoded = EscapeProcessor::unescape(r#"a\"b\\c\/d\b\f\n\r\t"#, 0).unwrap();
        assert_eq!(decoded, "a\"b\\c/d\u{08}\u{0C}\n\r\t");
    }

    #[test]
    fn test_unescape_unicode() {
        assert_eq!(EscapeProcessor::unescape(r"\u0041", 0).unwrap(), "A");
        assert_eq!(EscapeProcessor::unescape(r"x\u00e9y", 0).unwrap(), "xéy");
        assert_eq!(EscapeProcessor::unescape(r"\u0022", 0).unwrap(), "\"");
    }

    #[test]
    fn test_unescape_surrogate_pair() {
        assert_eq!(EscapeProcessor::unescape(r"\uD83D\uDE00", 0).unwrap(), "😀");
        assert_eq!(
            EscapeProcessor::combine_surrogate_pair(0xD834, 0xDD1E),
            Some('𝄞')
        );
        assert_eq!(EscapeProcessor::combine_surrogate_pair(0xDD1E, 0xD834), None);
    }

    #[test]
    fn test_unescape_lone_surrogates() {
        assert_eq!(
            EscapeProcessor::unescape(r"ab\uD83D", 10),
            Err(ParseError::MalformedString { position: 12 })
        );
        assert_eq!(
            EscapeProcessor::unescape(r"\uDE00", 0),
            Err(ParseError::MalformedString { position: 0 })
        );
        assert_eq!(
            EscapeProcessor::unescape(r"\uD83D\u0041", 0),
            Err(ParseError::MalformedString { position: 6 })
        );
    }

    #[test]
    fn test_unescape_invalid_escape_reports_position() {
        assert_eq!(
            EscapeProcessor::unescape(r"abc\q", 5),
            Err(ParseError::MalformedString { position: 8 })
        );
        assert_eq!(
            EscapeProcessor::unescape(r"\u12", 0),
            Err(ParseError::MalformedString { position: 0 })
        );
    }

    #[test]
    fn test_unescape_keeps_multibyte_runs() {
        assert_eq!(
            EscapeProcessor::unescape(r"héllo\twörld", 0).unwrap(),
            "héllo\twörld"
        );
    }
}
