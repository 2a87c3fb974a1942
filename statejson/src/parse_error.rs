// SPDX-License-Identifier: Apache-2.0

/// Errors that can occur during JSON parsing.
///
/// Every error aborts the current parse; no partial value is returned.
/// Positions are byte offsets into the source text.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A character that no token at this grammar position can start with.
    UnexpectedToken { character: char, position: usize },
    /// The input ended before a complete value was read.
    UnexpectedEndOfInput,
    /// An object key was repeated within the same object.
    DuplicateKey { key: String, position: usize },
    /// A number started but did not follow the JSON number grammar,
    /// or does not fit in an `f64`.
    MalformedNumber { position: usize },
    /// A string contained an illegal escape or unescaped control character.
    MalformedString { position: usize },
    /// Non-whitespace content after the top-level value.
    TrailingContent { position: usize },
    /// Nesting went deeper than the configured `max_depth`.
    DepthLimitExceeded { limit: usize, position: usize },
}

impl ParseError {
    /// Byte offset of the offending input, when one is known.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::DuplicateKey { position, .. }
            | ParseError::MalformedNumber { position }
            | ParseError::MalformedString { position }
            | ParseError::TrailingContent { position }
            | ParseError::DepthLimitExceeded { position, .. } => Some(*position),
            ParseError::UnexpectedEndOfInput => None,
        }
    }

    /// Builds an `UnexpectedToken` for whatever character sits at `position`.
    ///
    /// Falls back to `UnexpectedEndOfInput` when `position` is past the end.
    pub(crate) fn unexpected_at(source: &str, position: usize) -> Self {
        match source.get(position..).and_then(|rest| rest.chars().next()) {
            Some(character) => ParseError::UnexpectedToken {
                character,
                position,
            },
            None => ParseError::UnexpectedEndOfInput,
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                character,
                position,
            } => write!(
                f,
                "Unexpected token {} in JSON at position {position}",
                character.escape_debug()
            ),
            ParseError::UnexpectedEndOfInput => write!(f, "Unexpected end of JSON input"),
            ParseError::DuplicateKey { key, position } => {
                write!(f, "Duplicate key '{key}' in JSON at position {position}")
            }
            ParseError::MalformedNumber { position } => {
                write!(f, "Malformed number in JSON at position {position}")
            }
            ParseError::MalformedString { position } => {
                write!(f, "Malformed string in JSON at position {position}")
            }
            ParseError::TrailingContent { position } => {
                write!(f, "Unexpected content after JSON value at position {position}")
            }
            ParseError::DepthLimitExceeded { limit, position } => write!(
                f,
                "Nesting deeper than {limit} levels in JSON at position {position}"
            ),
        }
    }
}

impl std::error::Error for ParseError {}
