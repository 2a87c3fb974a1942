// SPDX-License-Identifier: Apache-2.0

/// How much the scanner checks inside string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringMode {
    /// Reject unescaped control characters and validate every escape sequence
    /// while scanning.
    #[default]
    Strict,
    /// Skip control-character and escape checks while scanning.
    ///
    /// Meant for sources already known to be valid JSON. Escapes are still
    /// decoded afterwards, so an undecodable escape is reported as
    /// [`ParseError::MalformedString`](crate::ParseError::MalformedString),
    /// but raw control characters pass through untouched.
    Trusted,
}

/// Caller-selected parser configuration.
///
/// # Example
/// ```
/// use statejson::{ParseOptions, StringMode};
/// let options = ParseOptions::default().with_max_depth(64);
/// assert_eq!(options.strings, StringMode::Strict);
/// assert_eq!(options.max_depth, Some(64));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// String validation mode used by the scanner.
    pub strings: StringMode,
    /// Maximum container nesting depth. `None` leaves depth bounded only by memory.
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    /// Options for input that is already known to be valid.
    pub fn trusted() -> Self {
        Self::default().with_string_mode(StringMode::Trusted)
    }

    pub fn with_string_mode(mut self, strings: StringMode) -> Self {
        self.strings = strings;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_strict_and_unbounded() {
        let options = ParseOptions::default();
        assert_eq!(options.strings, StringMode::Strict);
        assert_eq!(options.max_depth, None);
    }

    #[test]
    fn test_trusted() {
        let options = ParseOptions::trusted();
        assert_eq!(options.strings, StringMode::Trusted);
        assert_eq!(options.max_depth, None);
    }
}
