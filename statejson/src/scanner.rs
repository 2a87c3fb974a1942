// SPDX-License-Identifier: Apache-2.0

use crate::options::StringMode;
use crate::parse_error::ParseError;

/// One of the six structural characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punct {
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Colon,
    Comma,
}

impl Punct {
    const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'{' => Some(Punct::OpenBrace),
            b'}' => Some(Punct::CloseBrace),
            b'[' => Some(Punct::OpenBracket),
            b']' => Some(Punct::CloseBracket),
            b':' => Some(Punct::Colon),
            b',' => Some(Punct::Comma),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Punct::OpenBrace => '{',
            Punct::CloseBrace => '}',
            Punct::OpenBracket => '[',
            Punct::CloseBracket => ']',
            Punct::Colon => ':',
            Punct::Comma => ',',
        }
    }
}

/// A literal keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    True,
    False,
    Null,
}

impl Literal {
    const ALL: [Literal; 3] = [Literal::True, Literal::False, Literal::Null];

    const fn as_bytes(self) -> &'static [u8] {
        match self {
            Literal::True => b"true",
            Literal::False => b"false",
            Literal::Null => b"null",
        }
    }
}

/// A half-open `[start, end)` byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The contents of a string literal, quotes excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringSpan {
    pub span: Span,
    /// True if at least one backslash escape occurs inside the span.
    pub escaped: bool,
}

/// A classified lexical token. Carries spans, never decoded values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Punct(Punct),
    Literal(Literal),
    Number(Span),
    String(StringSpan),
}

/// A cursor over JSON source text that classifies the next token.
///
/// The scanner never allocates: numbers and strings come back as spans,
/// and decoding them is left to the parser.
#[derive(Debug)]
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    mode: StringMode,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `source`.
    pub fn new(source: &'a str, mode: StringMode) -> Self {
        Scanner {
            source,
            pos: 0,
            mode,
        }
    }

    /// Points the scanner at a new source and rewinds the cursor to 0.
    pub fn init(&mut self, source: &'a str) {
        self.source = source;
        self.pos = 0;
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.bytes().get(pos).copied()
    }

    fn peek(&self) -> Option<u8> {
        self.byte_at(self.pos)
    }

    /// Advances over space, tab, line feed and carriage return.
    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    /// Matches one structural character and advances past it.
    pub fn match_punctuation(&mut self) -> Option<Punct> {
        let punct = self.peek().and_then(Punct::from_byte)?;
        self.pos += 1;
        Some(punct)
    }

    /// Matches `true`, `false` or `null` at the cursor.
    ///
    /// On a miss the cursor is left where it was.
    pub fn match_literal(&mut self) -> Option<Literal> {
        let rest = self.bytes().get(self.pos..)?;
        let literal = Literal::ALL
            .into_iter()
            .find(|literal| rest.starts_with(literal.as_bytes()))?;
        self.pos += literal.as_bytes().len();
        Some(literal)
    }

    fn skip_digits(&self, mut cursor: usize) -> usize {
        while matches!(self.byte_at(cursor), Some(b'0'..=b'9')) {
            cursor += 1;
        }
        cursor
    }

    /// Matches the JSON number grammar at the cursor.
    ///
    /// Returns `Ok(None)` when the cursor is not at a `-` or digit. A number
    /// that starts but breaks off (`-x`, `1.`, `1e+`) is `MalformedNumber`
    /// pointing at the byte where it broke; the cursor is not moved.
    /// A leading `0` ends the integer part, so `01` scans as `0` followed by
    /// a separate token.
    pub fn match_number(&mut self) -> Result<Option<Span>, ParseError> {
        let start = self.pos;
        let mut cursor = start;

        if self.byte_at(cursor) == Some(b'-') {
            cursor += 1;
        }

        match self.byte_at(cursor) {
            Some(b'0') => cursor += 1,
            Some(b'1'..=b'9') => cursor = self.skip_digits(cursor + 1),
            _ if cursor == start => return Ok(None),
            _ => return Err(ParseError::MalformedNumber { position: cursor }),
        }

        if self.byte_at(cursor) == Some(b'.') {
            let digits = cursor + 1;
            cursor = self.skip_digits(digits);
            if cursor == digits {
                return Err(ParseError::MalformedNumber { position: digits });
            }
        }

        if matches!(self.byte_at(cursor), Some(b'e' | b'E')) {
            cursor += 1;
            if matches!(self.byte_at(cursor), Some(b'+' | b'-')) {
                cursor += 1;
            }
            let digits = cursor;
            cursor = self.skip_digits(digits);
            if cursor == digits {
                return Err(ParseError::MalformedNumber { position: digits });
            }
        }

        self.pos = cursor;
        Ok(Some(Span { start, end: cursor }))
    }

    /// Matches a string literal and advances past its closing quote.
    ///
    /// The cursor must be on an opening `"`; anything else is an
    /// `UnexpectedToken`. Reaching the end of input before the closing quote
    /// is `UnexpectedEndOfInput` in either [`StringMode`].
    pub fn match_string(&mut self) -> Result<StringSpan, ParseError> {
        if self.peek() != Some(b'"') {
            return Err(ParseError::unexpected_at(self.source, self.pos));
        }

        let start = self.pos + 1;
        let mut cursor = start;
        let mut escaped = false;
        loop {
            match self.byte_at(cursor) {
                None => return Err(ParseError::UnexpectedEndOfInput),
                Some(b'"') => {
                    self.pos = cursor + 1;
                    return Ok(StringSpan {
                        span: Span { start, end: cursor },
                        escaped,
                    });
                }
                Some(b'\\') => {
                    escaped = true;
                    cursor = self.skip_escape(cursor)?;
                }
                Some(0x00..=0x1F) if self.mode == StringMode::Strict => {
                    return Err(ParseError::MalformedString { position: cursor });
                }
                Some(_) => cursor += 1,
            }
        }
    }

    /// Steps over the escape sequence whose backslash is at `backslash`,
    /// returning the position just past it.
    fn skip_escape(&self, backslash: usize) -> Result<usize, ParseError> {
        let kind_pos = backslash + 1;
        let kind = self
            .byte_at(kind_pos)
            .ok_or(ParseError::UnexpectedEndOfInput)?;

        if self.mode == StringMode::Trusted {
            return Ok(kind_pos + 1);
        }

        match kind {
            b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => Ok(kind_pos + 1),
            b'u' => {
                let hex_start = kind_pos + 1;
                for position in hex_start..hex_start + 4 {
                    match self.byte_at(position) {
                        Some(byte) if byte.is_ascii_hexdigit() => {}
                        Some(_) => return Err(ParseError::MalformedString { position }),
                        None => return Err(ParseError::UnexpectedEndOfInput),
                    }
                }
                Ok(hex_start + 4)
            }
            _ => Err(ParseError::MalformedString {
                position: backslash,
            }),
        }
    }

    /// Classifies the token at the cursor, trying punctuation, literals,
    /// numbers and strings in that order.
    ///
    /// The caller skips whitespace and checks [`is_eof`](Self::is_eof) first.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        if let Some(punct) = self.match_punctuation() {
            return Ok(Token::Punct(punct));
        }
        if let Some(literal) = self.match_literal() {
            return Ok(Token::Literal(literal));
        }
        if let Some(span) = self.match_number()? {
            return Ok(Token::Number(span));
        }
        self.match_string().map(Token::String)
    }
}
