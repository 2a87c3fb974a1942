// SPDX-License-Identifier: Apache-2.0

use log::{debug, trace};

use crate::escape_processor::EscapeProcessor;
use crate::number::parse_number;
use crate::options::ParseOptions;
use crate::parse_error::ParseError;
use crate::scanner::{Literal, Punct, Scanner, StringSpan, Token};
use crate::value::{Map, Value};

/// Position of the parser within the JSON grammar.
///
/// The state alone decides which tokens may come next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// The starting state
    Go,
    /// The final, accepting state
    Ok,
    /// Ready for the first key of an object or the closing of an empty object
    FirstOKey,
    /// Ready for the next key of an object
    OKey,
    /// Ready for the colon
    Colon,
    /// Ready for the value half of a key/value pair
    OValue,
    /// Ready for a comma or closing `}`
    OComma,
    /// Ready for the first value of an array or the closing of an empty array
    FirstAValue,
    /// Ready for the next value of an array
    AValue,
    /// Ready for a comma or closing `]`
    AComma,
}

/// A container still being filled.
#[derive(Debug)]
enum Container {
    Object(Map),
    Array(Vec<Value>),
}

impl Container {
    fn into_value(self) -> Value {
        match self {
            Container::Object(members) => Value::Object(members),
            Container::Array(items) => Value::Array(items),
        }
    }
}

/// Saved context of an enclosing container, restored when the nested one closes.
#[derive(Debug)]
struct Frame {
    /// `None` for the frame pushed from `Go`.
    container: Option<Container>,
    /// Pending key, when the enclosing container is an object.
    key: Option<String>,
    /// State to resume in after the nested container closes.
    state: ParserState,
}

/// Table-driven JSON parser.
///
/// Nesting is tracked on an explicit stack of [`Frame`]s rather than the
/// call stack, so depth is limited by memory (or by
/// [`ParseOptions::max_depth`]). Every bit of parse state lives in the
/// instance and is reset at the start of each call, so one `Parser` can be
/// reused and separate instances never interfere.
///
/// # Example
/// ```
/// use statejson::{ParseOptions, Parser, Value};
/// let mut parser = Parser::new(ParseOptions::default());
/// assert_eq!(parser.parse("[1]").unwrap(), Value::Array(vec![Value::Number(1.0)]));
/// assert_eq!(parser.parse("null").unwrap(), Value::Null);
/// ```
#[derive(Debug)]
pub struct Parser {
    options: ParseOptions,
    state: ParserState,
    stack: Vec<Frame>,
    container: Option<Container>,
    key: Option<String>,
    key_position: usize,
    value: Value,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Parser {
            options,
            state: ParserState::Go,
            stack: Vec::new(),
            container: None,
            key: None,
            key_position: 0,
            value: Value::Null,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Current grammar position; `Go` between calls.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Number of open containers.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn reset(&mut self) {
        self.state = ParserState::Go;
        self.stack.clear();
        self.container = None;
        self.key = None;
        self.key_position = 0;
        self.value = Value::Null;
    }

    /// Parse one complete JSON text.
    ///
    /// The whole input is consumed; anything but whitespace after the value
    /// is an error.
    pub fn parse(&mut self, text: &str) -> Result<Value, ParseError> {
        debug!("Parsing {} bytes with {:?}", text.len(), self.options);
        self.reset();
        let result = self.run(text);
        self.reset();
        match &result {
            Ok(value) => debug!("Parsed {}", value.type_name()),
            Err(e) => debug!("Parse failed: {e}"),
        }
        result
    }

    fn run(&mut self, text: &str) -> Result<Value, ParseError> {
        let mut scanner = Scanner::new(text, self.options.strings);
        loop {
            scanner.skip_whitespace();
            if scanner.is_eof() {
                break;
            }
            let position = scanner.position();
            if self.state == ParserState::Ok {
                return Err(ParseError::TrailingContent { position });
            }

            let from = self.state;
            let token = scanner.next_token()?;
            match token {
                Token::Punct(punct) => self.on_punct(punct, text, position)?,
                Token::Literal(literal) => self.on_literal(literal, text, position)?,
                Token::Number(span) => {
                    let next = self.scalar_transition(text, position)?;
                    self.value = Value::Number(parse_number(text, span)?);
                    self.state = next;
                }
                Token::String(string) => self.on_string(string, text, position)?,
            }
            trace!("{from:?} --{token:?}--> {:?}", self.state);
        }
        self.finish()
    }

    fn finish(&mut self) -> Result<Value, ParseError> {
        match self.state {
            ParserState::Ok => Ok(self.value.take()),
            _ => Err(ParseError::UnexpectedEndOfInput),
        }
    }

    /// Next state after a complete scalar value in the current state.
    fn scalar_transition(&self, text: &str, position: usize) -> Result<ParserState, ParseError> {
        match self.state {
            ParserState::Go => Ok(ParserState::Ok),
            ParserState::OValue => Ok(ParserState::OComma),
            ParserState::FirstAValue | ParserState::AValue => Ok(ParserState::AComma),
            _ => Err(ParseError::unexpected_at(text, position)),
        }
    }

    fn on_literal(
        &mut self,
        literal: Literal,
        text: &str,
        position: usize,
    ) -> Result<(), ParseError> {
        self.state = self.scalar_transition(text, position)?;
        self.value = match literal {
            Literal::True => Value::Bool(true),
            Literal::False => Value::Bool(false),
            Literal::Null => Value::Null,
        };
        Ok(())
    }

    fn on_string(
        &mut self,
        string: StringSpan,
        text: &str,
        position: usize,
    ) -> Result<(), ParseError> {
        let is_key = matches!(self.state, ParserState::FirstOKey | ParserState::OKey);
        let next = if is_key {
            ParserState::Colon
        } else {
            self.scalar_transition(text, position)?
        };

        let StringSpan { span, escaped } = string;
        let raw = text
            .get(span.start..span.end)
            .ok_or(ParseError::MalformedString { position })?;
        let decoded = if escaped {
            EscapeProcessor::unescape(raw, span.start)?
        } else {
            raw.to_owned()
        };

        if is_key {
            self.key = Some(decoded);
            self.key_position = position;
        } else {
            self.value = Value::String(decoded);
        }
        self.state = next;
        Ok(())
    }

    fn on_punct(&mut self, punct: Punct, text: &str, position: usize) -> Result<(), ParseError> {
        use ParserState::{AComma, AValue, Colon, FirstAValue, FirstOKey, Go, OComma, OKey, OValue};

        match (self.state, punct) {
            (Go | OValue | FirstAValue | AValue, Punct::OpenBrace) => {
                self.open(Container::Object(Map::new()), FirstOKey, position)
            }
            (Go | OValue | FirstAValue | AValue, Punct::OpenBracket) => {
                self.open(Container::Array(Vec::new()), FirstAValue, position)
            }
            (FirstOKey, Punct::CloseBrace) | (FirstAValue, Punct::CloseBracket) => {
                self.close(text, position)
            }
            (OComma, Punct::CloseBrace) | (AComma, Punct::CloseBracket) => {
                self.commit();
                self.close(text, position)
            }
            (Colon, Punct::Colon) => {
                if let (Some(Container::Object(members)), Some(key)) = (&self.container, &self.key)
                {
                    if members.contains_key(key) {
                        return Err(ParseError::DuplicateKey {
                            key: key.clone(),
                            position: self.key_position,
                        });
                    }
                }
                self.state = OValue;
                Ok(())
            }
            (OComma, Punct::Comma) => {
                self.commit();
                self.state = OKey;
                Ok(())
            }
            (AComma, Punct::Comma) => {
                self.commit();
                self.state = AValue;
                Ok(())
            }
            _ => Err(ParseError::unexpected_at(text, position)),
        }
    }

    /// Start a nested container, saving the enclosing one on the stack.
    fn open(
        &mut self,
        container: Container,
        next: ParserState,
        position: usize,
    ) -> Result<(), ParseError> {
        if let Some(limit) = self.options.max_depth {
            if self.stack.len() >= limit {
                return Err(ParseError::DepthLimitExceeded { limit, position });
            }
        }

        let (resume, key) = match self.state {
            ParserState::Go => (ParserState::Ok, None),
            ParserState::OValue => (ParserState::OComma, self.key.take()),
            _ => (ParserState::AComma, None),
        };
        self.stack.push(Frame {
            container: self.container.replace(container),
            key,
            state: resume,
        });
        self.state = next;
        Ok(())
    }

    /// Finish the current container; it becomes the pending value of the
    /// one restored from the stack.
    fn close(&mut self, text: &str, position: usize) -> Result<(), ParseError> {
        let Some(frame) = self.stack.pop() else {
            return Err(ParseError::unexpected_at(text, position));
        };
        let closed = core::mem::replace(&mut self.container, frame.container);
        self.value = closed.map(Container::into_value).unwrap_or_default();
        self.key = frame.key;
        self.state = frame.state;
        Ok(())
    }

    /// Move the pending value into the current container.
    fn commit(&mut self) {
        let value = self.value.take();
        match &mut self.container {
            Some(Container::Object(members)) => {
                if let Some(key) = self.key.take() {
                    members.insert(key, value);
                }
            }
            Some(Container::Array(items)) => items.push(value),
            None => {}
        }
    }
}
