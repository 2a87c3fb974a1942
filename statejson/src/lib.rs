// SPDX-License-Identifier: Apache-2.0

//! JSON parsing with an explicit state machine.
//!
//! A [`Scanner`] classifies tokens over the raw text without allocating, and
//! a table-driven [`Parser`] consumes them while keeping open containers on
//! its own stack. No recursion is involved, so deeply nested input cannot
//! overflow the call stack.
//!
//! ```
//! use statejson::{parse, Value};
//!
//! let value = parse(r#"{"a":1,"b":[true,false,null]}"#).unwrap();
//! assert_eq!(value.get("a"), Some(&Value::Number(1.0)));
//! assert_eq!(value.get("b").and_then(|b| b.get_index(2)), Some(&Value::Null));
//! ```

mod escape_processor;

mod number;

mod options;
pub use options::{ParseOptions, StringMode};

mod parse_error;
pub use parse_error::ParseError;

mod parser;
pub use parser::{Parser, ParserState};

mod reviver;
pub use reviver::{revive, Reviver};

mod scanner;
pub use scanner::{Literal, Punct, Scanner, Span, StringSpan, Token};

mod value;
pub use value::{Map, Value};

/// Parse a JSON text with default options: strict string checks, no depth limit.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    parse_with_options(text, ParseOptions::default())
}

/// Parse a JSON text with caller-selected options.
pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Value, ParseError> {
    Parser::new(options).parse(text)
}

/// Parse a JSON text, then pass the result through `reviver`.
///
/// `Ok(None)` means the reviver removed the root value.
///
/// ```
/// use statejson::{parse_with_reviver, Value};
///
/// let revived = parse_with_reviver(r#"{"keep":1,"drop":2}"#, |key: &str, value: Value| {
///     (key != "drop").then_some(value)
/// })
/// .unwrap()
/// .unwrap();
/// assert_eq!(revived.get("keep"), Some(&Value::Number(1.0)));
/// assert_eq!(revived.get("drop"), None);
/// ```
pub fn parse_with_reviver<R: Reviver>(
    text: &str,
    mut reviver: R,
) -> Result<Option<Value>, ParseError> {
    let value = parse(text)?;
    Ok(revive(value, &mut reviver))
}
