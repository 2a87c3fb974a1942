// SPDX-License-Identifier: Apache-2.0

//! Compare parse results against serde_json on valid documents, and check
//! that whitespace between tokens never changes the result.

use statejson::{parse, parse_with_options, Map, ParseOptions, Scanner, StringMode, Value};
use test_log::test;

const VALID_DOCUMENTS: &[&str] = &[
    "null",
    "true",
    "false",
    "0",
    "-0",
    "42",
    "-17.25",
    "1e10",
    "1E-7",
    "6.02214076e23",
    "9007199254740993",
    "18446744073709551616",
    "0.1",
    "0.30000000000000004",
    "2.2250738585072014e-308",
    "4.9e-324",
    "1.7976931348623157e308",
    r#""""#,
    r#""plain ascii""#,
    r#""esc \" \\ \/ \b \f \n \r \t""#,
    r#""\u0041\u00e9\u4e2d\ud83d\ude00""#,
    "\"raw unicode: \u{e9} \u{4e2d} \u{1F600}\"",
    "[]",
    "{}",
    "[[], {}, [[]], [{}]]",
    r#"{"a":1,"b":[true,false,null]}"#,
    r#"{"z":1,"y":2,"x":3,"w":{"c":1,"b":2,"a":3}}"#,
    r#"[1, "two", 3.0, [4], {"five": 5}, null, true, false]"#,
    r#"{"nested":{"deeper":{"deepest":[1,[2,[3,[4]]]]}}}"#,
    r#"{"": "", " ": " ", "\u0000": "nul"}"#,
    r#"[-1e-2, 1.5E+3, -0.0, 123456789012345678901234567890]"#,
    r#"{"unicode keys \u00e9": "ok", "\ud834\udd1e": "clef"}"#,
    "  \n\t[ 1 ,\r\n 2 ]  \n",
];

fn from_oracle(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap()),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Array(items.into_iter().map(from_oracle).collect()),
        serde_json::Value::Object(members) => Value::Object(
            members
                .into_iter()
                .map(|(key, value)| (key, from_oracle(value)))
                .collect::<Map>(),
        ),
    }
}

fn oracle(text: &str) -> Value {
    from_oracle(serde_json::from_str(text).unwrap_or_else(|e| panic!("oracle rejected {text:?}: {e}")))
}

#[test]
fn test_matches_serde_json() {
    for text in VALID_DOCUMENTS {
        assert_eq!(parse(text).as_ref(), Ok(&oracle(text)), "text {text:?}");
    }
}

#[test]
fn test_trusted_mode_matches_serde_json() {
    let options = ParseOptions::default().with_string_mode(StringMode::Trusted);
    for text in VALID_DOCUMENTS {
        assert_eq!(
            parse_with_options(text, options).as_ref(),
            Ok(&oracle(text)),
            "text {text:?}"
        );
    }
}

#[test]
fn test_key_order_matches_serde_json() {
    let text = r#"{"z":1,"y":2,"x":3,"w":{"c":1,"b":2,"a":3}}"#;
    let ours = parse(text).unwrap();
    let theirs: serde_json::Value = serde_json::from_str(text).unwrap();
    let our_keys: Vec<&String> = ours.as_object().unwrap().keys().collect();
    let their_keys: Vec<&String> = theirs.as_object().unwrap().keys().collect();
    assert_eq!(our_keys, their_keys);
}

#[test]
fn test_invalid_documents_rejected_by_both() {
    for text in ["[1,]", "{\"a\" 1}", "[01]", "\"\t\"", "[1.]", "nul", "[\"a\\x\"]", ""] {
        assert!(parse(text).is_err(), "text {text:?}");
        assert!(serde_json::from_str::<serde_json::Value>(text).is_err(), "text {text:?}");
    }
}

/// Split a valid document into its token texts using the crate's own scanner.
fn token_texts(text: &str) -> Vec<&str> {
    let mut scanner = Scanner::new(text, StringMode::Strict);
    let mut tokens = Vec::new();
    loop {
        scanner.skip_whitespace();
        if scanner.is_eof() {
            break;
        }
        let start = scanner.position();
        scanner.next_token().unwrap();
        tokens.push(&text[start..scanner.position()]);
    }
    tokens
}

/// Small deterministic generator so the whitespace layout varies per run of the loop.
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn whitespace(&mut self) -> String {
        const WS: [char; 4] = [' ', '\t', '\n', '\r'];
        let len = self.next_u64() % 4;
        (0..len).map(|_| WS[(self.next_u64() % 4) as usize]).collect()
    }
}

#[test]
fn test_whitespace_between_tokens_is_ignored() {
    let mut rng = Lcg(0x5eed);
    for text in VALID_DOCUMENTS {
        let expected = parse(text).unwrap();
        let tokens = token_texts(text);
        for _ in 0..16 {
            let mut spaced = rng.whitespace();
            for token in &tokens {
                spaced.push_str(token);
                spaced.push_str(&rng.whitespace());
            }
            assert_eq!(parse(&spaced).as_ref(), Ok(&expected), "spaced {spaced:?}");
        }
    }
}
