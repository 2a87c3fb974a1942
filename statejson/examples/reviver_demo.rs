// Example demonstrating a reviver that rewrites and drops members

use statejson::{parse_with_reviver, ParseError, Value};

fn main() -> Result<(), ParseError> {
    let json = r#"{
        "user": {"name": "ada", "password": "hunter2", "logins": 3},
        "tags": [{"password": "kept, arrays are not revived"}]
    }"#;

    let revived = parse_with_reviver(json, |key: &str, value: Value| match (key, value) {
        ("password", _) => None,
        ("logins", Value::Number(n)) => Some(Value::Number(n * 10.0)),
        (_, other) => Some(other),
    })?;

    match revived {
        Some(value) => println!("{value:#?}"),
        None => println!("root removed"),
    }
    Ok(())
}
