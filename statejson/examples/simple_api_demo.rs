// Example demonstrating the simple parse API

use statejson::{parse, ParseError, Value};

fn describe(value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Object(members) => {
            for (key, member) in members {
                println!("{pad}{key}: {}", member.type_name());
                describe(member, indent + 1);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                println!("{pad}[{index}]: {}", item.type_name());
                describe(item, indent + 1);
            }
        }
        Value::String(s) => println!("{pad}= {s:?}"),
        Value::Number(n) => println!("{pad}= {n}"),
        Value::Bool(b) => println!("{pad}= {b}"),
        Value::Null => println!("{pad}= null"),
    }
}

fn main() -> Result<(), ParseError> {
    let json = r#"{"name": "value", "number": 42, "flag": true, "list": [1.5, null, "x"]}"#;
    println!("Input: {}", json);

    let value = parse(json)?;
    describe(&value, 0);

    println!();
    for bad in [r#"{"a":1,"a":2}"#, "[1,2,", "[1 2]", r#""\x""#] {
        match parse(bad) {
            Ok(value) => println!("{bad:<16} -> unexpectedly parsed {value:?}"),
            Err(e) => println!("{bad:<16} -> {e}"),
        }
    }
    Ok(())
}
