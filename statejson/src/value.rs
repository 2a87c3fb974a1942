// SPDX-License-Identifier: Apache-2.0

//! The in-memory JSON value tree.

use indexmap::IndexMap;

/// Object members, in the order their keys first appeared in the source.
pub type Map = IndexMap<String, Value>;

/// A parsed JSON value.
///
/// Numbers are always `f64`, matching the double-precision model of JSON
/// text. Objects preserve insertion order and never hold a key twice.
///
/// Dropping a value is iterative, so trees of any depth can be discarded.
/// The derived `Clone`, `PartialEq` and `Debug` still recurse and will
/// overflow the stack on very deeply nested trees.
///
/// Because `Value` implements `Drop`, its contents cannot be moved out by a
/// `match`; use [`into_string`](Value::into_string),
/// [`into_array`](Value::into_array) or [`into_object`](Value::into_object).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean (true/false)
    Bool(bool),
    /// JSON number
    Number(f64),
    /// JSON string, escapes already decoded
    String(String),
    /// JSON array of values
    Array(Vec<Value>),
    /// JSON object
    Object(Map),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a member of an object by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }

    /// Get an element of an array by index.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array()?.get(index)
    }

    pub fn into_string(mut self) -> Option<String> {
        match &mut self {
            Value::String(s) => Some(core::mem::take(s)),
            _ => None,
        }
    }

    pub fn into_array(mut self) -> Option<Vec<Value>> {
        match &mut self {
            Value::Array(items) => Some(core::mem::take(items)),
            _ => None,
        }
    }

    pub fn into_object(mut self) -> Option<Map> {
        match &mut self {
            Value::Object(members) => Some(core::mem::take(members)),
            _ => None,
        }
    }

    /// Replace this value with `Null`, returning what was there.
    pub fn take(&mut self) -> Value {
        core::mem::take(self)
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = match self {
            Value::Array(items) if !items.is_empty() => core::mem::take(items),
            Value::Object(members) if !members.is_empty() => {
                members.drain(..).map(|(_, value)| value).collect()
            }
            _ => return,
        };
        // Children are emptied before they drop, so each drop below is shallow.
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Value::Array(items) => pending.append(items),
                Value::Object(members) => pending.extend(members.drain(..).map(|(_, value)| value)),
                _ => {}
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl core::str::FromStr for Value {
    type Err = crate::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_types() {
        assert!(Value::Null.is_null());
        assert!(Value::Bool(true).is_bool());
        assert!(Value::Number(42.0).is_number());
        assert!(Value::from("test").is_string());
        assert!(Value::Array(vec![]).is_array());
        assert!(Value::Object(Map::new()).is_object());
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::from(42).as_f64(), Some(42.0));
        assert_eq!(Value::from("test").as_str(), Some("test"));
        assert_eq!(Value::Null.as_str(), None);
    }

    #[test]
    fn test_get_and_get_index() {
        let object: Value = [("a", Value::from(1)), ("b", Value::from(vec![Value::Null]))]
            .into_iter()
            .collect();
        assert_eq!(object.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(object.get("b").and_then(|b| b.get_index(0)), Some(&Value::Null));
        assert_eq!(object.get("missing"), None);
        assert_eq!(object.get_index(0), None);
    }

    #[test]
    fn test_object_keeps_insertion_order() {
        let object: Value = [("z", 1), ("a", 2), ("m", 3)].into_iter().collect();
        let keys: Vec<&str> = object
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_take_leaves_null() {
        let mut value = Value::from("x");
        assert_eq!(value.take(), Value::from("x"));
        assert!(value.is_null());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Bool(false).type_name(), "boolean");
        assert_eq!(Value::Number(0.0).type_name(), "number");
        assert_eq!(Value::String(String::new()).type_name(), "string");
        assert_eq!(Value::Array(vec![]).type_name(), "array");
        assert_eq!(Value::Object(Map::new()).type_name(), "object");
    }

    #[test]
    fn test_into_accessors() {
        assert_eq!(Value::from("s").into_string(), Some("s".to_owned()));
        assert_eq!(Value::from(vec![Value::Null]).into_array(), Some(vec![Value::Null]));
        let object: Value = [("a", 1)].into_iter().collect();
        assert_eq!(object.into_object().map(|m| m.len()), Some(1));
        assert_eq!(Value::Null.into_object(), None);
    }

    #[test]
    fn test_drop_deep_tree() {
        let mut value = Value::Number(1.0);
        for level in 0..100_000 {
            value = if level % 2 == 0 {
                Value::Array(vec![value, Value::Null])
            } else {
                [("k", value)].into_iter().collect()
            };
        }
        drop(value);
    }

    #[test]
    fn test_from_str() {
        let value: Value = "[true]".parse().unwrap();
        assert_eq!(value, Value::from(vec![Value::Bool(true)]));
    }
}
