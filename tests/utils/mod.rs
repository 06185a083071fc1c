#![allow(dead_code)]

pub mod logging;

use serde_json::{Map, Value};

/// Unwraps a `json!` literal that is known to be an object.
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}
