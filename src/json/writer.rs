//! Compact JSON writer.
//!
//! Numbers go through the precision encode rules: exact integers are
//! written as raw digits and non-finite floats as `null`. Object members are
//! emitted in key order, so output is deterministic.

use super::types::JsonValue;
use crate::precision::encode::{write_exact, write_float};

/// Serialize a JsonValue to compact JSON text.
pub fn stringify(value: &JsonValue) -> String {
    let mut output = String::new();
    serialize_value(value, &mut output);
    output
}

fn serialize_value(value: &JsonValue, output: &mut String) {
    match value {
        JsonValue::Null => output.push_str("null"),
        JsonValue::Bool(true) => output.push_str("true"),
        JsonValue::Bool(false) => output.push_str("false"),
        JsonValue::Number(n) => write_float(*n, output),
        JsonValue::Integer(i) => write_exact(i, output),
        JsonValue::String(s) => serialize_string(s, output),
        JsonValue::Array(arr) => {
            output.push('[');
            for (i, value) in arr.iter().enumerate() {
                if i > 0 {
                    output.push(',');
                }
                serialize_value(value, output);
            }
            output.push(']');
        }
        JsonValue::Object(obj) => {
            output.push('{');
            for (i, (key, value)) in obj.iter().enumerate() {
                if i > 0 {
                    output.push(',');
                }
                serialize_string(key, output);
                output.push(':');
                serialize_value(value, output);
            }
            output.push('}');
        }
    }
}

/// Serialize a string with JSON escaping.
fn serialize_string(s: &str, output: &mut String) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\x08' => output.push_str("\\b"),
            '\x0C' => output.push_str("\\f"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c < '\x20' => {
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => output.push(c),
        }
    }
    output.push('"');
}
