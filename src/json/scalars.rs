//! Scalar enumeration over a decoded tree.
//!
//! Lists every scalar together with its canonical path (array elements
//! written as `*`, members by name) and depth. Used by `jprec inspect` and
//! handy for checking which positions a pattern set reached.

use super::types::JsonValue;
use crate::pointer::compile::{DELIMITER, ROOT, WILDCARD};

/// A scalar position in a decoded tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar<'a> {
    /// Canonical path in pattern syntax
    pub path: String,
    /// Number of segments in `path`
    pub depth: usize,
    /// The decoded value
    pub value: &'a JsonValue,
}

/// Collect all scalars of `value` in document order (objects by key).
pub fn scalars(value: &JsonValue) -> Vec<Scalar<'_>> {
    let mut out = Vec::new();
    let mut path = String::from(ROOT);
    collect(value, &mut path, 0, &mut out);
    out
}

fn collect<'a>(value: &'a JsonValue, path: &mut String, depth: usize, out: &mut Vec<Scalar<'a>>) {
    let base = path.len();
    match value {
        JsonValue::Array(items) => {
            path.push(DELIMITER);
            path.push_str(WILDCARD);
            for item in items {
                collect(item, path, depth + 1, out);
            }
            path.truncate(base);
        }
        JsonValue::Object(members) => {
            for (key, member) in members {
                path.push(DELIMITER);
                path.push_str(key);
                collect(member, path, depth + 1, out);
                path.truncate(base);
            }
        }
        scalar => out.push(Scalar {
            path: path.clone(),
            depth,
            value: scalar,
        }),
    }
}
