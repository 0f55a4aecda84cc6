//! JSON Precision - exact-integer JSON decoding driven by path patterns.
//!
//! Callers mark positions in a JSON document with pointer-style patterns
//! (`#/items/*/id`) or member names (`time`). Numbers at those positions
//! decode as arbitrary-width integers instead of `f64`, and are written back
//! out digit for digit.
//!
//! # Architecture
//!
//! - [`pointer`] - FNV-1a hashing, pattern compilation and depth matching
//! - [`precision`] - Exact integers, decode/encode rules and override fields
//! - [`json`] - The walker that drives the matcher, and the writer
//! - [`config`] - File-based configuration
//! - [`error`] - Error codes
//!
//! # Matching
//!
//! Patterns are compiled into a [`LevelIndex`]: one sorted bucket of 32-bit
//! fingerprints per depth. While walking, the parser extends a running
//! fingerprint per path segment and binary-searches the bucket for the
//! current depth, so no path string is ever built on the hot path.

// Library code must avoid unwrap/expect/panic.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod json;
pub mod pointer;
pub mod precision;

// Re-export commonly used types
pub use config::Config;
pub use error::{ErrorCode, ParseError, PrecisionResult};
pub use json::{parse, parse_with_pointer, stringify, JsonValue, Limits};
pub use pointer::{LevelIndex, PatternSet};
pub use precision::{DecodeOptions, ExactInteger};
