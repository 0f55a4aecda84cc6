//! JSON walking and writing.
//!
//! The walker is a strict recursive descent parser that consults the
//! pointer engine at every number, so exactness is decided in a single pass
//! without building path strings.
//!
//! # Architecture
//!
//! - [`types`] - The decoded value tree
//! - [`limits`] - DoS protection limits
//! - [`lexer`] - Tokenizer with UTF-8/escape handling; numbers keep their literal text
//! - [`parser`] - The walker and its [`Parser`] builder
//! - [`writer`] - Compact serialization using the precision encode rules
//! - [`scalars`] - Enumerates scalar positions by canonical path
//!
//! # Example
//!
//! ```
//! use json_precision::json::{parse_with_pointer, stringify};
//! use json_precision::pointer::{LevelIndex, PatternSet};
//!
//! let index = LevelIndex::compile(&PatternSet::new(["#/id"])).unwrap();
//! let value = parse_with_pointer(br#"{"id": 9223372036854775807, "n": 2.0}"#, &index).unwrap();
//!
//! assert!(value.get("id").unwrap().is_exact());
//! assert_eq!(stringify(&value), r#"{"id":9223372036854775807,"n":2}"#);
//! ```

pub mod lexer;
pub mod limits;
pub mod parser;
pub mod scalars;
pub mod types;
pub mod writer;

pub use limits::Limits;
pub use parser::{parse, parse_with_limits, parse_with_pointer, Parser};
pub use scalars::{scalars, Scalar};
pub use types::JsonValue;
pub use writer::stringify;
