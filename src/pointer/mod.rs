//! Pointer patterns and the pointer-hash matching engine.
//!
//! Patterns look like JSON Pointers rooted at `#`, with `*` standing for any
//! array element (and, depending on [`WildcardScope`], any object member):
//!
//! ```
//! use json_precision::pointer::{LevelIndex, PatternSet};
//!
//! let index = LevelIndex::compile(&PatternSet::new(["#/id", "#/items/*/id"])).unwrap();
//! assert!(index.matches(3, "#/items/*/id"));
//! assert!(!index.matches(3, "#/items/*/name"));
//! ```
//!
//! Matching compares 32-bit fingerprints of whole paths, never segments. Two
//! distinct paths at the same depth that share a fingerprint are
//! indistinguishable; compile with [`LevelIndex::compile_verified`] when that
//! risk is not acceptable.
//!
//! - [`fnv1a`] - path fingerprints
//! - [`compile`] - pattern validation and the [`LevelIndex`]
//! - [`matcher`] - [`matches`] and the walker's [`PathCursor`]

pub mod compile;
pub mod fnv1a;
pub mod matcher;

pub use compile::{segment_count, LevelIndex, PatternSet};
pub use fnv1a::Fnv1a;
pub use matcher::{matches, PathCursor, WildcardScope};
