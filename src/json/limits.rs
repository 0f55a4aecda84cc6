//! DoS protection limits for the walker.
//!
//! # Errors
//!
//! - E110_InputTooLarge: Total input size limit
//! - E111_NestingTooDeep: Maximum nesting depth
//! - E112_StringTooLong: Maximum string length
//! - E113_TooManyFields: Maximum object fields
//! - E114_ArrayTooLong: Maximum array length

use serde::{Deserialize, Serialize};

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum total input size in bytes (E110)
    pub max_input_size: u64,
    /// Maximum nesting depth for arrays/objects (E111)
    pub max_nesting_depth: u64,
    /// Maximum string length in bytes (E112)
    pub max_string_length: u64,
    /// Maximum number of fields in an object (E113)
    pub max_object_fields: u64,
    /// Maximum number of elements in an array (E114)
    pub max_array_length: u64,
    /// Reject objects that repeat a key (E101); otherwise the last one wins
    pub reject_duplicate_keys: bool,
}

impl Limits {
    /// Tight limits for untrusted input.
    pub const fn strict() -> Self {
        Self {
            max_input_size: 1024 * 1024,  // 1 MiB
            max_nesting_depth: 64,        // 64 levels
            max_string_length: 64 * 1024, // 64 KiB
            max_object_fields: 1024,      // 1024 fields
            max_array_length: 10_000,     // 10,000 elements
            reject_duplicate_keys: true,
        }
    }

    /// Generous limits, the default.
    pub const fn lenient() -> Self {
        Self {
            max_input_size: 256 * 1024 * 1024, // 256 MiB
            max_nesting_depth: 512,            // 512 levels
            max_string_length: 16 * 1024 * 1024, // 16 MiB
            max_object_fields: 1_000_000,
            max_array_length: 10_000_000,
            reject_duplicate_keys: false,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::lenient()
    }
}
