//! The precision-preserving value contract.
//!
//! A numeric scalar decodes as an [`ExactInteger`] when a compiled pointer
//! pattern matches its position or when its member name is an override
//! field; otherwise it decodes as `f64`. On the way back out, exact integers
//! are written as raw digit sequences and non-finite floats as `null`.
//!
//! - [`exact`] - the [`ExactInteger`] representation
//! - [`decode`] - [`decode_numeric`] and [`NumberMode`]
//! - [`encode`] - [`encode_value`] and float formatting
//! - [`overrides`] - [`OverrideSet`] and the swappable [`OverrideFields`]

pub mod decode;
pub mod encode;
pub mod exact;
pub mod overrides;

pub use decode::{decode_numeric, decode_numeric_with, NumberMode};
pub use encode::encode_value;
pub use exact::{ExactInteger, MAX_SAFE_INTEGER};
pub use overrides::{set_override_fields, OverrideFields, OverrideScope, OverrideSet};

use serde::{Deserialize, Serialize};

use crate::pointer::WildcardScope;

/// Decode-time switches the walker consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "snake_case")]
pub struct DecodeOptions {
    /// Decoding of numbers nothing flags
    pub number_mode: NumberMode,
    /// What `*` in a pattern stands for
    pub wildcard: WildcardScope,
    /// Reach of override fields
    pub override_scope: OverrideScope,
}
