//! File-based configuration.
//!
//! A config file is a JSON object bundling everything a parse needs:
//!
//! ```json
//! {
//!   "pointers": ["#/id", "#/items/*/id"],
//!   "force_fields": ["time"],
//!   "options": { "number_mode": "mixed", "wildcard": "arrays_only" },
//!   "verify_matches": true,
//!   "limits": { "max_nesting_depth": 32 }
//! }
//! ```
//!
//! Every key is optional. Unknown keys are rejected with E300.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, PrecisionResult};
use crate::json::Limits;
use crate::pointer::{Fnv1a, LevelIndex, PatternSet};
use crate::precision::{DecodeOptions, OverrideSet};

/// Parse configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path patterns whose numbers decode exactly
    pub pointers: Vec<String>,
    /// Member names whose numbers always decode exactly
    pub force_fields: Vec<String>,
    /// Decode switches
    pub options: DecodeOptions,
    /// Keep pattern strings so fingerprint hits are confirmed
    pub verify_matches: bool,
    /// Hash seed; the FNV-1a offset basis when absent
    pub seed: Option<u32>,
    /// Walker limits
    pub limits: Limits,
}

impl Config {
    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> PrecisionResult<Self> {
        serde_json::from_str(text).map_err(|e| ErrorCode::E300_InvalidConfig(e.to_string()))
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> PrecisionResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ErrorCode::E300_InvalidConfig(format!("{}: {e}", path.display()))
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            pointers = config.pointers.len(),
            force_fields = config.force_fields.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// The configured patterns.
    pub fn pattern_set(&self) -> PatternSet {
        self.pointers.iter().cloned().collect()
    }

    /// The configured hasher.
    pub fn hasher(&self) -> Fnv1a {
        self.seed.map_or_else(Fnv1a::new, Fnv1a::with_seed)
    }

    /// Compile the configured patterns into a level index.
    pub fn compile(&self) -> PrecisionResult<LevelIndex> {
        let patterns = self.pattern_set();
        if self.verify_matches {
            LevelIndex::compile_verified_with(&patterns, self.hasher())
        } else {
            LevelIndex::compile_with(&patterns, self.hasher())
        }
    }

    /// The configured override fields.
    pub fn overrides(&self) -> OverrideSet {
        self.force_fields.iter().cloned().collect()
    }
}
