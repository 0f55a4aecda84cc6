//! Pattern compilation into a depth-indexed fingerprint table.
//!
//! A [`LevelIndex`] holds, for every depth `d` up to the deepest pattern, the
//! sorted and deduplicated fingerprints of all patterns with exactly `d`
//! segments. Next to it sits a prefix table with the fingerprints of every
//! pattern prefix per depth; the walker consults it to drop path cursors no
//! pattern can still reach. The prefix table never changes what matches.

use std::collections::BTreeSet;

use super::fnv1a::Fnv1a;
use crate::error::{ErrorCode, PrecisionResult};
use crate::json::JsonValue;

/// Root marker every pattern starts with.
pub const ROOT: &str = "#";

/// Segment delimiter.
pub const DELIMITER: char = '/';

/// Wildcard segment.
pub const WILDCARD: &str = "*";

/// An ordered collection of path patterns.
///
/// Order and duplicates are irrelevant to matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<String>,
}

impl PatternSet {
    /// Create a pattern set from any collection of strings.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// The patterns in insertion order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Number of patterns (duplicates included).
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if there are no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PatternSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl TryFrom<&JsonValue> for PatternSet {
    type Error = ErrorCode;

    /// Accepts only an array of strings.
    fn try_from(value: &JsonValue) -> PrecisionResult<Self> {
        let items = value.as_array().ok_or_else(|| {
            ErrorCode::E200_InvalidPatternSet(format!("expected array, got {}", value.type_name()))
        })?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ErrorCode::E200_InvalidPatternSet(format!(
                        "item {i} is {}, expected string",
                        item.type_name()
                    ))
                })
            })
            .collect::<PrecisionResult<Vec<_>>>()
            .map(|patterns| Self { patterns })
    }
}

/// Validate a pattern and return its segment count.
///
/// `#` has zero segments, `#/a/*/b` has three. Empty segments and anything
/// not rooted at `#` are rejected.
pub fn segment_count(pattern: &str) -> PrecisionResult<usize> {
    let rest = pattern.strip_prefix(ROOT).ok_or_else(|| {
        ErrorCode::E200_InvalidPatternSet(format!("'{pattern}' does not start with '{ROOT}'"))
    })?;
    if rest.is_empty() {
        return Ok(0);
    }
    let rest = rest.strip_prefix(DELIMITER).ok_or_else(|| {
        ErrorCode::E200_InvalidPatternSet(format!(
            "'{pattern}' must continue with '{DELIMITER}' after '{ROOT}'"
        ))
    })?;
    let mut count = 0;
    for segment in rest.split(DELIMITER) {
        if segment.is_empty() {
            return Err(ErrorCode::E200_InvalidPatternSet(format!(
                "'{pattern}' contains an empty segment"
            )));
        }
        count += 1;
    }
    Ok(count)
}

/// Depth-bucketed fingerprints compiled from a [`PatternSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelIndex {
    hasher: Fnv1a,
    levels: Vec<Vec<u32>>,
    prefixes: Vec<Vec<u32>>,
    verified: Option<Vec<Vec<(u32, String)>>>,
}

impl LevelIndex {
    /// Compile patterns with the default hasher.
    pub fn compile(patterns: &PatternSet) -> PrecisionResult<Self> {
        Self::build(patterns, Fnv1a::new(), false)
    }

    /// Compile patterns with a custom hasher.
    pub fn compile_with(patterns: &PatternSet, hasher: Fnv1a) -> PrecisionResult<Self> {
        Self::build(patterns, hasher, false)
    }

    /// Compile patterns keeping their text, so fingerprint hits are confirmed
    /// by string comparison.
    pub fn compile_verified(patterns: &PatternSet) -> PrecisionResult<Self> {
        Self::build(patterns, Fnv1a::new(), true)
    }

    /// Verified compile with a custom hasher.
    pub fn compile_verified_with(patterns: &PatternSet, hasher: Fnv1a) -> PrecisionResult<Self> {
        Self::build(patterns, hasher, true)
    }

    /// Compile a JSON array of pattern strings.
    pub fn from_json(value: &JsonValue) -> PrecisionResult<Self> {
        Self::compile(&PatternSet::try_from(value)?)
    }

    fn build(patterns: &PatternSet, hasher: Fnv1a, verify: bool) -> PrecisionResult<Self> {
        // Validate everything before hashing anything.
        let counts = patterns
            .patterns()
            .iter()
            .map(|p| segment_count(p))
            .collect::<PrecisionResult<Vec<_>>>()?;

        let mut levels: Vec<Vec<u32>> = Vec::new();
        let mut prefixes: Vec<BTreeSet<u32>> = Vec::new();
        let mut verified: Vec<Vec<(u32, String)>> = Vec::new();

        for (pattern, &depth) in patterns.patterns().iter().zip(&counts) {
            if levels.len() <= depth {
                levels.resize_with(depth + 1, Vec::new);
                prefixes.resize_with(depth + 1, BTreeSet::new);
                if verify {
                    verified.resize_with(depth + 1, Vec::new);
                }
            }

            let mut state = hasher.hash(ROOT);
            prefixes[0].insert(state);
            if let Some(rest) = pattern.strip_prefix(ROOT).and_then(|r| r.strip_prefix(DELIMITER)) {
                for (i, segment) in rest.split(DELIMITER).enumerate() {
                    state = Fnv1a::update(Fnv1a::update(state, "/"), segment);
                    prefixes[i + 1].insert(state);
                }
            }

            let fingerprint = hasher.hash(pattern);
            debug_assert_eq!(fingerprint, state);
            levels[depth].push(fingerprint);
            if verify {
                verified[depth].push((fingerprint, pattern.clone()));
            }
        }

        for bucket in &mut levels {
            bucket.sort_unstable();
            bucket.dedup();
        }
        for bucket in &mut verified {
            bucket.sort();
            bucket.dedup();
        }

        tracing::debug!(
            patterns = patterns.len(),
            max_depth = ?levels.len().checked_sub(1),
            verified = verify,
            "compiled pointer patterns"
        );

        Ok(Self {
            hasher,
            levels,
            prefixes: prefixes
                .into_iter()
                .map(|set| set.into_iter().collect())
                .collect(),
            verified: verify.then_some(verified),
        })
    }

    /// The hasher this index was compiled with.
    pub fn hasher(&self) -> Fnv1a {
        self.hasher
    }

    /// Fingerprint buckets, indexed by depth.
    pub fn levels(&self) -> &[Vec<u32>] {
        &self.levels
    }

    /// Highest compiled depth, `None` for an empty pattern set.
    pub fn max_depth(&self) -> Option<usize> {
        self.levels.len().checked_sub(1)
    }

    /// Returns true if no pattern was compiled.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns true if fingerprint hits are confirmed against pattern text.
    pub fn is_verified(&self) -> bool {
        self.verified.is_some()
    }

    /// Returns true if `fingerprint` is a pattern terminating at `depth`.
    pub fn contains(&self, depth: usize, fingerprint: u32) -> bool {
        self.levels
            .get(depth)
            .is_some_and(|bucket| bucket.binary_search(&fingerprint).is_ok())
    }

    /// Returns true if some pattern passes through `depth` with this prefix.
    pub fn has_prefix(&self, depth: usize, fingerprint: u32) -> bool {
        self.prefixes
            .get(depth)
            .is_some_and(|bucket| bucket.binary_search(&fingerprint).is_ok())
    }

    /// Confirm a fingerprint hit against the stored pattern text.
    ///
    /// Always true for an unverified index.
    pub fn confirm(&self, depth: usize, fingerprint: u32, path: &str) -> bool {
        let Some(verified) = &self.verified else {
            return true;
        };
        let Some(bucket) = verified.get(depth) else {
            return false;
        };
        let start = bucket.partition_point(|(f, _)| *f < fingerprint);
        bucket[start..]
            .iter()
            .take_while(|(f, _)| *f == fingerprint)
            .any(|(_, pattern)| pattern == path)
    }
}
