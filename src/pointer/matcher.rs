//! Depth matching of canonical paths against a [`LevelIndex`].
//!
//! [`matches`] answers the question for a complete canonical path string.
//! The walker instead carries a [`PathCursor`], which holds the running
//! fingerprints of every canonical spelling of the current position that some
//! pattern can still reach, and advances it one segment at a time.

use serde::{Deserialize, Serialize};

use super::compile::{LevelIndex, ROOT, WILDCARD};
use super::fnv1a::Fnv1a;

/// Positions a `*` segment may stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildcardScope {
    /// `*` matches array elements only; object members need their literal name.
    ArraysOnly,
    /// `*` matches array elements and any object member.
    #[default]
    ArraysAndObjects,
}

/// Returns true if `canonical_path` at `depth` names a compiled pattern.
///
/// Depths past the deepest pattern return false without hashing.
pub fn matches(index: &LevelIndex, depth: usize, canonical_path: &str) -> bool {
    match index.max_depth() {
        Some(max) if depth <= max => {}
        _ => return false,
    }
    let fingerprint = index.hasher().hash(canonical_path);
    index.contains(depth, fingerprint) && index.confirm(depth, fingerprint, canonical_path)
}

impl LevelIndex {
    /// Method form of [`matches`].
    pub fn matches(&self, depth: usize, canonical_path: &str) -> bool {
        matches(self, depth, canonical_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Head {
    fingerprint: u32,
    // Only kept for verified indexes.
    path: Option<String>,
}

impl Head {
    fn descend(&self, segment: &str) -> Head {
        Head {
            fingerprint: Fnv1a::update(Fnv1a::update(self.fingerprint, "/"), segment),
            path: self.path.as_ref().map(|p| format!("{p}/{segment}")),
        }
    }
}

/// Running fingerprints of the current traversal position.
///
/// A cursor with no heads is dead: nothing below it can match, and the walker
/// stops hashing for that subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathCursor {
    heads: Vec<Head>,
}

impl PathCursor {
    /// Cursor at the document root (depth 0).
    pub fn root(index: &LevelIndex) -> Self {
        let fingerprint = index.hasher().hash(ROOT);
        if !index.has_prefix(0, fingerprint) {
            return Self::dead();
        }
        Self {
            heads: vec![Head {
                fingerprint,
                path: index.is_verified().then(|| ROOT.to_string()),
            }],
        }
    }

    /// A cursor that can never match.
    pub fn dead() -> Self {
        Self { heads: Vec::new() }
    }

    /// Returns true if no pattern can match at or below this position.
    pub fn is_dead(&self) -> bool {
        self.heads.is_empty()
    }

    /// Advance into an array element now at `depth`.
    pub fn element(&self, index: &LevelIndex, depth: usize) -> Self {
        self.advance(index, depth, &[WILDCARD])
    }

    /// Advance into the object member `key` now at `depth`.
    pub fn member(&self, index: &LevelIndex, depth: usize, key: &str, scope: WildcardScope) -> Self {
        match scope {
            WildcardScope::ArraysOnly => self.advance(index, depth, &[key]),
            WildcardScope::ArraysAndObjects => self.advance(index, depth, &[key, WILDCARD]),
        }
    }

    fn advance(&self, index: &LevelIndex, depth: usize, segments: &[&str]) -> Self {
        if self.is_dead() || index.max_depth().map_or(true, |max| depth > max) {
            return Self::dead();
        }
        let mut heads: Vec<Head> = Vec::with_capacity(self.heads.len() * segments.len());
        for head in &self.heads {
            for segment in segments {
                let next = head.descend(segment);
                if index.has_prefix(depth, next.fingerprint) && !heads.contains(&next) {
                    heads.push(next);
                }
            }
        }
        Self { heads }
    }

    /// Returns true if some head names a pattern terminating at `depth`.
    pub fn matches(&self, index: &LevelIndex, depth: usize) -> bool {
        self.heads.iter().any(|head| {
            index.contains(depth, head.fingerprint)
                && head
                    .path
                    .as_deref()
                    .map_or(true, |path| index.confirm(depth, head.fingerprint, path))
        })
    }

    /// Number of live canonical spellings.
    pub fn width(&self) -> usize {
        self.heads.len()
    }
}
