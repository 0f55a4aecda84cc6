//! Member names that always decode exactly.
//!
//! An [`OverrideSet`] is a plain immutable value handed to the walker. The
//! [`OverrideFields`] holder keeps the current set behind a lock and replaces
//! it wholesale on [`OverrideFields::set`]; the walker takes one
//! [`OverrideFields::snapshot`] per parse call, so a traversal sees either the
//! old set or the new one, never a mixture.
//!
//! [`OverrideFields::global`] is the process-wide holder used when a parse
//! call does not bring its own set.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Where an override applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideScope {
    /// Only the named member's own value.
    #[default]
    Member,
    /// The named member's value and every number nested beneath it.
    Subtree,
}

/// An immutable set of member names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    names: HashSet<String>,
}

impl OverrideSet {
    /// Build a set from names. Duplicates collapse.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `name` is overridden.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns true if no name is overridden.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Names in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for OverrideSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A swappable, shareable [`OverrideSet`].
#[derive(Debug, Default)]
pub struct OverrideFields {
    current: RwLock<Arc<OverrideSet>>,
}

impl OverrideFields {
    /// Holder starting with an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide holder.
    pub fn global() -> &'static OverrideFields {
        static GLOBAL: OnceLock<OverrideFields> = OnceLock::new();
        GLOBAL.get_or_init(OverrideFields::new)
    }

    /// Replace the whole set.
    pub fn set<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next = Arc::new(OverrideSet::new(names));
        tracing::debug!(fields = next.len(), "replacing override fields");
        // A poisoned lock still holds a whole Arc; keep using it.
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// The set as of now. Later calls to [`set`](Self::set) do not affect it.
    pub fn snapshot(&self) -> Arc<OverrideSet> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }
}

/// Replace the process-wide override fields.
pub fn set_override_fields<I, S>(names: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    OverrideFields::global().set(names);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_wholesale() {
        let fields = OverrideFields::new();
        fields.set(["a", "b"]);
        fields.set(["c"]);
        let snap = fields.snapshot();
        assert!(snap.contains("c"));
        assert!(!snap.contains("a"));
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn test_snapshot_is_stable() {
        let fields = OverrideFields::new();
        fields.set(["time"]);
        let before = fields.snapshot();
        fields.set(Vec::<String>::new());
        assert!(before.contains("time"));
        assert!(fields.snapshot().is_empty());
    }

    #[test]
    fn test_starts_empty() {
        assert!(OverrideFields::new().snapshot().is_empty());
    }

    #[test]
    fn test_concurrent_readers_see_whole_sets() {
        let fields = Arc::new(OverrideFields::new());
        fields.set(["x1", "x2"]);
        let writer = {
            let fields = Arc::clone(&fields);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    fields.set(["y1", "y2"]);
                    fields.set(["x1", "x2"]);
                }
            })
        };
        for _ in 0..100 {
            let snap = fields.snapshot();
            let xs = snap.contains("x1") && snap.contains("x2");
            let ys = snap.contains("y1") && snap.contains("y2");
            assert!(xs ^ ys);
        }
        writer.join().unwrap();
    }
}
