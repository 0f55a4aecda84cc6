//! Pointer engine conformance tests.
//!
//! Covers fingerprinting, pattern compilation into depth buckets and depth
//! matching, both through the string API and through the walker.

use json_precision::json::{parse_with_pointer, JsonValue, Limits, Parser};
use json_precision::pointer::{
    matches, segment_count, Fnv1a, LevelIndex, PatternSet, WildcardScope,
};
use json_precision::precision::{DecodeOptions, OverrideSet};
use proptest::prelude::*;
use std::sync::Arc;

fn compile(patterns: &[&str]) -> LevelIndex {
    LevelIndex::compile(&PatternSet::new(patterns.iter().copied())).unwrap()
}

// ============================================================================
// Hasher
// ============================================================================

#[test]
fn hash_known_vectors() {
    let hasher = Fnv1a::new();
    assert_eq!(hasher.hash(""), 0x811c_9dc5);
    assert_eq!(hasher.hash("a"), 0xe40c_292c);
    assert_eq!(hasher.hash("foobar"), 0xbf9c_f968);
}

#[test]
fn hash_is_incremental_over_segments() {
    let hasher = Fnv1a::new();
    let running = Fnv1a::update(Fnv1a::update(hasher.hash("#"), "/items"), "/*");
    assert_eq!(running, hasher.hash("#/items/*"));
}

// ============================================================================
// Compiler
// ============================================================================

#[test]
fn compile_buckets_by_segment_count() {
    let index = compile(&["#/a/b", "#/c", "#/a/b"]);
    assert_eq!(index.max_depth(), Some(2));
    assert!(index.levels()[0].is_empty(), "bucket 0 exists but holds nothing");
    assert_eq!(index.levels()[1], vec![Fnv1a::new().hash("#/c")]);
    assert_eq!(index.levels()[2].len(), 1, "duplicates collapse");
}

#[test]
fn compile_empty_pattern_set() {
    let index = compile(&[]);
    assert!(index.is_empty());
    assert_eq!(index.max_depth(), None);
    assert!(!matches(&index, 0, "#"));
}

#[test]
fn compile_rejects_malformed_patterns() {
    for bad in ["", "a/b", "#a", "#/", "#/a//b", "#/a/"] {
        let err = LevelIndex::compile(&PatternSet::new([bad])).unwrap_err();
        assert_eq!(err.code(), 200, "pattern {bad:?} should be rejected");
    }
}

#[test]
fn compile_rejects_whole_set_on_one_bad_pattern() {
    let result = LevelIndex::compile(&PatternSet::new(["#/ok", "bad"]));
    assert!(result.is_err());
}

#[test]
fn compile_from_json_requires_array_of_strings() {
    let good = JsonValue::Array(vec![JsonValue::from("#/id")]);
    assert!(LevelIndex::from_json(&good).is_ok());

    let not_array = JsonValue::from("#/id");
    assert_eq!(LevelIndex::from_json(&not_array).unwrap_err().code(), 200);

    let mixed = JsonValue::Array(vec![JsonValue::from("#/id"), JsonValue::Bool(true)]);
    assert_eq!(LevelIndex::from_json(&mixed).unwrap_err().code(), 200);
}

#[test]
fn segment_counts() {
    assert_eq!(segment_count("#").unwrap(), 0);
    assert_eq!(segment_count("#/a").unwrap(), 1);
    assert_eq!(segment_count("#/items/*/id").unwrap(), 3);
}

// ============================================================================
// Matcher: scenarios
// ============================================================================

#[test]
fn scenario_a_literal_and_wildcard_patterns() {
    let index = compile(&["#/id", "#/items/*/id"]);
    assert!(matches(&index, 3, "#/items/*/id"));
    assert!(!matches(&index, 3, "#/items/*/name"));
    assert!(matches(&index, 1, "#/id"));
}

#[test]
fn scenario_d_root_pattern() {
    let index = compile(&["#"]);
    assert!(matches(&index, 0, "#"));
    assert!(!matches(&index, 1, "#/a"));
    assert!(!matches(&index, 2, "#/*/b"));

    let value = parse_with_pointer(b"18446744073709551617", &index).unwrap();
    assert!(value.is_exact());
    let value = parse_with_pointer(b"[18446744073709551617]", &index).unwrap();
    assert!(!value.get_index(0).unwrap().is_exact());
}

#[test]
fn match_depth_beyond_index_is_false() {
    let index = compile(&["#/a"]);
    assert!(!matches(&index, 2, "#/a"));
    assert!(!matches(&index, 7, "#/a/b/c/d/e/f/g"));
}

#[test]
fn match_requires_depth_agreement() {
    let index = compile(&["#/a/b"]);
    assert!(matches(&index, 2, "#/a/b"));
    assert!(!matches(&index, 1, "#/a/b"));
}

#[test]
fn verified_index_confirms_hits() {
    let patterns = PatternSet::new(["#/id"]);
    let index = LevelIndex::compile_verified(&patterns).unwrap();
    let fingerprint = Fnv1a::new().hash("#/id");
    assert!(index.confirm(1, fingerprint, "#/id"));
    assert!(!index.confirm(1, fingerprint, "#/other"), "text mismatch is rejected");
    assert!(matches(&index, 1, "#/id"));
}

#[test]
fn walker_verified_index_rejects_fingerprint_collision() {
    // Both paths hash to 0x6c126381.
    let hasher = Fnv1a::new();
    assert_eq!(hasher.hash("#/d624ab3c9d51deef"), hasher.hash("#/7a9517aefb000fac"));

    let patterns = PatternSet::new(["#/d624ab3c9d51deef"]);
    let doc = br#"{"d624ab3c9d51deef": 1, "7a9517aefb000fac": 12345678901234567891}"#;

    let plain = LevelIndex::compile(&patterns).unwrap();
    let value = parse_with_pointer(doc, &plain).unwrap();
    assert!(value.get("d624ab3c9d51deef").unwrap().is_exact());
    assert!(
        value.get("7a9517aefb000fac").unwrap().is_exact(),
        "fingerprint-only index accepts the colliding path"
    );

    let verified = LevelIndex::compile_verified(&patterns).unwrap();
    let value = parse_with_pointer(doc, &verified).unwrap();
    assert!(value.get("d624ab3c9d51deef").unwrap().is_exact());
    assert_eq!(
        value.get("7a9517aefb000fac"),
        Some(&JsonValue::Number(12345678901234567891u64 as f64))
    );
}

#[test]
fn custom_seed_is_remembered() {
    let patterns = PatternSet::new(["#/id"]);
    let index = LevelIndex::compile_with(&patterns, Fnv1a::with_seed(42)).unwrap();
    assert_eq!(index.hasher().seed(), 42);
    assert!(matches(&index, 1, "#/id"));
    let value = parse_with_pointer(br#"{"id": 12345678901234567890}"#, &index).unwrap();
    assert!(value.get("id").unwrap().is_exact());
}

// ============================================================================
// Matcher: walker integration
// ============================================================================

#[test]
fn walker_wildcard_over_objects_follows_scope() {
    let index = compile(&["#/users/*/id"]);
    let doc = br#"{"users": {"alice": {"id": 9007199254740993}}}"#;

    let value = parse_with_pointer(doc, &index).unwrap();
    let id = value.get("users").and_then(|u| u.get("alice")).and_then(|a| a.get("id"));
    assert!(id.unwrap().is_exact(), "default scope reaches object members");

    let options = DecodeOptions {
        wildcard: WildcardScope::ArraysOnly,
        ..DecodeOptions::default()
    };
    let value = Parser::new(doc, Limits::default())
        .unwrap()
        .with_pointer(&index)
        .with_overrides(Arc::new(OverrideSet::default()))
        .with_options(options)
        .parse()
        .unwrap();
    let id = value.get("users").and_then(|u| u.get("alice")).and_then(|a| a.get("id"));
    assert!(!id.unwrap().is_exact(), "arrays-only scope skips object members");
}

#[test]
fn walker_wildcard_and_literal_overlap() {
    let index = compile(&["#/a/*", "#/a/x"]);
    let value = parse_with_pointer(br#"{"a": {"x": 1, "y": 2}, "b": {"x": 3}}"#, &index).unwrap();
    let a = value.get("a").unwrap();
    assert!(a.get("x").unwrap().is_exact());
    assert!(a.get("y").unwrap().is_exact());
    assert!(!value.get("b").and_then(|b| b.get("x")).unwrap().is_exact());
}

// ============================================================================
// Properties
// ============================================================================

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![Just("*".to_string()), "[a-z]{1,6}", "[0-9]{1,3}"]
}

fn pattern() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 0..6).prop_map(|segments| {
        let mut pattern = String::from("#");
        for s in segments {
            pattern.push('/');
            pattern.push_str(&s);
        }
        pattern
    })
}

proptest! {
    #[test]
    fn prop_buckets_sorted_and_depth_exact(patterns in prop::collection::vec(pattern(), 0..20)) {
        let index = LevelIndex::compile(&PatternSet::new(patterns.iter().cloned())).unwrap();
        for bucket in index.levels() {
            prop_assert!(bucket.windows(2).all(|w| w[0] < w[1]));
        }
        for p in &patterns {
            let depth = segment_count(p).unwrap();
            prop_assert!(index.levels()[depth].contains(&Fnv1a::new().hash(p)));
            prop_assert!(matches(&index, depth, p));
        }
    }

    #[test]
    fn prop_compile_is_deterministic(patterns in prop::collection::vec(pattern(), 0..20)) {
        let set = PatternSet::new(patterns.iter().cloned());
        let mut reversed = patterns.clone();
        reversed.reverse();
        let a = LevelIndex::compile(&set).unwrap();
        let b = LevelIndex::compile(&PatternSet::new(reversed)).unwrap();
        prop_assert_eq!(a.levels(), b.levels());
    }

    #[test]
    fn prop_depth_bound(patterns in prop::collection::vec(pattern(), 0..10), path in pattern(), extra in 1usize..4) {
        let index = LevelIndex::compile(&PatternSet::new(patterns)).unwrap();
        let beyond = index.max_depth().map_or(0, |d| d + extra);
        prop_assert!(!matches(&index, beyond, &path));
    }

    #[test]
    fn prop_hash_is_pure(text in ".{0,32}") {
        let hasher = Fnv1a::new();
        prop_assert_eq!(hasher.hash(&text), hasher.hash(&text));
        let units: Vec<u16> = text.encode_utf16().collect();
        prop_assert_eq!(hasher.hash(&text), hasher.hash_utf16(&units));
    }
}
