//! Precision value contract conformance tests.
//!
//! Covers exact decoding at flagged positions, override fields, number
//! modes and lossless re-serialization.

use json_precision::json::{parse, parse_with_pointer, stringify, JsonValue, Limits, Parser};
use json_precision::pointer::{LevelIndex, PatternSet};
use json_precision::precision::{
    decode_numeric, encode_value, set_override_fields, DecodeOptions, ExactInteger, NumberMode,
    OverrideScope, OverrideSet, MAX_SAFE_INTEGER,
};
use proptest::prelude::*;
use std::sync::Arc;

fn exact(s: &str) -> JsonValue {
    JsonValue::Integer(s.parse::<ExactInteger>().unwrap())
}

fn parse_explicit(input: &[u8], overrides: &[&str], options: DecodeOptions) -> JsonValue {
    Parser::new(input, Limits::default())
        .unwrap()
        .with_overrides(Arc::new(OverrideSet::new(overrides.iter().copied())))
        .with_options(options)
        .parse()
        .unwrap()
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn decode_flagged_literals_are_exact() {
    assert_eq!(
        decode_numeric("2600000000000698546", true),
        exact("2600000000000698546")
    );
    assert_eq!(decode_numeric("-0", true), exact("0"));
    assert_eq!(decode_numeric("1.5e3", true), exact("1500"));
    assert_eq!(decode_numeric("2.0", true), exact("2"));
}

#[test]
fn decode_non_integral_flagged_literal_degrades() {
    assert_eq!(decode_numeric("2.75", true), JsonValue::Number(2.75));
    assert_eq!(decode_numeric("1e-2", true), JsonValue::Number(0.01));
}

#[test]
fn decode_unflagged_literals_are_float() {
    assert_eq!(decode_numeric("2600000000000698546", false).as_exact(), None);
    assert_eq!(decode_numeric("7", false), JsonValue::Number(7.0));
}

#[test]
fn non_numeric_scalars_unaffected_by_flags() {
    let index = LevelIndex::compile(&PatternSet::new(["#/*"])).unwrap();
    let value =
        parse_with_pointer(br#"{"a": "12345678901234567890", "b": true, "c": null}"#, &index)
            .unwrap();
    assert_eq!(value.get("a"), Some(&JsonValue::from("12345678901234567890")));
    assert_eq!(value.get("b"), Some(&JsonValue::Bool(true)));
    assert_eq!(value.get("c"), Some(&JsonValue::Null));
}

// ============================================================================
// Override fields
// ============================================================================

#[test]
fn scenario_b_global_override_fields() {
    set_override_fields(["time"]);
    let doc = br#"{"time": 1700000000000000001, "events": [{"time": 2600000000000698546, "n": 1}]}"#;
    let value = parse(doc).unwrap();
    set_override_fields(Vec::<String>::new());

    assert_eq!(value.get("time"), Some(&exact("1700000000000000001")));
    let event = value.get("events").and_then(|e| e.get_index(0)).unwrap();
    assert_eq!(event.get("time"), Some(&exact("2600000000000698546")));
    assert_eq!(event.get("n"), Some(&JsonValue::Number(1.0)));
}

#[test]
fn override_member_scope_covers_only_own_value() {
    let value = parse_explicit(
        br#"{"ts": [1, 2], "x": {"ts": 3}}"#,
        &["ts"],
        DecodeOptions::default(),
    );
    assert!(!value.get("ts").and_then(|t| t.get_index(0)).unwrap().is_exact());
    assert_eq!(value.get("x").and_then(|x| x.get("ts")), Some(&exact("3")));
}

#[test]
fn override_subtree_scope_covers_descendants() {
    let options = DecodeOptions {
        override_scope: OverrideScope::Subtree,
        ..DecodeOptions::default()
    };
    let value = parse_explicit(br#"{"ts": [1, {"deep": [2]}], "y": 3}"#, &["ts"], options);
    let ts = value.get("ts").unwrap();
    assert_eq!(ts.get_index(0), Some(&exact("1")));
    let deep = ts.get_index(1).and_then(|o| o.get("deep")).unwrap();
    assert_eq!(deep.get_index(0), Some(&exact("2")));
    assert_eq!(value.get("y"), Some(&JsonValue::Number(3.0)));
}

// ============================================================================
// Number modes
// ============================================================================

#[test]
fn mixed_mode_promotes_only_unsafe_integers() {
    let options = DecodeOptions {
        number_mode: NumberMode::Mixed,
        ..DecodeOptions::default()
    };
    let value = parse_explicit(b"[9007199254740991, 9007199254740992, -9007199254740993]", &[], options);
    assert_eq!(value.get_index(0), Some(&JsonValue::Number(9007199254740991.0)));
    assert_eq!(value.get_index(1), Some(&exact("9007199254740992")));
    assert_eq!(value.get_index(2), Some(&exact("-9007199254740993")));
}

#[test]
fn exact_mode_promotes_every_integral_literal() {
    let options = DecodeOptions {
        number_mode: NumberMode::Exact,
        ..DecodeOptions::default()
    };
    let value = parse_explicit(b"[0, 1.0, 1e2, 1.5]", &[], options);
    assert_eq!(value.get_index(0), Some(&exact("0")));
    assert_eq!(value.get_index(1), Some(&exact("1")));
    assert_eq!(value.get_index(2), Some(&exact("100")));
    assert_eq!(value.get_index(3), Some(&JsonValue::Number(1.5)));
}

#[test]
fn exact_mode_output_is_stable() {
    let options = DecodeOptions {
        number_mode: NumberMode::Exact,
        ..DecodeOptions::default()
    };
    let first = stringify(&parse_explicit(b"[1.0, 1e2, 2.5, 123456789012345678901.5]", &[], options));
    assert_eq!(first, "[1,100,2.5,123456789012345680000]");
    let second = stringify(&parse_explicit(first.as_bytes(), &[], options));
    assert_eq!(first, second);
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn scenario_c_encode_value_set() {
    let values = [
        JsonValue::Number(0.0),
        JsonValue::Number(5.0),
        JsonValue::Number(4.9999),
        JsonValue::Number(MAX_SAFE_INTEGER as f64),
        exact("2600000000000698546"),
        JsonValue::Number(f64::NAN),
    ];
    let encoded: Vec<String> = values.iter().map(encode_value).collect();
    assert_eq!(
        encoded,
        ["0", "5", "4.9999", "9007199254740991", "2600000000000698546", "null"]
    );
}

#[test]
fn encode_keeps_floats_recognizable() {
    // Integral floats beyond the safe range must not come back as integers.
    let text = encode_value(&JsonValue::Number(1e300));
    assert!(text.contains('e'), "got {text}");
    assert_eq!(decode_numeric(&text, false), JsonValue::Number(1e300));
}

#[test]
fn document_round_trip_preserves_digits() {
    let index = LevelIndex::compile(&PatternSet::new(["#/orders/*/id", "#/total"])).unwrap();
    let doc = br#"{"orders": [{"id": 123456789012345678901234567890, "qty": 2.5}], "total": -9223372036854775809}"#;
    let value = parse_with_pointer(doc, &index).unwrap();
    assert_eq!(
        stringify(&value),
        r#"{"orders":[{"id":123456789012345678901234567890,"qty":2.5}],"total":-9223372036854775809}"#
    );
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_exact_round_trip(n in any::<i128>()) {
        let value = JsonValue::Integer(ExactInteger::from(n));
        prop_assert_eq!(decode_numeric(&encode_value(&value), true), value);
    }

    #[test]
    fn prop_digit_string_round_trip(negative in any::<bool>(), digits in "[1-9][0-9]{0,60}") {
        let literal = if negative { format!("-{digits}") } else { digits };
        let value = decode_numeric(&literal, true);
        prop_assert_eq!(encode_value(&value), literal);
    }

    #[test]
    fn prop_float_round_trip(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
        let value = JsonValue::Number(x);
        prop_assert_eq!(decode_numeric(&encode_value(&value), false), value);
    }

    #[test]
    fn prop_stringify_parse_is_idempotent(
        mode in prop_oneof![
            Just(NumberMode::Float),
            Just(NumberMode::Mixed),
            Just(NumberMode::Exact),
        ],
        ids in prop::collection::vec(any::<i64>(), 0..8),
        ratios in prop::collection::vec(-1e6f64..1e6, 0..8),
        forms in prop::collection::vec(
            (0u32..100_000, prop_oneof![Just(".0"), Just("e2"), Just("E+0"), Just(".50"), Just("e-1")]),
            0..8,
        ),
    ) {
        let index = LevelIndex::compile(&PatternSet::new(["#/ids/*"])).unwrap();
        let options = DecodeOptions {
            number_mode: mode,
            ..DecodeOptions::default()
        };
        let decode = |input: &[u8]| {
            Parser::new(input, Limits::default())
                .unwrap()
                .with_pointer(&index)
                .with_options(options)
                .parse()
                .unwrap()
        };
        let ids: Vec<String> = ids.iter().map(i64::to_string).collect();
        let ratios: Vec<String> = ratios.iter().map(|r| r.to_string()).collect();
        let forms: Vec<String> = forms.iter().map(|(n, suffix)| format!("{n}{suffix}")).collect();
        let doc = format!(
            r#"{{"ids": [{}], "ratios": [{}], "forms": [{}]}}"#,
            ids.join(","),
            ratios.join(","),
            forms.join(",")
        );

        let first = stringify(&decode(doc.as_bytes()));
        let second = stringify(&decode(first.as_bytes()));
        prop_assert_eq!(first, second);
    }
}
