//! Numeric decoding rules.

use serde::{Deserialize, Serialize};

use super::encode::encode_float;
use super::exact::ExactInteger;
use crate::json::JsonValue;

/// How numbers decode when no pattern or override flags them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberMode {
    /// Every unflagged number becomes an `f64`.
    #[default]
    Float,
    /// Integer literals outside ±(2^53-1) become exact; everything else `f64`.
    Mixed,
    /// Every number with an integral value becomes exact, including
    /// `1.0` and `1e2`.
    Exact,
}

/// Decode a number literal the walker has already validated.
///
/// A flagged literal becomes [`JsonValue::Integer`] when it has an integral
/// value. A flagged literal such as `3.14` degrades to [`JsonValue::Number`];
/// that is logged, never reported.
pub fn decode_numeric(literal: &str, flagged: bool) -> JsonValue {
    decode_numeric_with(literal, flagged, NumberMode::Float)
}

/// [`decode_numeric`] with an explicit mode for unflagged literals.
pub fn decode_numeric_with(literal: &str, flagged: bool, mode: NumberMode) -> JsonValue {
    if flagged {
        return match ExactInteger::from_literal(literal) {
            Ok(exact) => JsonValue::Integer(exact),
            Err(err) => {
                tracing::debug!(%literal, error = %err, "precision decode degraded to float");
                float(literal)
            }
        };
    }

    match mode {
        NumberMode::Float => float(literal),
        NumberMode::Mixed if !is_integer_literal(literal) => float(literal),
        NumberMode::Mixed => match literal.parse::<ExactInteger>() {
            Ok(exact) if !exact.is_safe() => JsonValue::Integer(exact),
            _ => float(literal),
        },
        NumberMode::Exact => exact_or_float(literal),
    }
}

/// Exact mode: every number with an integral value is exact. A non-integral
/// literal that rounds to an integral `f64` takes that value, so its written
/// form decodes the same way again.
fn exact_or_float(literal: &str) -> JsonValue {
    if let Ok(exact) = ExactInteger::from_literal(literal) {
        return JsonValue::Integer(exact);
    }
    match float(literal) {
        JsonValue::Number(v) if v.is_finite() && v.fract() == 0.0 => {
            match ExactInteger::from_literal(&encode_float(v)) {
                Ok(exact) => JsonValue::Integer(exact),
                Err(_) => JsonValue::Number(v),
            }
        }
        other => other,
    }
}

/// Returns true for literals without fraction or exponent.
pub fn is_integer_literal(literal: &str) -> bool {
    !literal.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
}

fn float(literal: &str) -> JsonValue {
    // Overflowing literals such as 1e400 parse to infinity.
    JsonValue::Number(literal.parse().unwrap_or(f64::NAN))
}
