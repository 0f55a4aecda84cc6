//! Numeric encoding rules.
//!
//! - exact integers are injected as their raw digit sequence, unquoted;
//! - NaN and infinities have no JSON form and become `null`;
//! - a float that is integral and within ±(2^53-1) is written as an integer
//!   (`5.0` becomes `5`);
//! - any other float uses the shortest text that parses back to the same
//!   `f64`. Integral floats beyond the safe range and magnitudes of at least
//!   1e21 or below 1e-6 use exponent form, so re-decoding them never yields
//!   an integer literal.

use super::exact::{ExactInteger, MAX_SAFE_INTEGER};
use crate::json::{writer, JsonValue};

/// Encode a value as JSON text.
///
/// For scalars this is the single token the writer would emit.
pub fn encode_value(value: &JsonValue) -> String {
    writer::stringify(value)
}

/// Append an exact integer token.
pub fn write_exact(value: &ExactInteger, out: &mut String) {
    // Display writes sign and digits only.
    out.push_str(&value.to_string());
}

/// Append a float token.
pub fn write_float(value: f64, out: &mut String) {
    if !value.is_finite() {
        out.push_str("null");
        return;
    }
    if value == 0.0 {
        out.push('0');
        return;
    }

    let magnitude = value.abs();
    let integral = value.fract() == 0.0;
    if integral && magnitude <= MAX_SAFE_INTEGER as f64 {
        out.push_str(&(value as i64).to_string());
    } else if integral || !(1e-6..1e21).contains(&magnitude) {
        out.push_str(&format!("{value:e}"));
    } else {
        out.push_str(&value.to_string());
    }
}

/// Encode a float as a standalone token.
pub fn encode_float(value: f64) -> String {
    let mut out = String::new();
    write_float(value, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_floats() {
        assert_eq!(encode_float(0.0), "0");
        assert_eq!(encode_float(-0.0), "0");
        assert_eq!(encode_float(5.0), "5");
        assert_eq!(encode_float(-5.0), "-5");
        assert_eq!(encode_float(9007199254740991.0), "9007199254740991");
    }

    #[test]
    fn test_fractional_floats() {
        assert_eq!(encode_float(4.9999), "4.9999");
        assert_eq!(encode_float(-0.5), "-0.5");
        assert_eq!(encode_float(2.0625), "2.0625");
    }

    #[test]
    fn test_exponent_forms() {
        assert_eq!(encode_float(1e21), "1e21");
        assert_eq!(encode_float(9007199254740992.0), "9.007199254740992e15");
        assert_eq!(encode_float(1.5e-7), "1.5e-7");
    }

    #[test]
    fn test_non_finite_is_null() {
        assert_eq!(encode_float(f64::NAN), "null");
        assert_eq!(encode_float(f64::INFINITY), "null");
        assert_eq!(encode_float(f64::NEG_INFINITY), "null");
    }

    #[test]
    fn test_exact_is_raw() {
        let mut out = String::new();
        write_exact(&"-2600000000000698546".parse().unwrap(), &mut out);
        assert_eq!(out, "-2600000000000698546");
    }

    #[test]
    fn test_float_text_round_trips() {
        for v in [0.1, 1.0 / 3.0, 123456.789, 2.5e-5, 6.02e23, -7.25e300] {
            let text = encode_float(v);
            assert_eq!(text.parse::<f64>().unwrap(), v, "text {text}");
        }
    }
}
