//! Arbitrary-width integers.
//!
//! An [`ExactInteger`] holds the value of a JSON integer literal as a
//! [`BigInt`]. It never passes through a floating-point value, so any number
//! of digits survives a decode/encode round trip.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::error::{ErrorCode, PrecisionResult};

/// Largest decimal scale expanded into digits. Literals such as `1e100000`
/// degrade to floating point instead of allocating the expansion.
pub const MAX_EXPONENT_SHIFT: i64 = 4096;

/// Largest integer `f64` represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = (1i64 << 53) - 1;

/// A signed integer of unbounded width.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExactInteger(BigInt);

impl ExactInteger {
    /// Zero.
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    /// Decode a JSON number literal exactly.
    ///
    /// Integer literals always succeed. Literals with a fraction or exponent
    /// succeed when their value is integral (`2.50e1` is 25); otherwise the
    /// result is [`ErrorCode::E201_DecodeDegraded`].
    pub fn from_literal(literal: &str) -> PrecisionResult<Self> {
        let degraded = || ErrorCode::E201_DecodeDegraded(literal.to_string());
        match literal_scale(literal) {
            Some(scale) if scale.abs() <= MAX_EXPONENT_SHIFT => {}
            _ => return Err(degraded()),
        }

        let decimal = BigDecimal::from_str(literal).map_err(|_| degraded())?;
        if !decimal.is_integer() {
            return Err(degraded());
        }
        let (value, _) = decimal.with_scale(0).into_bigint_and_exponent();
        Ok(Self(value))
    }

    /// Returns true if the value is below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// The underlying big integer.
    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    /// Returns true if the value is within ±(2^53-1), where `f64` is exact.
    pub fn is_safe(&self) -> bool {
        self.to_i64()
            .is_some_and(|v| (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&v))
    }

    /// Convert to `i64` if it fits.
    pub fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    /// Convert to `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    /// Convert to `i128` if it fits.
    pub fn to_i128(&self) -> Option<i128> {
        self.0.to_i128()
    }

    /// Nearest `f64`. Loses precision beyond 53 bits.
    pub fn to_f64(&self) -> f64 {
        // Decimal text parses with correct rounding; huge values become infinite.
        self.0.to_string().parse().unwrap_or(f64::NAN)
    }
}

/// Decimal scale of a literal: fraction digits minus the exponent. None when
/// the exponent does not fit `i64`.
fn literal_scale(literal: &str) -> Option<i64> {
    let (mantissa, exponent) = match literal.find(['e', 'E']) {
        Some(i) => {
            let exp = &literal[i + 1..];
            (&literal[..i], exp.parse::<i64>().ok()?)
        }
        None => (literal, 0),
    };
    let fraction = mantissa.split_once('.').map_or(0, |(_, frac)| frac.len());
    i64::try_from(fraction).ok()?.checked_sub(exponent)
}

impl From<BigInt> for ExactInteger {
    fn from(value: BigInt) -> Self {
        Self(value)
    }
}

impl FromStr for ExactInteger {
    type Err = ErrorCode;

    /// Parse a plain integer literal: optional `-`, then digits.
    fn from_str(s: &str) -> PrecisionResult<Self> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ErrorCode::E106_InvalidNumber);
        }
        s.parse::<BigInt>()
            .map(Self)
            .map_err(|_| ErrorCode::E106_InvalidNumber)
    }
}

impl fmt::Display for ExactInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

macro_rules! impl_from_native {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ExactInteger {
                fn from(value: $t) -> Self {
                    Self(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_native!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);
