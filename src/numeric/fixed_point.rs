// ============================================================================
// Fixed-Point Integer Encoding
// On-chain integer values and exact decimal scaling
// ============================================================================

use super::errors::{NumericError, NumericResult};
use bnum::types::{I256, U256};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Integer encoding of a fixed-point quantity, as passed to contract calls.
///
/// Stores `value × 10^k` for whatever scale `k` the producer used (10^18 for
/// value amounts, 10^16 for percentage ratios, 1 for seconds). The scale is
/// not carried by the type: the encoding is exactly the integer the ledger
/// expects.
///
/// 256 bits wide so any uint256 the pools return can be read back. Signed so
/// that a malformed interest range (max below min) surfaces as a negative
/// rate instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct FixedPoint(I256);

/// Rounding applied when a scaled value has a fractional remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Drop the remainder (toward zero)
    Truncate,
    /// Round half away from zero
    HalfUp,
}

/// Compute 10^n, failing when it leaves the 256-bit range.
#[inline]
pub fn pow10(n: u32) -> NumericResult<I256> {
    I256::from(10u8).checked_pow(n).ok_or(NumericError::Overflow)
}

/// Divide `numerator` by `denominator` with the given rounding.
fn div_rounded(numerator: I256, denominator: I256, rounding: Rounding) -> NumericResult<I256> {
    if denominator.is_zero() {
        return Err(NumericError::DivisionByZero);
    }

    let quotient = numerator
        .checked_div(denominator)
        .ok_or(NumericError::Overflow)?;
    let remainder = numerator
        .checked_rem(denominator)
        .ok_or(NumericError::Overflow)?;

    match rounding {
        Rounding::Truncate => Ok(quotient),
        Rounding::HalfUp => {
            let rem: U256 = remainder.unsigned_abs();
            let den: U256 = denominator.unsigned_abs();
            // rem >= den - rem  <=>  2 * rem >= den, without overflow
            let rounds_up = !rem.is_zero()
                && den.checked_sub(rem).is_some_and(|rest| rem >= rest);
            if !rounds_up {
                return Ok(quotient);
            }
            let step = if numerator.is_negative() == denominator.is_negative() {
                I256::ONE
            } else {
                I256::ONE.checked_neg().ok_or(NumericError::Overflow)?
            };
            quotient.checked_add(step).ok_or(NumericError::Overflow)
        },
    }
}

/// Compute `value × 10^decimals / divisor` exactly on the decimal's mantissa.
///
/// No floating point is involved: a `Decimal` is `mantissa / 10^scale`, so the
/// whole expression reduces to one integer division in 256 bits.
///
/// # Errors
/// - `DivisionByZero` if `divisor` is zero
/// - `Overflow` if the scaled value exceeds the 256-bit range
pub fn scale(
    value: Decimal,
    decimals: u32,
    divisor: u128,
    rounding: Rounding,
) -> NumericResult<FixedPoint> {
    if divisor == 0 {
        return Err(NumericError::DivisionByZero);
    }
    let divisor = I256::from(divisor);

    let mantissa = I256::from(value.mantissa());
    let value_scale = value.scale();

    let (numerator, denominator) = if decimals >= value_scale {
        let factor = pow10(decimals - value_scale)?;
        let numerator = mantissa
            .checked_mul(factor)
            .ok_or(NumericError::Overflow)?;
        (numerator, divisor)
    } else {
        let denominator = pow10(value_scale - decimals)?
            .checked_mul(divisor)
            .ok_or(NumericError::Overflow)?;
        (mantissa, denominator)
    };

    div_rounded(numerator, denominator, rounding).map(FixedPoint)
}

impl FixedPoint {
    /// Zero value
    pub const ZERO: Self = Self(I256::ZERO);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from an already-scaled integer.
    #[inline]
    pub fn from_raw(raw: i128) -> Self {
        Self(I256::from(raw))
    }

    /// Create from a small non-negative integer, usable in constants.
    #[inline]
    pub const fn from_u64(raw: u64) -> Self {
        Self(I256::from_bits(U256::from_digit(raw)))
    }

    /// Wrap a full-width 256-bit encoding.
    #[inline]
    pub const fn from_i256(raw: I256) -> Self {
        Self(raw)
    }

    /// Scale a decimal by `10^decimals`, truncating any fractional remainder.
    #[inline]
    pub fn from_decimal(value: Decimal, decimals: u32) -> NumericResult<Self> {
        scale(value, decimals, 1, Rounding::Truncate)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw integer encoding.
    #[inline]
    pub const fn raw_value(self) -> I256 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0.is_negative()
    }

    /// Interpret the encoding as `decimals` fractional digits.
    ///
    /// # Errors
    /// Returns `Overflow` if the integer does not fit a 96-bit decimal
    /// mantissa. Reduce the scale with [`FixedPoint::rescale`] first when
    /// only a few display digits are needed.
    pub fn to_decimal(self, decimals: u32) -> NumericResult<Decimal> {
        let raw = i128::try_from(self.0).map_err(|_| NumericError::Overflow)?;
        Decimal::try_from_i128_with_scale(raw, decimals).map_err(|_| NumericError::Overflow)
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Checked subtraction. The result may be negative.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Checked multiplication of two encodings. Scales add up.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_mul(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// `self × numerator / denominator` with a single rounding step.
    pub fn mul_div(
        self,
        numerator: Self,
        denominator: Self,
        rounding: Rounding,
    ) -> NumericResult<Self> {
        let product = self
            .0
            .checked_mul(numerator.0)
            .ok_or(NumericError::Overflow)?;
        div_rounded(product, denominator.0, rounding).map(Self)
    }

    /// Move the encoding from `from` fractional digits to `to`.
    pub fn rescale(self, from: u32, to: u32, rounding: Rounding) -> NumericResult<Self> {
        if to >= from {
            self.0
                .checked_mul(pow10(to - from)?)
                .map(Self)
                .ok_or(NumericError::Overflow)
        } else {
            div_rounded(self.0, pow10(from - to)?, rounding).map(Self)
        }
    }

    /// Multiply the encoding by a decimal factor, keeping the same scale.
    ///
    /// `FixedPoint(1000).mul_decimal(1.05, Truncate) == FixedPoint(1050)`
    pub fn mul_decimal(self, factor: Decimal, rounding: Rounding) -> NumericResult<Self> {
        let numerator = self
            .0
            .checked_mul(I256::from(factor.mantissa()))
            .ok_or(NumericError::Overflow)?;
        let denominator = pow10(factor.scale())?;
        div_rounded(numerator, denominator, rounding).map(Self)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl fmt::Display for FixedPoint {
    /// Base-10 integer string with no fractional part.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FixedPoint {
    type Err = NumericError;

    /// Parse an integer encoding such as `"1500000000000000000"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NumericError::InvalidInput);
        }
        s.parse::<I256>()
            .map(Self)
            .map_err(|_| NumericError::InvalidInput)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FixedPoint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Integer strings survive JSON consumers limited to 53-bit numbers
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FixedPoint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
