// ============================================================================
// Scaling Conversions
// Human-entered quantities to ledger integer encodings
// ============================================================================

use crate::domain::constants::{
    DEFAULT_REPAY_BUFFER_PERCENT, GAS_LIMIT_OVERRIDE, RATIO_DECIMALS, SECONDS_IN_A_DAY,
    SECONDS_IN_A_YEAR, WEI_DECIMALS,
};
use crate::numeric::{scale, FixedPoint, NumericError, NumericResult, Rounding};
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn ensure_non_negative(value: Decimal) -> NumericResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(NumericError::NegativeInput)
    } else {
        Ok(value)
    }
}

/// Scale a value by 10^18, truncating anything below one wei.
///
/// Used for prices, deposit and withdraw amounts, and daily borrow caps.
///
/// ```
/// use nft_lending_units::conversions::scale_to_wei;
/// use rust_decimal::Decimal;
///
/// let wei = scale_to_wei(Decimal::new(15, 1)).unwrap();
/// assert_eq!(wei.to_string(), "1500000000000000000");
/// ```
pub fn scale_to_wei(value: Decimal) -> NumericResult<FixedPoint> {
    scale_to_decimals(value, WEI_DECIMALS)
}

/// Scale a value by 10^decimals, truncating to an integer.
pub fn scale_to_decimals(value: Decimal, decimals: u32) -> NumericResult<FixedPoint> {
    let value = ensure_non_negative(value)?;
    let scaled = scale(value, decimals, 1, Rounding::Truncate)?;
    tracing::trace!(%value, decimals, %scaled, "scaled to fixed point");
    Ok(scaled)
}

/// Convert a 0-100 percentage into a ratio where 100% = 10^18.
///
/// # Errors
/// `OutOfRange` for percentages above 100, `NegativeInput` below 0.
pub fn percentage_to_ratio(percent: Decimal) -> NumericResult<FixedPoint> {
    let percent = ensure_non_negative(percent)?;
    if percent > Decimal::ONE_HUNDRED {
        return Err(NumericError::OutOfRange("percentage"));
    }
    scale(percent, RATIO_DECIMALS, 1, Rounding::Truncate)
}

/// Convert a day count into seconds.
///
/// Fractional days are accepted (form inputs allow them) and the result is
/// truncated to whole seconds.
pub fn days_to_seconds(days: Decimal) -> NumericResult<FixedPoint> {
    let days = ensure_non_negative(days)?;
    let seconds = days
        .checked_mul(Decimal::from(SECONDS_IN_A_DAY))
        .ok_or(NumericError::Overflow)?;
    scale(seconds, 0, 1, Rounding::Truncate)
}

/// Convert an annual interest percentage into the per-second accrual rate
/// the pools use: `(percent / 100) × 10^18 / SECONDS_IN_A_YEAR`.
pub fn annual_percent_to_per_second_rate(percent: Decimal) -> NumericResult<FixedPoint> {
    let percent = ensure_non_negative(percent)?;
    // percent / 100 × 10^18 == percent × 10^16
    scale(
        percent,
        RATIO_DECIMALS,
        u128::from(SECONDS_IN_A_YEAR),
        Rounding::Truncate,
    )
}

/// Interest arguments for pool creation and `changeInterest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InterestRateArgs {
    /// Per-second rate added on top of the minimum as utilisation rises.
    /// Negative only when the caller passed max < min.
    pub variable_rate_per_second: FixedPoint,
    /// Per-second rate at zero utilisation
    pub min_rate_per_second: FixedPoint,
}

/// Turn a min/max annual interest range into contract arguments.
///
/// When the form flagged the range as invalid both rates are zero. A max
/// below min is not rejected here: the negative variable rate is passed
/// through for the caller's validation to catch.
pub fn interest_range_to_contract_args(
    min_percent: Decimal,
    max_percent: Decimal,
    is_invalid: bool,
) -> NumericResult<InterestRateArgs> {
    if is_invalid {
        return Ok(InterestRateArgs::default());
    }

    let max_rate = annual_percent_to_per_second_rate(max_percent)?;
    let min_rate = annual_percent_to_per_second_rate(min_percent)?;

    if max_rate < min_rate {
        tracing::debug!(%min_percent, %max_percent, "interest range inverted");
    }

    Ok(InterestRateArgs {
        variable_rate_per_second: max_rate.checked_sub(min_rate)?,
        min_rate_per_second: min_rate,
    })
}

/// Add a percentage buffer to a repayment, truncated to whole wei.
pub fn payable_with_margin(
    total_to_repay: FixedPoint,
    buffer_percent: Decimal,
) -> NumericResult<FixedPoint> {
    if total_to_repay.is_negative() {
        return Err(NumericError::NegativeInput);
    }
    let multiplier = Decimal::ONE + ensure_non_negative(buffer_percent)? / Decimal::ONE_HUNDRED;
    total_to_repay.mul_decimal(multiplier, Rounding::Truncate)
}

/// Add the default 5% buffer covering interest accrued between reading the
/// debt and executing the repayment.
pub fn payable_with_buffer(total_to_repay: FixedPoint) -> NumericResult<FixedPoint> {
    payable_with_margin(total_to_repay, Decimal::from(DEFAULT_REPAY_BUFFER_PERCENT))
}

/// The static gas-price override, 0.0005 × 10^9. Only attached to calls when
/// a config opts in.
#[inline]
pub const fn gas_limit_override() -> FixedPoint {
    GAS_LIMIT_OVERRIDE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_scale_to_wei() {
        assert_eq!(scale_to_wei(dec("1")).unwrap().to_string(), "1000000000000000000");
        assert_eq!(scale_to_wei(dec("0.25")).unwrap().to_string(), "250000000000000000");
        assert_eq!(scale_to_wei(Decimal::ZERO).unwrap(), FixedPoint::ZERO);
    }

    #[test]
    fn test_scale_to_wei_truncates_below_one_wei() {
        let x = scale_to_wei(dec("0.0000000000000000019")).unwrap();
        assert_eq!(x.to_string(), "1");
    }

    #[test]
    fn test_scale_to_wei_past_i128() {
        // 10^21 whole units is 10^39 wei
        let wei = scale_to_wei(dec("1000000000000000000000")).unwrap();
        assert_eq!(wei.to_string(), format!("1{}", "0".repeat(39)));

        let largest = scale_to_wei(Decimal::MAX).unwrap();
        assert_eq!(largest.to_string(), format!("{}{}", Decimal::MAX, "0".repeat(18)));
    }

    #[test]
    fn test_scale_to_wei_rejects_negative() {
        assert_eq!(scale_to_wei(dec("-1")), Err(NumericError::NegativeInput));
    }

    #[test]
    fn test_scale_to_decimals() {
        assert_eq!(scale_to_decimals(dec("12.5"), 6).unwrap().to_string(), "12500000");
    }

    #[test]
    fn test_percentage_to_ratio() {
        assert_eq!(
            percentage_to_ratio(dec("50")).unwrap().to_string(),
            "500000000000000000"
        );
        assert_eq!(
            percentage_to_ratio(dec("100")).unwrap().to_string(),
            "1000000000000000000"
        );
        assert_eq!(
            percentage_to_ratio(dec("33.5")).unwrap().to_string(),
            "335000000000000000"
        );
    }

    #[test]
    fn test_percentage_to_ratio_range() {
        assert_eq!(
            percentage_to_ratio(dec("100.01")),
            Err(NumericError::OutOfRange("percentage"))
        );
        assert_eq!(percentage_to_ratio(dec("-5")), Err(NumericError::NegativeInput));
    }

    #[test]
    fn test_days_to_seconds() {
        assert_eq!(days_to_seconds(dec("7")).unwrap().to_string(), "604800");
        assert_eq!(days_to_seconds(dec("0")).unwrap().to_string(), "0");
        assert_eq!(days_to_seconds(dec("1.5")).unwrap().to_string(), "129600");
    }

    #[test]
    fn test_annual_percent_to_per_second_rate() {
        // 10% / 100 × 1e18 / 31_536_000 = 3_170_979_198.37...
        assert_eq!(
            annual_percent_to_per_second_rate(dec("10")).unwrap().to_string(),
            "3170979198"
        );
        assert_eq!(
            annual_percent_to_per_second_rate(Decimal::ZERO).unwrap(),
            FixedPoint::ZERO
        );
    }

    #[test]
    fn test_interest_range_invalid_is_zero() {
        let args = interest_range_to_contract_args(dec("0"), dec("0"), true).unwrap();
        assert_eq!(args.variable_rate_per_second, FixedPoint::ZERO);
        assert_eq!(args.min_rate_per_second, FixedPoint::ZERO);

        // Flag wins over otherwise valid values
        let flagged = interest_range_to_contract_args(dec("5"), dec("50"), true).unwrap();
        assert_eq!(flagged, InterestRateArgs::default());
    }

    #[test]
    fn test_interest_range_equal_bounds() {
        let args = interest_range_to_contract_args(dec("20"), dec("20"), false).unwrap();
        assert_eq!(args.variable_rate_per_second.to_string(), "0");
        assert_eq!(
            args.min_rate_per_second,
            annual_percent_to_per_second_rate(dec("20")).unwrap()
        );
    }

    #[test]
    fn test_interest_range_variable_is_difference() {
        let args = interest_range_to_contract_args(dec("10"), dec("30"), false).unwrap();
        let min = annual_percent_to_per_second_rate(dec("10")).unwrap();
        let max = annual_percent_to_per_second_rate(dec("30")).unwrap();
        assert_eq!(args.min_rate_per_second, min);
        assert_eq!(args.variable_rate_per_second, max.checked_sub(min).unwrap());
    }

    #[test]
    fn test_interest_range_inverted_goes_negative() {
        let args = interest_range_to_contract_args(dec("30"), dec("10"), false).unwrap();
        assert!(args.variable_rate_per_second.is_negative());
    }

    #[test]
    fn test_payable_with_buffer() {
        let payable = payable_with_buffer(FixedPoint::from_raw(1000)).unwrap();
        assert_eq!(payable.to_string(), "1050");

        let wei = payable_with_buffer(FixedPoint::from_raw(1_000_000_000_000_000_001)).unwrap();
        assert_eq!(wei.to_string(), "1050000000000000001");
    }

    #[test]
    fn test_payable_with_margin() {
        let payable = payable_with_margin(FixedPoint::from_raw(1000), dec("12.5")).unwrap();
        assert_eq!(payable.to_string(), "1125");
        assert_eq!(
            payable_with_margin(FixedPoint::from_raw(-1), dec("5")),
            Err(NumericError::NegativeInput)
        );
    }

    #[test]
    fn test_gas_limit_override() {
        assert_eq!(gas_limit_override().to_string(), "500000");
        assert_eq!(
            scale_to_decimals(dec("0.0005"), 9).unwrap(),
            gas_limit_override()
        );
    }
}
