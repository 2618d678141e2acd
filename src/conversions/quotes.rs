// ============================================================================
// Quotes
// Oracle-derived prices and borrow capacity for display
// ============================================================================
//
// Oracle prices and LTV ratios arrive as 10^18 integer encodings read from
// the pools. Intermediate products stay in 256-bit integers and are rounded
// once; only the final display value becomes a `Decimal`. The exception is
// `total_received_arg`, which goes back out to a contract call.

use crate::domain::constants::{
    DISPLAY_DECIMALS, INTEREST_DISPLAY_DECIMALS, RATIO_DECIMALS, WEI_DECIMALS,
};
use crate::numeric::{pow10, FixedPoint, NumericError, NumericResult, Rounding};
use rust_decimal::Decimal;

/// Round an encoding with `decimals` fractional digits half away from zero to
/// `display` places.
///
/// `to_display(2_500_000, 6, 4)` is `2.5000`.
pub fn to_display(value: FixedPoint, decimals: u32, display: u32) -> NumericResult<Decimal> {
    value
        .rescale(decimals, display, Rounding::HalfUp)?
        .to_decimal(display)
}

fn require_positive(value: FixedPoint, field: &'static str) -> NumericResult<FixedPoint> {
    if value.is_zero() {
        Err(NumericError::MissingInput(field))
    } else if value.is_negative() {
        Err(NumericError::NegativeInput)
    } else {
        Ok(value)
    }
}

fn one_wei_unit() -> NumericResult<FixedPoint> {
    pow10(WEI_DECIMALS).map(FixedPoint::from_i256)
}

/// Amount a single NFT borrows, in whole units with four decimals:
/// `oracle_price × ltv / 10^18 / 10^18`.
pub fn quote_price(oracle_price: FixedPoint, ltv: FixedPoint) -> NumericResult<Decimal> {
    // 10^36-scaled product
    let quote = oracle_price.checked_mul(ltv)?;
    to_display(quote, 2 * WEI_DECIMALS, DISPLAY_DECIMALS)
}

/// Suggested maximum NFT price for a new pool, with four decimals.
///
/// `(oracle_price / 10^18) × (1 / (ltv / 100) + 1) / 2`, where `ltv` is a
/// 0-100 percentage. Prices midway between the oracle price and the price at
/// which the loan would equal the oracle value.
///
/// # Errors
/// `MissingInput` if either input is absent or zero.
pub fn max_price_per_nft(
    oracle_price: Option<FixedPoint>,
    ltv_percent: Option<Decimal>,
) -> NumericResult<Decimal> {
    let oracle_price = require_positive(oracle_price.unwrap_or_default(), "oracle_price")?;
    let ltv_percent = match ltv_percent {
        Some(ltv) if !ltv.is_zero() => ltv,
        _ => return Err(NumericError::MissingInput("ltv")),
    };
    if ltv_percent.is_sign_negative() {
        return Err(NumericError::NegativeInput);
    }

    // price × (100 + ltv) / (2 × ltv), on the ltv's own integer scale
    let ltv_scale = ltv_percent.scale();
    let ltv_units = FixedPoint::from_decimal(ltv_percent, ltv_scale)?;
    let numerator =
        FixedPoint::from_decimal(Decimal::ONE_HUNDRED, ltv_scale)?.checked_add(ltv_units)?;
    let half = FixedPoint::from_decimal(
        ltv_percent,
        ltv_scale + WEI_DECIMALS - DISPLAY_DECIMALS,
    )?;
    let denominator = half.checked_add(half)?;

    oracle_price
        .mul_div(numerator, denominator, Rounding::HalfUp)?
        .to_decimal(DISPLAY_DECIMALS)
}

/// How many NFTs a pool can fund right now:
/// `round(max_instant_borrow / (oracle_price × ltv / 10^18))`.
///
/// # Errors
/// `MissingInput` if any input is zero. Callers wanting the legacy "0 means
/// nothing to borrow" value can use `unwrap_or_default()`.
pub fn max_nfts_to_borrow(
    max_instant_borrow: FixedPoint,
    oracle_price: FixedPoint,
    ltv: FixedPoint,
) -> NumericResult<u64> {
    let available = require_positive(max_instant_borrow, "max_instant_borrow")?;
    let price = require_positive(oracle_price, "oracle_price")?;
    let ratio = require_positive(ltv, "ltv")?;

    let per_nft = price.checked_mul(ratio)?;
    let count = available.mul_div(one_wei_unit()?, per_nft, Rounding::HalfUp)?;

    u64::try_from(count.raw_value()).map_err(|_| NumericError::Overflow)
}

/// Total borrowed for `no_of_items` NFTs, as the contract argument:
/// `oracle_price × no_of_items × ltv / 10^18`, truncated.
pub fn total_received_arg(
    oracle_price: FixedPoint,
    no_of_items: u64,
    ltv: FixedPoint,
) -> NumericResult<FixedPoint> {
    oracle_price
        .checked_mul(FixedPoint::from_u64(no_of_items))?
        .mul_div(ltv, one_wei_unit()?, Rounding::Truncate)
}

/// Annual interest as a percentage with two decimals: `raw / 10^16`.
pub fn format_current_annual_interest(raw: FixedPoint) -> NumericResult<Decimal> {
    to_display(raw, RATIO_DECIMALS, INTEREST_DISPLAY_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const ONE_ETHER: i128 = 1_000_000_000_000_000_000;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_to_display() {
        let fp = FixedPoint::from_raw;
        assert_eq!(to_display(fp(2_500_000), 6, 4).unwrap().to_string(), "2.5000");
        assert_eq!(to_display(fp(123_455), 5, 4).unwrap().to_string(), "1.2346");
        assert_eq!(to_display(fp(7), 0, 2).unwrap().to_string(), "7.00");
    }

    #[test]
    fn test_quote_price() {
        let oracle = FixedPoint::from_raw(2 * ONE_ETHER);
        let ltv = FixedPoint::from_raw(ONE_ETHER / 2);
        let quote = quote_price(oracle, ltv).unwrap();
        assert_eq!(quote.to_string(), "1.0000");
        assert_eq!(quote.scale(), 4);
    }

    #[test]
    fn test_quote_price_fractional() {
        // 1.2345678 × 0.33 = 0.407407374
        let oracle = FixedPoint::from_raw(1_234_567_800_000_000_000);
        let ltv = FixedPoint::from_raw(330_000_000_000_000_000);
        assert_eq!(quote_price(oracle, ltv).unwrap().to_string(), "0.4074");
    }

    #[test]
    fn test_quote_price_above_decimal_range() {
        // 10^30 wei does not fit a Decimal at 18 places
        let oracle: FixedPoint = "1000000000000000000000000000000".parse().unwrap();
        let ltv = FixedPoint::from_raw(ONE_ETHER / 2);
        assert_eq!(quote_price(oracle, ltv).unwrap().to_string(), "500000000000.0000");
        assert_eq!(
            max_nfts_to_borrow(oracle, FixedPoint::from_raw(ONE_ETHER), ltv).unwrap(),
            2_000_000_000_000
        );
    }

    #[test]
    fn test_max_price_per_nft_fractional_ltv() {
        // 2 × (1 / 0.325 + 1) / 2 = 4.0769...
        let oracle = FixedPoint::from_raw(2 * ONE_ETHER);
        let price = max_price_per_nft(Some(oracle), Some(dec("32.5"))).unwrap();
        assert_eq!(price.to_string(), "4.0769");
    }

    #[test]
    fn test_max_price_per_nft() {
        // 10 × (1 / 0.5 + 1) / 2 = 15
        let oracle = FixedPoint::from_raw(10 * ONE_ETHER);
        let price = max_price_per_nft(Some(oracle), Some(dec("50"))).unwrap();
        assert_eq!(price.to_string(), "15.0000");

        // 3 × (1 / 0.66 + 1) / 2 = 3.7727...
        let oracle = FixedPoint::from_raw(3 * ONE_ETHER);
        let price = max_price_per_nft(Some(oracle), Some(dec("66"))).unwrap();
        assert_eq!(price.to_string(), "3.7727");
    }

    #[test]
    fn test_max_price_per_nft_missing_inputs() {
        assert_eq!(
            max_price_per_nft(None, Some(dec("50"))),
            Err(NumericError::MissingInput("oracle_price"))
        );
        assert_eq!(
            max_price_per_nft(Some(FixedPoint::from_raw(100)), None),
            Err(NumericError::MissingInput("ltv"))
        );
        assert_eq!(
            max_price_per_nft(Some(FixedPoint::from_raw(100)), Some(Decimal::ZERO)),
            Err(NumericError::MissingInput("ltv"))
        );
    }

    #[test]
    fn test_max_nfts_to_borrow() {
        // 10 ether available, 2 ether oracle, 50% ltv -> 1 ether per NFT
        let count = max_nfts_to_borrow(
            FixedPoint::from_raw(10 * ONE_ETHER),
            FixedPoint::from_raw(2 * ONE_ETHER),
            FixedPoint::from_raw(ONE_ETHER / 2),
        )
        .unwrap();
        assert_eq!(count, 10);
    }

    #[test]
    fn test_max_nfts_to_borrow_rounds() {
        // 2.5 NFTs worth of liquidity rounds up; 2.4 rounds down
        let per_nft = FixedPoint::from_raw(ONE_ETHER);
        let ltv = FixedPoint::from_raw(ONE_ETHER);
        let half = max_nfts_to_borrow(FixedPoint::from_raw(25 * ONE_ETHER / 10), per_nft, ltv);
        let below = max_nfts_to_borrow(FixedPoint::from_raw(24 * ONE_ETHER / 10), per_nft, ltv);
        assert_eq!(half.unwrap(), 3);
        assert_eq!(below.unwrap(), 2);
    }

    #[test]
    fn test_max_nfts_to_borrow_zero_inputs() {
        let result = max_nfts_to_borrow(
            FixedPoint::ZERO,
            FixedPoint::from_raw(100),
            FixedPoint::from_raw(50),
        );
        assert_eq!(result, Err(NumericError::MissingInput("max_instant_borrow")));
        assert_eq!(result.unwrap_or_default(), 0);

        let no_ltv = max_nfts_to_borrow(
            FixedPoint::from_raw(100),
            FixedPoint::from_raw(100),
            FixedPoint::ZERO,
        );
        assert_eq!(no_ltv, Err(NumericError::MissingInput("ltv")));
    }

    #[test]
    fn test_total_received_arg() {
        // 2 ether × 3 items × 0.5 = 3 ether
        let total = total_received_arg(
            FixedPoint::from_raw(2 * ONE_ETHER),
            3,
            FixedPoint::from_raw(ONE_ETHER / 2),
        )
        .unwrap();
        assert_eq!(total.to_string(), "3000000000000000000");

        let many = total_received_arg(
            FixedPoint::from_raw(1_000 * ONE_ETHER),
            u64::MAX,
            FixedPoint::from_raw(ONE_ETHER),
        )
        .unwrap();
        assert_eq!(many.to_string(), "18446744073709551615000000000000000000000");
    }

    #[test]
    fn test_format_current_annual_interest() {
        // 12.345% scaled by 1e16
        let raw = FixedPoint::from_raw(123_450_000_000_000_000);
        assert_eq!(
            format_current_annual_interest(raw).unwrap().to_string(),
            "12.35"
        );
        assert_eq!(
            format_current_annual_interest(FixedPoint::ZERO)
                .unwrap()
                .to_string(),
            "0.00"
        );
    }
}
