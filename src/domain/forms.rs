// ============================================================================
// Form Inputs
// Parsing and formatting of pool administration forms
// ============================================================================

use crate::conversions::{
    days_to_seconds, interest_range_to_contract_args, percentage_to_ratio, scale_to_wei,
    InterestRateArgs,
};
use crate::numeric::{FixedPoint, NumericError, NumericResult};
use rust_decimal::Decimal;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parse a numeric form field.
///
/// Accepts digits with at most one `.` or `,` decimal separator, the same
/// pattern the input fields enforce (`^[0-9]*[.,]?[0-9]*$`). Signs, exponents
/// and whitespace inside the number are rejected.
pub fn parse_amount_input(input: &str) -> NumericResult<Decimal> {
    let input = input.trim();
    if input.is_empty() {
        return Err(NumericError::MissingInput("amount"));
    }

    let mut separators = 0;
    for c in input.chars() {
        match c {
            '0'..='9' => {},
            '.' | ',' => separators += 1,
            _ => return Err(NumericError::InvalidInput),
        }
    }
    if separators > 1 || input == "." || input == "," {
        return Err(NumericError::InvalidInput);
    }

    let normalized = input.replace(',', ".");
    // "5." and ".5" are both valid form states
    let normalized = match (normalized.starts_with('.'), normalized.ends_with('.')) {
        (true, _) => format!("0{normalized}"),
        (_, true) => normalized.trim_end_matches('.').to_string(),
        _ => normalized,
    };

    Decimal::from_str(&normalized).map_err(|_| NumericError::InvalidInput)
}

/// Whether a form field holds a usable number.
pub fn is_valid_amount_input(input: &str) -> bool {
    parse_amount_input(input).is_ok()
}

/// LTV percentage field to its contract ratio
pub fn format_ltv(input: &str) -> NumericResult<FixedPoint> {
    percentage_to_ratio(parse_amount_input(input)?)
}

pub fn format_max_price(input: &str) -> NumericResult<FixedPoint> {
    scale_to_wei(parse_amount_input(input)?)
}

pub fn format_amount_to_deposit_or_withdraw(input: &str) -> NumericResult<FixedPoint> {
    scale_to_wei(parse_amount_input(input)?)
}

pub fn format_max_daily_borrows(input: &str) -> NumericResult<FixedPoint> {
    scale_to_wei(parse_amount_input(input)?)
}

/// Loan length in days to seconds
pub fn format_max_loan_length(input: &str) -> NumericResult<FixedPoint> {
    days_to_seconds(parse_amount_input(input)?)
}

/// Interest-change form fields to contract arguments.
///
/// The form decides validity (both fields filled, min ≤ max); an invalid
/// form yields zero rates.
pub fn format_interest_change(
    minimum_interest: &str,
    maximum_interest: &str,
    is_invalid: bool,
) -> NumericResult<InterestRateArgs> {
    if is_invalid {
        return interest_range_to_contract_args(Decimal::ZERO, Decimal::ZERO, true);
    }
    interest_range_to_contract_args(
        parse_amount_input(minimum_interest)?,
        parse_amount_input(maximum_interest)?,
        false,
    )
}

// ============================================================================
// Create Pool Form
// ============================================================================

/// Values entered in the create-pool form, in human units.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreatePoolForm {
    pub nft_address: String,
    pub name: String,
    pub symbol: String,
    /// Maximum price per NFT, in whole native units
    pub max_price: Decimal,
    /// Maximum borrowed per day, in whole native units
    pub max_daily_borrows: Decimal,
    pub max_length_in_days: Decimal,
    /// Annual interest at full utilisation, percent
    pub maximum_interest: Decimal,
    /// Annual interest at zero utilisation, percent
    pub minimum_interest: Decimal,
    /// Loan-to-value, percent
    pub ltv: Decimal,
}

/// Arguments of the factory's `createPool`, ready to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CreatePoolArgs {
    pub max_price: FixedPoint,
    pub nft_address: String,
    pub max_daily_borrows: FixedPoint,
    pub name: String,
    pub symbol: String,
    /// Seconds
    pub max_length: FixedPoint,
    pub max_variable_interest_per_eth_per_second: FixedPoint,
    pub minimum_interest: FixedPoint,
    pub ltv: FixedPoint,
}

/// Convert the create-pool form into contract arguments.
pub fn format_create_pool_inputs(form: &CreatePoolForm) -> NumericResult<CreatePoolArgs> {
    let interest =
        interest_range_to_contract_args(form.minimum_interest, form.maximum_interest, false)?;

    Ok(CreatePoolArgs {
        max_price: scale_to_wei(form.max_price)?,
        nft_address: form.nft_address.clone(),
        max_daily_borrows: scale_to_wei(form.max_daily_borrows)?,
        name: form.name.clone(),
        symbol: form.symbol.clone(),
        max_length: days_to_seconds(form.max_length_in_days)?,
        max_variable_interest_per_eth_per_second: interest.variable_rate_per_second,
        minimum_interest: interest.min_rate_per_second,
        ltv: percentage_to_ratio(form.ltv)?,
    })
}
