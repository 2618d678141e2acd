// ============================================================================
// Ledger Constants
// Scaling factors and time units shared with the lending contracts
// ============================================================================

use crate::numeric::FixedPoint;

pub const SECONDS_IN_A_DAY: u64 = 86_400;

/// 365 days; the contracts ignore leap years.
pub const SECONDS_IN_A_YEAR: u64 = 31_536_000;

/// Decimals of native value amounts (prices, deposits, borrow caps).
pub const WEI_DECIMALS: u32 = 18;

/// Decimals that turn a 0-100 percentage into a 10^18 ratio (1% = 10^16).
pub const RATIO_DECIMALS: u32 = 16;

/// Decimal places shown for quotes and suggested prices.
pub const DISPLAY_DECIMALS: u32 = 4;

/// Decimal places shown for annual interest.
pub const INTEREST_DISPLAY_DECIMALS: u32 = 2;

/// Largest native decimals a config may use: any `Decimal` scaled by
/// 10^47 still fits the 256-bit encoding.
pub const MAX_VALUE_DECIMALS: u32 = 47;

/// Decimals of gwei.
pub const GWEI_DECIMALS: u32 = 9;

/// Percentage added on top of a repayment to cover interest accrued before execution.
pub const DEFAULT_REPAY_BUFFER_PERCENT: u32 = 5;

/// Static gas-price override: 0.0005 gwei expressed in wei.
pub const GAS_LIMIT_OVERRIDE: FixedPoint = FixedPoint::from_u64(500_000);
