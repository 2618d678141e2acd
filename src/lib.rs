// ============================================================================
// NFT Lending Units Library
// Fixed-point conversions between lending form values and pool contract arguments
// ============================================================================

//! # NFT Lending Units
//!
//! Conversions between the decimal quantities people type into an
//! NFT-collateralized lending front-end and the integer encodings the pool
//! contracts expect.
//!
//! ## Features
//!
//! - **Exact scaling** of prices, percentages and day counts into 10^18 /
//!   10^16 integer encodings, without floating point
//! - **Per-second interest rates** from annual percentages
//! - **Oracle quotes** and borrow capacity for display
//! - **Injected clocks** for deadline formatting
//! - **Prepared contract calls** gated on wallet state and input validity
//!
//! ## Example
//!
//! ```rust
//! use nft_lending_units::prelude::*;
//! use rust_decimal::Decimal;
//!
//! // 1.5 ether as a contract argument
//! let max_price = scale_to_wei(Decimal::new(15, 1)).unwrap();
//! assert_eq!(max_price.to_string(), "1500000000000000000");
//!
//! // 50% LTV and a two week loan
//! assert_eq!(percentage_to_ratio(Decimal::from(50)).unwrap().to_string(), "500000000000000000");
//! assert_eq!(days_to_seconds(Decimal::from(14)).unwrap().to_string(), "1209600");
//!
//! // Admin call prepared for the pool owner on chain 1
//! let gate = CallGate::new(1).connected(1, "0xabc").owned_by("0xABC");
//! let builder = CallBuilder::new(ConversionConfig::default(), gate).unwrap();
//! let call = builder.set_max_loan_length("0xpool", "7");
//! assert!(call.enabled);
//! assert_eq!(call.args_as_strings(), vec!["604800"]);
//! ```

pub mod conversions;
pub mod domain;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::conversions::{
        annual_percent_to_per_second_rate, days_to_seconds, format_current_annual_interest,
        gas_limit_override, interest_range_to_contract_args, loan_deadline_display,
        max_nfts_to_borrow, max_price_per_nft, payable_with_buffer, percentage_to_ratio,
        quote_price, scale_to_decimals, scale_to_wei, total_received_arg, DeadlineDisplay,
        InterestRateArgs,
    };
    pub use crate::domain::constants::{
        GAS_LIMIT_OVERRIDE, SECONDS_IN_A_DAY, SECONDS_IN_A_YEAR, WEI_DECIMALS,
    };
    pub use crate::domain::{
        CallArg, CallBuilder, CallGate, ContractCall, ConversionConfig, CreatePoolArgs,
        CreatePoolForm, LoanId,
    };
    pub use crate::interfaces::{Clock, FixedClock, SystemClock};
    pub use crate::numeric::{FixedPoint, NumericError, NumericResult};
}
