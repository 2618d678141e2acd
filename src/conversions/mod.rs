// ============================================================================
// Conversions Module
// Pure translations between form values and ledger encodings
// ============================================================================
//
// Every function here is deterministic and side-effect free. "Now" is only
// read through an injected `Clock`.

pub mod deadline;
pub mod quotes;
pub mod scaling;

pub use deadline::{humanize, loan_deadline_display, DeadlineDisplay};
pub use quotes::{
    format_current_annual_interest, max_nfts_to_borrow, max_price_per_nft, quote_price,
    to_display, total_received_arg,
};
pub use scaling::{
    annual_percent_to_per_second_rate, days_to_seconds, gas_limit_override,
    interest_range_to_contract_args, payable_with_buffer, payable_with_margin,
    percentage_to_ratio, scale_to_decimals, scale_to_wei, InterestRateArgs,
};
