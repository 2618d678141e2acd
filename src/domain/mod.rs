// ============================================================================
// Domain Module
// Ledger constants, configuration, form inputs and prepared contract calls
// ============================================================================

pub mod calls;
pub mod config;
pub mod constants;
pub mod forms;

pub use calls::{CallArg, CallBuilder, CallGate, ContractCall, LoanId};
pub use config::ConversionConfig;
pub use forms::{
    format_amount_to_deposit_or_withdraw, format_create_pool_inputs, format_interest_change,
    format_ltv, format_max_daily_borrows, format_max_loan_length, format_max_price,
    is_valid_amount_input, parse_amount_input, CreatePoolArgs, CreatePoolForm,
};
