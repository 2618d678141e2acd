// ============================================================================
// Contract Calls
// Prepared pool and NFT calls, gated on wallet state and input validity
// ============================================================================
//
// A prepared call carries everything a wallet library needs to simulate and
// submit it: target, function name, encoded arguments, attached value and an
// `enabled` flag. Submission and confirmation happen elsewhere.

use super::config::ConversionConfig;
use super::forms::{
    format_create_pool_inputs, format_interest_change, format_ltv, format_max_loan_length,
    parse_amount_input, CreatePoolForm,
};
use crate::conversions::{payable_with_margin, scale_to_decimals};
use crate::numeric::{FixedPoint, NumericError, NumericResult};
use bnum::types::U256;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Call Arguments
// ============================================================================

/// Token id of a loan NFT minted by a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LoanId(U256);

impl LoanId {
    pub const fn new(id: U256) -> Self {
        Self(id)
    }

    pub const fn value(self) -> U256 {
        self.0
    }
}

impl From<u64> for LoanId {
    fn from(id: u64) -> Self {
        Self(U256::from(id))
    }
}

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LoanId {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<U256>()
            .map(Self)
            .map_err(|_| NumericError::InvalidInput)
    }
}

#[cfg(feature = "serde")]
impl Serialize for LoanId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for LoanId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One ABI argument, rendered the way wallet libraries accept it.
///
/// Serialized with an explicit `type` tag: an address, a name and an integer
/// string are indistinguishable otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "value", rename_all = "camelCase")
)]
pub enum CallArg {
    Uint(FixedPoint),
    LoanIds(Vec<LoanId>),
    Address(String),
    Text(String),
    Bool(bool),
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    write!(f, "[")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{value}")?;
    }
    write!(f, "]")
}

impl fmt::Display for CallArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallArg::Uint(value) => write!(f, "{value}"),
            CallArg::LoanIds(ids) => write_list(f, ids),
            CallArg::Address(s) | CallArg::Text(s) => write!(f, "{s}"),
            CallArg::Bool(flag) => write!(f, "{flag}"),
        }
    }
}

/// A contract call ready for simulation and submission.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ContractCall {
    /// Target contract address
    pub contract: String,
    pub function_name: String,
    pub args: Vec<CallArg>,
    /// Native value attached to payable calls
    pub value: Option<FixedPoint>,
    pub gas_price: Option<FixedPoint>,
    /// False when the wallet is on the wrong chain or account, or the input is invalid
    pub enabled: bool,
}

impl ContractCall {
    fn new(contract: &str, function_name: &str, args: Vec<CallArg>) -> Self {
        Self {
            contract: contract.to_string(),
            function_name: function_name.to_string(),
            args,
            value: None,
            gas_price: None,
            enabled: true,
        }
    }

    /// Arguments as strings, in ABI order
    pub fn args_as_strings(&self) -> Vec<String> {
        self.args.iter().map(ToString::to_string).collect()
    }

    /// JSON encoding for handing the call to a wallet bridge.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Call Gate
// ============================================================================

/// Wallet state a call must match before it is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallGate {
    /// Chain the wallet is connected to
    pub connected_chain_id: Option<u64>,
    /// Account the wallet is connected with
    pub connected_account: Option<String>,
    /// Chain the pool lives on
    pub required_chain_id: u64,
    /// Pool owner for admin calls. None for calls anyone may make
    pub owner: Option<String>,
}

impl CallGate {
    pub fn new(required_chain_id: u64) -> Self {
        Self {
            required_chain_id,
            ..Default::default()
        }
    }

    /// Builder method: Set connected wallet state
    pub fn connected(mut self, chain_id: u64, account: impl Into<String>) -> Self {
        self.connected_chain_id = Some(chain_id);
        self.connected_account = Some(account.into());
        self
    }

    /// Builder method: Restrict to the pool owner
    pub fn owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Whether the connected wallet may make the call.
    ///
    /// Addresses compare case-insensitively since checksummed and lowercase
    /// hex name the same account.
    pub fn allows(&self) -> bool {
        if self.connected_chain_id != Some(self.required_chain_id) {
            return false;
        }
        match (&self.owner, &self.connected_account) {
            (None, _) => true,
            (Some(owner), Some(account)) => owner.eq_ignore_ascii_case(account),
            (Some(_), None) => false,
        }
    }
}

// ============================================================================
// Call Builder
// ============================================================================

/// Prepares pool calls from raw form values.
///
/// Invalid input never fails preparation: the call is built with a zero
/// argument and disabled, so the form can keep rendering while the user types.
/// An invalid configuration is rejected up front instead.
#[derive(Debug, Clone)]
pub struct CallBuilder {
    config: ConversionConfig,
    gate: CallGate,
}

impl CallBuilder {
    /// Create a builder after validating `config`.
    pub fn new(config: ConversionConfig, gate: CallGate) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { config, gate })
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn gate(&self) -> &CallGate {
        &self.gate
    }

    /// Native value amount in the configured decimals
    fn value_amount(&self, input: &str) -> NumericResult<FixedPoint> {
        scale_to_decimals(parse_amount_input(input)?, self.config.value_decimals)
    }

    fn finish(&self, mut call: ContractCall, input_valid: bool) -> ContractCall {
        call.enabled = input_valid && self.gate.allows();
        call.gas_price = match self.config.gas_price_override() {
            Ok(gas_price) => gas_price,
            Err(err) => {
                tracing::warn!(%err, "ignoring unusable gas price override");
                None
            },
        };
        tracing::debug!(
            contract = %call.contract,
            function = %call.function_name,
            args = ?call.args_as_strings(),
            enabled = call.enabled,
            "prepared contract call"
        );
        call
    }

    fn single_uint(
        &self,
        pool: &str,
        function_name: &str,
        formatted: NumericResult<FixedPoint>,
    ) -> ContractCall {
        let valid = formatted.is_ok();
        let arg = formatted.unwrap_or_else(|err| {
            tracing::debug!(function = function_name, %err, "rejected form input");
            FixedPoint::ZERO
        });
        self.finish(
            ContractCall::new(pool, function_name, vec![CallArg::Uint(arg)]),
            valid,
        )
    }

    /// `setMaxLoanLength(seconds)` from a day count
    pub fn set_max_loan_length(&self, pool: &str, days: &str) -> ContractCall {
        self.single_uint(pool, "setMaxLoanLength", format_max_loan_length(days))
    }

    /// `setLTV(ratio)` from a percentage
    pub fn set_ltv(&self, pool: &str, ltv_percent: &str) -> ContractCall {
        self.single_uint(pool, "setLTV", format_ltv(ltv_percent))
    }

    /// `setMaxPrice(wei)`
    pub fn set_max_price(&self, pool: &str, max_price: &str) -> ContractCall {
        self.single_uint(pool, "setMaxPrice", self.value_amount(max_price))
    }

    /// `setMaxDailyBorrows(wei)`
    pub fn set_max_daily_borrows(&self, pool: &str, max_daily_borrows: &str) -> ContractCall {
        self.single_uint(
            pool,
            "setMaxDailyBorrows",
            self.value_amount(max_daily_borrows),
        )
    }

    /// `withdraw(wei)`
    pub fn withdraw(&self, pool: &str, amount: &str) -> ContractCall {
        self.single_uint(pool, "withdraw", self.value_amount(amount))
    }

    /// `deposit()` with the amount attached as value
    pub fn deposit(&self, pool: &str, amount: &str) -> ContractCall {
        let formatted = self.value_amount(amount);
        let valid = formatted.is_ok();
        let mut call = ContractCall::new(pool, "deposit", Vec::new());
        call.value = Some(formatted.unwrap_or_default());
        self.finish(call, valid)
    }

    /// `changeInterest(variableRate, minimumRate)`
    pub fn change_interest(
        &self,
        pool: &str,
        minimum_interest: &str,
        maximum_interest: &str,
        is_invalid: bool,
    ) -> ContractCall {
        let formatted = format_interest_change(minimum_interest, maximum_interest, is_invalid);
        let valid = !is_invalid
            && formatted
                .as_ref()
                .is_ok_and(|rates| !rates.variable_rate_per_second.is_negative());
        let rates = formatted.unwrap_or_default();
        let call = ContractCall::new(
            pool,
            "changeInterest",
            vec![
                CallArg::Uint(rates.variable_rate_per_second),
                CallArg::Uint(rates.min_rate_per_second),
            ],
        );
        self.finish(call, valid)
    }

    /// `createPool(...)` on the factory
    pub fn create_pool(&self, factory: &str, form: &CreatePoolForm) -> ContractCall {
        let (call, valid) = match format_create_pool_inputs(form) {
            Ok(args) => {
                let valid = !args.max_variable_interest_per_eth_per_second.is_negative();
                let call = ContractCall::new(
                    factory,
                    "createPool",
                    vec![
                        CallArg::Uint(args.max_price),
                        CallArg::Address(args.nft_address),
                        CallArg::Uint(args.max_daily_borrows),
                        CallArg::Text(args.name),
                        CallArg::Text(args.symbol),
                        CallArg::Uint(args.max_length),
                        CallArg::Uint(args.max_variable_interest_per_eth_per_second),
                        CallArg::Uint(args.minimum_interest),
                        CallArg::Uint(args.ltv),
                    ],
                );
                (call, valid)
            },
            Err(err) => {
                tracing::debug!(%err, "rejected create pool form");
                (ContractCall::new(factory, "createPool", Vec::new()), false)
            },
        };
        self.finish(call, valid)
    }

    /// `repay(loanIds)` paying the debt plus the configured buffer
    pub fn repay(
        &self,
        pool: &str,
        loan_ids: Vec<LoanId>,
        total_to_repay: FixedPoint,
    ) -> ContractCall {
        let payable = payable_with_margin(total_to_repay, self.config.repay_buffer_percent);
        let valid = payable.is_ok() && !loan_ids.is_empty();
        let mut call = ContractCall::new(pool, "repay", vec![CallArg::LoanIds(loan_ids)]);
        call.value = Some(payable.unwrap_or_default());
        self.finish(call, valid)
    }

    /// `setApprovalForAll(pool, true)` on the NFT collection
    pub fn set_approval_for_all(&self, nft_contract: &str, pool: &str) -> ContractCall {
        let call = ContractCall::new(
            nft_contract,
            "setApprovalForAll",
            vec![CallArg::Address(pool.to_string()), CallArg::Bool(true)],
        );
        self.finish(call, true)
    }
}
