// ============================================================================
// Conversion Configuration
// Tunable parameters for contract call preparation
// ============================================================================

use super::constants::{
    DEFAULT_REPAY_BUFFER_PERCENT, GWEI_DECIMALS, MAX_VALUE_DECIMALS, WEI_DECIMALS,
};
use crate::numeric::{FixedPoint, NumericResult};
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters the call builder reads.
///
/// The defaults reproduce the values the lending pools were deployed with.
/// No gas price is attached unless one is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConversionConfig {
    /// Decimals of the chain's native value unit
    pub value_decimals: u32,

    /// Safety margin added to repayments, in percent
    pub repay_buffer_percent: Decimal,

    /// Gas price override in gwei. None leaves gas pricing to the wallet
    pub gas_price_override_gwei: Option<Decimal>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            value_decimals: WEI_DECIMALS,
            repay_buffer_percent: Decimal::from(DEFAULT_REPAY_BUFFER_PERCENT),
            gas_price_override_gwei: None,
        }
    }
}

impl ConversionConfig {
    /// Builder method: Set repayment buffer percentage
    pub fn with_repay_buffer_percent(mut self, percent: Decimal) -> Self {
        self.repay_buffer_percent = percent;
        self
    }

    /// Builder method: Set gas price override (gwei)
    pub fn with_gas_price_override(mut self, gwei: Option<Decimal>) -> Self {
        self.gas_price_override_gwei = gwei;
        self
    }

    /// Builder method: Set native value decimals
    pub fn with_value_decimals(mut self, decimals: u32) -> Self {
        self.value_decimals = decimals;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.value_decimals > MAX_VALUE_DECIMALS {
            return Err(format!(
                "Value decimals must be at most {}",
                MAX_VALUE_DECIMALS
            ));
        }

        if self.repay_buffer_percent < Decimal::ZERO {
            return Err("Repay buffer cannot be negative".to_string());
        }

        if let Some(gwei) = self.gas_price_override_gwei {
            if gwei <= Decimal::ZERO {
                return Err("Gas price override must be positive".to_string());
            }
        }

        Ok(())
    }

    /// Gas price override in wei, if one is configured.
    pub fn gas_price_override(&self) -> NumericResult<Option<FixedPoint>> {
        self.gas_price_override_gwei
            .map(|gwei| FixedPoint::from_decimal(gwei, GWEI_DECIMALS))
            .transpose()
    }
}
