//! Chain parameters governable by the committee.

use crate::ids::CORE_UNIT;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A parameter set failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid chain parameters: {reason}")]
pub struct InvalidParameters {
    pub reason: &'static str,
}

/// Configuration of coin-seconds-as-fees: rates and caps per membership
/// tier, and a per-operation usability ceiling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinSecondsAsFeesOptions {
    /// Coin-seconds consumed per core fee unit, indexed by membership tier
    /// (basic, annual, lifetime).
    pub rate_by_membership: [i64; 3],
    /// Cap on accumulated fee credit, indexed by membership tier.
    pub max_accumulated_by_membership: [i64; 3],
    /// Cap on the credit usable by a single operation, indexed by the
    /// operation tag. Zero (or absent) disables coin-seconds for that
    /// operation.
    pub max_fee_by_operation: Vec<i64>,
}

impl Default for CoinSecondsAsFeesOptions {
    fn default() -> Self {
        Self {
            // one whole core unit held for a day buys a basic account
            // one smallest-unit of fee credit
            rate_by_membership: [CORE_UNIT * 86_400, CORE_UNIT * 8_640, CORE_UNIT * 864],
            max_accumulated_by_membership: [CORE_UNIT, 10 * CORE_UNIT, 100 * CORE_UNIT],
            max_fee_by_operation: Vec::new(),
        }
    }
}

/// All protocol parameters read by the evaluation core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParameters {
    /// Core fees above this amount vest before cashback; at or below it
    /// they cash back immediately.
    pub cashback_vesting_threshold: i64,
    /// Vesting period of cashback deposits, in seconds.
    pub cashback_vesting_period_seconds: u32,
    /// Vesting period of validator pay deposits, in seconds.
    pub validator_pay_vesting_seconds: u32,
    pub coin_seconds_as_fees: CoinSecondsAsFeesOptions,
}

impl Default for ChainParameters {
    fn default() -> Self {
        Self {
            cashback_vesting_threshold: 100 * CORE_UNIT,
            cashback_vesting_period_seconds: 365 * 86_400,
            validator_pay_vesting_seconds: 86_400,
            coin_seconds_as_fees: CoinSecondsAsFeesOptions::default(),
        }
    }
}

impl ChainParameters {
    pub fn validate(&self) -> Result<(), InvalidParameters> {
        if self.cashback_vesting_threshold < 0 {
            return Err(InvalidParameters {
                reason: "cashback vesting threshold must be non-negative",
            });
        }
        if self.cashback_vesting_period_seconds == 0 {
            return Err(InvalidParameters {
                reason: "cashback vesting period must be positive",
            });
        }
        if self.coin_seconds_as_fees.rate_by_membership.iter().any(|r| *r <= 0) {
            return Err(InvalidParameters {
                reason: "coin-seconds-as-fees rates must be positive",
            });
        }
        if self
            .coin_seconds_as_fees
            .max_accumulated_by_membership
            .iter()
            .any(|m| *m < 0)
        {
            return Err(InvalidParameters {
                reason: "coin-seconds credit caps must be non-negative",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        ChainParameters::default().validate().unwrap();
    }

    #[test]
    fn zero_rate_is_rejected() {
        let mut params = ChainParameters::default();
        params.coin_seconds_as_fees.rate_by_membership[1] = 0;
        assert!(params.validate().is_err());
    }
}
