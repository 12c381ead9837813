//! Dividend distribution operation.

use crate::operation::Extensions;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use stele_types::{AccountId, AssetAmount, AssetId};

/// Distribute a dividend to every holder of `shares_asset` with at least
/// `min_shares`, paid by the issuer in `dividend_asset`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    /// Asset whose holders receive the dividend.
    pub shares_asset: AssetId,
    /// Asset the dividend is paid in.
    pub dividend_asset: AssetId,
    /// Minimum holding required to qualify.
    pub min_shares: u16,
    /// Payout per held share, in the dividend asset's smallest unit.
    pub value_per_shares: u16,
    /// Block height the snapshot refers to.
    pub block_no: u64,
    pub description: String,
    pub extensions: Extensions,
}

impl DividendOperation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee);
        }
        if self.min_shares == 0 || self.value_per_shares == 0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_payout_is_rejected() {
        let op = DividendOperation {
            fee: AssetAmount::core(0),
            issuer: AccountId(6),
            shares_asset: AssetId(1),
            dividend_asset: AssetId(2),
            min_shares: 10,
            value_per_shares: 0,
            block_no: 100,
            description: String::new(),
            extensions: Extensions::default(),
        };
        assert_eq!(op.validate(), Err(ValidationError::NonPositiveAmount));
    }
}
