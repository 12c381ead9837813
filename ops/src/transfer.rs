//! Transfer operations.

use crate::operation::Extensions;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use stele_types::{AccountId, AssetAmount};

/// An opaque encrypted memo attached to a transfer. The codec and key
/// exchange are external; the core only prices its size.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub message: Vec<u8>,
}

impl Memo {
    pub fn len(&self) -> usize {
        self.message.len()
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }
}

/// Move an amount of one asset between two accounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOperation {
    pub fee: AssetAmount,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: AssetAmount,
    pub memo: Option<Memo>,
    pub extensions: Extensions,
}

impl TransferOperation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee);
        }
        if self.amount.amount <= 0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        if self.from == self.to {
            return Err(ValidationError::SelfTransfer);
        }
        Ok(())
    }
}

/// Second-generation transfer. Same shape as [`TransferOperation`]; the
/// operation tag is the version discriminator, and the fee may be charged
/// in percentage mode depending on the transferred asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferV2Operation {
    pub fee: AssetAmount,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: AssetAmount,
    pub memo: Option<Memo>,
    pub extensions: Extensions,
}

impl TransferV2Operation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee);
        }
        if self.amount.amount <= 0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        if self.from == self.to {
            return Err(ValidationError::SelfTransfer);
        }
        Ok(())
    }
}

/// Issuer-forced movement of an asset between two holders. Bypasses the
/// transfer-restricted flag but still respects whitelists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideTransferOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: AssetAmount,
    pub memo: Option<Memo>,
    pub extensions: Extensions,
}

impl OverrideTransferOperation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee);
        }
        if self.amount.amount <= 0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        if self.from == self.to {
            return Err(ValidationError::SelfTransfer);
        }
        if self.issuer == self.from {
            return Err(ValidationError::IssuerIsSource);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stele_types::AssetId;

    fn transfer() -> TransferOperation {
        TransferOperation {
            fee: AssetAmount::core(10),
            from: AccountId(10),
            to: AccountId(11),
            amount: AssetAmount::new(100, AssetId(1)),
            memo: None,
            extensions: Extensions::default(),
        }
    }

    #[test]
    fn valid_transfer_passes() {
        transfer().validate().unwrap();
    }

    #[test]
    fn structural_defects_are_classified() {
        let mut op = transfer();
        op.fee.amount = -1;
        assert_eq!(op.validate(), Err(ValidationError::NegativeFee));

        let mut op = transfer();
        op.amount.amount = 0;
        assert_eq!(op.validate(), Err(ValidationError::NonPositiveAmount));

        let mut op = transfer();
        op.to = op.from;
        assert_eq!(op.validate(), Err(ValidationError::SelfTransfer));
    }

    #[test]
    fn override_issuer_must_not_be_source() {
        let op = OverrideTransferOperation {
            fee: AssetAmount::core(0),
            issuer: AccountId(10),
            from: AccountId(10),
            to: AccountId(11),
            amount: AssetAmount::new(5, AssetId(1)),
            memo: None,
            extensions: Extensions::default(),
        };
        assert_eq!(op.validate(), Err(ValidationError::IssuerIsSource));
    }
}
