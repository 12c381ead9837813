//! Committee member operations.

use crate::operation::Extensions;
use crate::validation::{check_url, ValidationError};
use serde::{Deserialize, Serialize};
use stele_types::ids::{MAX_SHARE_SUPPLY, PERCENT_100};
use stele_types::{AccountId, AssetAmount, AssetOptions, ChainParameters, CommitteeMemberId};

/// Bid for a committee seat by creating a committee member object that
/// stakeholders may vote on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeMemberCreateOperation {
    pub fee: AssetAmount,
    /// The account which owns the committee member and pays the fee.
    pub committee_member_account: AccountId,
    pub url: String,
}

impl CommitteeMemberCreateOperation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee);
        }
        check_url(&self.url)
    }
}

/// Update a committee member object. Only the url can change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeMemberUpdateOperation {
    pub fee: AssetAmount,
    pub committee_member: CommitteeMemberId,
    /// The account which owns the committee member and pays the fee.
    pub committee_member_account: AccountId,
    pub new_url: Option<String>,
}

impl CommitteeMemberUpdateOperation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee);
        }
        if let Some(url) = &self.new_url {
            check_url(url)?;
        }
        Ok(())
    }
}

/// Committee-only update of the global chain parameters.
///
/// Must arrive wrapped in a proposal with a review period; the core stages
/// the new parameter set, and the maintenance boundary promotes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateGlobalParametersOperation {
    pub fee: AssetAmount,
    pub new_parameters: ChainParameters,
}

impl UpdateGlobalParametersOperation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee);
        }
        self.new_parameters.validate()?;
        Ok(())
    }
}

/// Committee-only update of the core asset's options. Only
/// `market_fee_percent`, `max_market_fee`, and the transfer fee mode are
/// applied; other option fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCoreAssetOperation {
    pub fee: AssetAmount,
    pub new_options: AssetOptions,
    pub extensions: Extensions,
}

impl UpdateCoreAssetOperation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee);
        }
        if self.new_options.market_fee_percent as u32 > PERCENT_100 {
            return Err(ValidationError::MarketFeePercentTooHigh(
                self.new_options.market_fee_percent,
            ));
        }
        if self.new_options.max_market_fee < 0 || self.new_options.max_market_fee > MAX_SHARE_SUPPLY
        {
            return Err(ValidationError::MaxMarketFeeOutOfRange(
                self.new_options.max_market_fee,
            ));
        }
        Ok(())
    }
}
