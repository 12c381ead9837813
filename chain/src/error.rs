//! Classified evaluation failures.
//!
//! Every failure carries a kind plus structured context: account and asset
//! ids, and amounts pretty-printed per the asset's precision. The strings
//! are for humans; programmatic consumers match on the variant.

use stele_ops::ValidationError;
use stele_store::StoreError;
use stele_types::{AccountId, AssetId, CommitteeMemberId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("insufficient balance: {name} has {balance}, {required} required")]
    InsufficientBalance {
        account: AccountId,
        name: String,
        balance: String,
        required: String,
    },

    #[error(
        "insufficient fee paid: {core_fee_paid} paid plus {payable_from_coin_seconds} \
         payable from coin-seconds, {required} required"
    )]
    InsufficientFee {
        core_fee_paid: i64,
        payable_from_coin_seconds: i64,
        required: i64,
    },

    #[error("fee pool of {symbol} holds {fee_pool}, {required} required to convert {fee}")]
    InsufficientFeePool {
        asset: AssetId,
        symbol: String,
        fee_pool: String,
        required: String,
        fee: String,
    },

    #[error("account {name} may not pay fees in {symbol}: unauthorized by whitelist")]
    UnauthorizedFeeAsset {
        account: AccountId,
        name: String,
        asset: AssetId,
        symbol: String,
    },

    #[error("'from' account {from} is not whitelisted for asset {asset}")]
    TransferFromNotWhitelisted { from: AccountId, asset: AssetId },

    #[error("'to' account {to} is not whitelisted for asset {asset}")]
    TransferToNotWhitelisted { to: AccountId, asset: AssetId },

    #[error("asset {asset} has the transfer-restricted flag enabled")]
    TransferRestricted { asset: AssetId },

    #[error("override transfer not permitted for asset {asset}")]
    OverrideNotPermitted { asset: AssetId },

    #[error("operation requires hardfork {fork}")]
    PrecondHardfork { fork: &'static str },

    #[error("account {account} must be a lifetime member")]
    LifetimeMembershipRequired { account: AccountId },

    #[error("committee member {committee_member} is not owned by account {account}")]
    CommitteeMemberMismatch {
        committee_member: CommitteeMemberId,
        account: AccountId,
    },

    #[error("core exchange rate of asset {asset} does not convert to core")]
    InvalidExchangeRate { asset: AssetId },

    #[error("arithmetic overflow during evaluation")]
    Overflow,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
