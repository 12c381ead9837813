//! Fundamental types for the stele chain core.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: object ids, asset amounts and prices, timestamps, chain
//! parameters, and the chain-state records (accounts, assets, balances,
//! vesting balances) together with their intrinsic arithmetic.

pub mod account;
pub mod amount;
pub mod asset;
pub mod balance;
pub mod ids;
pub mod params;
pub mod time;
pub mod vesting;

pub use account::{AccountObject, AccountStatistics, CommitteeMember, MembershipTier, Validator};
pub use amount::{AssetAmount, Price};
pub use asset::{AssetDynamicData, AssetFlags, AssetObject, AssetOptions, TransferFeeMode};
pub use balance::AccountBalance;
pub use ids::{AccountId, AssetId, CommitteeMemberId, ValidatorId, VestingBalanceId, CORE_ASSET};
pub use params::{ChainParameters, CoinSecondsAsFeesOptions, InvalidParameters};
pub use time::Timestamp;
pub use vesting::{CddVestingPolicy, VestingBalance, VestingPolicy};
