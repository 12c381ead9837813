//! Object ids and chain-wide constants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an account object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

/// Identifier of an asset object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// Identifier of a vesting balance object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VestingBalanceId(pub u64);

/// Identifier of a committee member object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommitteeMemberId(pub u64);

/// Identifier of a validator object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ValidatorId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account:{}", self.0)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset:{}", self.0)
    }
}

impl fmt::Display for VestingBalanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vesting:{}", self.0)
    }
}

impl fmt::Display for CommitteeMemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "committee-member:{}", self.0)
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validator:{}", self.0)
    }
}

// ── Chain-intrinsic accounts ─────────────────────────────────────────

/// The committee account. Pays no cashback; absorbs to the reserve pool.
pub const COMMITTEE_ACCOUNT: AccountId = AccountId(0);
/// The validator funding account.
pub const VALIDATOR_ACCOUNT: AccountId = AccountId(1);
/// The relaxed committee account.
pub const RELAXED_COMMITTEE_ACCOUNT: AccountId = AccountId(2);
/// The null account. Funds sent here are unrecoverable.
pub const NULL_ACCOUNT: AccountId = AccountId(3);
/// The temporary account used for transient authority.
pub const TEMP_ACCOUNT: AccountId = AccountId(4);

/// Whether an account id is one of the chain-intrinsic reserved accounts.
pub fn is_reserved_account(id: AccountId) -> bool {
    id == COMMITTEE_ACCOUNT
        || id == VALIDATOR_ACCOUNT
        || id == RELAXED_COMMITTEE_ACCOUNT
        || id == NULL_ACCOUNT
        || id == TEMP_ACCOUNT
}

// ── Core asset ───────────────────────────────────────────────────────

/// The core asset id. Fees are ultimately denominated in this asset.
pub const CORE_ASSET: AssetId = AssetId(0);
/// Decimal precision of the core asset.
pub const CORE_PRECISION: u8 = 5;
/// One whole unit of the core asset in smallest units.
pub const CORE_UNIT: i64 = 100_000;

// ── Protocol limits ──────────────────────────────────────────────────

/// 100% expressed in the fixed-point percentage scale.
pub const PERCENT_100: u32 = 10_000;
/// Maximum share supply of any asset.
pub const MAX_SHARE_SUPPLY: i64 = 1_000_000_000_000_000;
/// Maximum length of a url field, in bytes.
pub const MAX_URL_LENGTH: usize = 127;
