//! Asset objects, their options, and per-asset dynamic data.

use crate::amount::Price;
use crate::ids::{AccountId, AssetId, CORE_ASSET};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How transfer fees for this asset are computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferFeeMode {
    /// A flat core fee per transfer.
    #[default]
    Flat,
    /// A percentage of the transferred amount, clamped between a minimum
    /// and maximum.
    PercentageSimple,
}

/// Permission flags carried by an asset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFlags {
    /// Holders must be on the asset's whitelist.
    pub white_list: bool,
    /// Transfers must involve the issuer on one side.
    pub transfer_restricted: bool,
    /// The issuer may forcibly move balances between holders.
    pub override_authority: bool,
}

/// Issuer-configured options of an asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetOptions {
    /// Rate used to convert fees paid in this asset into core.
    pub core_exchange_rate: Price,
    pub flags: AssetFlags,
    /// Market fee charged on fills, in units of `PERCENT_100`.
    pub market_fee_percent: u16,
    /// Upper bound on the market fee, in smallest units.
    pub max_market_fee: i64,
    pub transfer_fee_mode: TransferFeeMode,
    /// Accounts authorized to hold the asset. Empty means everyone.
    pub whitelist: BTreeSet<AccountId>,
    /// Accounts barred from holding the asset.
    pub blacklist: BTreeSet<AccountId>,
}

impl AssetOptions {
    /// Options for an unrestricted asset at the given core exchange rate.
    pub fn unrestricted(core_exchange_rate: Price) -> Self {
        Self {
            core_exchange_rate,
            flags: AssetFlags::default(),
            market_fee_percent: 0,
            max_market_fee: 0,
            transfer_fee_mode: TransferFeeMode::Flat,
            whitelist: BTreeSet::new(),
            blacklist: BTreeSet::new(),
        }
    }
}

/// An asset registered on the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetObject {
    pub id: AssetId,
    pub symbol: String,
    /// Number of decimal digits in one whole unit.
    pub precision: u8,
    pub issuer: AccountId,
    pub options: AssetOptions,
}

impl AssetObject {
    pub fn is_core(&self) -> bool {
        self.id == CORE_ASSET
    }

    pub fn is_transfer_restricted(&self) -> bool {
        self.options.flags.transfer_restricted
    }

    pub fn can_override(&self) -> bool {
        self.options.flags.override_authority
    }

    /// Whether the account may hold or receive this asset under the
    /// whitelist and blacklist.
    pub fn is_authorized(&self, account: AccountId) -> bool {
        if self.options.blacklist.contains(&account) {
            return false;
        }
        self.options.whitelist.is_empty() || self.options.whitelist.contains(&account)
    }

    /// Decimal-shifted rendering of an amount of this asset, e.g. `1.25000 STL`.
    pub fn amount_to_pretty_string(&self, amount: i64) -> String {
        let unit = 10i64.checked_pow(self.precision as u32).unwrap_or(1);
        let sign = if amount < 0 { "-" } else { "" };
        let magnitude = amount.unsigned_abs();
        let unit = unit as u64;
        if self.precision == 0 {
            return format!("{sign}{magnitude} {}", self.symbol);
        }
        format!(
            "{sign}{}.{:0width$} {}",
            magnitude / unit,
            magnitude % unit,
            self.symbol,
            width = self.precision as usize
        )
    }
}

/// Per-asset mutable counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDynamicData {
    pub asset: AssetId,
    /// Units currently in circulation. Decreases when the reserve pool
    /// absorbs funds.
    pub current_supply: i64,
    /// Fees collected in this asset since the last maintenance interval.
    pub accumulated_fees: i64,
    /// Core-asset reserve backing fee conversion for this asset.
    pub fee_pool: i64,
}

impl AssetDynamicData {
    pub fn new(asset: AssetId) -> Self {
        Self {
            asset,
            current_supply: 0,
            accumulated_fees: 0,
            fee_pool: 0,
        }
    }
}
