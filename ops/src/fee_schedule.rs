//! The fee schedule: per-operation fee parameters and required-fee
//! computation.
//!
//! All required fees are core-denominated. The schedule's `scale` lets the
//! committee tune every fee proportionally without touching individual
//! parameters.

use crate::operation::Operation;
use serde::{Deserialize, Serialize};
use stele_types::ids::{CORE_UNIT, PERCENT_100};
use stele_types::{AssetAmount, AssetObject, TransferFeeMode};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFeeParams {
    pub fee: u64,
    /// Charged per kilobyte of memo.
    pub price_per_kbyte: u32,
}

impl Default for TransferFeeParams {
    fn default() -> Self {
        Self {
            fee: (20 * CORE_UNIT / 1_000) as u64,
            price_per_kbyte: (10 * CORE_UNIT / 1_000) as u32,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferV2FeeParams {
    /// Used when the transferred asset charges flat transfer fees.
    pub flat_fee: u64,
    /// Percentage of the transferred amount, in units of `PERCENT_100`.
    pub percentage: u16,
    /// Lower bound of the percentage fee, pre-scale.
    pub percentage_min_fee: u64,
    /// Upper bound of the percentage fee, pre-scale.
    pub percentage_max_fee: u64,
    pub price_per_kbyte: u32,
}

impl Default for TransferV2FeeParams {
    fn default() -> Self {
        Self {
            flat_fee: (20 * CORE_UNIT / 1_000) as u64,
            percentage: 10,
            percentage_min_fee: (CORE_UNIT / 100) as u64,
            percentage_max_fee: (30 * CORE_UNIT) as u64,
            price_per_kbyte: (10 * CORE_UNIT / 1_000) as u32,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatFeeParams {
    pub fee: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendFeeParams {
    pub fee: u64,
    /// Additive fee per qualifying shareholder.
    pub fee_per_shareholder: u64,
    /// Charged per kilobyte of description.
    pub price_per_kbyte: u32,
}

impl Default for DividendFeeParams {
    fn default() -> Self {
        Self {
            fee: (200 * CORE_UNIT) as u64,
            fee_per_shareholder: (CORE_UNIT / 10) as u64,
            price_per_kbyte: (10 * CORE_UNIT) as u32,
        }
    }
}

/// Fee parameters for every operation kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeParameters {
    pub transfer: TransferFeeParams,
    pub transfer_v2: TransferV2FeeParams,
    pub override_transfer: FlatFeeParams,
    pub committee_member_create: FlatFeeParams,
    pub committee_member_update: FlatFeeParams,
    pub update_global_parameters: FlatFeeParams,
    pub update_core_asset: FlatFeeParams,
    pub dividend: DividendFeeParams,
}

impl Default for FeeParameters {
    fn default() -> Self {
        Self {
            transfer: TransferFeeParams::default(),
            transfer_v2: TransferV2FeeParams::default(),
            override_transfer: FlatFeeParams {
                fee: (20 * CORE_UNIT / 1_000) as u64,
            },
            committee_member_create: FlatFeeParams {
                fee: (5_000 * CORE_UNIT) as u64,
            },
            committee_member_update: FlatFeeParams {
                fee: (20 * CORE_UNIT) as u64,
            },
            update_global_parameters: FlatFeeParams {
                fee: CORE_UNIT as u64,
            },
            update_core_asset: FlatFeeParams { fee: CORE_UNIT as u64 },
            dividend: DividendFeeParams::default(),
        }
    }
}

/// The chain's current fee schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Proportional multiplier over every fee, in units of `PERCENT_100`.
    pub scale: u32,
    pub parameters: FeeParameters,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            scale: PERCENT_100,
            parameters: FeeParameters::default(),
        }
    }
}

impl FeeSchedule {
    /// Required core fee for an operation. `transfer_asset` is the asset
    /// being moved, consulted for the v2 fee mode and its core exchange
    /// rate; pass the core asset for operations that move nothing.
    ///
    /// The dividend's per-shareholder component depends on chain state and
    /// is added by its evaluator on top of this base.
    pub fn calculate_fee(&self, op: &Operation, transfer_asset: &AssetObject) -> i64 {
        let raw: u128 = match op {
            Operation::Transfer(o) => {
                let p = &self.parameters.transfer;
                p.fee as u128 + kbyte_fee(p.price_per_kbyte, memo_len(&o.memo))
            }
            Operation::TransferV2(o) => {
                let p = &self.parameters.transfer_v2;
                let base = match transfer_asset.options.transfer_fee_mode {
                    TransferFeeMode::Flat => p.flat_fee as u128,
                    TransferFeeMode::PercentageSimple => {
                        percentage_fee(p, o.amount, transfer_asset)
                    }
                };
                base + kbyte_fee(p.price_per_kbyte, memo_len(&o.memo))
            }
            Operation::OverrideTransfer(_) => self.parameters.override_transfer.fee as u128,
            Operation::CommitteeMemberCreate(_) => {
                self.parameters.committee_member_create.fee as u128
            }
            Operation::CommitteeMemberUpdate(_) => {
                self.parameters.committee_member_update.fee as u128
            }
            Operation::UpdateGlobalParameters(_) => {
                self.parameters.update_global_parameters.fee as u128
            }
            Operation::UpdateCoreAsset(_) => self.parameters.update_core_asset.fee as u128,
            Operation::Dividend(o) => {
                let p = &self.parameters.dividend;
                p.fee as u128 + kbyte_fee(p.price_per_kbyte, o.description.len())
            }
        };
        self.scale_fee(raw)
    }

    /// The dividend surcharge for a given number of qualifying holders.
    pub fn dividend_per_shareholder_fee(&self, holders: usize) -> i64 {
        let raw = self.parameters.dividend.fee_per_shareholder as u128 * holders as u128;
        self.scale_fee(raw)
    }

    /// Apply the proportional scale, saturating at `i64::MAX`.
    pub fn scale_fee(&self, raw: u128) -> i64 {
        let scaled = raw.saturating_mul(self.scale as u128) / PERCENT_100 as u128;
        scaled.min(i64::MAX as u128) as i64
    }
}

fn memo_len(memo: &Option<crate::transfer::Memo>) -> usize {
    memo.as_ref().map(|m| m.len()).unwrap_or(0)
}

fn kbyte_fee(price_per_kbyte: u32, bytes: usize) -> u128 {
    price_per_kbyte as u128 * bytes as u128 / 1024
}

/// Percentage-mode fee: a fraction of the transferred amount, converted to
/// core when the asset is not core, clamped between the configured bounds.
fn percentage_fee(
    p: &TransferV2FeeParams,
    amount: AssetAmount,
    transfer_asset: &AssetObject,
) -> u128 {
    let core_amount = if amount.is_core() {
        amount.amount.max(0) as u128
    } else {
        transfer_asset
            .options
            .core_exchange_rate
            .convert(amount)
            .map(|a| a.amount.max(0) as u128)
            .unwrap_or(0)
    };
    let fee = core_amount * p.percentage as u128 / PERCENT_100 as u128;
    fee.clamp(p.percentage_min_fee as u128, p.percentage_max_fee as u128)
}
