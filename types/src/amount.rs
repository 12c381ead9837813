//! Asset amounts and prices.
//!
//! Amounts are signed 64-bit integers in an asset's smallest unit. Negative
//! deltas are debits when applied against the ledger. Price arithmetic goes
//! through u128 intermediates to avoid overflow, rounding down.

use crate::ids::AssetId;
use serde::{Deserialize, Serialize};
use std::ops::Neg;

/// A quantity of a specific asset, in smallest units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAmount {
    pub amount: i64,
    pub asset_id: AssetId,
}

impl AssetAmount {
    pub fn new(amount: i64, asset_id: AssetId) -> Self {
        Self { amount, asset_id }
    }

    /// A core-asset amount.
    pub fn core(amount: i64) -> Self {
        Self {
            amount,
            asset_id: crate::ids::CORE_ASSET,
        }
    }

    pub fn is_core(&self) -> bool {
        self.asset_id == crate::ids::CORE_ASSET
    }

    /// Add an amount of the same asset; `None` on asset mismatch or overflow.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        if self.asset_id != other.asset_id {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self { amount, ..self })
    }
}

impl Neg for AssetAmount {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            amount: -self.amount,
            asset_id: self.asset_id,
        }
    }
}

/// An exchange rate between two assets, expressed as the pair
/// `base : quote`. Asset core exchange rates have the asset as base and the
/// core asset as quote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub base: AssetAmount,
    pub quote: AssetAmount,
}

impl Price {
    pub fn new(base: AssetAmount, quote: AssetAmount) -> Self {
        Self { base, quote }
    }

    /// The identity rate for an asset against the core, 1:1.
    pub fn unit_of(asset_id: AssetId) -> Self {
        Self {
            base: AssetAmount::new(1, asset_id),
            quote: AssetAmount::core(1),
        }
    }

    /// Both sides must be positive for the rate to be usable.
    pub fn is_well_formed(&self) -> bool {
        self.base.amount > 0 && self.quote.amount > 0 && self.base.asset_id != self.quote.asset_id
    }

    /// Convert an amount of the base asset into the quote asset (or the
    /// reverse), rounding down. `None` when the amount's asset matches
    /// neither side, the rate is malformed, or the result overflows i64.
    pub fn convert(&self, a: AssetAmount) -> Option<AssetAmount> {
        if !self.is_well_formed() || a.amount < 0 {
            return None;
        }
        let (num, den, out) = if a.asset_id == self.base.asset_id {
            (self.quote.amount, self.base.amount, self.quote.asset_id)
        } else if a.asset_id == self.quote.asset_id {
            (self.base.amount, self.quote.amount, self.base.asset_id)
        } else {
            return None;
        };
        let result = (a.amount as u128).checked_mul(num as u128)? / den as u128;
        if result > i64::MAX as u128 {
            return None;
        }
        Some(AssetAmount::new(result as i64, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{AssetId, CORE_ASSET};

    #[test]
    fn convert_applies_rate_both_ways() {
        let usd = AssetId(1);
        let rate = Price::new(AssetAmount::new(2, usd), AssetAmount::core(3));
        let core = rate.convert(AssetAmount::new(10, usd)).unwrap();
        assert_eq!(core, AssetAmount::core(15));
        let back = rate.convert(AssetAmount::core(15)).unwrap();
        assert_eq!(back, AssetAmount::new(10, usd));
    }

    #[test]
    fn convert_rounds_down() {
        let usd = AssetId(1);
        let rate = Price::new(AssetAmount::new(3, usd), AssetAmount::core(1));
        assert_eq!(
            rate.convert(AssetAmount::new(5, usd)).unwrap(),
            AssetAmount::core(1)
        );
    }

    #[test]
    fn convert_rejects_foreign_asset_and_malformed_rate() {
        let usd = AssetId(1);
        let eur = AssetId(2);
        let rate = Price::new(AssetAmount::new(1, usd), AssetAmount::core(1));
        assert!(rate.convert(AssetAmount::new(5, eur)).is_none());
        let broken = Price::new(AssetAmount::new(0, usd), AssetAmount::core(1));
        assert!(broken.convert(AssetAmount::new(5, usd)).is_none());
    }

    #[test]
    fn convert_detects_overflow() {
        let usd = AssetId(1);
        let rate = Price::new(AssetAmount::new(1, usd), AssetAmount::core(i64::MAX));
        assert!(rate.convert(AssetAmount::new(i64::MAX, usd)).is_none());
        assert_eq!(CORE_ASSET, AssetId(0));
    }
}
