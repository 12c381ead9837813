//! The fee pipeline.
//!
//! `prepare_*` methods are pure reads that populate evaluator-scoped state;
//! the `charge_*` methods mutate during apply. A fee declared in a non-core
//! asset converts through the asset's fee pool at its core exchange rate;
//! shortfalls against the required fee can be covered from accumulated
//! coin-seconds, capped per membership tier and per operation.

use crate::database::Database;
use crate::error::EvaluationError;
use stele_ops::Operation;
use stele_types::ids::CORE_ASSET;
use stele_types::{AccountId, AssetAmount, AssetId};
use tracing::debug;

/// Evaluator-scoped fee state, threaded from preparation through charging.
#[derive(Clone, Debug)]
pub struct FeeContext {
    /// The fee exactly as declared by the operation.
    pub fee_from_account: AssetAmount,
    /// Core-denominated value of the declared fee.
    pub core_fee_paid: i64,
    pub fee_payer: AccountId,
    pub fee_asset: AssetId,
    /// Coin-seconds available to the payer at preparation time.
    pub coin_seconds_earned: u128,
    /// Coin-seconds consumed per fee unit for the payer's tier.
    pub coin_seconds_as_fees_rate: i64,
    /// Credit usable by this particular operation.
    pub max_fees_payable_with_coin_seconds: i64,
    /// Shortfall actually covered from coin-seconds, set during evaluate.
    pub fees_paid_with_coin_seconds: i64,
}

impl Default for FeeContext {
    fn default() -> Self {
        Self {
            fee_from_account: AssetAmount::core(0),
            core_fee_paid: 0,
            fee_payer: AccountId(0),
            fee_asset: CORE_ASSET,
            coin_seconds_earned: 0,
            coin_seconds_as_fees_rate: 0,
            max_fees_payable_with_coin_seconds: 0,
            fees_paid_with_coin_seconds: 0,
        }
    }
}

impl FeeContext {
    /// Validate the declared fee and compute its core value. Pure.
    ///
    /// Non-core fees convert at the asset's core exchange rate and require
    /// the asset's fee pool to hold at least the core equivalent. Past the
    /// whitelist-tightening fork the payer must be authorized for the fee
    /// asset.
    pub fn prepare_fee(
        &mut self,
        db: &Database,
        payer: AccountId,
        fee: AssetAmount,
    ) -> Result<(), EvaluationError> {
        if fee.amount < 0 {
            return Err(stele_ops::ValidationError::NegativeFee.into());
        }
        self.fee_from_account = fee;
        self.fee_payer = payer;
        self.fee_asset = fee.asset_id;

        let payer_account = db.store.account(payer)?;
        let fee_asset = db.store.asset(fee.asset_id)?;

        if db.forks().whitelist_tightened && !fee_asset.is_authorized(payer) {
            return Err(EvaluationError::UnauthorizedFeeAsset {
                account: payer,
                name: payer_account.name.clone(),
                asset: fee_asset.id,
                symbol: fee_asset.symbol.clone(),
            });
        }

        if fee.asset_id == CORE_ASSET {
            self.core_fee_paid = fee.amount;
        } else {
            let fee_from_pool = fee_asset
                .options
                .core_exchange_rate
                .convert(fee)
                .ok_or(EvaluationError::Overflow)?;
            if fee_from_pool.asset_id != CORE_ASSET {
                return Err(EvaluationError::InvalidExchangeRate { asset: fee.asset_id });
            }
            self.core_fee_paid = fee_from_pool.amount;
            let dyn_data = db.store.dynamic_data(fee.asset_id)?;
            if dyn_data.fee_pool < self.core_fee_paid {
                return Err(EvaluationError::InsufficientFeePool {
                    asset: fee.asset_id,
                    symbol: fee_asset.symbol.clone(),
                    fee_pool: db.to_pretty_string(AssetAmount::core(dyn_data.fee_pool)),
                    required: db.to_pretty_string(fee_from_pool),
                    fee: db.to_pretty_string(fee),
                });
            }
        }
        Ok(())
    }

    /// Compute how much fee credit the payer's coin-seconds can cover for
    /// this operation. Pure.
    pub fn prepare_fee_from_coin_seconds(
        &mut self,
        db: &Database,
        op: &Operation,
    ) -> Result<(), EvaluationError> {
        let options = &db.parameters.coin_seconds_as_fees;
        let max_op_fee = options
            .max_fee_by_operation
            .get(op.tag())
            .copied()
            .unwrap_or(0);
        debug!(tag = op.tag(), max_op_fee, "coin-seconds fee ceiling");
        if max_op_fee <= 0 {
            return Ok(());
        }

        let now = db.head_block_time();
        let core_balance = db.get_balance(self.fee_payer, CORE_ASSET);
        let tier = db.store.account(self.fee_payer)?.membership(now);
        let stats = db.store.statistics(self.fee_payer)?;
        self.coin_seconds_earned = stats.compute_coin_seconds_earned(core_balance.amount, now);
        if self.coin_seconds_earned == 0 {
            return Ok(());
        }

        let rate = options.rate_by_membership[tier.index()];
        if rate <= 0 {
            return Ok(());
        }
        self.coin_seconds_as_fees_rate = rate;

        let max_allowed = options.max_accumulated_by_membership[tier.index()];
        let credit_raw = self.coin_seconds_earned / rate as u128;
        let credit = if credit_raw > max_allowed.max(0) as u128 {
            // over-accumulated credit ratchets back to the cap
            self.coin_seconds_earned = max_allowed.max(0) as u128 * rate as u128;
            max_allowed
        } else {
            credit_raw as i64
        };
        self.max_fees_payable_with_coin_seconds = credit.min(max_op_fee);
        debug!(
            max_payable = self.max_fees_payable_with_coin_seconds,
            earned = %self.coin_seconds_earned,
            "coin-seconds fee credit"
        );
        Ok(())
    }

    /// Book the collected fee against the asset's dynamic data.
    ///
    /// A non-core fee accumulates in its own asset and drains the fee pool
    /// by the core equivalent; a core fee accumulates directly.
    pub fn convert_fee(&self, db: &mut Database) -> Result<(), EvaluationError> {
        if self.fee_asset != CORE_ASSET {
            let (amount, core) = (self.fee_from_account.amount, self.core_fee_paid);
            db.store.modify_dynamic_data(self.fee_asset, |d| {
                d.accumulated_fees += amount;
                d.fee_pool -= core;
            })?;
        } else {
            let core = self.core_fee_paid;
            db.store
                .modify_dynamic_data(CORE_ASSET, |d| d.accumulated_fees += core)?;
        }
        Ok(())
    }

    /// Charge the fee with flat cashback accumulation: debit the declared
    /// fee, book it, route it toward the cashback threshold, and consume
    /// any coin-seconds shortfall cover.
    pub fn charge_flat(&self, db: &mut Database) -> Result<(), EvaluationError> {
        db.adjust_balance(self.fee_payer, -self.fee_from_account)?;
        self.convert_fee(db)?;
        let threshold = db.parameters.cashback_vesting_threshold;
        let core_fee = self.core_fee_paid;
        db.store
            .modify_statistics(self.fee_payer, |s| s.pay_fee(core_fee, threshold))?;
        self.pay_fee_with_coin_seconds(db)
    }

    /// Charge the fee under percentage mode: the portion up to
    /// `scaled_min_fee` is consumed directly by the network, the excess
    /// follows cashback rules.
    pub fn charge_pre_split_network(
        &self,
        db: &mut Database,
        scaled_min_fee: i64,
    ) -> Result<(), EvaluationError> {
        db.adjust_balance(self.fee_payer, -self.fee_from_account)?;
        self.convert_fee(db)?;
        let threshold = db.parameters.cashback_vesting_threshold;
        let core_fee = self.core_fee_paid;
        db.store.modify_statistics(self.fee_payer, |s| {
            s.pay_fee_pre_split_network(core_fee, threshold, scaled_min_fee)
        })?;
        self.pay_fee_with_coin_seconds(db)
    }

    /// Consume the coin-seconds that covered the fee shortfall.
    pub fn pay_fee_with_coin_seconds(&self, db: &mut Database) -> Result<(), EvaluationError> {
        if self.fees_paid_with_coin_seconds <= 0 {
            return Ok(());
        }
        let consumed =
            self.fees_paid_with_coin_seconds as u128 * self.coin_seconds_as_fees_rate as u128;
        let remaining = self.coin_seconds_earned.saturating_sub(consumed);
        let now = db.head_block_time();
        db.store.modify_statistics(self.fee_payer, |s| {
            s.set_coin_seconds_earned(remaining, now)
        })?;
        Ok(())
    }

    /// Sufficiency check against the required core fee; records how much of
    /// the shortfall coin-seconds must cover.
    pub fn check_required_fee(&mut self, required_core_fee: i64) -> Result<(), EvaluationError> {
        if self.core_fee_paid + self.max_fees_payable_with_coin_seconds < required_core_fee {
            return Err(EvaluationError::InsufficientFee {
                core_fee_paid: self.core_fee_paid,
                payable_from_coin_seconds: self.max_fees_payable_with_coin_seconds,
                required: required_core_fee,
            });
        }
        if self.core_fee_paid < required_core_fee {
            self.fees_paid_with_coin_seconds = required_core_fee - self.core_fee_paid;
        }
        Ok(())
    }
}
