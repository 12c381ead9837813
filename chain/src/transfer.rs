//! Transfer evaluators: first and second generation, and the issuer
//! override.

use crate::error::EvaluationError;
use crate::evaluator::OperationEvaluator;
use stele_ops::{Operation, OverrideTransferOperation, TransferOperation, TransferV2Operation};
use stele_types::{AccountId, AssetAmount, AssetId, TransferFeeMode};

/// Checks shared by both transfer generations: fee sufficiency, whitelist
/// rules, the transfer-restricted flag, and sender balance.
fn transfer_checks(
    ev: &mut OperationEvaluator,
    op: &Operation,
    from: AccountId,
    to: AccountId,
    amount: AssetAmount,
    fee_asset: AssetId,
) -> Result<(), EvaluationError> {
    let db = &*ev.db;
    db.store.account(from)?;
    db.store.account(to)?;
    let asset_type = db.store.asset(amount.asset_id)?.clone();
    let fee_asset_type = db.store.asset(fee_asset)?.clone();

    let required_core_fee = db.fee_schedule.calculate_fee(op, &asset_type);
    ev.fee.check_required_fee(required_core_fee)?;

    let db = &*ev.db;
    if asset_type.options.flags.white_list {
        if !asset_type.is_authorized(from) {
            return Err(EvaluationError::TransferFromNotWhitelisted {
                from,
                asset: asset_type.id,
            });
        }
        if !asset_type.is_authorized(to) {
            return Err(EvaluationError::TransferToNotWhitelisted {
                to,
                asset: asset_type.id,
            });
        }
    }

    // legacy rule, retired by the tightening fork: a whitelisted fee asset
    // drags in a sender check against the transferred asset. Afterwards the
    // payer is vetted for the fee asset during fee preparation instead.
    if !db.forks().whitelist_tightened
        && fee_asset_type.options.flags.white_list
        && !asset_type.is_authorized(from)
    {
        return Err(EvaluationError::TransferFromNotWhitelisted {
            from,
            asset: asset_type.id,
        });
    }

    if asset_type.is_transfer_restricted() && from != asset_type.issuer && to != asset_type.issuer
    {
        return Err(EvaluationError::TransferRestricted {
            asset: asset_type.id,
        });
    }

    let balance = db.get_balance(from, amount.asset_id);
    if balance.amount < amount.amount {
        return Err(db.insufficient_balance(from, balance, amount));
    }
    Ok(())
}

pub(crate) fn evaluate_transfer(
    ev: &mut OperationEvaluator,
    op: &Operation,
    o: &TransferOperation,
) -> Result<(), EvaluationError> {
    transfer_checks(ev, op, o.from, o.to, o.amount, o.fee.asset_id)
}

/// First-generation apply: balances move first, the fee is charged after.
pub(crate) fn apply_transfer(
    ev: &mut OperationEvaluator,
    o: &TransferOperation,
) -> Result<(), EvaluationError> {
    ev.db.adjust_balance(o.from, -o.amount)?;
    ev.db.adjust_balance(o.to, o.amount)?;
    ev.fee.charge_flat(ev.db)
}

pub(crate) fn evaluate_transfer_v2(
    ev: &mut OperationEvaluator,
    op: &Operation,
    o: &TransferV2Operation,
) -> Result<(), EvaluationError> {
    if !ev.db.forks().bsip10 {
        return Err(EvaluationError::PrecondHardfork { fork: "bsip10" });
    }
    transfer_checks(ev, op, o.from, o.to, o.amount, o.fee.asset_id)
}

/// Second-generation apply: the fee is charged before the balances move,
/// because in percentage mode it depends on the transferred amount.
pub(crate) fn apply_transfer_v2(
    ev: &mut OperationEvaluator,
    o: &TransferV2Operation,
) -> Result<(), EvaluationError> {
    let asset_type = ev.db.store.asset(o.amount.asset_id)?.clone();
    match asset_type.options.transfer_fee_mode {
        TransferFeeMode::Flat => ev.fee.charge_flat(ev.db)?,
        TransferFeeMode::PercentageSimple => {
            let min_fee = ev.db.fee_schedule.parameters.transfer_v2.percentage_min_fee;
            let scaled_min_fee = ev.db.fee_schedule.scale_fee(min_fee as u128);
            ev.fee.charge_pre_split_network(ev.db, scaled_min_fee)?;
        }
    }
    ev.db.adjust_balance(o.from, -o.amount)?;
    ev.db.adjust_balance(o.to, o.amount)
}

pub(crate) fn evaluate_override_transfer(
    ev: &mut OperationEvaluator,
    o: &OverrideTransferOperation,
) -> Result<(), EvaluationError> {
    let db = &*ev.db;
    let asset_type = db.store.asset(o.amount.asset_id)?.clone();
    if !asset_type.can_override() {
        return Err(EvaluationError::OverrideNotPermitted {
            asset: asset_type.id,
        });
    }
    if asset_type.issuer != o.issuer {
        return Err(EvaluationError::OverrideNotPermitted {
            asset: asset_type.id,
        });
    }

    db.store.account(o.from)?;
    db.store.account(o.to)?;
    let fee_asset_type = db.store.asset(o.fee.asset_id)?.clone();

    // the issuer overrides transfer restriction, never the whitelist
    if asset_type.options.flags.white_list {
        if !asset_type.is_authorized(o.from) {
            return Err(EvaluationError::TransferFromNotWhitelisted {
                from: o.from,
                asset: asset_type.id,
            });
        }
        if !asset_type.is_authorized(o.to) {
            return Err(EvaluationError::TransferToNotWhitelisted {
                to: o.to,
                asset: asset_type.id,
            });
        }
    }

    if !db.forks().whitelist_tightened
        && fee_asset_type.options.flags.white_list
        && !asset_type.is_authorized(o.from)
    {
        return Err(EvaluationError::TransferFromNotWhitelisted {
            from: o.from,
            asset: asset_type.id,
        });
    }

    let balance = db.get_balance(o.from, o.amount.asset_id);
    if balance.amount < o.amount.amount {
        return Err(db.insufficient_balance(o.from, balance, o.amount));
    }
    Ok(())
}

pub(crate) fn apply_override_transfer(
    ev: &mut OperationEvaluator,
    o: &OverrideTransferOperation,
) -> Result<(), EvaluationError> {
    ev.db.adjust_balance(o.from, -o.amount)?;
    ev.db.adjust_balance(o.to, o.amount)?;
    ev.fee.charge_flat(ev.db)
}
