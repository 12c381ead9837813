//! Dividend evaluator: fan a payout out to every qualifying holder of the
//! shares asset.

use crate::error::EvaluationError;
use crate::evaluator::OperationEvaluator;
use stele_ops::{DividendOperation, Operation};
use stele_types::{AccountId, AssetAmount};

/// Holders of the shares asset meeting the minimum, in owner order.
fn qualifying_holders(
    ev: &OperationEvaluator,
    o: &DividendOperation,
) -> Vec<(AccountId, i64)> {
    ev.db
        .store
        .balances_of_asset(o.shares_asset)
        .filter(|row| row.amount >= o.min_shares as i64)
        .map(|row| (row.owner, row.amount))
        .collect()
}

fn total_payout(holders: &[(AccountId, i64)], value_per_shares: u16) -> Result<i64, EvaluationError> {
    let mut total: i64 = 0;
    for (_, shares) in holders {
        let payout = shares
            .checked_mul(value_per_shares as i64)
            .ok_or(EvaluationError::Overflow)?;
        total = total.checked_add(payout).ok_or(EvaluationError::Overflow)?;
    }
    Ok(total)
}

pub(crate) fn evaluate_dividend(
    ev: &mut OperationEvaluator,
    op: &Operation,
    o: &DividendOperation,
) -> Result<(), EvaluationError> {
    ev.db.store.account(o.issuer)?;
    ev.db.store.asset(o.shares_asset)?;
    let dividend_asset = ev.db.store.asset(o.dividend_asset)?.clone();

    let holders = qualifying_holders(ev, o);
    let base_fee = ev.db.fee_schedule.calculate_fee(op, &dividend_asset);
    let required = base_fee
        .checked_add(ev.db.fee_schedule.dividend_per_shareholder_fee(holders.len()))
        .ok_or(EvaluationError::Overflow)?;
    ev.fee.check_required_fee(required)?;

    let total = total_payout(&holders, o.value_per_shares)?;
    let balance = ev.db.get_balance(o.issuer, o.dividend_asset);
    if balance.amount < total {
        return Err(ev.db.insufficient_balance(
            o.issuer,
            balance,
            AssetAmount::new(total, o.dividend_asset),
        ));
    }
    Ok(())
}

pub(crate) fn apply_dividend(
    ev: &mut OperationEvaluator,
    o: &DividendOperation,
) -> Result<(), EvaluationError> {
    // snapshot the holder set before the fee debit can disturb it
    let holders = qualifying_holders(ev, o);
    ev.fee.charge_flat(ev.db)?;
    for (holder, shares) in holders {
        let payout = shares
            .checked_mul(o.value_per_shares as i64)
            .ok_or(EvaluationError::Overflow)?;
        ev.db
            .adjust_balance(o.issuer, AssetAmount::new(-payout, o.dividend_asset))?;
        ev.db
            .adjust_balance(holder, AssetAmount::new(payout, o.dividend_asset))?;
    }
    Ok(())
}
