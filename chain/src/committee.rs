//! Committee member evaluators and committee-only parameter updates.
//!
//! Only the balance effects and record mutations live here; proposal
//! wrapping and the review period are enforced by the surrounding
//! transaction machinery.

use crate::error::EvaluationError;
use crate::evaluator::OperationEvaluator;
use stele_ops::{
    CommitteeMemberCreateOperation, CommitteeMemberUpdateOperation, UpdateCoreAssetOperation,
    UpdateGlobalParametersOperation,
};
use stele_types::ids::CORE_ASSET;
use stele_types::CommitteeMember;

pub(crate) fn evaluate_create(
    ev: &mut OperationEvaluator,
    o: &CommitteeMemberCreateOperation,
) -> Result<(), EvaluationError> {
    let account = ev.db.store.account(o.committee_member_account)?;
    if !account.is_lifetime_member() {
        return Err(EvaluationError::LifetimeMembershipRequired {
            account: o.committee_member_account,
        });
    }
    Ok(())
}

pub(crate) fn apply_create(
    ev: &mut OperationEvaluator,
    o: &CommitteeMemberCreateOperation,
) -> Result<(), EvaluationError> {
    ev.fee.charge_flat(ev.db)?;
    let id = ev.db.store.allocate_committee_member_id();
    ev.db.store.insert_committee_member(CommitteeMember {
        id,
        committee_member_account: o.committee_member_account,
        url: o.url.clone(),
    })?;
    Ok(())
}

pub(crate) fn evaluate_update(
    ev: &mut OperationEvaluator,
    o: &CommitteeMemberUpdateOperation,
) -> Result<(), EvaluationError> {
    let member = ev.db.store.committee_member(o.committee_member)?;
    if member.committee_member_account != o.committee_member_account {
        return Err(EvaluationError::CommitteeMemberMismatch {
            committee_member: o.committee_member,
            account: o.committee_member_account,
        });
    }
    Ok(())
}

pub(crate) fn apply_update(
    ev: &mut OperationEvaluator,
    o: &CommitteeMemberUpdateOperation,
) -> Result<(), EvaluationError> {
    ev.fee.charge_flat(ev.db)?;
    if let Some(url) = &o.new_url {
        let url = url.clone();
        ev.db
            .store
            .modify_committee_member(o.committee_member, |m| m.url = url)?;
    }
    Ok(())
}

pub(crate) fn evaluate_update_parameters(
    _ev: &mut OperationEvaluator,
    _o: &UpdateGlobalParametersOperation,
) -> Result<(), EvaluationError> {
    // structural validation already ran; the proposal wrapper is external
    Ok(())
}

pub(crate) fn apply_update_parameters(
    ev: &mut OperationEvaluator,
    o: &UpdateGlobalParametersOperation,
) -> Result<(), EvaluationError> {
    ev.fee.charge_flat(ev.db)?;
    // staged until the next maintenance boundary
    ev.db.pending_parameters = Some(o.new_parameters.clone());
    Ok(())
}

pub(crate) fn evaluate_update_core_asset(
    _ev: &mut OperationEvaluator,
    _o: &UpdateCoreAssetOperation,
) -> Result<(), EvaluationError> {
    Ok(())
}

pub(crate) fn apply_update_core_asset(
    ev: &mut OperationEvaluator,
    o: &UpdateCoreAssetOperation,
) -> Result<(), EvaluationError> {
    ev.fee.charge_flat(ev.db)?;
    let new_options = o.new_options.clone();
    ev.db.store.modify_asset(CORE_ASSET, |asset| {
        // only these options of the core asset are committee-tunable;
        // everything else in new_options is ignored
        asset.options.market_fee_percent = new_options.market_fee_percent;
        asset.options.max_market_fee = new_options.max_market_fee;
        asset.options.transfer_fee_mode = new_options.transfer_fee_mode;
    })?;
    Ok(())
}
