//! The operation dispatcher.
//!
//! Every operation runs the same two-phase pipeline: stateless validation,
//! fee preparation (declared fee plus coin-seconds credit), a pure
//! `evaluate`, and, when executing for real, a mutating `apply`. Any
//! failure during `evaluate` aborts before state is touched; a failure
//! inside `apply` is fatal for the operation and surfaces to the host.

use crate::database::Database;
use crate::error::EvaluationError;
use crate::fee::FeeContext;
use crate::{committee, dividend, transfer};
use stele_ops::Operation;
use stele_types::ids::CORE_ASSET;

/// Evaluation state for a single operation: the chain database plus the
/// fee context threaded through the pipeline.
pub struct OperationEvaluator<'a> {
    pub db: &'a mut Database,
    pub fee: FeeContext,
}

impl<'a> OperationEvaluator<'a> {
    pub fn new(db: &'a mut Database) -> Self {
        Self {
            db,
            fee: FeeContext::default(),
        }
    }

    /// Run the pipeline. With `apply` false this is a pure simulation.
    pub fn start_evaluate(&mut self, op: &Operation, apply: bool) -> Result<(), EvaluationError> {
        op.validate()?;
        self.fee.prepare_fee(self.db, op.fee_payer(), op.fee())?;
        self.fee.prepare_fee_from_coin_seconds(self.db, op)?;
        self.check_generic_fee(op)?;
        self.evaluate(op)?;
        if apply {
            self.apply(op)?;
        }
        Ok(())
    }

    /// Fee sufficiency for operations whose evaluators do not fold the
    /// check into their own logic. Transfers need the moved asset's fee
    /// mode and the dividend needs its holder count, so they check inside
    /// `evaluate`.
    fn check_generic_fee(&mut self, op: &Operation) -> Result<(), EvaluationError> {
        match op {
            Operation::Transfer(_) | Operation::TransferV2(_) | Operation::Dividend(_) => Ok(()),
            Operation::OverrideTransfer(o) => {
                let asset = self.db.store.asset(o.amount.asset_id)?.clone();
                let required = self.db.fee_schedule.calculate_fee(op, &asset);
                self.fee.check_required_fee(required)
            }
            _ => {
                let core = self.db.store.asset(CORE_ASSET)?.clone();
                let required = self.db.fee_schedule.calculate_fee(op, &core);
                self.fee.check_required_fee(required)
            }
        }
    }

    fn evaluate(&mut self, op: &Operation) -> Result<(), EvaluationError> {
        match op {
            Operation::Transfer(o) => transfer::evaluate_transfer(self, op, o),
            Operation::TransferV2(o) => transfer::evaluate_transfer_v2(self, op, o),
            Operation::OverrideTransfer(o) => transfer::evaluate_override_transfer(self, o),
            Operation::CommitteeMemberCreate(o) => committee::evaluate_create(self, o),
            Operation::CommitteeMemberUpdate(o) => committee::evaluate_update(self, o),
            Operation::UpdateGlobalParameters(o) => committee::evaluate_update_parameters(self, o),
            Operation::UpdateCoreAsset(o) => committee::evaluate_update_core_asset(self, o),
            Operation::Dividend(o) => dividend::evaluate_dividend(self, op, o),
        }
    }

    fn apply(&mut self, op: &Operation) -> Result<(), EvaluationError> {
        match op {
            Operation::Transfer(o) => transfer::apply_transfer(self, o),
            Operation::TransferV2(o) => transfer::apply_transfer_v2(self, o),
            Operation::OverrideTransfer(o) => transfer::apply_override_transfer(self, o),
            Operation::CommitteeMemberCreate(o) => committee::apply_create(self, o),
            Operation::CommitteeMemberUpdate(o) => committee::apply_update(self, o),
            Operation::UpdateGlobalParameters(o) => committee::apply_update_parameters(self, o),
            Operation::UpdateCoreAsset(o) => committee::apply_update_core_asset(self, o),
            Operation::Dividend(o) => dividend::apply_dividend(self, o),
        }
    }
}

/// Evaluate one operation against the database, optionally applying it.
pub fn start_evaluate(
    db: &mut Database,
    op: &Operation,
    apply: bool,
) -> Result<(), EvaluationError> {
    OperationEvaluator::new(db).start_evaluate(op, apply)
}
