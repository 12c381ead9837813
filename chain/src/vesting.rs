//! Vesting deposits: lazy fold-or-mint, fee cashback, and validator pay.

use crate::database::Database;
use crate::error::EvaluationError;
use stele_types::ids::CORE_ASSET;
use stele_types::{
    AccountId, AssetAmount, CddVestingPolicy, ValidatorId, VestingBalance, VestingBalanceId,
    VestingPolicy,
};

impl Database {
    /// Deposit into an existing compatible vesting balance, or mint a new
    /// one.
    ///
    /// The referenced record is folded into only when its owner matches,
    /// its policy is CDD, and its vesting period equals
    /// `req_vesting_seconds`; any mismatch mints a fresh record instead.
    /// Returns the new record's id, or `None` when the deposit folded (the
    /// caller keeps its current id).
    pub fn deposit_lazy_vesting(
        &mut self,
        ovbid: Option<VestingBalanceId>,
        amount: i64,
        req_vesting_seconds: u32,
        req_owner: AccountId,
        require_vesting: bool,
    ) -> Result<Option<VestingBalanceId>, EvaluationError> {
        if amount == 0 {
            return Ok(None);
        }
        let now = self.head_block_time();

        if let Some(vbid) = ovbid {
            let compatible = self.store.vesting_balance(vbid).is_some_and(|vbo| {
                vbo.owner == req_owner
                    && match &vbo.policy {
                        VestingPolicy::Cdd(p) => p.vesting_seconds == req_vesting_seconds,
                    }
            });
            if compatible {
                self.store.modify_vesting_balance(vbid, |vb| {
                    if require_vesting {
                        vb.deposit(now, amount);
                    } else {
                        vb.deposit_vested(now, amount);
                    }
                })?;
                return Ok(None);
            }
        }

        let id = self.store.allocate_vesting_balance_id();
        let mut policy = CddVestingPolicy::new(req_vesting_seconds, now);
        if !require_vesting {
            policy.coin_seconds_earned = amount.max(0) as u128 * req_vesting_seconds as u128;
        }
        self.store.insert_vesting_balance(VestingBalance {
            id,
            owner: req_owner,
            balance: AssetAmount::core(amount),
            policy: VestingPolicy::Cdd(policy),
        })?;
        Ok(Some(id))
    }

    /// Credit fee cashback to an account.
    ///
    /// The chain's reserved accounts take no cashback; their share burns to
    /// the reserve pool by shrinking the core supply. Everyone else folds
    /// into their cashback vesting balance, minting it on first use.
    pub fn deposit_cashback(
        &mut self,
        account: AccountId,
        amount: i64,
        require_vesting: bool,
    ) -> Result<(), EvaluationError> {
        if amount == 0 {
            return Ok(());
        }

        if self.is_reserved(account) {
            self.store
                .modify_dynamic_data(CORE_ASSET, |d| d.current_supply -= amount)?;
            return Ok(());
        }

        let cashback_vb = self.store.account(account)?.cashback_vb;
        let period = self.parameters.cashback_vesting_period_seconds;
        let new_vbid =
            self.deposit_lazy_vesting(cashback_vb, amount, period, account, require_vesting)?;
        if let Some(vbid) = new_vbid {
            self.store
                .modify_account(account, |a| a.cashback_vb = Some(vbid))?;
        }
        Ok(())
    }

    /// Credit block-production pay to a validator's vesting balance.
    pub fn deposit_validator_pay(
        &mut self,
        validator: ValidatorId,
        amount: i64,
    ) -> Result<(), EvaluationError> {
        if amount == 0 {
            return Ok(());
        }

        let record = self.store.validator(validator)?;
        let (pay_vb, owner) = (record.pay_vb, record.validator_account);
        let period = self.parameters.validator_pay_vesting_seconds;
        let new_vbid = self.deposit_lazy_vesting(pay_vb, amount, period, owner, true)?;
        if let Some(vbid) = new_vbid {
            self.store
                .modify_validator(validator, |v| v.pay_vb = Some(vbid))?;
        }
        Ok(())
    }
}
