//! The chain database facade: ledger access over the object store.

use crate::error::EvaluationError;
use crate::hardfork::{Forks, HardforkSchedule};
use stele_ops::FeeSchedule;
use stele_store::ChainStore;
use stele_types::ids::{
    is_reserved_account, COMMITTEE_ACCOUNT, CORE_ASSET, CORE_PRECISION, NULL_ACCOUNT,
    RELAXED_COMMITTEE_ACCOUNT, TEMP_ACCOUNT, VALIDATOR_ACCOUNT,
};
use stele_types::{
    AccountBalance, AccountId, AccountObject, AssetAmount, AssetId, AssetObject, AssetOptions,
    ChainParameters, Price, Timestamp,
};
use tracing::trace;

/// One chain's evaluation state: the object store plus the parameters,
/// fee schedule, and hardfork schedule in force.
///
/// Single-threaded by construction; "now" is the head block time set by the
/// host before each block is applied.
pub struct Database {
    pub store: ChainStore,
    pub parameters: ChainParameters,
    pub fee_schedule: FeeSchedule,
    pub hardforks: HardforkSchedule,
    /// Parameter set staged by a committee update, promoted at the external
    /// maintenance boundary.
    pub pending_parameters: Option<ChainParameters>,
    head_block_time: Timestamp,
}

impl Database {
    /// A fresh chain with the core asset and the reserved accounts in place.
    pub fn new(
        parameters: ChainParameters,
        fee_schedule: FeeSchedule,
        hardforks: HardforkSchedule,
    ) -> Self {
        let mut store = ChainStore::new();
        for (id, name) in [
            (COMMITTEE_ACCOUNT, "committee-account"),
            (VALIDATOR_ACCOUNT, "validator-account"),
            (RELAXED_COMMITTEE_ACCOUNT, "relaxed-committee-account"),
            (NULL_ACCOUNT, "null-account"),
            (TEMP_ACCOUNT, "temp-account"),
        ] {
            store
                .insert_account(AccountObject::new(id, name))
                .expect("fresh store");
        }
        store
            .insert_asset(AssetObject {
                id: CORE_ASSET,
                symbol: "STL".into(),
                precision: CORE_PRECISION,
                issuer: COMMITTEE_ACCOUNT,
                options: AssetOptions::unrestricted(Price::unit_of(CORE_ASSET)),
            })
            .expect("fresh store");
        store.changes.drain();
        Self {
            store,
            parameters,
            fee_schedule,
            hardforks,
            pending_parameters: None,
            head_block_time: Timestamp::EPOCH,
        }
    }

    pub fn head_block_time(&self) -> Timestamp {
        self.head_block_time
    }

    /// Advance the head block time. Host-driven; evaluation never reads a
    /// clock.
    pub fn set_head_block_time(&mut self, now: Timestamp) {
        self.head_block_time = now;
    }

    /// Feature flags in force at the head block time.
    pub fn forks(&self) -> Forks {
        self.hardforks.at(self.head_block_time)
    }

    /// Register a user account, allocating its id. The coin-seconds clock
    /// starts at registration.
    pub fn create_account(&mut self, name: impl Into<String>) -> Result<AccountId, EvaluationError> {
        let id = self.store.allocate_account_id();
        self.store.insert_account(AccountObject::new(id, name))?;
        let now = self.head_block_time;
        self.store
            .modify_statistics(id, |s| s.coin_seconds_earned_last_update = now)?;
        Ok(id)
    }

    /// Current balance of `(owner, asset)`; zero when no row exists.
    pub fn get_balance(&self, owner: AccountId, asset: AssetId) -> AssetAmount {
        self.store
            .balance(owner, asset)
            .map(|row| row.as_asset_amount())
            .unwrap_or_else(|| AssetAmount::new(0, asset))
    }

    /// Apply a signed delta to `(account, delta.asset_id)`.
    ///
    /// Fails with `InsufficientBalance` when the debit exceeds the stored
    /// amount; a missing row holds zero. Past the free-trx fork, a core
    /// mutation of an existing row advances the account's coin-seconds over
    /// the interval the original balance was held.
    pub fn adjust_balance(
        &mut self,
        account: AccountId,
        delta: AssetAmount,
    ) -> Result<(), EvaluationError> {
        if delta.amount == 0 {
            return Ok(());
        }
        trace!(account = %account, asset = %delta.asset_id, delta = delta.amount, "adjust balance");

        let existing = self
            .store
            .balance(account, delta.asset_id)
            .map(|row| row.amount);
        match existing {
            None => {
                if delta.amount < 0 {
                    return Err(self.insufficient_balance(
                        account,
                        AssetAmount::new(0, delta.asset_id),
                        -delta,
                    ));
                }
                self.store.create_balance(AccountBalance {
                    owner: account,
                    asset: delta.asset_id,
                    amount: delta.amount,
                })?;
            }
            Some(original_balance) => {
                if delta.amount < 0 && original_balance < -delta.amount {
                    return Err(self.insufficient_balance(
                        account,
                        AssetAmount::new(original_balance, delta.asset_id),
                        -delta,
                    ));
                }
                self.store
                    .modify_balance(account, delta.asset_id, |b| b.amount += delta.amount)?;
                if delta.asset_id == CORE_ASSET && self.forks().free_trx {
                    let now = self.head_block_time;
                    self.store.modify_statistics(account, |s| {
                        s.update_coin_seconds_earned(original_balance, now)
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Decimal-shifted rendering of an amount, e.g. `0.00010 STL`.
    pub fn to_pretty_string(&self, a: AssetAmount) -> String {
        match self.store.asset(a.asset_id) {
            Ok(asset) => asset.amount_to_pretty_string(a.amount),
            Err(_) => format!("{} {}", a.amount, a.asset_id),
        }
    }

    /// Display name of an account, or its id when unknown.
    pub fn account_name(&self, id: AccountId) -> String {
        self.store
            .account(id)
            .map(|a| a.name.clone())
            .unwrap_or_else(|_| id.to_string())
    }

    pub(crate) fn insufficient_balance(
        &self,
        account: AccountId,
        balance: AssetAmount,
        required: AssetAmount,
    ) -> EvaluationError {
        EvaluationError::InsufficientBalance {
            account,
            name: self.account_name(account),
            balance: self.to_pretty_string(balance),
            required: self.to_pretty_string(required),
        }
    }

    /// Whether an account absorbs cashback into the reserve pool instead of
    /// vesting it.
    pub fn is_reserved(&self, account: AccountId) -> bool {
        is_reserved_account(account)
    }
}
