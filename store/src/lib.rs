//! Indexed in-memory object store for the stele chain core.
//!
//! One table per object kind, keyed by id; balances are keyed by
//! `(owner, asset)`. Mutations of existing rows go through closures so the
//! change log always sees both the old and the new state. An on-disk
//! backend would expose the same surface; durability is a host concern.

pub mod change;
pub mod error;
pub mod tables;

pub use change::{ChangeLog, ObjectChange};
pub use error::StoreError;
pub use tables::ObjectTable;

use stele_types::{
    AccountBalance, AccountId, AccountObject, AccountStatistics, AssetDynamicData, AssetId,
    AssetObject, CommitteeMember, CommitteeMemberId, Validator, ValidatorId, VestingBalance,
    VestingBalanceId,
};

/// The full object store backing one chain.
#[derive(Debug, Default)]
pub struct ChainStore {
    accounts: ObjectTable<AccountId, AccountObject>,
    statistics: ObjectTable<AccountId, AccountStatistics>,
    assets: ObjectTable<AssetId, AssetObject>,
    dynamic_data: ObjectTable<AssetId, AssetDynamicData>,
    balances: ObjectTable<(AccountId, AssetId), AccountBalance>,
    vesting_balances: ObjectTable<VestingBalanceId, VestingBalance>,
    committee_members: ObjectTable<CommitteeMemberId, CommitteeMember>,
    validators: ObjectTable<ValidatorId, Validator>,
    pub changes: ChangeLog,
    next_account_id: u64,
    next_vesting_balance_id: u64,
    next_committee_member_id: u64,
}

impl ChainStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Accounts ─────────────────────────────────────────────────────

    pub fn account(&self, id: AccountId) -> Result<&AccountObject, StoreError> {
        self.accounts
            .get(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Register an account together with its statistics row.
    pub fn insert_account(&mut self, account: AccountObject) -> Result<(), StoreError> {
        let id = account.id;
        self.accounts.insert(id, account.clone())?;
        self.statistics.insert(id, AccountStatistics::new(id))?;
        if id.0 >= self.next_account_id {
            self.next_account_id = id.0 + 1;
        }
        self.changes.record(ObjectChange::Account {
            old: None,
            new: account,
        });
        Ok(())
    }

    pub fn allocate_account_id(&mut self) -> AccountId {
        let id = AccountId(self.next_account_id);
        self.next_account_id += 1;
        id
    }

    pub fn modify_account(
        &mut self,
        id: AccountId,
        f: impl FnOnce(&mut AccountObject),
    ) -> Result<(), StoreError> {
        let (old, new) = self.accounts.modify(&id, f)?;
        self.changes.record(ObjectChange::Account {
            old: Some(old),
            new,
        });
        Ok(())
    }

    // ── Account statistics ───────────────────────────────────────────

    pub fn statistics(&self, id: AccountId) -> Result<&AccountStatistics, StoreError> {
        self.statistics
            .get(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn modify_statistics(
        &mut self,
        id: AccountId,
        f: impl FnOnce(&mut AccountStatistics),
    ) -> Result<(), StoreError> {
        let (old, new) = self.statistics.modify(&id, f)?;
        self.changes.record(ObjectChange::Statistics { old, new });
        Ok(())
    }

    // ── Assets ───────────────────────────────────────────────────────

    pub fn asset(&self, id: AssetId) -> Result<&AssetObject, StoreError> {
        self.assets
            .get(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Register an asset together with its dynamic data row.
    pub fn insert_asset(&mut self, asset: AssetObject) -> Result<(), StoreError> {
        let id = asset.id;
        self.assets.insert(id, asset.clone())?;
        self.dynamic_data.insert(id, AssetDynamicData::new(id))?;
        self.changes.record(ObjectChange::Asset {
            old: None,
            new: asset,
        });
        Ok(())
    }

    pub fn modify_asset(
        &mut self,
        id: AssetId,
        f: impl FnOnce(&mut AssetObject),
    ) -> Result<(), StoreError> {
        let (old, new) = self.assets.modify(&id, f)?;
        self.changes.record(ObjectChange::Asset {
            old: Some(old),
            new,
        });
        Ok(())
    }

    pub fn dynamic_data(&self, id: AssetId) -> Result<&AssetDynamicData, StoreError> {
        self.dynamic_data
            .get(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn modify_dynamic_data(
        &mut self,
        id: AssetId,
        f: impl FnOnce(&mut AssetDynamicData),
    ) -> Result<(), StoreError> {
        let (old, new) = self.dynamic_data.modify(&id, f)?;
        self.changes.record(ObjectChange::DynamicData { old, new });
        Ok(())
    }

    // ── Balances ─────────────────────────────────────────────────────

    pub fn balance(&self, owner: AccountId, asset: AssetId) -> Option<&AccountBalance> {
        self.balances.get(&(owner, asset))
    }

    pub fn create_balance(&mut self, row: AccountBalance) -> Result<(), StoreError> {
        self.balances.insert((row.owner, row.asset), row.clone())?;
        self.changes.record(ObjectChange::Balance {
            old: None,
            new: row,
        });
        Ok(())
    }

    pub fn modify_balance(
        &mut self,
        owner: AccountId,
        asset: AssetId,
        f: impl FnOnce(&mut AccountBalance),
    ) -> Result<(), StoreError> {
        let (old, new) = self.balances.modify(&(owner, asset), f)?;
        self.changes.record(ObjectChange::Balance {
            old: Some(old),
            new,
        });
        Ok(())
    }

    /// Holders of an asset in owner order. Deterministic.
    pub fn balances_of_asset(
        &self,
        asset: AssetId,
    ) -> impl Iterator<Item = &AccountBalance> + '_ {
        self.balances
            .iter()
            .filter(move |((_, a), _)| *a == asset)
            .map(|(_, row)| row)
    }

    // ── Vesting balances ─────────────────────────────────────────────

    pub fn vesting_balance(&self, id: VestingBalanceId) -> Option<&VestingBalance> {
        self.vesting_balances.get(&id)
    }

    pub fn vesting_balance_count(&self) -> usize {
        self.vesting_balances.len()
    }

    pub fn allocate_vesting_balance_id(&mut self) -> VestingBalanceId {
        let id = VestingBalanceId(self.next_vesting_balance_id);
        self.next_vesting_balance_id += 1;
        id
    }

    pub fn insert_vesting_balance(&mut self, vb: VestingBalance) -> Result<(), StoreError> {
        self.vesting_balances.insert(vb.id, vb.clone())?;
        self.changes.record(ObjectChange::Vesting { old: None, new: vb });
        Ok(())
    }

    pub fn modify_vesting_balance(
        &mut self,
        id: VestingBalanceId,
        f: impl FnOnce(&mut VestingBalance),
    ) -> Result<(), StoreError> {
        let (old, new) = self.vesting_balances.modify(&id, f)?;
        self.changes.record(ObjectChange::Vesting {
            old: Some(old),
            new,
        });
        Ok(())
    }

    // ── Committee members ────────────────────────────────────────────

    pub fn committee_member(
        &self,
        id: CommitteeMemberId,
    ) -> Result<&CommitteeMember, StoreError> {
        self.committee_members
            .get(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn allocate_committee_member_id(&mut self) -> CommitteeMemberId {
        let id = CommitteeMemberId(self.next_committee_member_id);
        self.next_committee_member_id += 1;
        id
    }

    pub fn insert_committee_member(&mut self, member: CommitteeMember) -> Result<(), StoreError> {
        self.committee_members.insert(member.id, member.clone())?;
        self.changes.record(ObjectChange::CommitteeMember {
            old: None,
            new: member,
        });
        Ok(())
    }

    pub fn modify_committee_member(
        &mut self,
        id: CommitteeMemberId,
        f: impl FnOnce(&mut CommitteeMember),
    ) -> Result<(), StoreError> {
        let (old, new) = self.committee_members.modify(&id, f)?;
        self.changes.record(ObjectChange::CommitteeMember {
            old: Some(old),
            new,
        });
        Ok(())
    }

    // ── Validators ───────────────────────────────────────────────────

    pub fn validator(&self, id: ValidatorId) -> Result<&Validator, StoreError> {
        self.validators
            .get(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn insert_validator(&mut self, validator: Validator) -> Result<(), StoreError> {
        self.validators.insert(validator.id, validator)
    }

    pub fn modify_validator(
        &mut self,
        id: ValidatorId,
        f: impl FnOnce(&mut Validator),
    ) -> Result<(), StoreError> {
        let (old, new) = self.validators.modify(&id, f)?;
        self.changes.record(ObjectChange::Validator { old, new });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stele_types::CORE_ASSET;

    #[test]
    fn balance_mutations_are_observable() {
        let mut store = ChainStore::new();
        let owner = AccountId(10);
        store
            .create_balance(AccountBalance {
                owner,
                asset: CORE_ASSET,
                amount: 100,
            })
            .unwrap();
        store
            .modify_balance(owner, CORE_ASSET, |b| b.amount -= 30)
            .unwrap();

        let changes = store.changes.drain();
        assert_eq!(changes.len(), 2);
        match &changes[1] {
            ObjectChange::Balance { old, new } => {
                assert_eq!(old.as_ref().unwrap().amount, 100);
                assert_eq!(new.amount, 70);
            }
            other => panic!("unexpected change: {other:?}"),
        }
        assert!(store.changes.is_empty());
    }

    #[test]
    fn account_insert_creates_statistics() {
        let mut store = ChainStore::new();
        store
            .insert_account(AccountObject::new(AccountId(3), "carol"))
            .unwrap();
        assert!(store.statistics(AccountId(3)).is_ok());
        assert_eq!(store.allocate_account_id(), AccountId(4));
    }

    #[test]
    fn holders_scan_is_ordered_and_filtered() {
        let mut store = ChainStore::new();
        let asset = AssetId(2);
        for (id, amount) in [(5u64, 10i64), (1, 20), (3, 30)] {
            store
                .create_balance(AccountBalance {
                    owner: AccountId(id),
                    asset,
                    amount,
                })
                .unwrap();
        }
        store
            .create_balance(AccountBalance {
                owner: AccountId(1),
                asset: CORE_ASSET,
                amount: 99,
            })
            .unwrap();
        let owners: Vec<u64> = store.balances_of_asset(asset).map(|b| b.owner.0).collect();
        assert_eq!(owners, vec![1, 3, 5]);
    }
}
