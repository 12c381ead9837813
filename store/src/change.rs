//! Change records for external observers.
//!
//! Every mutation of a stored object is recorded with its before and after
//! state. Read-only projections (history indexers, impacted-account feeds)
//! drain the log after each operation; the core itself never reads it back.

use stele_types::{
    AccountBalance, AccountObject, AccountStatistics, AssetDynamicData, AssetObject,
    CommitteeMember, Validator, VestingBalance,
};

/// One observed mutation. `old` is `None` for newly created objects.
#[derive(Clone, Debug)]
pub enum ObjectChange {
    Balance {
        old: Option<AccountBalance>,
        new: AccountBalance,
    },
    Statistics {
        old: AccountStatistics,
        new: AccountStatistics,
    },
    Account {
        old: Option<AccountObject>,
        new: AccountObject,
    },
    Asset {
        old: Option<AssetObject>,
        new: AssetObject,
    },
    DynamicData {
        old: AssetDynamicData,
        new: AssetDynamicData,
    },
    Vesting {
        old: Option<VestingBalance>,
        new: VestingBalance,
    },
    CommitteeMember {
        old: Option<CommitteeMember>,
        new: CommitteeMember,
    },
    Validator {
        old: Validator,
        new: Validator,
    },
}

/// Append-only log of object changes, drained by observers.
#[derive(Debug, Default)]
pub struct ChangeLog {
    entries: Vec<ObjectChange>,
}

impl ChangeLog {
    pub fn record(&mut self, change: ObjectChange) {
        self.entries.push(change);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hand the accumulated changes to an observer and clear the log.
    pub fn drain(&mut self) -> Vec<ObjectChange> {
        std::mem::take(&mut self.entries)
    }
}
