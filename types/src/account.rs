//! Accounts, membership tiers, and per-account statistics.
//!
//! `AccountStatistics` carries the coin-seconds accountant: a time-integrated
//! core-asset balance (units: smallest-unit x seconds) that can be spent as
//! fee credit at a membership-dependent rate.

use crate::ids::{AccountId, CommitteeMemberId, ValidatorId, VestingBalanceId};
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Membership tier of an account, derived from its membership expiration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipTier {
    Basic,
    Annual,
    Lifetime,
}

impl MembershipTier {
    /// Index into per-tier parameter arrays.
    pub fn index(&self) -> usize {
        match self {
            Self::Basic => 0,
            Self::Annual => 1,
            Self::Lifetime => 2,
        }
    }
}

/// An account registered on the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountObject {
    pub id: AccountId,
    pub name: String,
    /// `Timestamp::MAX` marks a lifetime member; a future timestamp an
    /// annual member; anything else a basic account.
    pub membership_expiration: Timestamp,
    /// Vesting balance receiving this account's fee cashback, once minted.
    pub cashback_vb: Option<VestingBalanceId>,
}

impl AccountObject {
    pub fn new(id: AccountId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            membership_expiration: Timestamp::EPOCH,
            cashback_vb: None,
        }
    }

    pub fn membership(&self, now: Timestamp) -> MembershipTier {
        if self.membership_expiration == Timestamp::MAX {
            MembershipTier::Lifetime
        } else if self.membership_expiration > now {
            MembershipTier::Annual
        } else {
            MembershipTier::Basic
        }
    }

    pub fn is_lifetime_member(&self) -> bool {
        self.membership_expiration == Timestamp::MAX
    }
}

/// Per-account mutable counters: coin-seconds credit and lifetime fee totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatistics {
    pub owner: AccountId,
    /// Time-integrated core balance, in smallest-unit-seconds.
    pub coin_seconds_earned: u128,
    pub coin_seconds_earned_last_update: Timestamp,
    /// Total core fees ever paid by this account.
    pub lifetime_fees_paid: i64,
    /// Fees accumulated toward cashback that will vest.
    pub pending_fees: i64,
    /// Fees accumulated toward cashback that are already vested.
    pub pending_vested_fees: i64,
    /// Fees consumed directly by the network under the pre-split rule.
    pub network_fees_paid: i64,
}

impl AccountStatistics {
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            coin_seconds_earned: 0,
            coin_seconds_earned_last_update: Timestamp::EPOCH,
            lifetime_fees_paid: 0,
            pending_fees: 0,
            pending_vested_fees: 0,
            network_fees_paid: 0,
        }
    }

    /// Coin-seconds available at `now`, given the account's current core
    /// balance. Pure; does not advance the stored counter.
    pub fn compute_coin_seconds_earned(&self, core_balance: i64, now: Timestamp) -> u128 {
        let dt = self.coin_seconds_earned_last_update.elapsed_since(now);
        self.coin_seconds_earned + core_balance.max(0) as u128 * dt as u128
    }

    /// Advance the counter over the interval the balance was actually held.
    /// Called exactly once per core-balance mutation, with the
    /// pre-mutation balance.
    pub fn update_coin_seconds_earned(&mut self, original_balance: i64, now: Timestamp) {
        self.coin_seconds_earned = self.compute_coin_seconds_earned(original_balance, now);
        self.coin_seconds_earned_last_update = now;
    }

    /// Overwrite the counter, e.g. after consuming credit as fees.
    pub fn set_coin_seconds_earned(&mut self, earned: u128, now: Timestamp) {
        self.coin_seconds_earned = earned;
        self.coin_seconds_earned_last_update = now;
    }

    /// Record a paid core fee, routing it above or below the cashback
    /// vesting threshold.
    pub fn pay_fee(&mut self, core_fee: i64, cashback_vesting_threshold: i64) {
        self.lifetime_fees_paid += core_fee;
        if core_fee > cashback_vesting_threshold {
            self.pending_fees += core_fee;
        } else {
            self.pending_vested_fees += core_fee;
        }
    }

    /// Record a paid core fee under percentage fee mode: the portion up to
    /// `network_min_fee` is consumed directly by the network, the excess
    /// follows the cashback rules.
    pub fn pay_fee_pre_split_network(
        &mut self,
        core_fee: i64,
        cashback_vesting_threshold: i64,
        network_min_fee: i64,
    ) {
        self.lifetime_fees_paid += core_fee;
        let network = core_fee.min(network_min_fee);
        self.network_fees_paid += network;
        let excess = core_fee - network;
        if excess > 0 {
            if excess > cashback_vesting_threshold {
                self.pending_fees += excess;
            } else {
                self.pending_vested_fees += excess;
            }
        }
    }
}

/// A committee member record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeMember {
    pub id: CommitteeMemberId,
    pub committee_member_account: AccountId,
    pub url: String,
}

/// A block-producing validator and its pay vesting anchor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub id: ValidatorId,
    pub validator_account: AccountId,
    /// Vesting balance receiving this validator's pay, once minted.
    pub pay_vb: Option<VestingBalanceId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_tiers() {
        let mut acct = AccountObject::new(AccountId(9), "nine");
        let now = Timestamp::new(1_000);
        assert_eq!(acct.membership(now), MembershipTier::Basic);
        acct.membership_expiration = Timestamp::new(2_000);
        assert_eq!(acct.membership(now), MembershipTier::Annual);
        acct.membership_expiration = Timestamp::MAX;
        assert_eq!(acct.membership(now), MembershipTier::Lifetime);
        assert!(acct.is_lifetime_member());
    }

    #[test]
    fn coin_seconds_grow_with_held_balance() {
        let mut stats = AccountStatistics::new(AccountId(1));
        stats.coin_seconds_earned_last_update = Timestamp::new(100);
        assert_eq!(stats.compute_coin_seconds_earned(50, Timestamp::new(160)), 3_000);
        stats.update_coin_seconds_earned(50, Timestamp::new(160));
        assert_eq!(stats.coin_seconds_earned, 3_000);
        assert_eq!(stats.coin_seconds_earned_last_update, Timestamp::new(160));
        // the non-core component never contributes; only elapsed time does
        assert_eq!(stats.compute_coin_seconds_earned(50, Timestamp::new(160)), 3_000);
    }

    #[test]
    fn pay_fee_routes_around_threshold() {
        let mut stats = AccountStatistics::new(AccountId(1));
        stats.pay_fee(10, 100);
        assert_eq!(stats.pending_vested_fees, 10);
        stats.pay_fee(500, 100);
        assert_eq!(stats.pending_fees, 500);
        assert_eq!(stats.lifetime_fees_paid, 510);
    }

    #[test]
    fn pre_split_carves_network_share_first() {
        let mut stats = AccountStatistics::new(AccountId(1));
        stats.pay_fee_pre_split_network(30, 100, 50);
        assert_eq!(stats.network_fees_paid, 30);
        assert_eq!(stats.pending_fees + stats.pending_vested_fees, 0);

        stats.pay_fee_pre_split_network(300, 100, 50);
        assert_eq!(stats.network_fees_paid, 80);
        assert_eq!(stats.pending_fees, 250);
        assert_eq!(stats.lifetime_fees_paid, 330);
    }
}
