//! Time-indexed feature gates.
//!
//! Evaluation rules change at fixed chain timestamps. The gate is a pure
//! function of the head block time; branches read the derived booleans
//! rather than comparing against constants, so tests can move the fork
//! points freely.

use serde::{Deserialize, Serialize};
use stele_types::Timestamp;

/// The fork points of one chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardforkSchedule {
    /// After this point, core-balance mutations advance coin-seconds.
    pub free_trx: Timestamp,
    /// After this point, the payer is vetted for the fee asset during fee
    /// preparation, retiring the legacy fee-asset-triggered sender check.
    pub whitelist_tightened: Timestamp,
    /// After this point, second-generation transfers are accepted.
    pub bsip10: Timestamp,
}

impl Default for HardforkSchedule {
    fn default() -> Self {
        Self {
            free_trx: Timestamp::new(1_458_000_000),
            whitelist_tightened: Timestamp::new(1_446_652_800),
            bsip10: Timestamp::new(1_480_000_000),
        }
    }
}

impl HardforkSchedule {
    /// Every fork already active, for tests and fresh devnets.
    pub fn all_active() -> Self {
        Self {
            free_trx: Timestamp::EPOCH,
            whitelist_tightened: Timestamp::EPOCH,
            bsip10: Timestamp::EPOCH,
        }
    }

    /// No fork ever activates.
    pub fn none_active() -> Self {
        Self {
            free_trx: Timestamp::MAX,
            whitelist_tightened: Timestamp::MAX,
            bsip10: Timestamp::MAX,
        }
    }

    /// The feature flags in force at `now`. A fork activates strictly
    /// after its timestamp.
    pub fn at(&self, now: Timestamp) -> Forks {
        Forks {
            free_trx: now > self.free_trx,
            whitelist_tightened: now > self.whitelist_tightened,
            bsip10: now > self.bsip10,
        }
    }
}

/// Feature flags in force at a particular head block time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Forks {
    pub free_trx: bool,
    pub whitelist_tightened: bool,
    pub bsip10: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_is_strictly_after_the_fork_point() {
        let schedule = HardforkSchedule {
            free_trx: Timestamp::new(100),
            whitelist_tightened: Timestamp::new(200),
            bsip10: Timestamp::new(300),
        };
        assert!(!schedule.at(Timestamp::new(100)).free_trx);
        assert!(schedule.at(Timestamp::new(101)).free_trx);
        assert!(!schedule.at(Timestamp::new(200)).whitelist_tightened);
        assert!(schedule.at(Timestamp::new(250)).whitelist_tightened);
        assert!(!schedule.at(Timestamp::new(300)).bsip10);
        assert!(schedule.at(Timestamp::new(301)).bsip10);
    }
}
