//! Account balance rows.

use crate::amount::AssetAmount;
use crate::ids::{AccountId, AssetId};
use serde::{Deserialize, Serialize};

/// One `(owner, asset)` row of the balance ledger.
///
/// Created lazily on first positive credit; never destroyed (a zeroed row is
/// retained). Mutated only through the ledger's adjust path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub owner: AccountId,
    pub asset: AssetId,
    pub amount: i64,
}

impl AccountBalance {
    pub fn as_asset_amount(&self) -> AssetAmount {
        AssetAmount::new(self.amount, self.asset)
    }
}
