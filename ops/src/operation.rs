//! The operation sum type and its dispatch surface.

use crate::committee::{
    CommitteeMemberCreateOperation, CommitteeMemberUpdateOperation, UpdateCoreAssetOperation,
    UpdateGlobalParametersOperation,
};
use crate::dividend::DividendOperation;
use crate::transfer::{OverrideTransferOperation, TransferOperation, TransferV2Operation};
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use stele_types::ids::COMMITTEE_ACCOUNT;
use stele_types::{AccountId, AssetAmount};

/// Opaque forward-compatibility blobs carried by operations.
pub type Extensions = Vec<Vec<u8>>;

/// Every operation the evaluation core accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Transfer(TransferOperation),
    TransferV2(TransferV2Operation),
    OverrideTransfer(OverrideTransferOperation),
    CommitteeMemberCreate(CommitteeMemberCreateOperation),
    CommitteeMemberUpdate(CommitteeMemberUpdateOperation),
    UpdateGlobalParameters(UpdateGlobalParametersOperation),
    UpdateCoreAsset(UpdateCoreAssetOperation),
    Dividend(DividendOperation),
}

impl Operation {
    /// Stable index of the operation kind. Indexes per-operation parameter
    /// tables such as the coin-seconds fee ceilings.
    pub fn tag(&self) -> usize {
        match self {
            Self::Transfer(_) => 0,
            Self::TransferV2(_) => 1,
            Self::OverrideTransfer(_) => 2,
            Self::CommitteeMemberCreate(_) => 3,
            Self::CommitteeMemberUpdate(_) => 4,
            Self::UpdateGlobalParameters(_) => 5,
            Self::UpdateCoreAsset(_) => 6,
            Self::Dividend(_) => 7,
        }
    }

    /// The declared fee.
    pub fn fee(&self) -> AssetAmount {
        match self {
            Self::Transfer(op) => op.fee,
            Self::TransferV2(op) => op.fee,
            Self::OverrideTransfer(op) => op.fee,
            Self::CommitteeMemberCreate(op) => op.fee,
            Self::CommitteeMemberUpdate(op) => op.fee,
            Self::UpdateGlobalParameters(op) => op.fee,
            Self::UpdateCoreAsset(op) => op.fee,
            Self::Dividend(op) => op.fee,
        }
    }

    /// The account charged for the fee.
    pub fn fee_payer(&self) -> AccountId {
        match self {
            Self::Transfer(op) => op.from,
            Self::TransferV2(op) => op.from,
            Self::OverrideTransfer(op) => op.issuer,
            Self::CommitteeMemberCreate(op) => op.committee_member_account,
            Self::CommitteeMemberUpdate(op) => op.committee_member_account,
            Self::UpdateGlobalParameters(_) => COMMITTEE_ACCOUNT,
            Self::UpdateCoreAsset(_) => COMMITTEE_ACCOUNT,
            Self::Dividend(op) => op.issuer,
        }
    }

    /// Stateless structural validation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Transfer(op) => op.validate(),
            Self::TransferV2(op) => op.validate(),
            Self::OverrideTransfer(op) => op.validate(),
            Self::CommitteeMemberCreate(op) => op.validate(),
            Self::CommitteeMemberUpdate(op) => op.validate(),
            Self::UpdateGlobalParameters(op) => op.validate(),
            Self::UpdateCoreAsset(op) => op.validate(),
            Self::Dividend(op) => op.validate(),
        }
    }
}
