//! Operation surface of the stele chain core.
//!
//! Operation structs, their stateless validation, and the fee schedule.
//! Stateful checks (balances, whitelists, fee pools) belong to the
//! evaluators in `stele-chain`.

pub mod committee;
pub mod dividend;
pub mod fee_schedule;
pub mod operation;
pub mod transfer;
pub mod validation;

pub use committee::{
    CommitteeMemberCreateOperation, CommitteeMemberUpdateOperation, UpdateCoreAssetOperation,
    UpdateGlobalParametersOperation,
};
pub use dividend::DividendOperation;
pub use fee_schedule::{FeeParameters, FeeSchedule};
pub use operation::{Extensions, Operation};
pub use transfer::{Memo, OverrideTransferOperation, TransferOperation, TransferV2Operation};
pub use validation::ValidationError;
