use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only the relayer can perform this action")]
    Unauthorized,

    #[error("Insufficient fee: expected {expected}, got {got}")]
    InsufficientFee { expected: Uint128, got: Uint128 },

    #[error("Unknown transfer: {transfer_id}")]
    UnknownTransfer { transfer_id: String },

    #[error("Outcome already reported: {transfer_id}")]
    OutcomeAlreadyReported { transfer_id: String },
}
