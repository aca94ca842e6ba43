//! Error types for the NFT tunnel receiver contract

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending admin can accept")]
    UnauthorizedPendingAdmin,

    #[error("No pending admin change")]
    NoPendingAdmin,

    #[error("Unauthorized: caller is not the messaging transport")]
    NotTransport,

    #[error("sender invalid")]
    SenderInvalid,

    // ========================================================================
    // Message Errors
    // ========================================================================

    #[error("Invalid transfer id length: expected 32 bytes, got {got}")]
    InvalidTransferId { got: usize },

    #[error("Transfer already processed: {transfer_id}")]
    TransferAlreadyProcessed { transfer_id: String },

    #[error("Invalid payload: expected {expected}, got {got}")]
    InvalidPayload { expected: String, got: String },

    #[error("Origin token not mapped: {origin_token}")]
    OriginTokenNotMapped { origin_token: String },

    // ========================================================================
    // Withdraw Errors
    // ========================================================================

    #[error("still locked")]
    StillLocked,

    #[error("origin contract not set")]
    OriginContractNotSet,

    #[error("value too low: expected {expected}, got {got}")]
    ValueTooLow { expected: Uint128, got: Uint128 },

    #[error("not called by the owner of the token")]
    NotTokenOwner,

    #[error("Receiver not approved to burn the token")]
    BurnNotApproved,

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid domain: {domain}")]
    InvalidDomain { domain: u32 },

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Invalid fee denom: cannot be empty")]
    InvalidFeeDenom,
}
