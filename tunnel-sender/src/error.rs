//! Error types for the NFT tunnel sender contract

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
    // Deposit Errors
    // ========================================================================

    #[error("Token not enabled for tunneling: {token}")]
    TokenNotEnabled { token: String },

    #[error("Lock duration too short: minimum {min_weeks} weeks, got {got}")]
    LockTooShort { min_weeks: u64, got: u64 },

    #[error("Lock duration out of range: {weeks} weeks")]
    LockTooLong { weeks: u64 },

    #[error("No counterpart registered for domain {domain}")]
    CounterpartNotSet { domain: u32 },

    #[error("Token already tunneled: {token} #{token_id}")]
    AlreadyTunneled { token: String, token_id: String },

    #[error("not called by the owner of the token")]
    NotTokenOwner,

    #[error("value too low: expected {expected}, got {got}")]
    ValueTooLow { expected: Uint128, got: Uint128 },

    // ========================================================================
    // Message Errors
    // ========================================================================

    #[error("Invalid transfer id length: expected 32 bytes, got {got}")]
    InvalidTransferId { got: usize },

    #[error("Transfer already processed: {transfer_id}")]
    TransferAlreadyProcessed { transfer_id: String },

    #[error("Invalid payload: expected {expected}, got {got}")]
    InvalidPayload { expected: String, got: String },

    #[error("Token not tunneled: {token} #{token_id}")]
    TokenNotTunneled { token: String, token_id: String },

    // ========================================================================
    // Emergency Withdraw Errors
    // ========================================================================

    #[error("not called by the original owner of the token")]
    NotOriginalOwner,

    #[error("Emergency withdraw not allowed")]
    EmergencyWithdrawNotAllowed,

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
