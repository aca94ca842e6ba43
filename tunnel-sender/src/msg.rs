//! Message types for the NFT tunnel sender contract

use common::{XCallbackMsg, XReceiveMsg};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use crate::state::DeliveryStatus;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for contract management
    pub admin: String,
    /// Messaging transport contract on this domain
    pub transport: String,
    /// Native denom transport fees are paid in
    pub fee_denom: String,
    /// Minimum lock duration in weeks
    pub min_weeks_locked: u64,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Tunnel Flow
    // ========================================================================
    /// Lock an NFT and mint its representation on `destination_domain`.
    ///
    /// The caller must own `token_id`, must have approved this contract for
    /// it, and must attach at least `relayer_fee + callback_fee` of the fee
    /// denom.
    Deposit {
        /// Collection contract address
        token: String,
        token_id: String,
        destination_domain: u32,
        weeks_locked: u64,
        relayer_fee: Uint128,
        callback_fee: Uint128,
    },

    /// Inbound message from the transport (withdraw_nft)
    ///
    /// Authorization: Messaging transport, registered counterpart only
    XReceive(XReceiveMsg),

    /// Delivery result for a previously sent mint message
    ///
    /// Authorization: Messaging transport only
    XCallback(XCallbackMsg),

    /// Return a locked NFT to its original owner without notifying the
    /// destination domain
    ///
    /// Authorization: Original owner, when an emergency condition holds
    EmergencyWithdraw { token: String, token_id: String },

    // ========================================================================
    // Configuration (Admin only)
    // ========================================================================
    /// Globally allow or disallow emergency withdrawals
    SetEmergencyWithdraw { enabled: bool },

    /// Enable or disable a collection for tunneling
    SetTokenEnabled { token: String, enabled: bool },

    /// Set the minimum lock duration in weeks
    SetMinWeeksLocked { weeks: u64 },

    /// Register or replace the receiver contract for a destination domain.
    /// Also trusts that (domain, contract) pair as an inbound origin.
    SetCounterpart { domain: u32, contract: String },

    /// Remove the receiver registered for a domain
    RemoveCounterpart { domain: u32 },

    /// Replace the messaging transport
    SetTransport { transport: String },

    // ========================================================================
    // Admin Handover
    // ========================================================================
    ProposeAdmin { new_admin: String },
    AcceptAdmin {},
    CancelAdminProposal {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(LockRecordResponse)]
    LockRecord { token: String, token_id: String },

    #[returns(TokenEnabledResponse)]
    TokenEnabled { token: String },

    #[returns(CounterpartResponse)]
    Counterpart { domain: u32 },

    #[returns(CounterpartsResponse)]
    Counterparts {
        start_after: Option<u32>,
        limit: Option<u32>,
    },

    /// Which emergency withdraw conditions currently hold for a token
    #[returns(EmergencyStatusResponse)]
    EmergencyStatus { token: String, token_id: String },

    #[returns(TransferProcessedResponse)]
    TransferProcessed { transfer_id: Binary },

    #[returns(PendingAdminResponse)]
    PendingAdmin {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub transport: Addr,
    pub fee_denom: String,
    pub min_weeks_locked: u64,
    pub emergency_withdraw_enabled: bool,
    pub last_withdraw_timestamp: u64,
}

#[cw_serde]
pub struct LockRecordResponse {
    pub token: String,
    pub token_id: String,
    pub original_owner: Option<Addr>,
    pub tunneled_to_domain: u32,
    pub lock_expiry: u64,
    pub failure_unlock_at: u64,
    pub delivery: DeliveryStatus,
}

#[cw_serde]
pub struct TokenEnabledResponse {
    pub token: String,
    pub enabled: bool,
}

#[cw_serde]
pub struct CounterpartResponse {
    pub domain: u32,
    pub contract: Option<String>,
}

#[cw_serde]
pub struct CounterpartEntry {
    pub domain: u32,
    pub contract: String,
}

#[cw_serde]
pub struct CounterpartsResponse {
    pub counterparts: Vec<CounterpartEntry>,
}

#[cw_serde]
pub struct EmergencyStatusResponse {
    /// Whether any condition holds (owner check not included)
    pub allowed: bool,
    pub admin_override: bool,
    pub bridge_inactive: bool,
    pub delivery_failed: bool,
    pub original_owner: Option<Addr>,
}

#[cw_serde]
pub struct TransferProcessedResponse {
    pub transfer_id: Binary,
    pub processed: bool,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub pending_admin: Option<Addr>,
}
