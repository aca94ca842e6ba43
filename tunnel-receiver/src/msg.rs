//! Message types for the NFT tunnel receiver contract

use common::XReceiveMsg;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

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
    /// Domain the sender contract lives on
    pub origin_domain: u32,
    /// Sender contract on the origin domain, if already known
    pub origin_contract: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Tunnel Flow
    // ========================================================================
    /// Inbound message from the transport (mint_nft)
    ///
    /// Authorization: Messaging transport, configured origin only
    XReceive(XReceiveMsg),

    /// Burn an unlocked representation and release the original on the
    /// origin domain.
    ///
    /// Authorization: Current holder of the representation, who must have
    /// approved this contract for it on the bridged collection (`Approve`
    /// or `ApproveAll`). Attach at least `relayer_fee` of the fee denom.
    Withdraw {
        origin_token: String,
        token_id: String,
        /// Slippage tolerance forwarded to the transport
        slippage: u64,
        relayer_fee: Uint128,
    },

    // ========================================================================
    // Configuration (Admin only)
    // ========================================================================
    /// Map an origin collection to the local collection minting its
    /// representations. The receiver must be that collection's minter.
    SetOriginMapping {
        origin_token: String,
        bridged_token: String,
    },

    RemoveOriginMapping { origin_token: String },

    /// Set the trusted sender contract and its domain
    SetOrigin { domain: u32, contract: String },

    /// Replace the messaging transport
    SetTransport { transport: String },

    // ========================================================================
    // Admin Handover
    // ========================================================================
    ProposeAdmin { new_admin: String },
    AcceptAdmin {},
    CancelAdminProposal {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(RemoteLockResponse)]
    RemoteLock {
        origin_token: String,
        token_id: String,
    },

    #[returns(OriginMappingResponse)]
    OriginMapping { origin_token: String },

    #[returns(OriginMappingsResponse)]
    OriginMappings {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(TransferProcessedResponse)]
    TransferProcessed { transfer_id: Binary },

    #[returns(PendingAdminResponse)]
    PendingAdmin {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub transport: Addr,
    pub fee_denom: String,
    pub origin_domain: u32,
    pub origin_contract: Option<String>,
}

#[cw_serde]
pub struct RemoteLockResponse {
    pub origin_token: String,
    pub token_id: String,
    /// None when no representation is outstanding
    pub bridged_token: Option<Addr>,
    pub lock_expiry: u64,
    pub withdrawable: bool,
}

#[cw_serde]
pub struct OriginMappingResponse {
    pub origin_token: String,
    pub bridged_token: Option<Addr>,
}

#[cw_serde]
pub struct OriginMappingEntry {
    pub origin_token: String,
    pub bridged_token: Addr,
}

#[cw_serde]
pub struct OriginMappingsResponse {
    pub mappings: Vec<OriginMappingEntry>,
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
