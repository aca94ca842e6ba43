//! State definitions for the NFT tunnel receiver contract

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address for contract management
    pub admin: Addr,
    /// Messaging transport allowed to deliver messages
    pub transport: Addr,
    /// Native denom used to pay transport fees
    pub fee_denom: String,
    /// Domain the sender contract lives on
    pub origin_domain: u32,
    /// Sender contract on the origin domain (None until wired up)
    pub origin_contract: Option<String>,
}

/// Time-lock of an issued representation. The holder is tracked by the
/// bridged collection, not here.
#[cw_serde]
pub struct RemoteLock {
    /// Collection the representation was minted on
    pub bridged_token: Addr,
    /// Absolute timestamp (seconds) the representation unlocks at, as sent
    /// by the sender
    pub lock_expiry: u64,
}

impl RemoteLock {
    pub fn is_withdrawable(&self, now: u64) -> bool {
        now >= self.lock_expiry
    }
}

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:nft-tunnel-receiver";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 50;

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Proposed next admin (two-step handover)
pub const PENDING_ADMIN: Item<Addr> = Item::new("pending_admin");

/// Origin collection → local bridged collection
/// Key: origin collection address (remote), Value: bridged collection
pub const ORIGIN_MAPPINGS: Map<&str, Addr> = Map::new("origin_mappings");

/// Time-locks of issued representations
/// Key: (origin collection address, token_id), Value: RemoteLock
pub const REMOTE_LOCKS: Map<(&str, &str), RemoteLock> = Map::new("remote_locks");

/// Inbound transfer ids already executed
/// Key: 32-byte transfer id, Value: true
pub const PROCESSED_TRANSFERS: Map<&[u8], bool> = Map::new("processed_transfers");
