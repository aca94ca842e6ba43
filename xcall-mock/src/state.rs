use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:xcall-mock";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cw_serde]
pub struct Config {
    /// Domain id this transport instance serves
    pub domain: u32,
    /// Account allowed to deliver messages and report outcomes
    pub relayer: Addr,
    pub fee_denom: String,
}

/// Outbound message as recorded by `XCall`
#[cw_serde]
pub struct XCallRecord {
    pub transfer_id: Binary,
    pub nonce: u64,
    pub origin_sender: Addr,
    pub destination: u32,
    pub to: String,
    pub delegate: String,
    pub slippage: u64,
    pub callback: Option<Addr>,
    pub call_data: Binary,
    pub relayer_fee: Uint128,
    pub callback_fee: Uint128,
    /// None until the relayer reports a delivery result
    pub outcome: Option<bool>,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Next nonce used to derive a transfer id
pub const NONCE: Item<u64> = Item::new("nonce");

/// transfer_id => record
pub const XCALLS: Map<&[u8], XCallRecord> = Map::new("xcalls");

/// Most recent transfer id, for test convenience
pub const LAST_TRANSFER_ID: Item<Binary> = Item::new("last_transfer_id");
