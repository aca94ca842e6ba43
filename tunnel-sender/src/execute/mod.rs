//! Execute handlers for the NFT tunnel sender contract.
//!
//! - `deposit` - Lock an NFT and send the mint message
//! - `inbound` - Withdraw messages and delivery callbacks from the transport
//! - `emergency` - Owner-initiated recovery of stuck locks
//! - `config` - Token, counterpart, transport and lock-duration settings
//! - `admin` - Admin handover

mod admin;
mod config;
mod deposit;
mod emergency;
mod inbound;

pub use admin::*;
pub use config::*;
pub use deposit::*;
pub use emergency::*;
pub use inbound::*;

use cosmwasm_std::{Addr, Api, MessageInfo, StdResult, Storage};

use crate::error::ContractError;
use crate::state::CONFIG;

/// Load config and check the caller is the admin.
pub(crate) fn ensure_admin(storage: &dyn Storage, info: &MessageInfo) -> Result<(), ContractError> {
    let config = CONFIG.load(storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Validate a collection address passed as a string.
pub(crate) fn validate_token(api: &dyn Api, token: &str) -> StdResult<Addr> {
    api.addr_validate(token)
}
