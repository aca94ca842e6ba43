//! Execute handlers for the NFT tunnel receiver contract.
//!
//! - `mint` - Inbound mint messages from the transport
//! - `withdraw` - Holder-initiated redemption
//! - `config` - Origin mappings, trusted origin and transport
//! - `admin` - Admin handover

mod admin;
mod config;
mod mint;
mod withdraw;

pub use admin::*;
pub use config::*;
pub use mint::*;
pub use withdraw::*;

use cosmwasm_std::{MessageInfo, Storage};

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
