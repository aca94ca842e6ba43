//! Admin handover (propose/accept/cancel).

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use super::ensure_admin;
use crate::error::ContractError;
use crate::state::{CONFIG, PENDING_ADMIN};

/// Propose a new admin.
pub fn execute_propose_admin(
    deps: DepsMut,
    info: MessageInfo,
    new_admin: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    let new_admin_addr = deps.api.addr_validate(&new_admin)?;
    PENDING_ADMIN.save(deps.storage, &new_admin_addr)?;

    Ok(Response::new()
        .add_attribute("action", "propose_admin")
        .add_attribute("new_admin", new_admin_addr))
}

/// Accept the pending admin role.
pub fn execute_accept_admin(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let pending = PENDING_ADMIN
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingAdmin)?;

    if info.sender != pending {
        return Err(ContractError::UnauthorizedPendingAdmin);
    }

    CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
        config.admin = pending.clone();
        Ok(config)
    })?;
    PENDING_ADMIN.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("action", "accept_admin")
        .add_attribute("new_admin", pending))
}

/// Cancel the pending admin proposal.
pub fn execute_cancel_admin_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    PENDING_ADMIN.remove(deps.storage);

    Ok(Response::new().add_attribute("action", "cancel_admin_proposal"))
}
