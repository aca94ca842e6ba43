//! Configuration management handlers.
//!
//! This module handles:
//! - Global emergency withdraw toggle
//! - Collection enable/disable
//! - Minimum lock duration
//! - Counterpart registry (outbound destinations and inbound allowlist)
//! - Messaging transport

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use super::{ensure_admin, validate_token};
use crate::error::ContractError;
use crate::state::{CONFIG, COUNTERPARTS, ENABLED_TOKENS};

/// Globally allow or disallow emergency withdrawals.
pub fn execute_set_emergency_withdraw(
    deps: DepsMut,
    info: MessageInfo,
    enabled: bool,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
        config.emergency_withdraw_enabled = enabled;
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("action", "set_emergency_withdraw")
        .add_attribute("enabled", enabled.to_string()))
}

/// Enable or disable a collection for tunneling.
///
/// Disabling only blocks new deposits; existing locks are unaffected.
pub fn execute_set_token_enabled(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
    enabled: bool,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    let token_addr = validate_token(deps.api, &token)?;
    if enabled {
        ENABLED_TOKENS.save(deps.storage, &token_addr, &true)?;
    } else {
        ENABLED_TOKENS.remove(deps.storage, &token_addr);
    }

    Ok(Response::new()
        .add_attribute("action", "set_token_enabled")
        .add_attribute("token", token_addr)
        .add_attribute("enabled", enabled.to_string()))
}

/// Set the minimum lock duration in weeks.
pub fn execute_set_min_weeks_locked(
    deps: DepsMut,
    info: MessageInfo,
    weeks: u64,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
        config.min_weeks_locked = weeks;
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("action", "set_min_weeks_locked")
        .add_attribute("weeks", weeks.to_string()))
}

/// Register or replace the receiver contract for `domain`.
///
/// The address belongs to another chain and is stored verbatim. Messages
/// already in flight under a replaced address will be rejected on arrival.
pub fn execute_set_counterpart(
    deps: DepsMut,
    info: MessageInfo,
    domain: u32,
    contract: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    if domain == 0 {
        return Err(ContractError::InvalidDomain { domain });
    }
    if contract.trim().is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "counterpart contract cannot be empty".to_string(),
        });
    }

    COUNTERPARTS.save(deps.storage, domain, &contract)?;

    Ok(Response::new()
        .add_attribute("action", "set_counterpart")
        .add_attribute("domain", domain.to_string())
        .add_attribute("contract", contract))
}

/// Remove the receiver registered for `domain`.
pub fn execute_remove_counterpart(
    deps: DepsMut,
    info: MessageInfo,
    domain: u32,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    COUNTERPARTS.remove(deps.storage, domain);

    Ok(Response::new()
        .add_attribute("action", "remove_counterpart")
        .add_attribute("domain", domain.to_string()))
}

/// Replace the messaging transport.
pub fn execute_set_transport(
    deps: DepsMut,
    info: MessageInfo,
    transport: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    let transport_addr = deps.api.addr_validate(&transport)?;
    CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
        config.transport = transport_addr.clone();
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("action", "set_transport")
        .add_attribute("transport", transport_addr))
}
