//! Configuration management handlers.
//!
//! This module handles:
//! - Origin collection mappings
//! - Trusted origin (domain + sender contract)
//! - Messaging transport

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use super::ensure_admin;
use crate::error::ContractError;
use crate::state::{CONFIG, ORIGIN_MAPPINGS};

/// Map an origin collection to its local bridged collection.
pub fn execute_set_origin_mapping(
    deps: DepsMut,
    info: MessageInfo,
    origin_token: String,
    bridged_token: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    if origin_token.trim().is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "origin token cannot be empty".to_string(),
        });
    }
    let bridged_addr = deps.api.addr_validate(&bridged_token)?;
    ORIGIN_MAPPINGS.save(deps.storage, &origin_token, &bridged_addr)?;

    Ok(Response::new()
        .add_attribute("action", "set_origin_mapping")
        .add_attribute("origin_token", origin_token)
        .add_attribute("bridged_token", bridged_addr))
}

/// Remove an origin collection mapping. Outstanding representations keep
/// the collection recorded at mint time.
pub fn execute_remove_origin_mapping(
    deps: DepsMut,
    info: MessageInfo,
    origin_token: String,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    ORIGIN_MAPPINGS.remove(deps.storage, &origin_token);

    Ok(Response::new()
        .add_attribute("action", "remove_origin_mapping")
        .add_attribute("origin_token", origin_token))
}

/// Set the trusted sender contract and the domain it lives on.
///
/// Messages already in flight from a replaced sender are rejected on arrival.
pub fn execute_set_origin(
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
            reason: "origin contract cannot be empty".to_string(),
        });
    }

    CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
        config.origin_domain = domain;
        config.origin_contract = Some(contract.clone());
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("action", "set_origin")
        .add_attribute("domain", domain.to_string())
        .add_attribute("contract", contract))
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
