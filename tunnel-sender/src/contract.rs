//! NFT Tunnel Sender - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_admin, execute_cancel_admin_proposal, execute_deposit,
    execute_emergency_withdraw, execute_propose_admin, execute_remove_counterpart,
    execute_set_counterpart, execute_set_emergency_withdraw, execute_set_min_weeks_locked,
    execute_set_token_enabled, execute_set_transport, execute_xcallback, execute_xreceive,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_counterpart, query_counterparts, query_emergency_status,
    query_lock_record, query_pending_admin, query_token_enabled, query_transfer_processed,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, LAST_WITHDRAW_TIMESTAMP};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let transport = deps.api.addr_validate(&msg.transport)?;

    if msg.fee_denom.is_empty() {
        return Err(ContractError::InvalidFeeDenom);
    }

    let config = Config {
        admin,
        transport,
        fee_denom: msg.fee_denom,
        min_weeks_locked: msg.min_weeks_locked,
        emergency_withdraw_enabled: false,
    };
    CONFIG.save(deps.storage, &config)?;

    // The inactivity fallback counts from deployment
    LAST_WITHDRAW_TIMESTAMP.save(deps.storage, &env.block.time.seconds())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("transport", config.transport)
        .add_attribute("fee_denom", config.fee_denom)
        .add_attribute("min_weeks_locked", config.min_weeks_locked.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Tunnel flow
        ExecuteMsg::Deposit {
            token,
            token_id,
            destination_domain,
            weeks_locked,
            relayer_fee,
            callback_fee,
        } => execute_deposit(
            deps,
            env,
            info,
            token,
            token_id,
            destination_domain,
            weeks_locked,
            relayer_fee,
            callback_fee,
        ),
        ExecuteMsg::XReceive(msg) => execute_xreceive(deps, env, info, msg),
        ExecuteMsg::XCallback(msg) => execute_xcallback(deps, env, info, msg),
        ExecuteMsg::EmergencyWithdraw { token, token_id } => {
            execute_emergency_withdraw(deps, env, info, token, token_id)
        }

        // Configuration
        ExecuteMsg::SetEmergencyWithdraw { enabled } => {
            execute_set_emergency_withdraw(deps, info, enabled)
        }
        ExecuteMsg::SetTokenEnabled { token, enabled } => {
            execute_set_token_enabled(deps, info, token, enabled)
        }
        ExecuteMsg::SetMinWeeksLocked { weeks } => execute_set_min_weeks_locked(deps, info, weeks),
        ExecuteMsg::SetCounterpart { domain, contract } => {
            execute_set_counterpart(deps, info, domain, contract)
        }
        ExecuteMsg::RemoveCounterpart { domain } => execute_remove_counterpart(deps, info, domain),
        ExecuteMsg::SetTransport { transport } => execute_set_transport(deps, info, transport),

        // Admin handover
        ExecuteMsg::ProposeAdmin { new_admin } => execute_propose_admin(deps, info, new_admin),
        ExecuteMsg::AcceptAdmin {} => execute_accept_admin(deps, info),
        ExecuteMsg::CancelAdminProposal {} => execute_cancel_admin_proposal(deps, info),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::LockRecord { token, token_id } => {
            to_json_binary(&query_lock_record(deps, token, token_id)?)
        }
        QueryMsg::TokenEnabled { token } => to_json_binary(&query_token_enabled(deps, token)?),
        QueryMsg::Counterpart { domain } => to_json_binary(&query_counterpart(deps, domain)?),
        QueryMsg::Counterparts { start_after, limit } => {
            to_json_binary(&query_counterparts(deps, start_after, limit)?)
        }
        QueryMsg::EmergencyStatus { token, token_id } => {
            to_json_binary(&query_emergency_status(deps, env, token, token_id)?)
        }
        QueryMsg::TransferProcessed { transfer_id } => {
            to_json_binary(&query_transfer_processed(deps, transfer_id)?)
        }
        QueryMsg::PendingAdmin {} => to_json_binary(&query_pending_admin(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if LAST_WITHDRAW_TIMESTAMP.may_load(deps.storage)?.is_none() {
        LAST_WITHDRAW_TIMESTAMP.save(deps.storage, &env.block.time.seconds())?;
    }

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
