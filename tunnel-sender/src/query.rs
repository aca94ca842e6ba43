//! Query handlers for the NFT tunnel sender contract.

use cosmwasm_std::{Binary, Deps, Env, Order, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{
    ConfigResponse, CounterpartEntry, CounterpartResponse, CounterpartsResponse,
    EmergencyStatusResponse, LockRecordResponse, PendingAdminResponse, TokenEnabledResponse,
    TransferProcessedResponse,
};
use crate::state::{
    CONFIG, COUNTERPARTS, DEFAULT_LIMIT, ENABLED_TOKENS, LAST_WITHDRAW_TIMESTAMP, LOCK_RECORDS,
    MAX_LIMIT, PENDING_ADMIN, PROCESSED_TRANSFERS,
};

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        transport: config.transport,
        fee_denom: config.fee_denom,
        min_weeks_locked: config.min_weeks_locked,
        emergency_withdraw_enabled: config.emergency_withdraw_enabled,
        last_withdraw_timestamp: LAST_WITHDRAW_TIMESTAMP.load(deps.storage)?,
    })
}

/// Query the lock record of a token. Unknown tokens return an idle record.
pub fn query_lock_record(
    deps: Deps,
    token: String,
    token_id: String,
) -> StdResult<LockRecordResponse> {
    let token_addr = deps.api.addr_validate(&token)?;
    let record = LOCK_RECORDS
        .may_load(deps.storage, (&token_addr, token_id.as_str()))?
        .unwrap_or_default();
    Ok(LockRecordResponse {
        token,
        token_id,
        original_owner: record.original_owner,
        tunneled_to_domain: record.tunneled_to_domain,
        lock_expiry: record.lock_expiry,
        failure_unlock_at: record.failure_unlock_at,
        delivery: record.delivery,
    })
}

pub fn query_token_enabled(deps: Deps, token: String) -> StdResult<TokenEnabledResponse> {
    let token_addr = deps.api.addr_validate(&token)?;
    let enabled = ENABLED_TOKENS
        .may_load(deps.storage, &token_addr)?
        .unwrap_or(false);
    Ok(TokenEnabledResponse { token, enabled })
}

pub fn query_counterpart(deps: Deps, domain: u32) -> StdResult<CounterpartResponse> {
    let contract = COUNTERPARTS.may_load(deps.storage, domain)?;
    Ok(CounterpartResponse { domain, contract })
}

/// Query paginated list of counterparts.
pub fn query_counterparts(
    deps: Deps,
    start_after: Option<u32>,
    limit: Option<u32>,
) -> StdResult<CounterpartsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let counterparts = COUNTERPARTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (domain, contract) = item?;
            Ok(CounterpartEntry { domain, contract })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(CounterpartsResponse { counterparts })
}

/// Query which emergency withdraw conditions currently hold for a token.
pub fn query_emergency_status(
    deps: Deps,
    env: Env,
    token: String,
    token_id: String,
) -> StdResult<EmergencyStatusResponse> {
    let config = CONFIG.load(deps.storage)?;
    let token_addr = deps.api.addr_validate(&token)?;
    let record = LOCK_RECORDS
        .may_load(deps.storage, (&token_addr, token_id.as_str()))?
        .unwrap_or_default();
    let last_withdraw = LAST_WITHDRAW_TIMESTAMP.load(deps.storage)?;
    let eligibility =
        record.emergency_eligibility(&config, last_withdraw, env.block.time.seconds());

    Ok(EmergencyStatusResponse {
        allowed: eligibility.any(),
        admin_override: eligibility.admin_override,
        bridge_inactive: eligibility.bridge_inactive,
        delivery_failed: eligibility.delivery_failed,
        original_owner: record.original_owner,
    })
}

pub fn query_transfer_processed(
    deps: Deps,
    transfer_id: Binary,
) -> StdResult<TransferProcessedResponse> {
    let processed = PROCESSED_TRANSFERS.has(deps.storage, transfer_id.as_slice());
    Ok(TransferProcessedResponse {
        transfer_id,
        processed,
    })
}

pub fn query_pending_admin(deps: Deps) -> StdResult<PendingAdminResponse> {
    Ok(PendingAdminResponse {
        pending_admin: PENDING_ADMIN.may_load(deps.storage)?,
    })
}
