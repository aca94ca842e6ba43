//! Query handlers for the NFT tunnel receiver contract.

use cosmwasm_std::{Binary, Deps, Env, Order, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{
    ConfigResponse, OriginMappingEntry, OriginMappingResponse, OriginMappingsResponse,
    PendingAdminResponse, RemoteLockResponse, TransferProcessedResponse,
};
use crate::state::{
    CONFIG, DEFAULT_LIMIT, MAX_LIMIT, ORIGIN_MAPPINGS, PENDING_ADMIN, PROCESSED_TRANSFERS,
    REMOTE_LOCKS,
};

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        transport: config.transport,
        fee_denom: config.fee_denom,
        origin_domain: config.origin_domain,
        origin_contract: config.origin_contract,
    })
}

/// Query the time-lock of a representation.
pub fn query_remote_lock(
    deps: Deps,
    env: Env,
    origin_token: String,
    token_id: String,
) -> StdResult<RemoteLockResponse> {
    let lock = REMOTE_LOCKS.may_load(deps.storage, (origin_token.as_str(), token_id.as_str()))?;
    let now = env.block.time.seconds();
    Ok(match lock {
        Some(lock) => RemoteLockResponse {
            origin_token,
            token_id,
            withdrawable: lock.is_withdrawable(now),
            bridged_token: Some(lock.bridged_token),
            lock_expiry: lock.lock_expiry,
        },
        None => RemoteLockResponse {
            origin_token,
            token_id,
            bridged_token: None,
            lock_expiry: 0,
            withdrawable: false,
        },
    })
}

pub fn query_origin_mapping(deps: Deps, origin_token: String) -> StdResult<OriginMappingResponse> {
    let bridged_token = ORIGIN_MAPPINGS.may_load(deps.storage, &origin_token)?;
    Ok(OriginMappingResponse {
        origin_token,
        bridged_token,
    })
}

/// Query paginated list of origin mappings.
pub fn query_origin_mappings(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<OriginMappingsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let mappings = ORIGIN_MAPPINGS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (origin_token, bridged_token) = item?;
            Ok(OriginMappingEntry {
                origin_token,
                bridged_token,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(OriginMappingsResponse { mappings })
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
