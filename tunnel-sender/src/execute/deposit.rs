//! Deposit handler: lock an NFT and send the mint message.

use common::{TunnelPayload, XCallExecuteMsg, WEEK};
use cosmwasm_std::{
    to_json_binary, DepsMut, Env, MessageInfo, Response, StdError, Uint128, WasmMsg,
};
use cw721::{Cw721ExecuteMsg, Cw721QueryMsg, OwnerOfResponse};

use super::validate_token;
use crate::error::ContractError;
use crate::state::{
    DeliveryStatus, LockRecord, CONFIG, COUNTERPARTS, ENABLED_TOKENS, LOCK_RECORDS,
};

/// Amount of `denom` attached to the call
fn paid_amount(info: &MessageInfo, denom: &str) -> Uint128 {
    info.funds
        .iter()
        .find(|c| c.denom == denom)
        .map(|c| c.amount)
        .unwrap_or(Uint128::zero())
}

/// Lock `token_id` of `token` and send a mint message to the counterpart on
/// `destination_domain`.
///
/// All checks run before any state is written. The caller must be the
/// token's current owner, asked live from the collection. Custody is then
/// pulled with a cw721 `TransferNft` issued by this contract, so the owner
/// must have approved it beforehand; a failed pull reverts the whole call.
#[allow(clippy::too_many_arguments)]
pub fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    token_id: String,
    destination_domain: u32,
    weeks_locked: u64,
    relayer_fee: Uint128,
    callback_fee: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let token_addr = validate_token(deps.api, &token)?;

    let enabled = ENABLED_TOKENS
        .may_load(deps.storage, &token_addr)?
        .unwrap_or(false);
    if !enabled {
        return Err(ContractError::TokenNotEnabled { token });
    }

    if weeks_locked < config.min_weeks_locked {
        return Err(ContractError::LockTooShort {
            min_weeks: config.min_weeks_locked,
            got: weeks_locked,
        });
    }

    let counterpart = COUNTERPARTS
        .may_load(deps.storage, destination_domain)?
        .ok_or(ContractError::CounterpartNotSet {
            domain: destination_domain,
        })?;

    let key = (&token_addr, token_id.as_str());
    let existing = LOCK_RECORDS.may_load(deps.storage, key)?.unwrap_or_default();
    if existing.is_tunneled() {
        return Err(ContractError::AlreadyTunneled { token, token_id });
    }

    let owner: Option<OwnerOfResponse> = deps
        .querier
        .query_wasm_smart(
            token_addr.to_string(),
            &Cw721QueryMsg::OwnerOf {
                token_id: token_id.clone(),
                include_expired: None,
            },
        )
        .ok();
    if owner.map(|o| o.owner) != Some(info.sender.to_string()) {
        return Err(ContractError::NotTokenOwner);
    }

    let required = relayer_fee
        .checked_add(callback_fee)
        .map_err(StdError::from)?;
    let paid = paid_amount(&info, &config.fee_denom);
    if paid < required {
        return Err(ContractError::ValueTooLow {
            expected: required,
            got: paid,
        });
    }

    let lock_expiry = weeks_locked
        .checked_mul(WEEK)
        .and_then(|duration| env.block.time.seconds().checked_add(duration))
        .ok_or(ContractError::LockTooLong {
            weeks: weeks_locked,
        })?;

    let record = LockRecord {
        original_owner: Some(info.sender.clone()),
        tunneled_to_domain: destination_domain,
        lock_expiry,
        failure_unlock_at: existing.failure_unlock_at,
        delivery: DeliveryStatus::Pending,
    };
    LOCK_RECORDS.save(deps.storage, key, &record)?;

    let custody_msg = WasmMsg::Execute {
        contract_addr: token_addr.to_string(),
        msg: to_json_binary(&Cw721ExecuteMsg::TransferNft {
            recipient: env.contract.address.to_string(),
            token_id: token_id.clone(),
        })?,
        funds: vec![],
    };

    let payload = TunnelPayload::MintNft {
        depositor: info.sender.to_string(),
        origin_asset: token_addr.to_string(),
        token_id: token_id.clone(),
        lock_expiry,
    };
    let xcall_msg = XCallExecuteMsg::XCall {
        destination: destination_domain,
        to: counterpart.clone(),
        delegate: info.sender.to_string(),
        slippage: 0,
        callback: Some(env.contract.address.to_string()),
        call_data: payload.encode()?,
        relayer_fee,
        callback_fee,
    }
    .into_cosmos_msg(config.transport.to_string(), &config.fee_denom)?;

    Ok(Response::new()
        .add_message(custody_msg)
        .add_message(xcall_msg)
        .add_attribute("action", "deposit")
        .add_attribute("owner", info.sender)
        .add_attribute("token", token_addr)
        .add_attribute("token_id", token_id)
        .add_attribute("destination_domain", destination_domain.to_string())
        .add_attribute("counterpart", counterpart)
        .add_attribute("lock_expiry", lock_expiry.to_string())
        .add_attribute("relayer_fee", relayer_fee)
        .add_attribute("callback_fee", callback_fee))
}
