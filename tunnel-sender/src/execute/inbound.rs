//! Transport-delivered handlers: withdraw messages and delivery callbacks.

use common::hash::bytes_to_hex;
use common::{TunnelPayload, XCallbackMsg, XReceiveMsg};
use cosmwasm_std::{
    to_json_binary, Binary, DepsMut, Env, MessageInfo, Response, Storage, WasmMsg,
};
use cw721::Cw721ExecuteMsg;
use cw_storage_plus::Map;

use super::validate_token;
use crate::error::ContractError;
use crate::state::{
    DeliveryStatus, CONFIG, COUNTERPARTS, FAILURE_GRACE_PERIOD, LAST_WITHDRAW_TIMESTAMP,
    LOCK_RECORDS, PROCESSED_CALLBACKS, PROCESSED_TRANSFERS,
};

/// Record `transfer_id` in `seen`, rejecting repeats and malformed ids.
fn mark_processed<'a>(
    storage: &mut dyn Storage,
    seen: &Map<'a, &'a [u8], bool>,
    transfer_id: &'a Binary,
    value: bool,
) -> Result<(), ContractError> {
    if transfer_id.len() != 32 {
        return Err(ContractError::InvalidTransferId {
            got: transfer_id.len(),
        });
    }
    if seen.has(storage, transfer_id.as_slice()) {
        return Err(ContractError::TransferAlreadyProcessed {
            transfer_id: bytes_to_hex(transfer_id),
        });
    }
    seen.save(storage, transfer_id.as_slice(), &value)?;
    Ok(())
}

// ============================================================================
// XReceive — withdraw_nft
// ============================================================================

/// Release a locked NFT to its original owner.
///
/// Only the transport may call this, and only on behalf of the counterpart
/// registered for the asserted origin domain. The lock expiry is not checked
/// here: the receiver enforces it before sending the message.
pub fn execute_xreceive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: XReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.transport {
        return Err(ContractError::NotTransport);
    }

    let trusted = COUNTERPARTS.may_load(deps.storage, msg.origin_domain)?;
    if trusted.as_deref() != Some(msg.origin_sender.as_str()) {
        return Err(ContractError::SenderInvalid);
    }

    mark_processed(deps.storage, &PROCESSED_TRANSFERS, &msg.transfer_id, true)?;

    let (origin_asset, token_id) = match TunnelPayload::decode(&msg.call_data)? {
        TunnelPayload::WithdrawNft {
            origin_asset,
            token_id,
        } => (origin_asset, token_id),
        other => {
            return Err(ContractError::InvalidPayload {
                expected: "withdraw_nft".to_string(),
                got: other.kind().to_string(),
            })
        }
    };

    let token_addr = validate_token(deps.api, &origin_asset)?;
    let key = (&token_addr, token_id.as_str());
    let mut record = LOCK_RECORDS.may_load(deps.storage, key)?.unwrap_or_default();
    let owner = match (&record.original_owner, record.is_tunneled()) {
        (Some(owner), true) => owner.clone(),
        _ => {
            return Err(ContractError::TokenNotTunneled {
                token: origin_asset,
                token_id,
            })
        }
    };

    record.release();
    LOCK_RECORDS.save(deps.storage, key, &record)?;
    LAST_WITHDRAW_TIMESTAMP.save(deps.storage, &env.block.time.seconds())?;

    let release_msg = WasmMsg::Execute {
        contract_addr: token_addr.to_string(),
        msg: to_json_binary(&Cw721ExecuteMsg::TransferNft {
            recipient: owner.to_string(),
            token_id: token_id.clone(),
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(release_msg)
        .add_attribute("action", "withdraw")
        .add_attribute("owner", owner)
        .add_attribute("token", token_addr)
        .add_attribute("token_id", token_id)
        .add_attribute("origin_domain", msg.origin_domain.to_string())
        .add_attribute("transfer_id", bytes_to_hex(&msg.transfer_id)))
}

// ============================================================================
// XCallback — delivery result of mint_nft
// ============================================================================

/// Process the delivery outcome of a mint message.
///
/// A failure opens the emergency path for that token after
/// `FAILURE_GRACE_PERIOD`, whatever the lock currently looks like. Each
/// transfer id is handled once.
pub fn execute_xcallback(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: XCallbackMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.transport {
        return Err(ContractError::NotTransport);
    }

    mark_processed(
        deps.storage,
        &PROCESSED_CALLBACKS,
        &msg.transfer_id,
        msg.success,
    )?;

    let (depositor, origin_asset, token_id) = match TunnelPayload::decode(&msg.call_data)? {
        TunnelPayload::MintNft {
            depositor,
            origin_asset,
            token_id,
            ..
        } => (depositor, origin_asset, token_id),
        other => {
            return Err(ContractError::InvalidPayload {
                expected: "mint_nft".to_string(),
                got: other.kind().to_string(),
            })
        }
    };

    let token_addr = validate_token(deps.api, &origin_asset)?;
    let key = (&token_addr, token_id.as_str());
    let mut record = LOCK_RECORDS.may_load(deps.storage, key)?.unwrap_or_default();

    let mut response = Response::new()
        .add_attribute("action", "callback_called")
        .add_attribute("transfer_id", bytes_to_hex(&msg.transfer_id))
        .add_attribute("success", msg.success.to_string())
        .add_attribute("data", msg.call_data.to_base64())
        .add_attribute("owner", depositor)
        .add_attribute("token", token_addr.to_string())
        .add_attribute("token_id", token_id.clone());

    if msg.success {
        if record.is_tunneled() {
            record.delivery = DeliveryStatus::Confirmed;
            LOCK_RECORDS.save(deps.storage, key, &record)?;
        }
    } else {
        let failure_unlock_at = env.block.time.seconds() + FAILURE_GRACE_PERIOD;
        record.failure_unlock_at = failure_unlock_at;
        if record.is_tunneled() {
            record.delivery = DeliveryStatus::Failed;
        }
        LOCK_RECORDS.save(deps.storage, key, &record)?;
        response = response.add_attribute("failure_unlock_at", failure_unlock_at.to_string());
    }

    Ok(response)
}
