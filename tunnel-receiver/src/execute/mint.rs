//! Inbound mint message handler.

use common::hash::bytes_to_hex;
use common::{BridgedNftExecuteMsg, TunnelPayload, XReceiveMsg};
use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::{RemoteLock, CONFIG, ORIGIN_MAPPINGS, PROCESSED_TRANSFERS, REMOTE_LOCKS};

/// Mint the representation of a locked NFT to its depositor.
///
/// Accepted only from the transport, and only when the asserted origin
/// matches the configured sender. The lock expiry is stored as received.
pub fn execute_xreceive(
    deps: DepsMut,
    info: MessageInfo,
    msg: XReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.transport {
        return Err(ContractError::NotTransport);
    }

    if msg.origin_domain != config.origin_domain
        || config.origin_contract.as_deref() != Some(msg.origin_sender.as_str())
    {
        return Err(ContractError::SenderInvalid);
    }

    if msg.transfer_id.len() != 32 {
        return Err(ContractError::InvalidTransferId {
            got: msg.transfer_id.len(),
        });
    }
    if PROCESSED_TRANSFERS.has(deps.storage, msg.transfer_id.as_slice()) {
        return Err(ContractError::TransferAlreadyProcessed {
            transfer_id: bytes_to_hex(&msg.transfer_id),
        });
    }
    PROCESSED_TRANSFERS.save(deps.storage, msg.transfer_id.as_slice(), &true)?;

    let (depositor, origin_asset, token_id, lock_expiry) =
        match TunnelPayload::decode(&msg.call_data)? {
            TunnelPayload::MintNft {
                depositor,
                origin_asset,
                token_id,
                lock_expiry,
            } => (depositor, origin_asset, token_id, lock_expiry),
            other => {
                return Err(ContractError::InvalidPayload {
                    expected: "mint_nft".to_string(),
                    got: other.kind().to_string(),
                })
            }
        };

    let bridged_token = ORIGIN_MAPPINGS
        .may_load(deps.storage, &origin_asset)?
        .ok_or_else(|| ContractError::OriginTokenNotMapped {
            origin_token: origin_asset.clone(),
        })?;
    let depositor_addr = deps.api.addr_validate(&depositor)?;

    REMOTE_LOCKS.save(
        deps.storage,
        (origin_asset.as_str(), token_id.as_str()),
        &RemoteLock {
            bridged_token: bridged_token.clone(),
            lock_expiry,
        },
    )?;

    let mint_msg = BridgedNftExecuteMsg::Mint {
        token_id: token_id.clone(),
        owner: depositor_addr.to_string(),
        token_uri: None,
        extension: None,
    }
    .into_cosmos_msg(bridged_token.to_string())?;

    Ok(Response::new()
        .add_message(mint_msg)
        .add_attribute("action", "mint")
        .add_attribute("owner", depositor_addr)
        .add_attribute("origin_token", origin_asset)
        .add_attribute("bridged_token", bridged_token)
        .add_attribute("token_id", token_id)
        .add_attribute("lock_expiry", lock_expiry.to_string())
        .add_attribute("transfer_id", bytes_to_hex(&msg.transfer_id)))
}
