//! Emergency withdraw: owner-initiated recovery of a stuck lock.

use cosmwasm_std::{to_json_binary, DepsMut, Env, MessageInfo, Response, WasmMsg};
use cw721::Cw721ExecuteMsg;

use super::validate_token;
use crate::error::ContractError;
use crate::state::{CONFIG, LAST_WITHDRAW_TIMESTAMP, LOCK_RECORDS};

/// Return a locked NFT straight to its original owner.
///
/// The destination domain is not told to burn the representation, so a
/// minted representation may be left orphaned there.
pub fn execute_emergency_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    token_id: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let token_addr = validate_token(deps.api, &token)?;
    let key = (&token_addr, token_id.as_str());
    let mut record = LOCK_RECORDS.may_load(deps.storage, key)?.unwrap_or_default();

    if !record.is_tunneled() || record.original_owner.as_ref() != Some(&info.sender) {
        return Err(ContractError::NotOriginalOwner);
    }

    let last_withdraw = LAST_WITHDRAW_TIMESTAMP.load(deps.storage)?;
    let eligibility =
        record.emergency_eligibility(&config, last_withdraw, env.block.time.seconds());
    if !eligibility.any() {
        return Err(ContractError::EmergencyWithdrawNotAllowed);
    }

    record.release();
    LOCK_RECORDS.save(deps.storage, key, &record)?;

    let release_msg = WasmMsg::Execute {
        contract_addr: token_addr.to_string(),
        msg: to_json_binary(&Cw721ExecuteMsg::TransferNft {
            recipient: info.sender.to_string(),
            token_id: token_id.clone(),
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(release_msg)
        .add_attribute("action", "emergency_withdraw")
        .add_attribute("owner", info.sender)
        .add_attribute("token", token_addr)
        .add_attribute("token_id", token_id)
        .add_attribute("reason", eligibility.reason()))
}
