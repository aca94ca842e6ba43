//! Withdraw handler: burn an unlocked representation and send it home.

use common::{BridgedNftExecuteMsg, TunnelPayload, XCallExecuteMsg};
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};
use cw721::{Cw721QueryMsg, OperatorResponse, OwnerOfResponse};

use crate::error::ContractError;
use crate::state::{CONFIG, REMOTE_LOCKS};

/// Redeem `token_id` of the representation of `origin_token`.
///
/// Checks, in order: the lock has expired, the origin contract is set,
/// enough value is attached, the caller currently owns the representation
/// (asked live from the bridged collection), and the caller has approved
/// this contract for it so the collection accepts the burn. Nothing is
/// written unless all pass.
pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    origin_token: String,
    token_id: String,
    slippage: u64,
    relayer_fee: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let key = (origin_token.as_str(), token_id.as_str());
    let lock = REMOTE_LOCKS.may_load(deps.storage, key)?;

    let now = env.block.time.seconds();
    if let Some(lock) = &lock {
        if !lock.is_withdrawable(now) {
            return Err(ContractError::StillLocked);
        }
    }

    let origin_contract = config
        .origin_contract
        .clone()
        .ok_or(ContractError::OriginContractNotSet)?;

    let paid = info
        .funds
        .iter()
        .find(|c| c.denom == config.fee_denom)
        .map(|c| c.amount)
        .unwrap_or(Uint128::zero());
    if paid < relayer_fee {
        return Err(ContractError::ValueTooLow {
            expected: relayer_fee,
            got: paid,
        });
    }

    let lock = lock.ok_or(ContractError::NotTokenOwner)?;
    let owner: Option<OwnerOfResponse> = deps
        .querier
        .query_wasm_smart(
            lock.bridged_token.to_string(),
            &Cw721QueryMsg::OwnerOf {
                token_id: token_id.clone(),
                include_expired: None,
            },
        )
        .ok();
    let holder = owner
        .filter(|o| o.owner == info.sender.as_str())
        .ok_or(ContractError::NotTokenOwner)?;

    // Per-token approval or operator grant over the holder's tokens
    let this = env.contract.address.to_string();
    let approved = holder.approvals.iter().any(|a| a.spender == this)
        || deps
            .querier
            .query_wasm_smart::<OperatorResponse>(
                lock.bridged_token.to_string(),
                &Cw721QueryMsg::Operator {
                    owner: info.sender.to_string(),
                    operator: this,
                    include_expired: None,
                },
            )
            .is_ok();
    if !approved {
        return Err(ContractError::BurnNotApproved);
    }

    REMOTE_LOCKS.remove(deps.storage, key);

    let burn_msg = BridgedNftExecuteMsg::Burn {
        token_id: token_id.clone(),
    }
    .into_cosmos_msg(lock.bridged_token.to_string())?;

    let payload = TunnelPayload::WithdrawNft {
        origin_asset: origin_token.clone(),
        token_id: token_id.clone(),
    };
    let xcall_msg = XCallExecuteMsg::XCall {
        destination: config.origin_domain,
        to: origin_contract,
        delegate: info.sender.to_string(),
        slippage,
        callback: None,
        call_data: payload.encode()?,
        relayer_fee,
        callback_fee: Uint128::zero(),
    }
    .into_cosmos_msg(config.transport.to_string(), &config.fee_denom)?;

    Ok(Response::new()
        .add_message(burn_msg)
        .add_message(xcall_msg)
        .add_attribute("action", "withdraw")
        .add_attribute("owner", info.sender)
        .add_attribute("origin_token", origin_token)
        .add_attribute("bridged_token", lock.bridged_token)
        .add_attribute("token_id", token_id)
        .add_attribute("relayer_fee", relayer_fee))
}
