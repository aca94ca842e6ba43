use common::hash::{bytes_to_hex, compute_transfer_id};
use common::{XCallbackMsg, XReceiveMsg};
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    StdResult, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{
    Config, XCallRecord, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, LAST_TRANSFER_ID, NONCE, XCALLS,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let relayer = deps.api.addr_validate(&msg.relayer)?;
    CONFIG.save(
        deps.storage,
        &Config {
            domain: msg.domain,
            relayer: relayer.clone(),
            fee_denom: msg.fee_denom,
        },
    )?;
    NONCE.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("domain", msg.domain.to_string())
        .add_attribute("relayer", relayer))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::XCall {
            destination,
            to,
            delegate,
            slippage,
            callback,
            call_data,
            relayer_fee,
            callback_fee,
        } => {
            let config = CONFIG.load(deps.storage)?;
            let expected = relayer_fee
                .checked_add(callback_fee)
                .map_err(StdError::from)?;
            let paid = info
                .funds
                .iter()
                .find(|c| c.denom == config.fee_denom)
                .map(|c| c.amount)
                .unwrap_or(Uint128::zero());
            if paid < expected {
                return Err(ContractError::InsufficientFee {
                    expected,
                    got: paid,
                });
            }

            let nonce = NONCE.load(deps.storage)?;
            NONCE.save(deps.storage, &(nonce + 1))?;
            let transfer_id = Binary::from(
                compute_transfer_id(config.domain, info.sender.as_str(), nonce).to_vec(),
            );

            let callback = callback.map(|c| deps.api.addr_validate(&c)).transpose()?;
            let record = XCallRecord {
                transfer_id: transfer_id.clone(),
                nonce,
                origin_sender: info.sender.clone(),
                destination,
                to: to.clone(),
                delegate,
                slippage,
                callback,
                call_data,
                relayer_fee,
                callback_fee,
                outcome: None,
            };
            XCALLS.save(deps.storage, transfer_id.as_slice(), &record)?;
            LAST_TRANSFER_ID.save(deps.storage, &transfer_id)?;

            Ok(Response::new()
                .add_attribute("action", "xcall")
                .add_attribute("transfer_id", bytes_to_hex(&transfer_id))
                .add_attribute("origin_sender", info.sender)
                .add_attribute("destination", destination.to_string())
                .add_attribute("to", to)
                .add_attribute("nonce", nonce.to_string()))
        }

        ExecuteMsg::Deliver {
            transfer_id,
            origin_domain,
            origin_sender,
            to,
            call_data,
        } => {
            ensure_relayer(deps.as_ref(), &info)?;
            let to = deps.api.addr_validate(&to)?;
            let msg = XReceiveMsg {
                transfer_id: transfer_id.clone(),
                origin_domain,
                origin_sender,
                call_data,
            }
            .into_cosmos_msg(to.to_string())?;

            Ok(Response::new()
                .add_message(msg)
                .add_attribute("action", "deliver")
                .add_attribute("transfer_id", bytes_to_hex(&transfer_id))
                .add_attribute("to", to))
        }

        ExecuteMsg::ReportOutcome {
            transfer_id,
            success,
        } => {
            ensure_relayer(deps.as_ref(), &info)?;
            let mut record = XCALLS
                .may_load(deps.storage, transfer_id.as_slice())?
                .ok_or_else(|| ContractError::UnknownTransfer {
                    transfer_id: bytes_to_hex(&transfer_id),
                })?;
            if record.outcome.is_some() {
                return Err(ContractError::OutcomeAlreadyReported {
                    transfer_id: bytes_to_hex(&transfer_id),
                });
            }
            record.outcome = Some(success);
            XCALLS.save(deps.storage, transfer_id.as_slice(), &record)?;

            let mut res = Response::new()
                .add_attribute("action", "report_outcome")
                .add_attribute("transfer_id", bytes_to_hex(&transfer_id))
                .add_attribute("success", success.to_string());
            if let Some(callback) = record.callback {
                res = res.add_message(
                    XCallbackMsg {
                        transfer_id,
                        success,
                        call_data: record.call_data,
                    }
                    .into_cosmos_msg(callback.to_string())?,
                );
            }
            Ok(res)
        }
    }
}

fn ensure_relayer(deps: Deps, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != CONFIG.load(deps.storage)?.relayer {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::XCall { transfer_id } => {
            to_json_binary(&XCALLS.load(deps.storage, transfer_id.as_slice())?)
        }
        QueryMsg::LastXCall {} => {
            let record = match LAST_TRANSFER_ID.may_load(deps.storage)? {
                Some(id) => XCALLS.may_load(deps.storage, id.as_slice())?,
                None => None,
            };
            to_json_binary(&record)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
    use cosmwasm_std::{coins, from_json, CosmosMsg, WasmMsg};

    fn setup() -> cosmwasm_std::OwnedDeps<
        cosmwasm_std::MemoryStorage,
        cosmwasm_std::testing::MockApi,
        cosmwasm_std::testing::MockQuerier,
    > {
        let mut deps = mock_dependencies();
        instantiate(
            deps.as_mut(),
            mock_env(),
            mock_info("creator", &[]),
            InstantiateMsg {
                domain: 1,
                relayer: "relayer".to_string(),
                fee_denom: "uluna".to_string(),
            },
        )
        .unwrap();
        deps
    }

    fn xcall(callback: Option<&str>, fee: u128) -> ExecuteMsg {
        ExecuteMsg::XCall {
            destination: 2,
            to: "receiver".to_string(),
            delegate: "user".to_string(),
            slippage: 0,
            callback: callback.map(str::to_string),
            call_data: Binary::from(b"{}".to_vec()),
            relayer_fee: Uint128::new(fee),
            callback_fee: Uint128::zero(),
        }
    }

    #[test]
    fn test_transfer_ids_are_unique_per_nonce() {
        let mut deps = setup();
        execute(deps.as_mut(), mock_env(), mock_info("sender", &[]), xcall(None, 0)).unwrap();
        let first: Option<XCallRecord> =
            from_json(query(deps.as_ref(), mock_env(), QueryMsg::LastXCall {}).unwrap()).unwrap();
        execute(deps.as_mut(), mock_env(), mock_info("sender", &[]), xcall(None, 0)).unwrap();
        let second: Option<XCallRecord> =
            from_json(query(deps.as_ref(), mock_env(), QueryMsg::LastXCall {}).unwrap()).unwrap();

        let (first, second) = (first.unwrap(), second.unwrap());
        assert_eq!(first.transfer_id.len(), 32);
        assert_ne!(first.transfer_id, second.transfer_id);
        assert_eq!(second.nonce, 1);
    }

    #[test]
    fn test_fee_sum_overflow_rejected() {
        let mut deps = setup();
        let mut msg = xcall(None, u128::MAX);
        if let ExecuteMsg::XCall { callback_fee, .. } = &mut msg {
            *callback_fee = Uint128::one();
        }
        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("sender", &coins(1, "uluna")),
            msg,
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::Std(StdError::Overflow { .. })));
    }

    #[test]
    fn test_fee_must_be_attached() {
        let mut deps = setup();
        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("sender", &coins(4, "uluna")),
            xcall(None, 5),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientFee {
                expected: Uint128::new(5),
                got: Uint128::new(4),
            }
        );
    }

    #[test]
    fn test_outcome_reported_once_to_callback() {
        let mut deps = setup();
        execute(
            deps.as_mut(),
            mock_env(),
            mock_info("sender", &[]),
            xcall(Some("sender"), 0),
        )
        .unwrap();
        let record: Option<XCallRecord> =
            from_json(query(deps.as_ref(), mock_env(), QueryMsg::LastXCall {}).unwrap()).unwrap();
        let transfer_id = record.unwrap().transfer_id;

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("sender", &[]),
            ExecuteMsg::ReportOutcome {
                transfer_id: transfer_id.clone(),
                success: true,
            },
        )
        .unwrap_err();
        assert_eq!(err, ContractError::Unauthorized);

        let res = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("relayer", &[]),
            ExecuteMsg::ReportOutcome {
                transfer_id: transfer_id.clone(),
                success: false,
            },
        )
        .unwrap();
        match &res.messages[0].msg {
            CosmosMsg::Wasm(WasmMsg::Execute { contract_addr, .. }) => {
                assert_eq!(contract_addr, "sender")
            }
            other => panic!("unexpected msg: {:?}", other),
        }

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("relayer", &[]),
            ExecuteMsg::ReportOutcome {
                transfer_id,
                success: true,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::OutcomeAlreadyReported { .. }));
    }
}
