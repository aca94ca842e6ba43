//! NFT Tunnel Receiver - Entry Points
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
    execute_accept_admin, execute_cancel_admin_proposal, execute_propose_admin,
    execute_remove_origin_mapping, execute_set_origin, execute_set_origin_mapping,
    execute_set_transport, execute_withdraw, execute_xreceive,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_origin_mapping, query_origin_mappings, query_pending_admin,
    query_remote_lock, query_transfer_processed,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let transport = deps.api.addr_validate(&msg.transport)?;

    if msg.origin_domain == 0 {
        return Err(ContractError::InvalidDomain {
            domain: msg.origin_domain,
        });
    }
    if msg.fee_denom.is_empty() {
        return Err(ContractError::InvalidFeeDenom);
    }

    let config = Config {
        admin,
        transport,
        fee_denom: msg.fee_denom,
        origin_domain: msg.origin_domain,
        origin_contract: msg.origin_contract.filter(|c| !c.trim().is_empty()),
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("transport", config.transport)
        .add_attribute("origin_domain", config.origin_domain.to_string())
        .add_attribute(
            "origin_contract",
            config.origin_contract.unwrap_or_default(),
        ))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::XReceive(msg) => execute_xreceive(deps, info, msg),
        ExecuteMsg::Withdraw {
            origin_token,
            token_id,
            slippage,
            relayer_fee,
        } => execute_withdraw(
            deps,
            env,
            info,
            origin_token,
            token_id,
            slippage,
            relayer_fee,
        ),

        ExecuteMsg::SetOriginMapping {
            origin_token,
            bridged_token,
        } => execute_set_origin_mapping(deps, info, origin_token, bridged_token),
        ExecuteMsg::RemoveOriginMapping { origin_token } => {
            execute_remove_origin_mapping(deps, info, origin_token)
        }
        ExecuteMsg::SetOrigin { domain, contract } => {
            execute_set_origin(deps, info, domain, contract)
        }
        ExecuteMsg::SetTransport { transport } => execute_set_transport(deps, info, transport),

        ExecuteMsg::ProposeAdmin { new_admin } => execute_propose_admin(deps, info, new_admin),
        ExecuteMsg::AcceptAdmin {} => execute_accept_admin(deps, info),
        ExecuteMsg::CancelAdminProposal {} => execute_cancel_admin_proposal(deps, info),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::RemoteLock {
            origin_token,
            token_id,
        } => to_json_binary(&query_remote_lock(deps, env, origin_token, token_id)?),
        QueryMsg::OriginMapping { origin_token } => {
            to_json_binary(&query_origin_mapping(deps, origin_token)?)
        }
        QueryMsg::OriginMappings { start_after, limit } => {
            to_json_binary(&query_origin_mappings(deps, start_after, limit)?)
        }
        QueryMsg::TransferProcessed { transfer_id } => {
            to_json_binary(&query_transfer_processed(deps, transfer_id)?)
        }
        QueryMsg::PendingAdmin {} => to_json_binary(&query_pending_admin(deps)?),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::RemoteLockResponse;
    use common::{BridgedNftExecuteMsg, TunnelPayload, XCallExecuteMsg, XReceiveMsg};
    use cosmwasm_std::testing::{
        mock_dependencies, mock_env, mock_info, MockApi, MockQuerier, MOCK_CONTRACT_ADDR,
    };
    use cosmwasm_std::{
        coins, from_json, ContractResult, CosmosMsg, MemoryStorage, OwnedDeps, SystemResult,
        Uint128, WasmMsg, WasmQuery,
    };
    use cw721::Cw721QueryMsg;

    const ADMIN: &str = "admin";
    const TRANSPORT: &str = "transport";
    const SENDER: &str = "remote_sender";
    const ORIGIN_TOKEN: &str = "remote_collection";
    const BRIDGED: &str = "bridged_collection";
    const USER: &str = "user";
    const ORIGIN_DOMAIN: u32 = 1;

    type MockDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

    fn setup(origin_contract: Option<&str>) -> MockDeps {
        let mut deps = mock_dependencies();
        instantiate(
            deps.as_mut(),
            mock_env(),
            mock_info(ADMIN, &[]),
            InstantiateMsg {
                admin: ADMIN.to_string(),
                transport: TRANSPORT.to_string(),
                fee_denom: "uluna".to_string(),
                origin_domain: ORIGIN_DOMAIN,
                origin_contract: origin_contract.map(str::to_string),
            },
        )
        .unwrap();
        execute(
            deps.as_mut(),
            mock_env(),
            mock_info(ADMIN, &[]),
            ExecuteMsg::SetOriginMapping {
                origin_token: ORIGIN_TOKEN.to_string(),
                bridged_token: BRIDGED.to_string(),
            },
        )
        .unwrap();
        deps
    }

    /// The bridged collection reports `owner` as the holder of every token,
    /// with this contract approved for it when `approved` is set
    fn holder_is(deps: &mut MockDeps, owner: &'static str, approved: bool) {
        deps.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { msg, .. } => match from_json(msg).unwrap() {
                Cw721QueryMsg::OwnerOf { .. } => {
                    let approvals = if approved {
                        format!(
                            r#"[{{"spender":"{}","expires":{{"never":{{}}}}}}]"#,
                            MOCK_CONTRACT_ADDR
                        )
                    } else {
                        "[]".to_string()
                    };
                    let json = format!(r#"{{"owner":"{}","approvals":{}}}"#, owner, approvals);
                    SystemResult::Ok(ContractResult::Ok(Binary::from(json.into_bytes())))
                }
                _ => SystemResult::Ok(ContractResult::Err("Approval not found".to_string())),
            },
            _ => panic!("unexpected query"),
        });
    }

    fn mint_message(token_id: &str, lock_expiry: u64, id_byte: u8) -> ExecuteMsg {
        ExecuteMsg::XReceive(XReceiveMsg {
            transfer_id: Binary::from(vec![id_byte; 32]),
            origin_domain: ORIGIN_DOMAIN,
            origin_sender: SENDER.to_string(),
            call_data: TunnelPayload::MintNft {
                depositor: USER.to_string(),
                origin_asset: ORIGIN_TOKEN.to_string(),
                token_id: token_id.to_string(),
                lock_expiry,
            }
            .encode()
            .unwrap(),
        })
    }

    fn withdraw_msg(token_id: &str, relayer_fee: u128) -> ExecuteMsg {
        ExecuteMsg::Withdraw {
            origin_token: ORIGIN_TOKEN.to_string(),
            token_id: token_id.to_string(),
            slippage: 300,
            relayer_fee: Uint128::new(relayer_fee),
        }
    }

    #[test]
    fn test_instantiate_validation() {
        let mut deps = mock_dependencies();
        let msg = InstantiateMsg {
            admin: ADMIN.to_string(),
            transport: TRANSPORT.to_string(),
            fee_denom: String::new(),
            origin_domain: ORIGIN_DOMAIN,
            origin_contract: None,
        };
        let err = instantiate(deps.as_mut(), mock_env(), mock_info(ADMIN, &[]), msg.clone())
            .unwrap_err();
        assert_eq!(err, ContractError::InvalidFeeDenom);

        let err = instantiate(
            deps.as_mut(),
            mock_env(),
            mock_info(ADMIN, &[]),
            InstantiateMsg {
                fee_denom: "uluna".to_string(),
                origin_domain: 0,
                ..msg
            },
        )
        .unwrap_err();
        assert_eq!(err, ContractError::InvalidDomain { domain: 0 });
    }

    #[test]
    fn test_mint_records_lock_verbatim() {
        let mut deps = setup(Some(SENDER));
        let env = mock_env();
        let expiry = env.block.time.seconds() + 1_000;

        let res = execute(
            deps.as_mut(),
            env.clone(),
            mock_info(TRANSPORT, &[]),
            mint_message("93", expiry, 1),
        )
        .unwrap();

        match &res.messages[0].msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr, msg, ..
            }) => {
                assert_eq!(contract_addr, BRIDGED);
                let mint: BridgedNftExecuteMsg = from_json(msg).unwrap();
                assert_eq!(
                    mint,
                    BridgedNftExecuteMsg::Mint {
                        token_id: "93".to_string(),
                        owner: USER.to_string(),
                        token_uri: None,
                        extension: None,
                    }
                );
            }
            other => panic!("unexpected msg: {:?}", other),
        }

        let lock: RemoteLockResponse = from_json(
            query(
                deps.as_ref(),
                env,
                QueryMsg::RemoteLock {
                    origin_token: ORIGIN_TOKEN.to_string(),
                    token_id: "93".to_string(),
                },
            )
            .unwrap(),
        )
        .unwrap();
        assert_eq!(lock.lock_expiry, expiry);
        assert!(!lock.withdrawable);
    }

    #[test]
    fn test_mint_rejects_wrong_origin() {
        let mut deps = setup(Some(SENDER));

        let mut msg = mint_message("1", 0, 1);
        if let ExecuteMsg::XReceive(inner) = &mut msg {
            inner.origin_domain = 99;
        }
        let err = execute(deps.as_mut(), mock_env(), mock_info(TRANSPORT, &[]), msg).unwrap_err();
        assert_eq!(err, ContractError::SenderInvalid);

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("anyone", &[]),
            mint_message("1", 0, 1),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::NotTransport);
    }

    #[test]
    fn test_mint_replay_rejected() {
        let mut deps = setup(Some(SENDER));
        execute(
            deps.as_mut(),
            mock_env(),
            mock_info(TRANSPORT, &[]),
            mint_message("1", 0, 7),
        )
        .unwrap();
        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info(TRANSPORT, &[]),
            mint_message("1", 0, 7),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ContractError::TransferAlreadyProcessed { .. }
        ));
    }

    #[test]
    fn test_withdraw_check_order() {
        let mut deps = setup(Some(SENDER));
        let env = mock_env();
        let expiry = env.block.time.seconds() + 100;

        execute(
            deps.as_mut(),
            env.clone(),
            mock_info(TRANSPORT, &[]),
            mint_message("5", expiry, 1),
        )
        .unwrap();
        holder_is(&mut deps, USER, true);

        let err = execute(
            deps.as_mut(),
            env.clone(),
            mock_info(USER, &coins(10, "uluna")),
            withdraw_msg("5", 10),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::StillLocked);

        let mut later = env.clone();
        later.block.time = later.block.time.plus_seconds(100);

        let err = execute(
            deps.as_mut(),
            later.clone(),
            mock_info(USER, &coins(9, "uluna")),
            withdraw_msg("5", 10),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::ValueTooLow {
                expected: Uint128::new(10),
                got: Uint128::new(9),
            }
        );

        let err = execute(
            deps.as_mut(),
            later.clone(),
            mock_info("stranger", &coins(10, "uluna")),
            withdraw_msg("5", 10),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::NotTokenOwner);

        holder_is(&mut deps, USER, false);
        let err = execute(
            deps.as_mut(),
            later.clone(),
            mock_info(USER, &coins(10, "uluna")),
            withdraw_msg("5", 10),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::BurnNotApproved);

        holder_is(&mut deps, USER, true);
        let res = execute(
            deps.as_mut(),
            later,
            mock_info(USER, &coins(10, "uluna")),
            withdraw_msg("5", 10),
        )
        .unwrap();
        assert_eq!(res.messages.len(), 2);
        match &res.messages[0].msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr, msg, ..
            }) => {
                assert_eq!(contract_addr, BRIDGED);
                assert_eq!(
                    from_json::<BridgedNftExecuteMsg>(msg).unwrap(),
                    BridgedNftExecuteMsg::Burn {
                        token_id: "5".to_string(),
                    }
                );
            }
            other => panic!("unexpected msg: {:?}", other),
        }
        match &res.messages[1].msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr,
                msg,
                funds,
            }) => {
                assert_eq!(contract_addr, TRANSPORT);
                assert_eq!(funds, &coins(10, "uluna"));
                let xcall: XCallExecuteMsg = from_json(msg).unwrap();
                let XCallExecuteMsg::XCall {
                    destination,
                    to,
                    slippage,
                    callback,
                    call_data,
                    ..
                } = xcall;
                assert_eq!(destination, ORIGIN_DOMAIN);
                assert_eq!(to, SENDER);
                assert_eq!(slippage, 300);
                assert_eq!(callback, None);
                assert_eq!(
                    TunnelPayload::decode(&call_data).unwrap(),
                    TunnelPayload::WithdrawNft {
                        origin_asset: ORIGIN_TOKEN.to_string(),
                        token_id: "5".to_string(),
                    }
                );
            }
            other => panic!("unexpected msg: {:?}", other),
        }
    }

    #[test]
    fn test_withdraw_requires_origin_contract() {
        let mut deps = setup(None);
        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info(USER, &coins(10, "uluna")),
            withdraw_msg("5", 10),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::OriginContractNotSet);
    }
}
