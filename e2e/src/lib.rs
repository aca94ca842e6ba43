//! Tunnel E2E - Cross-Domain Test Harness
//!
//! Hosts both sides of the tunnel in a single `cw-multi-test` `App`:
//!
//! - Domain 1 (origin): `xcall-mock` transport, `tunnel-sender`, origin collection
//! - Domain 2 (destination): `xcall-mock` transport, `tunnel-receiver`, bridged
//!   collection minted by the receiver
//!
//! Both collections are stock `cw721-base` contracts.
//!
//! A relayer account moves messages between the two transports. Delivery that
//! reverts on the destination is reported back to the origin as a failure,
//! mirroring what a real transport's callback would carry.

use anyhow::{anyhow, Result as AnyResult};
use common::BridgedNftExecuteMsg;
use cosmwasm_std::{coins, Addr, Binary, Empty, Uint128};
use cw721::{Cw721ExecuteMsg, Cw721QueryMsg, OwnerOfResponse};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use serde::Serialize;

use tunnel_receiver::msg::RemoteLockResponse;
use tunnel_sender::msg::{EmergencyStatusResponse, LockRecordResponse};
use xcall_mock::state::XCallRecord;

pub const ORIGIN_DOMAIN: u32 = 1;
pub const DESTINATION_DOMAIN: u32 = 2;
pub const FEE_DENOM: &str = "uluna";
pub const RELAYER_FEE: u128 = 1_000;
pub const CALLBACK_FEE: u128 = 500;

// ============================================================================
// Contract Wrappers
// ============================================================================

pub fn contract_sender() -> Box<dyn Contract<Empty>> {
    Box::new(
        ContractWrapper::new(
            tunnel_sender::contract::execute,
            tunnel_sender::contract::instantiate,
            tunnel_sender::contract::query,
        )
        .with_migrate(tunnel_sender::contract::migrate),
    )
}

pub fn contract_receiver() -> Box<dyn Contract<Empty>> {
    Box::new(
        ContractWrapper::new(
            tunnel_receiver::contract::execute,
            tunnel_receiver::contract::instantiate,
            tunnel_receiver::contract::query,
        )
        .with_migrate(tunnel_receiver::contract::migrate),
    )
}

pub fn contract_nft() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        cw721_base::entry::execute,
        cw721_base::entry::instantiate,
        cw721_base::entry::query,
    ))
}

pub fn contract_xcall() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        xcall_mock::contract::execute,
        xcall_mock::contract::instantiate,
        xcall_mock::contract::query,
    ))
}

// ============================================================================
// Harness
// ============================================================================

pub struct TunnelEnv {
    pub app: App,
    pub admin: Addr,
    pub relayer: Addr,
    pub user: Addr,
    pub other: Addr,
    pub origin_transport: Addr,
    pub destination_transport: Addr,
    pub sender: Addr,
    pub receiver: Addr,
    pub origin_nft: Addr,
    pub bridged_nft: Addr,
}

impl TunnelEnv {
    /// Deploys and wires both domains. Tokens "1" and "93" of the origin
    /// collection belong to `user`.
    pub fn setup() -> Self {
        Self::setup_with(0, true)
    }

    /// Same as [`TunnelEnv::setup`] but lets the caller pick the minimum lock
    /// duration and whether the receiver knows its origin contract yet.
    pub fn setup_with(min_weeks_locked: u64, wire_origin: bool) -> Self {
        let mut app = App::default();
        let admin = Addr::unchecked("terra1admin");
        let relayer = Addr::unchecked("terra1relayer");
        let user = Addr::unchecked("terra1user");
        let other = Addr::unchecked("terra1other");

        app.init_modules(|router, _, storage| {
            for account in [&admin, &relayer, &user, &other] {
                router
                    .bank
                    .init_balance(storage, account, coins(10_000_000_000, FEE_DENOM))
                    .unwrap();
            }
        });

        let sender_code = app.store_code(contract_sender());
        let receiver_code = app.store_code(contract_receiver());
        let nft_code = app.store_code(contract_nft());
        let xcall_code = app.store_code(contract_xcall());

        let origin_transport =
            instantiate_transport(&mut app, xcall_code, &admin, &relayer, ORIGIN_DOMAIN);
        let destination_transport =
            instantiate_transport(&mut app, xcall_code, &admin, &relayer, DESTINATION_DOMAIN);

        let sender = app
            .instantiate_contract(
                sender_code,
                admin.clone(),
                &tunnel_sender::msg::InstantiateMsg {
                    admin: admin.to_string(),
                    transport: origin_transport.to_string(),
                    fee_denom: FEE_DENOM.to_string(),
                    min_weeks_locked,
                },
                &[],
                "tunnel-sender",
                Some(admin.to_string()),
            )
            .unwrap();

        let origin_nft = instantiate_nft(&mut app, nft_code, &admin, "Origin Punks", &admin);

        let receiver = app
            .instantiate_contract(
                receiver_code,
                admin.clone(),
                &tunnel_receiver::msg::InstantiateMsg {
                    admin: admin.to_string(),
                    transport: destination_transport.to_string(),
                    fee_denom: FEE_DENOM.to_string(),
                    origin_domain: ORIGIN_DOMAIN,
                    origin_contract: wire_origin.then(|| sender.to_string()),
                },
                &[],
                "tunnel-receiver",
                Some(admin.to_string()),
            )
            .unwrap();

        let bridged_nft = instantiate_nft(&mut app, nft_code, &admin, "Bridged Punks", &receiver);

        app.execute_contract(
            admin.clone(),
            sender.clone(),
            &tunnel_sender::msg::ExecuteMsg::SetTokenEnabled {
                token: origin_nft.to_string(),
                enabled: true,
            },
            &[],
        )
        .unwrap();
        app.execute_contract(
            admin.clone(),
            sender.clone(),
            &tunnel_sender::msg::ExecuteMsg::SetCounterpart {
                domain: DESTINATION_DOMAIN,
                contract: receiver.to_string(),
            },
            &[],
        )
        .unwrap();
        app.execute_contract(
            admin.clone(),
            receiver.clone(),
            &tunnel_receiver::msg::ExecuteMsg::SetOriginMapping {
                origin_token: origin_nft.to_string(),
                bridged_token: bridged_nft.to_string(),
            },
            &[],
        )
        .unwrap();

        let mut env = TunnelEnv {
            app,
            admin,
            relayer,
            user,
            other,
            origin_transport,
            destination_transport,
            sender,
            receiver,
            origin_nft,
            bridged_nft,
        };
        let user = env.user.clone();
        env.mint_origin("1", &user);
        env.mint_origin("93", &user);
        env
    }

    // ------------------------------------------------------------------------
    // Chain control
    // ------------------------------------------------------------------------

    pub fn now(&self) -> u64 {
        self.app.block_info().time.seconds()
    }

    pub fn advance(&mut self, seconds: u64) {
        self.app.update_block(|block| {
            block.time = block.time.plus_seconds(seconds);
            block.height += seconds / 5 + 1;
        });
    }

    /// Moves the block time forward to exactly `timestamp`
    pub fn advance_to(&mut self, timestamp: u64) {
        let now = self.now();
        if timestamp > now {
            self.advance(timestamp - now);
        }
    }

    pub fn balance(&self, addr: &Addr) -> Uint128 {
        self.app
            .wrap()
            .query_balance(addr, FEE_DENOM)
            .map(|c| c.amount)
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Origin domain
    // ------------------------------------------------------------------------

    pub fn mint_origin(&mut self, token_id: &str, owner: &Addr) {
        self.app
            .execute_contract(
                self.admin.clone(),
                self.origin_nft.clone(),
                &BridgedNftExecuteMsg::Mint {
                    token_id: token_id.to_string(),
                    owner: owner.to_string(),
                    token_uri: None,
                    extension: None,
                },
                &[],
            )
            .unwrap();
    }

    /// Approves the sender for `token_id` and deposits it towards the
    /// destination domain with the default fees.
    pub fn deposit(
        &mut self,
        owner: &Addr,
        token_id: &str,
        weeks_locked: u64,
    ) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            owner.clone(),
            self.origin_nft.clone(),
            &Cw721ExecuteMsg::Approve {
                spender: self.sender.to_string(),
                token_id: token_id.to_string(),
                expires: None,
            },
            &[],
        )?;
        self.try_deposit(owner, token_id, weeks_locked)
    }

    /// Deposit without approving the sender first
    pub fn try_deposit(
        &mut self,
        owner: &Addr,
        token_id: &str,
        weeks_locked: u64,
    ) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            owner.clone(),
            self.sender.clone(),
            &tunnel_sender::msg::ExecuteMsg::Deposit {
                token: self.origin_nft.to_string(),
                token_id: token_id.to_string(),
                destination_domain: DESTINATION_DOMAIN,
                weeks_locked,
                relayer_fee: Uint128::new(RELAYER_FEE),
                callback_fee: Uint128::new(CALLBACK_FEE),
            },
            &coins(RELAYER_FEE + CALLBACK_FEE, FEE_DENOM),
        )
    }

    pub fn emergency_withdraw(&mut self, caller: &Addr, token_id: &str) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            caller.clone(),
            self.sender.clone(),
            &tunnel_sender::msg::ExecuteMsg::EmergencyWithdraw {
                token: self.origin_nft.to_string(),
                token_id: token_id.to_string(),
            },
            &[],
        )
    }

    pub fn lock_record(&self, token_id: &str) -> LockRecordResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.sender,
                &tunnel_sender::msg::QueryMsg::LockRecord {
                    token: self.origin_nft.to_string(),
                    token_id: token_id.to_string(),
                },
            )
            .unwrap()
    }

    pub fn emergency_status(&self, token_id: &str) -> EmergencyStatusResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.sender,
                &tunnel_sender::msg::QueryMsg::EmergencyStatus {
                    token: self.origin_nft.to_string(),
                    token_id: token_id.to_string(),
                },
            )
            .unwrap()
    }

    // ------------------------------------------------------------------------
    // Destination domain
    // ------------------------------------------------------------------------

    /// Lets the receiver burn any of `caller`'s representations, then
    /// withdraws `token_id`
    pub fn withdraw(
        &mut self,
        caller: &Addr,
        token_id: &str,
        relayer_fee: u128,
        paid: u128,
    ) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            caller.clone(),
            self.bridged_nft.clone(),
            &Cw721ExecuteMsg::ApproveAll {
                operator: self.receiver.to_string(),
                expires: None,
            },
            &[],
        )?;
        self.try_withdraw(caller, token_id, relayer_fee, paid)
    }

    /// Withdraw without approving the receiver first
    pub fn try_withdraw(
        &mut self,
        caller: &Addr,
        token_id: &str,
        relayer_fee: u128,
        paid: u128,
    ) -> AnyResult<AppResponse> {
        let funds = if paid == 0 {
            vec![]
        } else {
            coins(paid, FEE_DENOM)
        };
        self.app.execute_contract(
            caller.clone(),
            self.receiver.clone(),
            &tunnel_receiver::msg::ExecuteMsg::Withdraw {
                origin_token: self.origin_nft.to_string(),
                token_id: token_id.to_string(),
                slippage: 300,
                relayer_fee: Uint128::new(relayer_fee),
            },
            &funds,
        )
    }

    pub fn remote_lock(&self, token_id: &str) -> RemoteLockResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.receiver,
                &tunnel_receiver::msg::QueryMsg::RemoteLock {
                    origin_token: self.origin_nft.to_string(),
                    token_id: token_id.to_string(),
                },
            )
            .unwrap()
    }

    // ------------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------------

    /// Current owner of `token_id` in `collection`, None if it does not exist
    pub fn owner_of(&self, collection: &Addr, token_id: &str) -> Option<String> {
        self.app
            .wrap()
            .query_wasm_smart::<OwnerOfResponse>(
                collection,
                &Cw721QueryMsg::OwnerOf {
                    token_id: token_id.to_string(),
                    include_expired: None,
                },
            )
            .ok()
            .map(|res| res.owner)
    }

    pub fn transfer_bridged(
        &mut self,
        from: &Addr,
        to: &Addr,
        token_id: &str,
    ) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            from.clone(),
            self.bridged_nft.clone(),
            &Cw721ExecuteMsg::TransferNft {
                recipient: to.to_string(),
                token_id: token_id.to_string(),
            },
            &[],
        )
    }

    // ------------------------------------------------------------------------
    // Relaying
    // ------------------------------------------------------------------------

    pub fn last_xcall(&self, transport: &Addr) -> AnyResult<XCallRecord> {
        let record: Option<XCallRecord> = self
            .app
            .wrap()
            .query_wasm_smart(transport, &xcall_mock::msg::QueryMsg::LastXCall {})?;
        record.ok_or_else(|| anyhow!("no xcall recorded on {}", transport))
    }

    /// Transport pair for a message recorded on `transport`: (origin domain,
    /// transport on the far side)
    fn route(&self, transport: &Addr) -> (u32, Addr) {
        if *transport == self.origin_transport {
            (ORIGIN_DOMAIN, self.destination_transport.clone())
        } else {
            (DESTINATION_DOMAIN, self.origin_transport.clone())
        }
    }

    /// Delivers a message recorded on `transport` to its recipient
    pub fn deliver(&mut self, transport: &Addr, record: &XCallRecord) -> AnyResult<AppResponse> {
        let (origin_domain, far_side) = self.route(transport);
        self.deliver_as(
            &far_side,
            record.transfer_id.clone(),
            origin_domain,
            record.origin_sender.to_string(),
            record.to.clone(),
            record.call_data.clone(),
        )
    }

    /// Delivers arbitrary call data through `transport`, letting tests forge
    /// the asserted origin
    pub fn deliver_as(
        &mut self,
        transport: &Addr,
        transfer_id: Binary,
        origin_domain: u32,
        origin_sender: String,
        to: String,
        call_data: Binary,
    ) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            self.relayer.clone(),
            transport.clone(),
            &xcall_mock::msg::ExecuteMsg::Deliver {
                transfer_id,
                origin_domain,
                origin_sender,
                to,
                call_data,
            },
            &[],
        )
    }

    pub fn report_outcome(
        &mut self,
        transport: &Addr,
        transfer_id: Binary,
        success: bool,
    ) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            self.relayer.clone(),
            transport.clone(),
            &xcall_mock::msg::ExecuteMsg::ReportOutcome {
                transfer_id,
                success,
            },
            &[],
        )
    }

    /// Relays the latest message recorded on `transport` and reports its
    /// outcome back. Returns whether delivery succeeded.
    pub fn relay_last(&mut self, transport: &Addr) -> AnyResult<bool> {
        let transport = transport.clone();
        let record = self.last_xcall(&transport)?;
        let delivered = self.deliver(&transport, &record).is_ok();
        if record.callback.is_some() {
            self.report_outcome(&transport, record.transfer_id, delivered)?;
        }
        Ok(delivered)
    }

    /// Relays the latest mint message from the origin domain
    pub fn relay_mint(&mut self) -> AnyResult<bool> {
        let transport = self.origin_transport.clone();
        self.relay_last(&transport)
    }

    /// Relays the latest withdraw message from the destination domain
    pub fn relay_withdraw(&mut self) -> AnyResult<bool> {
        let transport = self.destination_transport.clone();
        self.relay_last(&transport)
    }
}

fn instantiate_transport(
    app: &mut App,
    code_id: u64,
    admin: &Addr,
    relayer: &Addr,
    domain: u32,
) -> Addr {
    app.instantiate_contract(
        code_id,
        admin.clone(),
        &xcall_mock::msg::InstantiateMsg {
            domain,
            relayer: relayer.to_string(),
            fee_denom: FEE_DENOM.to_string(),
        },
        &[],
        format!("xcall-{}", domain),
        None,
    )
    .unwrap()
}

/// `cw721-base` instantiate message; optional fields are left to their defaults
#[derive(Serialize)]
struct NftInstantiateMsg<'a> {
    name: &'a str,
    symbol: &'a str,
    minter: &'a str,
}

fn instantiate_nft(app: &mut App, code_id: u64, admin: &Addr, name: &str, minter: &Addr) -> Addr {
    app.instantiate_contract(
        code_id,
        admin.clone(),
        &NftInstantiateMsg {
            name,
            symbol: "PUNK",
            minter: minter.as_str(),
        },
        &[],
        name,
        None,
    )
    .unwrap()
}

/// Finds an attribute value across all events of a response
pub fn attr(res: &AppResponse, key: &str) -> Option<String> {
    res.events
        .iter()
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

/// Whether any wasm event in the response carries `action = <action>`
pub fn has_action(res: &AppResponse, action: &str) -> bool {
    res.events
        .iter()
        .filter(|e| e.ty == "wasm")
        .flat_map(|e| e.attributes.iter())
        .any(|a| a.key == "action" && a.value == action)
}
