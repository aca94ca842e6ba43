use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

use crate::state::XCallRecord;

#[cw_serde]
pub struct InstantiateMsg {
    pub domain: u32,
    pub relayer: String,
    pub fee_denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Same wire shape as `common::XCallExecuteMsg::XCall`
    XCall {
        destination: u32,
        to: String,
        delegate: String,
        slippage: u64,
        callback: Option<String>,
        call_data: Binary,
        relayer_fee: Uint128,
        callback_fee: Uint128,
    },

    /// Relayer: execute a message recorded on `origin_domain` against `to`
    Deliver {
        transfer_id: Binary,
        origin_domain: u32,
        origin_sender: String,
        to: String,
        call_data: Binary,
    },

    /// Relayer: report the delivery result of a message recorded here
    ReportOutcome { transfer_id: Binary, success: bool },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(XCallRecord)]
    XCall { transfer_id: Binary },

    /// Most recently recorded outbound message
    #[returns(Option<XCallRecord>)]
    LastXCall {},
}
