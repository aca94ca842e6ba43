//! Messaging-transport wire types.
//!
//! The transport is an external contract. Outbound sends go through
//! [`XCallExecuteMsg::XCall`]; inbound deliveries and delivery-result
//! callbacks arrive as [`XReceiveMsg`] and [`XCallbackMsg`], which target
//! contracts embed in their own `ExecuteMsg` the same way cw20 receivers
//! embed `Cw20ReceiveMsg`.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Binary, Coin, CosmosMsg, StdError, StdResult, Uint128, WasmMsg,
};

/// Execute messages understood by the messaging transport
#[cw_serde]
pub enum XCallExecuteMsg {
    /// Send `call_data` to `to` on the `destination` domain
    XCall {
        /// Destination domain id
        destination: u32,
        /// Recipient contract on the destination domain
        to: String,
        /// Account allowed to act on the transfer if it gets stuck
        delegate: String,
        /// Slippage tolerance in basis points, forwarded verbatim
        slippage: u64,
        /// Local contract to notify with the delivery outcome (None = no callback)
        callback: Option<String>,
        /// Application payload
        call_data: Binary,
        /// Fee paid to the relayer delivering the message
        relayer_fee: Uint128,
        /// Fee paid for relaying the delivery result back
        callback_fee: Uint128,
    },
}

impl XCallExecuteMsg {
    /// Total native value that must accompany this send
    pub fn total_fee(&self) -> StdResult<Uint128> {
        match self {
            XCallExecuteMsg::XCall {
                relayer_fee,
                callback_fee,
                ..
            } => relayer_fee
                .checked_add(*callback_fee)
                .map_err(StdError::from),
        }
    }

    /// Builds the wasm execute message paying the fees in `fee_denom`
    pub fn into_cosmos_msg<T: Into<String>>(
        self,
        transport: T,
        fee_denom: &str,
    ) -> StdResult<CosmosMsg> {
        let total = self.total_fee()?;
        let funds = if total.is_zero() {
            vec![]
        } else {
            vec![Coin {
                denom: fee_denom.to_string(),
                amount: total,
            }]
        };
        Ok(WasmMsg::Execute {
            contract_addr: transport.into(),
            msg: to_json_binary(&self)?,
            funds,
        }
        .into())
    }
}

/// Inbound message delivered by the transport on the destination domain
#[cw_serde]
pub struct XReceiveMsg {
    /// Transport-assigned id of the transfer (32 bytes)
    pub transfer_id: Binary,
    /// Domain the message was sent from, as asserted by the transport
    pub origin_domain: u32,
    /// Contract that sent the message, as asserted by the transport
    pub origin_sender: String,
    /// Application payload
    pub call_data: Binary,
}

/// Delivery-result notification sent back to the origin of a transfer
#[cw_serde]
pub struct XCallbackMsg {
    /// Transport-assigned id of the transfer (32 bytes)
    pub transfer_id: Binary,
    /// Whether the destination call succeeded
    pub success: bool,
    /// The payload that was originally sent
    pub call_data: Binary,
}

// Wrappers so the serialized form matches the receiving contract's ExecuteMsg.
#[cw_serde]
enum ReceiverExecuteMsg {
    XReceive(XReceiveMsg),
    XCallback(XCallbackMsg),
}

impl XReceiveMsg {
    /// Serializes the message wrapped as `{"x_receive": {...}}`
    pub fn into_json_binary(self) -> StdResult<Binary> {
        to_json_binary(&ReceiverExecuteMsg::XReceive(self))
    }

    /// Creates a cosmos msg delivering this message to `contract_addr`
    pub fn into_cosmos_msg<T: Into<String>>(self, contract_addr: T) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: contract_addr.into(),
            msg: self.into_json_binary()?,
            funds: vec![],
        }
        .into())
    }
}

impl XCallbackMsg {
    /// Serializes the message wrapped as `{"x_callback": {...}}`
    pub fn into_json_binary(self) -> StdResult<Binary> {
        to_json_binary(&ReceiverExecuteMsg::XCallback(self))
    }

    /// Creates a cosmos msg delivering this callback to `contract_addr`
    pub fn into_cosmos_msg<T: Into<String>>(self, contract_addr: T) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: contract_addr.into(),
            msg: self.into_json_binary()?,
            funds: vec![],
        }
        .into())
    }
}
