//! Execute surface of the bridged representation collection.
//!
//! Serializes identically to the matching variants of `cw721-base`'s
//! `ExecuteMsg` with the default optional metadata extension, so the
//! receiver can drive any such collection that grants it the minter role.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, CosmosMsg, Empty, StdResult, WasmMsg};

#[cw_serde]
pub enum BridgedNftExecuteMsg {
    /// Mint `token_id` to `owner` (minter only)
    Mint {
        token_id: String,
        owner: String,
        token_uri: Option<String>,
        extension: Option<Empty>,
    },
    /// Destroy `token_id`. The caller needs owner, spender or operator
    /// rights on it; minter rights are not enough.
    Burn { token_id: String },
}

impl BridgedNftExecuteMsg {
    pub fn into_cosmos_msg<T: Into<String>>(self, collection: T) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: collection.into(),
            msg: to_json_binary(&self)?,
            funds: vec![],
        }
        .into())
    }
}
