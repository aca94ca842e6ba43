//! Application payload carried inside transport messages.
//!
//! The variant name acts as the function selector on the receiving side.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{from_json, to_json_binary, Binary, StdResult};

#[cw_serde]
pub enum TunnelPayload {
    /// Origin → destination: mint a representation for the depositor
    MintNft {
        depositor: String,
        origin_asset: String,
        token_id: String,
        /// Absolute unix timestamp (seconds) before which the representation
        /// cannot be withdrawn
        lock_expiry: u64,
    },
    /// Destination → origin: release the original asset
    WithdrawNft {
        origin_asset: String,
        token_id: String,
    },
}

impl TunnelPayload {
    pub fn encode(&self) -> StdResult<Binary> {
        to_json_binary(self)
    }

    pub fn decode(data: &Binary) -> StdResult<Self> {
        from_json(data)
    }

    /// Selector name, used in error messages and attributes
    pub fn kind(&self) -> &'static str {
        match self {
            TunnelPayload::MintNft { .. } => "mint_nft",
            TunnelPayload::WithdrawNft { .. } => "withdraw_nft",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_withdraw_payload() {
        let raw = Binary::from(
            br#"{"withdraw_nft":{"origin_asset":"collection","token_id":"93"}}"#.to_vec(),
        );
        let payload = TunnelPayload::decode(&raw).unwrap();
        assert_eq!(
            payload,
            TunnelPayload::WithdrawNft {
                origin_asset: "collection".to_string(),
                token_id: "93".to_string(),
            }
        );
        assert_eq!(payload.kind(), "withdraw_nft");
    }

    #[test]
    fn test_decode_rejects_unknown_selector() {
        let raw = Binary::from(br#"{"burn_everything":{}}"#.to_vec());
        assert!(TunnelPayload::decode(&raw).is_err());
    }
}
