//! NFT Tunnel Sender - Origin-Side Locking Contract
//!
//! Holds original NFTs in custody while a representation lives on the
//! destination domain.
//!
//! # Outgoing Flow (Lock)
//! 1. Owner approves this contract on the collection and calls `Deposit`
//! 2. The NFT is pulled into custody and a `mint_nft` message is sent
//!    through the messaging transport to the registered counterpart
//! 3. The transport later reports the delivery outcome via `XCallback`
//!
//! # Incoming Flow (Release)
//! 1. The receiver burns the representation and sends `withdraw_nft`
//! 2. The transport delivers it here as `XReceive`
//! 3. The NFT is returned to the recorded original owner
//!
//! # Recovery
//! `EmergencyWithdraw` returns custody to the original owner without
//! touching the destination domain, when the admin has enabled it, when no
//! withdraw has landed for four weeks, or three days after a delivery
//! failure for that token.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
