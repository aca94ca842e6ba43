//! NFT Tunnel Receiver - Destination-Side Contract
//!
//! Mints representations of NFTs locked on the origin domain and enforces
//! their time-lock.
//!
//! # Incoming Flow (Mint)
//! 1. The sender locks an NFT and sends `mint_nft`
//! 2. The transport delivers it here as `XReceive`
//! 3. The representation is minted to the depositor with the lock expiry
//!    computed by the sender
//!
//! # Outgoing Flow (Withdraw)
//! 1. After the lock expires, the current holder calls `Withdraw`
//! 2. The representation is burned and `withdraw_nft` is sent back to the
//!    sender, which releases the original to its depositor
//!
//! Per-token state: Unminted → Locked → Withdrawable → Burned.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
