//! Common - Shared Types and Utilities for the NFT Tunnel Contracts
//!
//! This package provides the wire types both tunnel contracts speak:
//! the messaging-transport envelope, the application payload carried
//! inside it, and the execute surface of the bridged collection.

pub mod hash;
pub mod nft;
pub mod payload;
pub mod xcall;

pub use nft::BridgedNftExecuteMsg;
pub use payload::TunnelPayload;
pub use xcall::{XCallExecuteMsg, XCallbackMsg, XReceiveMsg};

/// One day in seconds
pub const DAY: u64 = 86_400;

/// One week in seconds
pub const WEEK: u64 = 7 * DAY;
