//! XCall Mock - Test Messaging Transport
//!
//! Stands in for the cross-domain messaging transport. One instance lives
//! on each domain:
//! - `XCall` records an outbound message and assigns it a transfer id
//! - `Deliver` (relayer) hands a message to its recipient as `XReceive`
//! - `ReportOutcome` (relayer) notifies the origin's callback as `XCallback`
//!
//! A failing `Deliver` reverts like any other transaction; the relayer is
//! expected to report `success: false` to the origin side in that case.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
