//! Transfer id computation.
//!
//! # Byte Layout (72 bytes total)
//! - Bytes 0-31:  origin domain (u32, big-endian, left-padded)
//! - Bytes 32-63: keccak256(origin sender address)
//! - Bytes 64-71: nonce (u64, big-endian)

use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the transport transfer id for the `nonce`-th send of `origin_sender`
pub fn compute_transfer_id(origin_domain: u32, origin_sender: &str, nonce: u64) -> [u8; 32] {
    let mut data = [0u8; 72];
    data[28..32].copy_from_slice(&origin_domain.to_be_bytes());
    data[32..64].copy_from_slice(&keccak256(origin_sender.as_bytes()));
    data[64..72].copy_from_slice(&nonce.to_be_bytes());
    keccak256(&data)
}

/// Format bytes as a 0x-prefixed hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
