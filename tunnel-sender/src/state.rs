//! State definitions for the NFT tunnel sender contract
//!
//! Lock bookkeeping is keyed by (collection, token_id). Ownership of the
//! NFT itself stays with the collection contract.

use common::{DAY, WEEK};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address for contract management
    pub admin: Addr,
    /// Messaging transport allowed to deliver messages and callbacks
    pub transport: Addr,
    /// Native denom used to pay transport fees
    pub fee_denom: String,
    /// Minimum lock duration accepted by `Deposit`, in weeks
    pub min_weeks_locked: u64,
    /// Global override allowing emergency withdrawals
    pub emergency_withdraw_enabled: bool,
}

/// Delivery state of the outbound mint message for a lock
#[cw_serde]
#[derive(Default)]
pub enum DeliveryStatus {
    /// No mint message has been sent for the current cycle
    #[default]
    NotSent,
    /// Sent, no delivery result yet
    Pending,
    /// The transport reported successful delivery
    Confirmed,
    /// The transport reported a failed delivery; recoverable via emergency withdraw
    Failed,
}

/// Per-token lock record
#[cw_serde]
#[derive(Default)]
pub struct LockRecord {
    /// Account that deposited the NFT (None once released)
    pub original_owner: Option<Addr>,
    /// Destination domain the NFT was tunneled to (0 = not tunneled)
    pub tunneled_to_domain: u32,
    /// Absolute timestamp (seconds) the representation unlocks at
    pub lock_expiry: u64,
    /// Timestamp after which emergency withdraw is allowed because the
    /// mint message failed (0 = no failure recorded). Only the failure
    /// callback writes it; it only counts while `delivery` is `Failed`.
    pub failure_unlock_at: u64,
    /// Outbound mint message state
    pub delivery: DeliveryStatus,
}

impl LockRecord {
    pub fn is_tunneled(&self) -> bool {
        self.tunneled_to_domain != 0
    }

    /// Clears custody fields. `lock_expiry` and `failure_unlock_at` are kept.
    pub fn release(&mut self) {
        self.original_owner = None;
        self.tunneled_to_domain = 0;
        self.delivery = DeliveryStatus::NotSent;
    }

    /// Evaluates each emergency withdraw condition at `now`. A failure flag
    /// left over from an earlier deposit does not count for the current one.
    pub fn emergency_eligibility(
        &self,
        config: &Config,
        last_withdraw_timestamp: u64,
        now: u64,
    ) -> EmergencyEligibility {
        EmergencyEligibility {
            admin_override: config.emergency_withdraw_enabled,
            bridge_inactive: now >= last_withdraw_timestamp.saturating_add(INACTIVITY_FALLBACK),
            delivery_failed: self.delivery == DeliveryStatus::Failed
                && self.failure_unlock_at != 0
                && now >= self.failure_unlock_at,
        }
    }
}

/// Which emergency withdraw conditions currently hold
#[cw_serde]
pub struct EmergencyEligibility {
    pub admin_override: bool,
    pub bridge_inactive: bool,
    pub delivery_failed: bool,
}

impl EmergencyEligibility {
    pub fn any(&self) -> bool {
        self.admin_override || self.bridge_inactive || self.delivery_failed
    }

    /// First condition that holds, for event attributes
    pub fn reason(&self) -> &'static str {
        if self.admin_override {
            "admin_override"
        } else if self.bridge_inactive {
            "bridge_inactive"
        } else if self.delivery_failed {
            "delivery_failed"
        } else {
            "none"
        }
    }
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:nft-tunnel-sender";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Grace period after a failed delivery before emergency withdraw opens
pub const FAILURE_GRACE_PERIOD: u64 = 3 * DAY;

/// Global inactivity window after which emergency withdraw opens for all locks
pub const INACTIVITY_FALLBACK: u64 = 4 * WEEK;

/// Default page size for paginated queries
pub const DEFAULT_LIMIT: u32 = 10;

/// Maximum page size for paginated queries
pub const MAX_LIMIT: u32 = 50;

// ============================================================================
// State Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Proposed next admin (two-step handover)
pub const PENDING_ADMIN: Item<Addr> = Item::new("pending_admin");

/// Collections enabled for tunneling
/// Key: collection address, Value: enabled
pub const ENABLED_TOKENS: Map<&Addr, bool> = Map::new("enabled_tokens");

/// Receiver contract per destination domain. Doubles as the allowlist of
/// (origin domain, origin sender) pairs accepted on inbound messages.
/// Key: domain id, Value: remote contract address
pub const COUNTERPARTS: Map<u32, String> = Map::new("counterparts");

/// Lock records
/// Key: (collection address, token_id), Value: LockRecord
pub const LOCK_RECORDS: Map<(&Addr, &str), LockRecord> = Map::new("lock_records");

/// Block time (seconds) of the last ordinary withdraw. Emergency withdrawals
/// never touch it.
pub const LAST_WITHDRAW_TIMESTAMP: Item<u64> = Item::new("last_withdraw_timestamp");

/// Inbound transfer ids already executed
/// Key: 32-byte transfer id, Value: true
pub const PROCESSED_TRANSFERS: Map<&[u8], bool> = Map::new("processed_transfers");

/// Transfer ids whose delivery callback has already been handled
/// Key: 32-byte transfer id, Value: delivery success
pub const PROCESSED_CALLBACKS: Map<&[u8], bool> = Map::new("processed_callbacks");

#[cfg(test)]
mod tests {
    use super::*;

    fn config(emergency: bool) -> Config {
        Config {
            admin: Addr::unchecked("admin"),
            transport: Addr::unchecked("transport"),
            fee_denom: "uluna".to_string(),
            min_weeks_locked: 1,
            emergency_withdraw_enabled: emergency,
        }
    }

    #[test]
    fn test_no_condition_holds() {
        let record = LockRecord::default();
        let eligibility = record.emergency_eligibility(&config(false), 1_000, 1_000 + WEEK);
        assert!(!eligibility.any());
        assert_eq!(eligibility.reason(), "none");
    }

    #[test]
    fn test_inactivity_boundary() {
        let record = LockRecord::default();
        let cfg = config(false);
        let last = 10_000;
        assert!(
            !record
                .emergency_eligibility(&cfg, last, last + INACTIVITY_FALLBACK - 1)
                .bridge_inactive
        );
        assert!(
            record
                .emergency_eligibility(&cfg, last, last + INACTIVITY_FALLBACK)
                .bridge_inactive
        );
    }

    #[test]
    fn test_failure_flag_requires_elapsed_grace() {
        let record = LockRecord {
            failure_unlock_at: 500_000,
            delivery: DeliveryStatus::Failed,
            ..LockRecord::default()
        };
        let cfg = config(false);
        assert!(!record.emergency_eligibility(&cfg, 499_000, 499_999).delivery_failed);
        assert!(record.emergency_eligibility(&cfg, 499_000, 500_000).delivery_failed);
    }

    #[test]
    fn test_stale_failure_flag_ignored_for_new_deposit() {
        // Flag from a released cycle, token deposited again and in flight
        let record = LockRecord {
            original_owner: Some(Addr::unchecked("owner")),
            tunneled_to_domain: 2,
            lock_expiry: 900_000,
            failure_unlock_at: 500_000,
            delivery: DeliveryStatus::Pending,
        };
        let status = record.emergency_eligibility(&config(false), 499_000, 600_000);
        assert!(!status.delivery_failed);
        assert!(!status.any());
    }

    #[test]
    fn test_release_keeps_failure_flag() {
        let mut record = LockRecord {
            original_owner: Some(Addr::unchecked("owner")),
            tunneled_to_domain: 2,
            lock_expiry: 42,
            failure_unlock_at: 99,
            delivery: DeliveryStatus::Failed,
        };
        record.release();
        assert!(!record.is_tunneled());
        assert_eq!(record.original_owner, None);
        assert_eq!(record.lock_expiry, 42);
        assert_eq!(record.failure_unlock_at, 99);
    }
}
