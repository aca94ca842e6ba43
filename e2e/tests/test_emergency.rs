//! Emergency recovery on the origin domain.
//!
//! Covers the three eligibility conditions (admin override, global
//! inactivity, failed delivery after its grace period), the owner check,
//! and mutual exclusion with the ordinary withdraw path.

use common::{XCallbackMsg, DAY, WEEK};
use cw_multi_test::Executor;
use tunnel_e2e::{attr, has_action, TunnelEnv, RELAYER_FEE};
use tunnel_sender::msg::ConfigResponse;
use tunnel_sender::state::DeliveryStatus;

fn last_withdraw_timestamp(env: &TunnelEnv) -> u64 {
    let config: ConfigResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.sender, &tunnel_sender::msg::QueryMsg::Config {})
        .unwrap();
    config.last_withdraw_timestamp
}

fn set_emergency(env: &mut TunnelEnv, enabled: bool) {
    let admin = env.admin.clone();
    let sender = env.sender.clone();
    env.app
        .execute_contract(
            admin,
            sender,
            &tunnel_sender::msg::ExecuteMsg::SetEmergencyWithdraw { enabled },
            &[],
        )
        .unwrap();
}

/// Deposit "93" and make its mint delivery fail by unmapping the collection
/// on the receiver. Returns the time the failure was reported.
fn deposit_with_failed_delivery(env: &mut TunnelEnv) -> u64 {
    let user = env.user.clone();
    env.deposit(&user, "93", 4).unwrap();

    let admin = env.admin.clone();
    let receiver = env.receiver.clone();
    let origin_token = env.origin_nft.to_string();
    env.app
        .execute_contract(
            admin,
            receiver,
            &tunnel_receiver::msg::ExecuteMsg::RemoveOriginMapping { origin_token },
            &[],
        )
        .unwrap();

    env.advance(30);
    assert!(!env.relay_mint().unwrap());
    env.now()
}

#[test]
fn test_no_condition_no_emergency_withdraw() {
    let mut env = TunnelEnv::setup();
    let user = env.user.clone();

    env.deposit(&user, "93", 1).unwrap();
    env.relay_mint().unwrap();

    let status = env.emergency_status("93");
    assert!(!status.allowed);
    let err = env.emergency_withdraw(&user, "93").unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Emergency withdraw not allowed"));
    assert_eq!(
        env.owner_of(&env.origin_nft, "93"),
        Some(env.sender.to_string())
    );
}

#[test]
fn test_admin_override_leaves_representation_orphaned() {
    let mut env = TunnelEnv::setup();
    let user = env.user.clone();
    let other = env.other.clone();

    env.deposit(&user, "93", 1).unwrap();
    env.relay_mint().unwrap();
    set_emergency(&mut env, true);
    assert!(env.emergency_status("93").admin_override);

    let err = env.emergency_withdraw(&other, "93").unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("not called by the original owner of the token"));

    let res = env.emergency_withdraw(&user, "93").unwrap();
    assert!(has_action(&res, "emergency_withdraw"));
    assert_eq!(attr(&res, "reason"), Some("admin_override".to_string()));
    assert_eq!(env.owner_of(&env.origin_nft, "93"), Some(user.to_string()));

    // Nothing is sent to the destination domain
    assert_eq!(env.owner_of(&env.bridged_nft, "93"), Some(user.to_string()));
    let record = env.lock_record("93");
    assert_eq!(record.original_owner, None);
    assert_eq!(record.tunneled_to_domain, 0);
}

#[test]
fn test_global_inactivity_fallback() {
    let mut env = TunnelEnv::setup();
    let user = env.user.clone();

    env.deposit(&user, "93", 8).unwrap();
    env.relay_mint().unwrap();

    let window_end = last_withdraw_timestamp(&env) + 4 * WEEK;
    env.advance_to(window_end - 1);
    assert!(!env.emergency_status("93").bridge_inactive);
    assert!(env.emergency_withdraw(&user, "93").is_err());

    env.advance_to(window_end);
    let status = env.emergency_status("93");
    assert!(status.bridge_inactive);
    assert!(!status.admin_override);
    assert!(!status.delivery_failed);

    let before = last_withdraw_timestamp(&env);
    env.emergency_withdraw(&user, "93").unwrap();
    assert_eq!(env.owner_of(&env.origin_nft, "93"), Some(user.to_string()));

    // Emergency recovery does not count as bridge activity
    assert_eq!(last_withdraw_timestamp(&env), before);
}

#[test]
fn test_ordinary_withdraw_resets_inactivity_window() {
    let mut env = TunnelEnv::setup();
    let user = env.user.clone();

    env.deposit(&user, "1", 0).unwrap();
    env.relay_mint().unwrap();
    env.deposit(&user, "93", 0).unwrap();
    env.relay_mint().unwrap();

    env.advance(3 * WEEK);
    env.withdraw(&user, "1", RELAYER_FEE, RELAYER_FEE).unwrap();
    env.relay_withdraw().unwrap();
    assert_eq!(last_withdraw_timestamp(&env), env.now());

    // Four weeks after deployment the bridge is no longer considered stalled
    env.advance(WEEK);
    assert!(!env.emergency_status("93").bridge_inactive);
    assert!(env.emergency_withdraw(&user, "93").is_err());
}

#[test]
fn test_failed_delivery_opens_after_grace_period() {
    let mut env = TunnelEnv::setup();
    let user = env.user.clone();

    let failed_at = deposit_with_failed_delivery(&mut env);
    let record = env.lock_record("93");
    assert_eq!(record.failure_unlock_at, failed_at + 3 * DAY);
    assert_eq!(record.delivery, DeliveryStatus::Failed);
    assert_eq!(env.owner_of(&env.bridged_nft, "93"), None);

    env.advance_to(failed_at + 3 * DAY - 1);
    assert!(!env.emergency_status("93").delivery_failed);
    let err = env.emergency_withdraw(&user, "93").unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Emergency withdraw not allowed"));

    env.advance_to(failed_at + 3 * DAY);
    let res = env.emergency_withdraw(&user, "93").unwrap();
    assert_eq!(attr(&res, "reason"), Some("delivery_failed".to_string()));
    assert_eq!(env.owner_of(&env.origin_nft, "93"), Some(user.to_string()));
}

#[test]
fn test_failure_flag_kept_but_ignored_after_redeposit() {
    let mut env = TunnelEnv::setup();
    let user = env.user.clone();

    let failed_at = deposit_with_failed_delivery(&mut env);
    env.advance_to(failed_at + 3 * DAY);
    env.emergency_withdraw(&user, "93").unwrap();

    env.advance(60);
    env.deposit(&user, "93", 1).unwrap();
    let record = env.lock_record("93");
    assert_eq!(record.failure_unlock_at, failed_at + 3 * DAY);
    assert_eq!(record.delivery, DeliveryStatus::Pending);

    // The earlier failure does not open the new deposit
    let status = env.emergency_status("93");
    assert!(!status.delivery_failed);
    assert!(!status.allowed);
    let err = env.emergency_withdraw(&user, "93").unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Emergency withdraw not allowed"));
    assert_eq!(
        env.owner_of(&env.origin_nft, "93"),
        Some(env.sender.to_string())
    );
}

#[test]
fn test_failure_callback_handled_once_per_transfer() {
    let mut env = TunnelEnv::setup();
    let user = env.user.clone();

    env.deposit(&user, "93", 1).unwrap();
    let transport = env.origin_transport.clone();
    let record = env.last_xcall(&transport).unwrap();

    let res = env
        .report_outcome(&transport, record.transfer_id.clone(), false)
        .unwrap();
    assert!(has_action(&res, "callback_called"));
    assert_eq!(attr(&res, "success"), Some("false".to_string()));
    let failure_unlock_at = env.lock_record("93").failure_unlock_at;
    assert_eq!(failure_unlock_at, env.now() + 3 * DAY);

    // A duplicate callback for the same transfer is rejected and changes nothing
    env.advance(DAY);
    let sender = env.sender.clone();
    let err = env
        .app
        .execute_contract(
            transport,
            sender,
            &tunnel_sender::msg::ExecuteMsg::XCallback(XCallbackMsg {
                transfer_id: record.transfer_id,
                success: false,
                call_data: record.call_data,
            }),
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Transfer already processed"));
    assert_eq!(env.lock_record("93").failure_unlock_at, failure_unlock_at);
}

#[test]
fn test_withdraw_and_emergency_are_mutually_exclusive() {
    let mut env = TunnelEnv::setup();
    let user = env.user.clone();

    // Ordinary withdraw first: emergency path then finds no owner
    env.deposit(&user, "1", 0).unwrap();
    env.relay_mint().unwrap();
    env.withdraw(&user, "1", RELAYER_FEE, RELAYER_FEE).unwrap();
    env.relay_withdraw().unwrap();
    set_emergency(&mut env, true);
    let err = env.emergency_withdraw(&user, "1").unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("not called by the original owner of the token"));

    // Emergency first: the late withdraw message is rejected on arrival
    env.deposit(&user, "93", 0).unwrap();
    env.relay_mint().unwrap();
    env.emergency_withdraw(&user, "93").unwrap();
    env.withdraw(&user, "93", RELAYER_FEE, RELAYER_FEE).unwrap();

    let transport = env.destination_transport.clone();
    let record = env.last_xcall(&transport).unwrap();
    let err = env.deliver(&transport, &record).unwrap_err();
    assert!(err.root_cause().to_string().contains("Token not tunneled"));
    assert_eq!(env.owner_of(&env.origin_nft, "93"), Some(user.to_string()));
}
