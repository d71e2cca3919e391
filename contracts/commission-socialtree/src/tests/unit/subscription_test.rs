use crate::constants::SUBSCRIPTION_PERIOD_NS;
use crate::errors::CommissionError;
use crate::tests::test_utils::*;
use near_sdk::testing_env;

// --- Validation ---

#[test]
fn subscribe_rejects_unregistered_content() {
    let mut contract = new_contract();
    let result = subscribe_as(&mut contract, &user1(), "missing", None, ONE_NEAR);
    assert_eq!(result, Err(CommissionError::ContentNotFound));
}

#[test]
fn subscribe_rejects_wrong_payment() {
    let mut contract = new_contract();
    register_content(&mut contract, "feed", 10 * ONE_NEAR);

    let underpay = subscribe_as(&mut contract, &user1(), "feed", None, 9 * ONE_NEAR);
    assert_eq!(underpay, Err(CommissionError::PaymentMismatch));

    let overpay = subscribe_as(&mut contract, &user1(), "feed", None, 11 * ONE_NEAR);
    assert_eq!(overpay, Err(CommissionError::PaymentMismatch));
}

#[test]
fn subscribe_rejects_self_as_referrer() {
    let mut contract = new_contract();
    register_content(&mut contract, "feed", 10 * ONE_NEAR);

    let result = subscribe_as(&mut contract, &user1(), "feed", Some(user1()), 10 * ONE_NEAR);
    assert_eq!(result, Err(CommissionError::SelfReferral));
}

#[test]
fn subscribe_rejects_duplicate_active_subscription() {
    let mut contract = new_contract();
    register_content(&mut contract, "feed", 10 * ONE_NEAR);

    subscribe_as(&mut contract, &user1(), "feed", None, 10 * ONE_NEAR).unwrap();
    let again = subscribe_as(&mut contract, &user1(), "feed", None, 10 * ONE_NEAR);
    assert_eq!(again, Err(CommissionError::AlreadySubscribed));
}

// --- Record semantics ---

#[test]
fn subscribe_snapshots_price_referrer_and_period() {
    let mut contract = new_contract();
    register_content(&mut contract, "feed", 10 * ONE_NEAR);
    set_referrer_as(&mut contract, &user1(), owner());

    // Explicit referral-link referrer overrides the standing edge.
    subscribe_as(&mut contract, &user1(), "feed", Some(user2()), 10 * ONE_NEAR).unwrap();

    let subscription = contract.get_subscription(user1(), "feed".to_string()).unwrap();
    assert_eq!(subscription.price.0, 10 * ONE_NEAR);
    assert_eq!(subscription.referrer, Some(user2()));
    assert_eq!(subscription.start_time, NOW_NS);
    assert_eq!(subscription.end_time, NOW_NS + SUBSCRIPTION_PERIOD_NS);
    assert!(subscription.active);

    // The override paid user2, not the standing referrer.
    assert_eq!(contract.get_commission(user2()).0, 2 * ONE_NEAR);
    assert_eq!(contract.get_commission(owner()).0, 0);
}

#[test]
fn subscribe_falls_back_to_the_standing_edge() {
    let mut contract = new_contract();
    register_content(&mut contract, "feed", 10 * ONE_NEAR);
    set_referrer_as(&mut contract, &user1(), owner());

    subscribe_as(&mut contract, &user1(), "feed", None, 10 * ONE_NEAR).unwrap();

    let subscription = contract.get_subscription(user1(), "feed".to_string()).unwrap();
    assert_eq!(subscription.referrer, Some(owner()));
    assert_eq!(contract.get_commission(owner()).0, 2 * ONE_NEAR);
}

// --- Lifecycle ---

#[test]
fn cancel_deactivates_without_refund() {
    let mut contract = new_contract();
    register_content(&mut contract, "feed", 10 * ONE_NEAR);
    set_referrer_as(&mut contract, &user2(), user1());
    subscribe_as(&mut contract, &user2(), "feed", None, 10 * ONE_NEAR).unwrap();

    testing_env!(context(user2()).build());
    contract.cancel_subscription("feed".to_string()).unwrap();

    let subscription = contract.get_subscription(user2(), "feed".to_string()).unwrap();
    assert!(!subscription.active);

    // No clawback: the distributed commission is final.
    assert_eq!(contract.get_commission(user1()).0, 2 * ONE_NEAR);
    assert_conserved(&contract);
}

#[test]
fn cancel_requires_an_active_subscription() {
    let mut contract = new_contract();
    register_content(&mut contract, "feed", 10 * ONE_NEAR);

    testing_env!(context(user1()).build());
    assert_eq!(
        contract.cancel_subscription("feed".to_string()),
        Err(CommissionError::SubscriptionNotFound)
    );

    subscribe_as(&mut contract, &user1(), "feed", None, 10 * ONE_NEAR).unwrap();
    testing_env!(context(user1()).build());
    contract.cancel_subscription("feed".to_string()).unwrap();

    // Second cancel sees an inactive record.
    testing_env!(context(user1()).build());
    assert_eq!(
        contract.cancel_subscription("feed".to_string()),
        Err(CommissionError::SubscriptionNotFound)
    );
}

#[test]
fn resubscribe_after_cancel_succeeds_and_distributes_again() {
    let mut contract = new_contract();
    register_content(&mut contract, "feed", 10 * ONE_NEAR);
    set_referrer_as(&mut contract, &user2(), user1());
    subscribe_as(&mut contract, &user2(), "feed", None, 10 * ONE_NEAR).unwrap();

    testing_env!(context(user2()).build());
    contract.cancel_subscription("feed".to_string()).unwrap();

    subscribe_as(&mut contract, &user2(), "feed", None, 10 * ONE_NEAR).unwrap();

    assert_eq!(contract.get_commission(user1()).0, 4 * ONE_NEAR);
    let stats = contract.get_stats();
    assert_eq!(stats.total_received.0, 20 * ONE_NEAR);
    assert_conserved(&contract);
}

#[test]
fn resubscribe_after_expiry_succeeds() {
    let mut contract = new_contract();
    register_content(&mut contract, "feed", 10 * ONE_NEAR);
    subscribe_as(&mut contract, &user1(), "feed", None, 10 * ONE_NEAR).unwrap();

    // Advance past the period; the stored record is now expired.
    let mut ctx = context_with_deposit(user1(), 10 * ONE_NEAR);
    ctx.block_timestamp(NOW_NS + SUBSCRIPTION_PERIOD_NS + 1);
    testing_env!(ctx.build());
    contract.subscribe("feed".to_string(), None).unwrap();

    let subscription = contract.get_subscription(user1(), "feed".to_string()).unwrap();
    assert_eq!(subscription.start_time, NOW_NS + SUBSCRIPTION_PERIOD_NS + 1);
    assert!(subscription.active);
    assert_conserved(&contract);
}

// --- Status view ---

#[test]
fn status_reports_active_within_the_period() {
    let mut contract = new_contract();
    register_content(&mut contract, "feed", 10 * ONE_NEAR);
    subscribe_as(&mut contract, &user1(), "feed", None, 10 * ONE_NEAR).unwrap();

    let status = contract.get_subscription_status(user1(), "feed".to_string());
    assert!(status.active);
    assert_eq!(status.end_time, NOW_NS + SUBSCRIPTION_PERIOD_NS);
}

#[test]
fn status_reports_inactive_after_expiry_without_cancel() {
    let mut contract = new_contract();
    register_content(&mut contract, "feed", 10 * ONE_NEAR);
    subscribe_as(&mut contract, &user1(), "feed", None, 10 * ONE_NEAR).unwrap();

    let mut ctx = context(user1());
    ctx.block_timestamp(NOW_NS + SUBSCRIPTION_PERIOD_NS + 1);
    testing_env!(ctx.build());

    let status = contract.get_subscription_status(user1(), "feed".to_string());
    assert!(!status.active, "expired subscriptions must report inactive");
    assert_eq!(status.end_time, NOW_NS + SUBSCRIPTION_PERIOD_NS);
}

#[test]
fn status_reports_inactive_after_cancel_and_for_unknown_pairs() {
    let mut contract = new_contract();
    register_content(&mut contract, "feed", 10 * ONE_NEAR);
    subscribe_as(&mut contract, &user1(), "feed", None, 10 * ONE_NEAR).unwrap();

    testing_env!(context(user1()).build());
    contract.cancel_subscription("feed".to_string()).unwrap();

    let status = contract.get_subscription_status(user1(), "feed".to_string());
    assert!(!status.active);

    let unknown = contract.get_subscription_status(user2(), "feed".to_string());
    assert!(!unknown.active);
    assert_eq!(unknown.end_time, 0);
}

// --- Active-subscription counter ---

#[test]
fn active_count_tracks_subscribe_and_cancel() {
    let mut contract = new_contract();
    register_content(&mut contract, "feed", 10 * ONE_NEAR);
    register_content(&mut contract, "vlog", 3 * ONE_NEAR);

    assert_eq!(contract.get_active_subscription_count(user1()), 0);

    subscribe_as(&mut contract, &user1(), "feed", None, 10 * ONE_NEAR).unwrap();
    subscribe_as(&mut contract, &user1(), "vlog", None, 3 * ONE_NEAR).unwrap();
    assert_eq!(contract.get_active_subscription_count(user1()), 2);

    testing_env!(context(user1()).build());
    contract.cancel_subscription("feed".to_string()).unwrap();
    assert_eq!(contract.get_active_subscription_count(user1()), 1);
}

#[test]
fn active_count_does_not_double_count_an_expired_renewal() {
    let mut contract = new_contract();
    register_content(&mut contract, "feed", 10 * ONE_NEAR);
    subscribe_as(&mut contract, &user1(), "feed", None, 10 * ONE_NEAR).unwrap();
    assert_eq!(contract.get_active_subscription_count(user1()), 1);

    let mut ctx = context_with_deposit(user1(), 10 * ONE_NEAR);
    ctx.block_timestamp(NOW_NS + SUBSCRIPTION_PERIOD_NS + 1);
    testing_env!(ctx.build());
    contract.subscribe("feed".to_string(), None).unwrap();

    assert_eq!(contract.get_active_subscription_count(user1()), 1);
}
