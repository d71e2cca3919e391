//! Subscription lifecycle and the decaying commission distribution.

use crate::constants::{
    COMMISSION_RATE, MAX_REFERRAL_DEPTH, MIN_DISTRIBUTION_AMOUNT, SUBSCRIPTION_PERIOD_NS,
};
use crate::errors::CommissionError;
use crate::events::CommissionEvent;
use crate::state::CommissionState;
use crate::types::{ContentId, Subscription, SubscriptionStatusView};
use near_sdk::json_types::U128;
use near_sdk::{env, AccountId, NearToken, Promise};

/// Full subscribe flow: validate, snapshot the record, credit the referral
/// chain, pay the creator the residual. Referrers are paid via pull
/// (`withdraw`); the creator is paid synchronously, after every state write.
pub fn subscribe(
    state: &mut CommissionState,
    caller: &AccountId,
    content_id: ContentId,
    referrer: Option<AccountId>,
    payment: u128,
) -> Result<(), CommissionError> {
    let content = state
        .contents
        .get(&content_id)
        .cloned()
        .ok_or(CommissionError::ContentNotFound)?;
    if payment != content.price.0 {
        return Err(CommissionError::PaymentMismatch);
    }
    if referrer.as_ref() == Some(caller) {
        return Err(CommissionError::SelfReferral);
    }
    // Per-subscription override; falls back to the caller's standing edge so
    // a referral-link campaign can redirect a single purchase.
    let referrer = referrer.or_else(|| state.referrers.get(caller).cloned());

    let key = CommissionState::subscription_key(caller, &content_id);
    let now = env::block_timestamp();
    if let Some(existing) = state.subscriptions.get(&key) {
        if existing.active && now <= existing.end_time {
            return Err(CommissionError::AlreadySubscribed);
        }
        // Replacing an expired-but-never-cancelled record; its stored flag
        // still holds a counter slot.
        if existing.active {
            decrement_active_count(state, caller);
        }
    }

    let end_time = now + SUBSCRIPTION_PERIOD_NS;
    state.subscriptions.insert(
        key,
        Subscription {
            price: content.price,
            start_time: now,
            end_time,
            referrer: referrer.clone(),
            active: true,
        },
    );
    increment_active_count(state, caller);
    state.total_received += payment;

    let distributed = distribute_commissions(state, caller, referrer.as_ref(), content.price.0);

    // Residual share: the non-commission base plus every level cut off by a
    // missing ancestor, the dust cutoff or the depth bound.
    let creator_share = content.price.0 - distributed;
    state.total_creator_paid += creator_share;
    if creator_share > 0 {
        let _ = Promise::new(content.creator.clone())
            .transfer(NearToken::from_yoctonear(creator_share));
    }

    CommissionEvent::Subscribed {
        user: caller.clone(),
        content_id,
        referrer,
        amount: content.price,
        end_time,
    }
    .emit();

    Ok(())
}

/// Walks the referrer chain crediting a geometrically decaying award at each
/// level: the named referrer receives the whole commission pool, each
/// further ancestor `COMMISSION_RATE%` of the previous award, truncating at
/// every step. Storage increments only, no transfers. Returns the total
/// credited.
fn distribute_commissions(
    state: &mut CommissionState,
    from_user: &AccountId,
    referrer: Option<&AccountId>,
    price: u128,
) -> u128 {
    let mut amount = price * COMMISSION_RATE / 100;
    let mut current = referrer.cloned();
    let mut level: u32 = 1;
    let mut distributed = 0u128;

    while let Some(recipient) = current {
        if amount < MIN_DISTRIBUTION_AMOUNT || level > MAX_REFERRAL_DEPTH {
            break;
        }
        state.credit_commission(&recipient, amount);
        distributed += amount;
        CommissionEvent::CommissionDistributed {
            recipient: recipient.clone(),
            from_user: from_user.clone(),
            amount: U128(amount),
            level,
        }
        .emit();

        current = state.referrers.get(&recipient).cloned();
        amount = amount * COMMISSION_RATE / 100;
        level += 1;
    }

    distributed
}

/// Deactivates the caller's subscription. No refund, no commission clawback;
/// already-distributed commissions are final.
pub fn cancel_subscription(
    state: &mut CommissionState,
    caller: &AccountId,
    content_id: ContentId,
) -> Result<(), CommissionError> {
    let key = CommissionState::subscription_key(caller, &content_id);
    {
        let subscription = state
            .subscriptions
            .get_mut(&key)
            .ok_or(CommissionError::SubscriptionNotFound)?;
        if !subscription.active {
            return Err(CommissionError::SubscriptionNotFound);
        }
        subscription.active = false;
    }
    decrement_active_count(state, caller);

    CommissionEvent::SubscriptionCancelled {
        user: caller.clone(),
        content_id,
        cancel_time: env::block_timestamp(),
    }
    .emit();

    Ok(())
}

/// `active` reflects both the stored flag and the wall clock; an expired
/// subscription reports inactive even if never cancelled.
pub fn get_subscription_status(
    state: &CommissionState,
    user: &AccountId,
    content_id: &str,
) -> SubscriptionStatusView {
    match state
        .subscriptions
        .get(&CommissionState::subscription_key(user, content_id))
    {
        Some(subscription) => SubscriptionStatusView {
            active: subscription.active && env::block_timestamp() <= subscription.end_time,
            end_time: subscription.end_time,
        },
        None => SubscriptionStatusView {
            active: false,
            end_time: 0,
        },
    }
}

fn increment_active_count(state: &mut CommissionState, user: &AccountId) {
    let count = state
        .active_subscription_counts
        .get(user)
        .copied()
        .unwrap_or(0);
    state
        .active_subscription_counts
        .insert(user.clone(), count + 1);
}

fn decrement_active_count(state: &mut CommissionState, user: &AccountId) {
    let count = state
        .active_subscription_counts
        .get(user)
        .copied()
        .unwrap_or(0);
    state
        .active_subscription_counts
        .insert(user.clone(), count.saturating_sub(1));
}
