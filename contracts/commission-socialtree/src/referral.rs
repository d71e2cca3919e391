//! Referral graph: one edge per user, an append-only referee index, and the
//! bounded ancestor walk shared by distribution, cycle checks and views.

use crate::constants::{MAX_PAGE_LIMIT, MAX_REFERRAL_DEPTH};
use crate::errors::CommissionError;
use crate::events::CommissionEvent;
use crate::state::{CommissionState, StorageKey};
use near_sdk::store::Vector;
use near_sdk::AccountId;

/// Registers the caller's referrer. First write wins; the owner-only
/// migration operations below are the only path that re-points an edge.
pub fn set_referrer(
    state: &mut CommissionState,
    caller: &AccountId,
    referrer: AccountId,
) -> Result<(), CommissionError> {
    if caller == &referrer {
        return Err(CommissionError::SelfReferral);
    }
    if state.referrers.contains_key(caller) {
        return Err(CommissionError::ReferrerAlreadySet);
    }
    ensure_no_cycle(state, caller, &referrer)?;

    state.referrers.insert(caller.clone(), referrer.clone());
    push_referred_user(state, &referrer, caller.clone());

    CommissionEvent::ReferrerSet {
        user: caller.clone(),
        referrer,
    }
    .emit();

    Ok(())
}

/// Owner-only repair path: re-points `user`'s edge and maintains both
/// referee indexes. Does not touch subscription snapshots.
pub fn migrate_referrer(
    state: &mut CommissionState,
    caller: &AccountId,
    user: AccountId,
    new_referrer: AccountId,
) -> Result<(), CommissionError> {
    state.require_owner(caller)?;
    if user == new_referrer {
        return Err(CommissionError::SelfReferral);
    }
    let old_referrer = state
        .referrers
        .get(&user)
        .cloned()
        .ok_or(CommissionError::ReferrerNotSet)?;
    ensure_no_cycle(state, &user, &new_referrer)?;

    state.referrers.insert(user.clone(), new_referrer.clone());
    remove_referred_user(state, &old_referrer, &user);
    push_referred_user(state, &new_referrer, user.clone());

    CommissionEvent::ReferrerMigrated {
        user,
        old_referrer,
        new_referrer,
    }
    .emit();

    Ok(())
}

/// Owner-only bulk repair: re-points up to `max_users` direct referees of
/// `from_user` onto `to_referrer`. Capped because the referee index grows
/// without bound; repeat the call to drain a larger network. Referees for
/// whom the new edge would self-refer or close a cycle are left in place.
pub fn migrate_referral_network(
    state: &mut CommissionState,
    caller: &AccountId,
    from_user: AccountId,
    to_referrer: AccountId,
    max_users: u32,
) -> Result<u32, CommissionError> {
    state.require_owner(caller)?;
    if from_user == to_referrer {
        return Err(CommissionError::SelfReferral);
    }
    if max_users == 0 || max_users > MAX_PAGE_LIMIT {
        return Err(CommissionError::InvalidLimit);
    }

    let candidates: Vec<AccountId> = match state.referred_users.get(&from_user) {
        Some(list) => list.iter().take(max_users as usize).cloned().collect(),
        None => Vec::new(),
    };

    let mut migrated = 0u32;
    for user in candidates {
        if user == to_referrer || ensure_no_cycle(state, &user, &to_referrer).is_err() {
            continue;
        }
        state.referrers.insert(user.clone(), to_referrer.clone());
        remove_referred_user(state, &from_user, &user);
        push_referred_user(state, &to_referrer, user.clone());
        CommissionEvent::ReferrerMigrated {
            user,
            old_referrer: from_user.clone(),
            new_referrer: to_referrer.clone(),
        }
        .emit();
        migrated += 1;
    }

    CommissionEvent::ReferralNetworkMigrated {
        from_user,
        to_referrer,
        migrated_count: migrated,
    }
    .emit();

    Ok(migrated)
}

pub fn get_referred_users(
    state: &CommissionState,
    account_id: &AccountId,
    from_index: u32,
    limit: u32,
) -> Vec<AccountId> {
    assert!(limit <= MAX_PAGE_LIMIT, "Limit exceeds maximum allowed value");
    let list = match state.referred_users.get(account_id) {
        Some(list) => list,
        None => return Vec::new(),
    };
    list.iter()
        .skip(from_index as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

/// The bounded ancestor walk, starting at `account_id`'s own referrer.
pub fn get_referral_chain(state: &CommissionState, account_id: &AccountId) -> Vec<AccountId> {
    let mut chain = Vec::new();
    let mut current = state.referrers.get(account_id).cloned();
    while let Some(ancestor) = current {
        if chain.len() as u32 >= MAX_REFERRAL_DEPTH {
            break;
        }
        current = state.referrers.get(&ancestor).cloned();
        chain.push(ancestor);
    }
    chain
}

/// Rejects an edge that would make `user` its own ancestor. Bounded by the
/// same depth limit as distribution: an ancestor beyond the bound can never
/// be reached by a payout walk either.
fn ensure_no_cycle(
    state: &CommissionState,
    user: &AccountId,
    referrer: &AccountId,
) -> Result<(), CommissionError> {
    let mut current = Some(referrer.clone());
    let mut depth = 0u32;
    while let Some(ancestor) = current {
        if &ancestor == user {
            return Err(CommissionError::ReferralCycle);
        }
        depth += 1;
        if depth >= MAX_REFERRAL_DEPTH {
            break;
        }
        current = state.referrers.get(&ancestor).cloned();
    }
    Ok(())
}

fn push_referred_user(state: &mut CommissionState, referrer: &AccountId, user: AccountId) {
    if state.referred_users.get(referrer).is_none() {
        state.referred_users.insert(
            referrer.clone(),
            Vector::new(StorageKey::ReferredList {
                account_id: referrer.clone(),
            }),
        );
    }
    let list = state
        .referred_users
        .get_mut(referrer)
        .expect("Referee list should exist");
    list.push(user);
}

fn remove_referred_user(state: &mut CommissionState, referrer: &AccountId, user: &AccountId) {
    if let Some(list) = state.referred_users.get_mut(referrer) {
        if let Some(index) = list.iter().position(|id| id == user) {
            list.swap_remove(index as u32);
        }
    }
}
