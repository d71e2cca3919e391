//! Frozen prior state layouts, kept verbatim for `migrate()`.

use crate::types::{Content, ContentId, Subscription};
use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::store::{LookupMap, Vector};
use near_sdk::AccountId;

/// 0.1.0 predates the per-user active-subscription counter and the
/// conservation counters.
#[derive(BorshSerialize, BorshDeserialize)]
#[borsh(crate = "near_sdk::borsh")]
pub struct StateV010 {
    pub version: String,
    pub owner: AccountId,
    pub contents: LookupMap<ContentId, Content>,
    pub referrers: LookupMap<AccountId, AccountId>,
    pub referred_users: LookupMap<AccountId, Vector<AccountId>>,
    pub pending_commissions: LookupMap<AccountId, u128>,
    pub subscriptions: LookupMap<String, Subscription>,
}
