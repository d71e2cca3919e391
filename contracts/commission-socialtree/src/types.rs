//! Core data structures for the commission ledger.
//!
//! - `Content` and `Subscription` are the persisted records; subscription
//!   price and referrer are snapshots taken at subscribe time and never
//!   track later registry or referral-edge changes.
//! - View structs mirror what the off-chain display layer consumes.

use near_sdk::json_types::U128;
use near_sdk::{near, AccountId};

/// Opaque content identifier, supplied verbatim by the off-chain catalog.
pub type ContentId = String;

#[derive(Clone, Debug, PartialEq)]
#[near(serializers = [json, borsh])]
pub struct Content {
    pub price: U128,
    pub creator: AccountId,
}

#[derive(Clone, Debug)]
#[near(serializers = [json, borsh])]
pub struct Subscription {
    pub price: U128,
    pub start_time: u64,
    pub end_time: u64,
    pub referrer: Option<AccountId>,
    /// Stored flag only. Expiry is derived from `end_time` at read time;
    /// consumers must check both.
    pub active: bool,
}

#[near(serializers = [json])]
pub struct SubscriptionStatusView {
    pub active: bool,
    pub end_time: u64,
}

#[near(serializers = [json])]
pub struct ConfigView {
    pub commission_rate: U128,
    pub min_distribution_amount: U128,
    pub subscription_period_ns: u64,
    pub max_referral_depth: u32,
}

#[near(serializers = [json])]
pub struct LedgerStats {
    pub owner: AccountId,
    pub total_received: U128,
    pub total_creator_paid: U128,
    pub total_commissions_pending: U128,
    pub total_withdrawn: U128,
}
