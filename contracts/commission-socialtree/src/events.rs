use near_sdk::json_types::U128;
use near_sdk::{near, AccountId};

#[near(event_json(standard = "nep297"))]
pub enum CommissionEvent {
    #[event_version("1.0.0")]
    ContentSet {
        content_id: String,
        price: U128,
        creator: AccountId,
    },
    #[event_version("1.0.0")]
    ReferrerSet { user: AccountId, referrer: AccountId },
    #[event_version("1.0.0")]
    Subscribed {
        user: AccountId,
        content_id: String,
        referrer: Option<AccountId>,
        amount: U128,
        end_time: u64,
    },
    #[event_version("1.0.0")]
    CommissionDistributed {
        recipient: AccountId,
        from_user: AccountId,
        amount: U128,
        level: u32,
    },
    #[event_version("1.0.0")]
    SubscriptionCancelled {
        user: AccountId,
        content_id: String,
        cancel_time: u64,
    },
    #[event_version("1.0.0")]
    CommissionWithdrawn { user: AccountId, amount: U128 },
    #[event_version("1.0.0")]
    ReferrerMigrated {
        user: AccountId,
        old_referrer: AccountId,
        new_referrer: AccountId,
    },
    #[event_version("1.0.0")]
    ReferralNetworkMigrated {
        from_user: AccountId,
        to_referrer: AccountId,
        migrated_count: u32,
    },
    #[event_version("1.0.0")]
    OwnerChanged {
        old_owner: AccountId,
        new_owner: AccountId,
        timestamp: u64,
    },
    #[event_version("1.0.0")]
    ContractUpgraded { owner: AccountId, timestamp: u64 },
    #[event_version("1.0.0")]
    StateMigrated {
        old_version: String,
        new_version: String,
    },
}
