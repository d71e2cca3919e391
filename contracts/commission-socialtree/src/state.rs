use crate::errors::CommissionError;
use crate::events::CommissionEvent;
use crate::state_versions::StateV010;
use crate::types::{Content, ContentId, Subscription};
use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::store::{LookupMap, Vector};
use near_sdk::{env, AccountId, BorshStorageKey, Gas, NearToken, Promise};
use near_sdk_macros::NearSchema;
use semver::Version;

const CALL_GAS: Gas = Gas::from_tgas(200);
const NO_ARGS: Vec<u8> = vec![];

#[derive(BorshSerialize, BorshDeserialize, BorshStorageKey)]
#[borsh(crate = "near_sdk::borsh")]
pub enum StorageKey {
    Contents,
    Referrers,
    ReferredUsers,
    ReferredList { account_id: AccountId },
    PendingCommissions,
    Subscriptions,
    ActiveSubscriptionCounts,
}

#[derive(BorshSerialize, BorshDeserialize, NearSchema)]
#[borsh(crate = "near_sdk::borsh")]
#[abi(borsh)]
pub struct CommissionState {
    pub version: String,
    pub owner: AccountId,
    pub contents: LookupMap<ContentId, Content>,
    pub referrers: LookupMap<AccountId, AccountId>,
    pub referred_users: LookupMap<AccountId, Vector<AccountId>>,
    pub pending_commissions: LookupMap<AccountId, u128>,
    pub subscriptions: LookupMap<String, Subscription>,
    pub active_subscription_counts: LookupMap<AccountId, u64>,
    pub total_received: u128,
    pub total_creator_paid: u128,
    pub total_commissions_pending: u128,
    pub total_withdrawn: u128,
}

impl CommissionState {
    pub fn new(owner: AccountId) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            owner,
            contents: LookupMap::new(StorageKey::Contents),
            referrers: LookupMap::new(StorageKey::Referrers),
            referred_users: LookupMap::new(StorageKey::ReferredUsers),
            pending_commissions: LookupMap::new(StorageKey::PendingCommissions),
            subscriptions: LookupMap::new(StorageKey::Subscriptions),
            active_subscription_counts: LookupMap::new(StorageKey::ActiveSubscriptionCounts),
            total_received: 0,
            total_creator_paid: 0,
            total_commissions_pending: 0,
            total_withdrawn: 0,
        }
    }

    pub fn is_owner(&self, account_id: &AccountId) -> bool {
        &self.owner == account_id
    }

    pub fn require_owner(&self, caller: &AccountId) -> Result<(), CommissionError> {
        if !self.is_owner(caller) {
            return Err(CommissionError::Unauthorized);
        }
        Ok(())
    }

    /// Storage key for the (subscriber, content) record. Account ids cannot
    /// contain ':', so the first separator is unambiguous.
    pub fn subscription_key(user: &AccountId, content_id: &str) -> String {
        format!("{}:{}", user, content_id)
    }

    pub fn pending_commission(&self, account_id: &AccountId) -> u128 {
        self.pending_commissions
            .get(account_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn credit_commission(&mut self, account_id: &AccountId, amount: u128) {
        let balance = self.pending_commission(account_id);
        self.pending_commissions
            .insert(account_id.clone(), balance + amount);
        self.total_commissions_pending += amount;
    }

    pub fn set_owner(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> Result<(), CommissionError> {
        self.require_owner(caller)?;
        let old_owner = self.owner.clone();
        self.owner = new_owner.clone();
        CommissionEvent::OwnerChanged {
            old_owner,
            new_owner,
            timestamp: env::block_timestamp_ms(),
        }
        .emit();
        Ok(())
    }

    pub fn update_contract(&mut self) -> Result<Promise, CommissionError> {
        if env::predecessor_account_id() != self.owner {
            return Err(CommissionError::Unauthorized);
        }
        let code = env::input()
            .filter(|input| !input.is_empty())
            .ok_or(CommissionError::MissingInput)?
            .to_vec();
        CommissionEvent::ContractUpgraded {
            owner: self.owner.clone(),
            timestamp: env::block_timestamp_ms(),
        }
        .emit();
        Ok(Promise::new(env::current_account_id())
            .deploy_contract(code)
            .function_call(
                "migrate".to_string(),
                NO_ARGS,
                NearToken::from_near(0),
                CALL_GAS,
            ))
    }

    pub fn migrate() -> Self {
        const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");
        let current_version =
            Version::parse(CURRENT_VERSION).expect("Invalid current version in Cargo.toml");

        let state_bytes: Vec<u8> = env::state_read().unwrap_or_default();

        // Try current version
        if let Ok(state) = near_sdk::borsh::from_slice::<CommissionState>(&state_bytes) {
            if let Ok(state_version) = Version::parse(&state.version) {
                if state_version >= current_version {
                    env::log_str("State is at current or newer version, no migration needed");
                    return state;
                }
            }
        }

        // Try version 0.1.0
        if let Ok(old_state) = near_sdk::borsh::from_slice::<StateV010>(&state_bytes) {
            if let Ok(old_version) = Version::parse(&old_state.version) {
                if old_version <= Version::parse("0.1.0").unwrap() {
                    env::log_str(&format!(
                        "Migrating from state version {}",
                        old_state.version
                    ));
                    let new_state = CommissionState {
                        version: CURRENT_VERSION.to_string(),
                        owner: old_state.owner,
                        contents: old_state.contents,
                        referrers: old_state.referrers,
                        referred_users: old_state.referred_users,
                        pending_commissions: old_state.pending_commissions,
                        subscriptions: old_state.subscriptions,
                        active_subscription_counts: LookupMap::new(
                            StorageKey::ActiveSubscriptionCounts,
                        ),
                        total_received: 0,
                        total_creator_paid: 0,
                        total_commissions_pending: 0,
                        total_withdrawn: 0,
                    };
                    CommissionEvent::StateMigrated {
                        old_version: old_state.version,
                        new_version: CURRENT_VERSION.to_string(),
                    }
                    .emit();
                    return new_state;
                }
            }
        }

        // If no valid state was found or version is unknown, initialize a new state
        env::log_str("No valid prior state found or unknown version, initializing new state");
        Self::new(env::current_account_id())
    }
}
