//! On-chain commission ledger for the SocialTree content-subscription
//! platform: a content registry, per-user referral edges, subscription
//! records, and a recursive, geometrically decaying commission distribution
//! with pull-based withdrawal.

use crate::constants::{
    COMMISSION_RATE, MAX_REFERRAL_DEPTH, MIN_DISTRIBUTION_AMOUNT, SUBSCRIPTION_PERIOD_NS,
};
use crate::errors::CommissionError;
use crate::state::CommissionState;
use crate::types::{
    ConfigView, Content, ContentId, LedgerStats, Subscription, SubscriptionStatusView,
};
use near_sdk::json_types::U128;
use near_sdk::{env, near, AccountId, PanicOnDefault, Promise};

pub mod constants;
mod content;
pub mod errors;
mod events;
mod referral;
pub mod state;
pub mod state_versions;
mod subscription;
pub mod types;
mod withdraw;

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct CommissionContract {
    state: CommissionState,
}

#[near]
impl CommissionContract {
    #[init]
    pub fn new(owner_id: AccountId) -> Self {
        Self {
            state: CommissionState::new(owner_id),
        }
    }

    // --- Content registry ---

    #[handle_result]
    pub fn set_content(
        &mut self,
        content_id: ContentId,
        price: U128,
        creator: AccountId,
    ) -> Result<(), CommissionError> {
        content::set_content(
            &mut self.state,
            &env::predecessor_account_id(),
            content_id,
            price,
            creator,
        )
    }

    pub fn get_content(&self, content_id: ContentId) -> Option<Content> {
        content::get_content(&self.state, &content_id)
    }

    // --- Referral graph ---

    #[handle_result]
    pub fn set_referrer(&mut self, referrer: AccountId) -> Result<(), CommissionError> {
        referral::set_referrer(&mut self.state, &env::predecessor_account_id(), referrer)
    }

    pub fn get_referrer(&self, account_id: AccountId) -> Option<AccountId> {
        self.state.referrers.get(&account_id).cloned()
    }

    pub fn get_referred_users(
        &self,
        account_id: AccountId,
        from_index: u32,
        limit: u32,
    ) -> Vec<AccountId> {
        referral::get_referred_users(&self.state, &account_id, from_index, limit)
    }

    pub fn get_referral_chain(&self, account_id: AccountId) -> Vec<AccountId> {
        referral::get_referral_chain(&self.state, &account_id)
    }

    #[handle_result]
    pub fn migrate_referrer(
        &mut self,
        user: AccountId,
        new_referrer: AccountId,
    ) -> Result<(), CommissionError> {
        referral::migrate_referrer(
            &mut self.state,
            &env::predecessor_account_id(),
            user,
            new_referrer,
        )
    }

    #[handle_result]
    pub fn migrate_referral_network(
        &mut self,
        from_user: AccountId,
        to_referrer: AccountId,
        max_users: u32,
    ) -> Result<u32, CommissionError> {
        referral::migrate_referral_network(
            &mut self.state,
            &env::predecessor_account_id(),
            from_user,
            to_referrer,
            max_users,
        )
    }

    // --- Subscriptions ---

    #[payable]
    #[handle_result]
    pub fn subscribe(
        &mut self,
        content_id: ContentId,
        referrer: Option<AccountId>,
    ) -> Result<(), CommissionError> {
        subscription::subscribe(
            &mut self.state,
            &env::predecessor_account_id(),
            content_id,
            referrer,
            env::attached_deposit().as_yoctonear(),
        )
    }

    #[handle_result]
    pub fn cancel_subscription(&mut self, content_id: ContentId) -> Result<(), CommissionError> {
        subscription::cancel_subscription(
            &mut self.state,
            &env::predecessor_account_id(),
            content_id,
        )
    }

    pub fn get_subscription(&self, user: AccountId, content_id: ContentId) -> Option<Subscription> {
        self.state
            .subscriptions
            .get(&CommissionState::subscription_key(&user, &content_id))
            .cloned()
    }

    pub fn get_subscription_status(
        &self,
        user: AccountId,
        content_id: ContentId,
    ) -> SubscriptionStatusView {
        subscription::get_subscription_status(&self.state, &user, &content_id)
    }

    pub fn get_active_subscription_count(&self, user: AccountId) -> u64 {
        self.state
            .active_subscription_counts
            .get(&user)
            .copied()
            .unwrap_or(0)
    }

    // --- Commissions ---

    pub fn get_commission(&self, account_id: AccountId) -> U128 {
        U128(self.state.pending_commission(&account_id))
    }

    #[handle_result]
    pub fn withdraw(&mut self) -> Result<Promise, CommissionError> {
        withdraw::withdraw(&mut self.state, &env::predecessor_account_id())
    }

    #[private]
    pub fn on_withdraw(&mut self, account_id: AccountId, amount: U128) {
        withdraw::on_withdraw(&mut self.state, account_id, amount)
    }

    // --- Administration ---

    #[handle_result]
    pub fn set_owner(&mut self, new_owner: AccountId) -> Result<(), CommissionError> {
        self.state
            .set_owner(&env::predecessor_account_id(), new_owner)
    }

    pub fn get_owner(&self) -> AccountId {
        self.state.owner.clone()
    }

    pub fn get_config(&self) -> ConfigView {
        ConfigView {
            commission_rate: U128(COMMISSION_RATE),
            min_distribution_amount: U128(MIN_DISTRIBUTION_AMOUNT),
            subscription_period_ns: SUBSCRIPTION_PERIOD_NS,
            max_referral_depth: MAX_REFERRAL_DEPTH,
        }
    }

    pub fn get_stats(&self) -> LedgerStats {
        LedgerStats {
            owner: self.state.owner.clone(),
            total_received: U128(self.state.total_received),
            total_creator_paid: U128(self.state.total_creator_paid),
            total_commissions_pending: U128(self.state.total_commissions_pending),
            total_withdrawn: U128(self.state.total_withdrawn),
        }
    }

    #[handle_result]
    pub fn update_contract(&mut self) -> Result<Promise, CommissionError> {
        self.state.update_contract()
    }

    #[private]
    #[init(ignore_state)]
    pub fn migrate() -> Self {
        Self {
            state: CommissionState::migrate(),
        }
    }
}
