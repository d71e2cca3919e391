use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::{env, FunctionError};
use near_sdk_macros::NearSchema;

#[derive(Debug, PartialEq, NearSchema, BorshSerialize, BorshDeserialize)]
#[abi(borsh)]
pub enum CommissionError {
    Unauthorized,
    ContentNotFound,
    InvalidPrice,
    PaymentMismatch,
    AlreadySubscribed,
    SubscriptionNotFound,
    SelfReferral,
    ReferrerAlreadySet,
    ReferrerNotSet,
    ReferralCycle,
    NoBalance,
    InvalidLimit,
    MissingInput,
}

impl FunctionError for CommissionError {
    fn panic(&self) -> ! {
        env::panic_str(match self {
            CommissionError::Unauthorized => "Unauthorized access",
            CommissionError::ContentNotFound => "Content not found",
            CommissionError::InvalidPrice => "Price must be positive",
            CommissionError::PaymentMismatch => {
                "Attached deposit must equal the content price exactly"
            }
            CommissionError::AlreadySubscribed => "Subscription is still active",
            CommissionError::SubscriptionNotFound => "No active subscription found",
            CommissionError::SelfReferral => "Cannot refer yourself",
            CommissionError::ReferrerAlreadySet => "Referrer already set",
            CommissionError::ReferrerNotSet => "No referrer set for user",
            CommissionError::ReferralCycle => "Referral chain would form a cycle",
            CommissionError::NoBalance => "No commission balance to withdraw",
            CommissionError::InvalidLimit => "Limit exceeds maximum allowed value",
            CommissionError::MissingInput => "No input provided",
        })
    }
}
