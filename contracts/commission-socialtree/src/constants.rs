//! Deployment-fixed commission schedule and traversal bounds.

use near_sdk::Gas;

/// Percentage of every subscription payment set aside as the level-1
/// commission award. The same rate is the per-level geometric decay.
pub const COMMISSION_RATE: u128 = 20;

/// Dust cutoff: a level whose computed award falls below this amount is
/// skipped, and the walk stops there. 0.00001 NEAR.
pub const MIN_DISTRIBUTION_AMOUNT: u128 = 10_000_000_000_000_000_000;

/// Fixed subscription period: 30 days in nanoseconds.
pub const SUBSCRIPTION_PERIOD_NS: u64 = 30 * 24 * 60 * 60 * 1_000_000_000;

/// Upper bound on every referrer-edge traversal. Distribution, cycle checks
/// and the chain view all stop here, keeping worst-case gas fixed.
pub const MAX_REFERRAL_DEPTH: u32 = 10;

/// Cap on paginated view page sizes.
pub const MAX_PAGE_LIMIT: u32 = 100;

pub const GAS_FOR_WITHDRAW_CALLBACK: Gas = Gas::from_tgas(10);
