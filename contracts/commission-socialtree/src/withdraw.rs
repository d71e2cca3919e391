//! Pull-based commission withdrawal.
//!
//! The balance is zeroed before the transfer is issued, so a second withdraw
//! racing the in-flight promise observes an empty balance and fails with
//! `NoBalance`. The callback restores the balance if the transfer failed.

use crate::constants::GAS_FOR_WITHDRAW_CALLBACK;
use crate::errors::CommissionError;
use crate::events::CommissionEvent;
use crate::state::CommissionState;
use near_sdk::json_types::U128;
use near_sdk::{env, AccountId, NearToken, Promise};

pub fn withdraw(
    state: &mut CommissionState,
    caller: &AccountId,
) -> Result<Promise, CommissionError> {
    let amount = state.pending_commission(caller);
    if amount == 0 {
        return Err(CommissionError::NoBalance);
    }

    state.pending_commissions.insert(caller.clone(), 0);
    state.total_commissions_pending -= amount;

    Ok(Promise::new(caller.clone())
        .transfer(NearToken::from_yoctonear(amount))
        .then(Promise::new(env::current_account_id()).function_call(
            "on_withdraw".to_string(),
            near_sdk::serde_json::json!({
                "account_id": caller,
                "amount": U128(amount),
            })
            .to_string()
            .into_bytes(),
            NearToken::from_yoctonear(0),
            GAS_FOR_WITHDRAW_CALLBACK,
        )))
}

pub fn on_withdraw(state: &mut CommissionState, account_id: AccountId, amount: U128) {
    if env::promise_results_count() == 1 && env::promise_result_checked(0, 0).is_ok() {
        state.total_withdrawn += amount.0;
        CommissionEvent::CommissionWithdrawn {
            user: account_id,
            amount,
        }
        .emit();
    } else {
        // Transfer failed: put the balance back so it can be withdrawn again.
        let balance = state.pending_commission(&account_id);
        state
            .pending_commissions
            .insert(account_id, balance + amount.0);
        state.total_commissions_pending += amount.0;
    }
}
