//! Content registry: owner-gated upserts, zero-value sentinel replaced by
//! `Option` at the view boundary.

use crate::errors::CommissionError;
use crate::events::CommissionEvent;
use crate::state::CommissionState;
use crate::types::{Content, ContentId};
use near_sdk::json_types::U128;
use near_sdk::AccountId;

/// Upserts a content entry. Existing subscriptions keep their price
/// snapshots; only future subscribes see the new price or creator.
pub fn set_content(
    state: &mut CommissionState,
    caller: &AccountId,
    content_id: ContentId,
    price: U128,
    creator: AccountId,
) -> Result<(), CommissionError> {
    state.require_owner(caller)?;
    if price.0 == 0 {
        return Err(CommissionError::InvalidPrice);
    }

    state.contents.insert(
        content_id.clone(),
        Content {
            price,
            creator: creator.clone(),
        },
    );

    CommissionEvent::ContentSet {
        content_id,
        price,
        creator,
    }
    .emit();

    Ok(())
}

pub fn get_content(state: &CommissionState, content_id: &str) -> Option<Content> {
    state.contents.get(content_id).cloned()
}
