//! Idempotent single-item grant.

use crate::error::EngineError;
use crate::profile::{Item, SubProfile};
use crate::util::make_item_id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantOutcome {
    Added { item_id: String },
    AlreadyOwned,
}

/// Adds one catalog item to a sub-profile's item map unless it is already
/// owned. Granting the same cosmetic twice is a no-op, not an error.
/// The caller owns the revision bump, once per batch of grants.
pub fn grant_item(sub: &mut SubProfile, template_id: &str) -> Result<GrantOutcome, EngineError> {
    if template_id.is_empty() {
        return Err(EngineError::validation("missing item template id"));
    }
    if sub.contains(template_id) {
        return Ok(GrantOutcome::AlreadyOwned);
    }
    let item_id = make_item_id();
    sub.items.insert(item_id.clone(), Item::cosmetic(template_id));
    Ok(GrantOutcome::Added { item_id })
}
