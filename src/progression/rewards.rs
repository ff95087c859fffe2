//! Level-reward grants.
//!
//! Reads the reward table for the reached level, applies the free set and,
//! when the battle pass is owned, the paid set. Cosmetics land in the
//! battle-royale sub-profile behind the ownership check; currency
//! accumulates into the shared currency item; everything newly granted is
//! described by one shared gift container inserted alongside the currency.

use serde_json::{json, Value};

use crate::catalog::ProgressionCatalog;
use crate::constants::{
    BATTLE_PASS_GIFT_TEMPLATE, CURRENCY_ITEM_TEMPLATE, CURRENCY_REWARD_KEY,
    GIFT_NOTIFICATION_TYPE, LOOT_PROFILE_ATHENA,
};
use crate::profile::{Item, LootEntry, ProfileChange, ProfileSet};
use crate::util::{iso_now, make_item_id};

/// What a reward grant did. `granted` is false only on the explicit no-op
/// path: every rewarded item already owned and no currency awarded. The
/// mutated flags tell the caller which revision ledgers to bump.
#[derive(Debug, Default)]
pub struct RewardGrant {
    pub granted: bool,
    pub athena_mutated: bool,
    pub common_core_mutated: bool,
    pub changes: Vec<ProfileChange>,
    pub notification: Option<Value>,
}

/// Grants the reward sets for `target_level`. A level absent from the table
/// simply has no rewards; that is defined behavior, not an error.
pub fn grant_level_rewards(
    catalog: &ProgressionCatalog,
    profiles: &mut ProfileSet,
    target_level: i64,
) -> RewardGrant {
    let Some(rewards) = catalog.rewards_for_level(target_level) else {
        return RewardGrant::default();
    };

    let mut grant = RewardGrant::default();
    let mut loot_list: Vec<LootEntry> = Vec::new();

    apply_set(catalog, profiles, &rewards.free, &mut grant, &mut loot_list);
    if profiles.athena.stats.attributes.book_purchased {
        apply_set(catalog, profiles, &rewards.paid, &mut grant, &mut loot_list);
    }

    if !loot_list.is_empty() {
        let gift_id = make_item_id();
        profiles
            .common_core
            .items
            .insert(gift_id.clone(), Item::battle_pass_gift(&loot_list));
        grant
            .changes
            .push(ProfileChange::item_added(&gift_id, BATTLE_PASS_GIFT_TEMPLATE));
        grant.common_core_mutated = true;
        grant.notification = Some(json!({
            "type": GIFT_NOTIFICATION_TYPE,
            "payload": {},
            "timestamp": iso_now(),
        }));
        grant.granted = true;
    }

    grant
}

/// Processes one reward set in table-defined order. Each key is evaluated
/// independently: the currency sentinel accumulates, anything else is an
/// idempotent cosmetic grant feeding the shared loot list.
fn apply_set(
    catalog: &ProgressionCatalog,
    profiles: &mut ProfileSet,
    set: &[(String, i64)],
    grant: &mut RewardGrant,
    loot_list: &mut Vec<LootEntry>,
) {
    for (key, amount) in set {
        if key == CURRENCY_REWARD_KEY {
            if *amount <= 0 {
                continue;
            }
            let change = match profiles.common_core.items.get_mut(CURRENCY_ITEM_TEMPLATE) {
                Some(existing) => {
                    existing.quantity += amount;
                    ProfileChange::ItemQuantityChanged {
                        item_id: CURRENCY_ITEM_TEMPLATE.to_string(),
                        quantity: existing.quantity,
                    }
                }
                None => {
                    profiles
                        .common_core
                        .items
                        .insert(CURRENCY_ITEM_TEMPLATE.to_string(), Item::currency(*amount));
                    ProfileChange::item_added(CURRENCY_ITEM_TEMPLATE, CURRENCY_ITEM_TEMPLATE)
                }
            };
            grant.changes.push(change);
            grant.common_core_mutated = true;
            grant.granted = true;
        } else if !profiles.athena.contains(key) {
            let item_id = make_item_id();
            let variants = catalog.variants_for(key);
            profiles
                .athena
                .items
                .insert(item_id.clone(), Item::reward_cosmetic(key, variants));
            loot_list.push(LootEntry {
                item_type: key.clone(),
                item_guid: item_id.clone(),
                item_profile: LOOT_PROFILE_ATHENA.to_string(),
                quantity: 1,
            });
            grant.changes.push(ProfileChange::item_added(&item_id, key));
            grant.athena_mutated = true;
            grant.granted = true;
        }
        // Already-owned cosmetics are skipped silently: no duplicate grant,
        // no error.
    }
}
