//! Profile aggregate, sub-profiles and item shapes.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

use crate::constants::{
    BATTLE_PASS_GIFT_TEMPLATE, CURRENCY_ITEM_TEMPLATE, MAKE_GOOD_GIFT_TEMPLATE, MAKE_GOOD_MESSAGE,
    MAKE_GOOD_SENDER,
};
use crate::util::iso_now;

/// Aggregate keyed by account id. A profile always carries exactly the
/// `athena` and `common_core` sub-profiles once initialized; a stored
/// document missing either fails deserialization rather than defaulting.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Profile {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub profiles: ProfileSet,
}

/// The two sub-profiles, as named fields so the two-sub-profile invariant
/// holds structurally and both can be mutated within one batch.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProfileSet {
    pub athena: SubProfile,
    pub common_core: SubProfile,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SubProfile {
    #[serde(default)]
    pub items: HashMap<String, Item>,
    pub stats: StatsBlock,
    pub rvn: i64,
    #[serde(rename = "commandRevision")]
    pub command_revision: i64,
    pub updated: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StatsBlock {
    #[serde(default)]
    pub attributes: StatsAttributes,
}

/// Free-form progression attribute block. Known fields are typed; anything
/// else a client or older build wrote rides along in `extra` untouched.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatsAttributes {
    #[serde(default = "default_level")]
    pub level: i64,
    #[serde(default)]
    pub xp: f64,
    #[serde(default = "default_level")]
    pub book_level: i64,
    #[serde(default)]
    pub book_xp: f64,
    #[serde(default)]
    pub book_purchased: bool,
    #[serde(rename = "accountLevel", default = "default_level")]
    pub account_level: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_level() -> i64 {
    1
}

impl Default for StatsAttributes {
    fn default() -> Self {
        StatsAttributes {
            level: 1,
            xp: 0.0,
            book_level: 1,
            book_xp: 0.0,
            book_purchased: false,
            account_level: 1,
            extra: Map::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Item {
    #[serde(rename = "templateId")]
    pub template_id: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    pub quantity: i64,
}

/// One line of a gift container's loot list.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LootEntry {
    #[serde(rename = "itemType")]
    pub item_type: String,
    #[serde(rename = "itemGuid")]
    pub item_guid: String,
    #[serde(rename = "itemProfile")]
    pub item_profile: String,
    pub quantity: i64,
}

impl Item {
    /// A directly granted cosmetic (add-item operation).
    pub fn cosmetic(template_id: &str) -> Item {
        let mut attributes = Map::new();
        attributes.insert("level".into(), json!(1));
        attributes.insert("item_seen".into(), json!(false));
        Item {
            template_id: template_id.to_string(),
            attributes,
            quantity: 1,
        }
    }

    /// A cosmetic granted from the reward table, with its catalog-resolved
    /// variant channels attached at grant time.
    pub fn reward_cosmetic(template_id: &str, variants: Vec<Value>) -> Item {
        let mut attributes = Map::new();
        attributes.insert("item_seen".into(), json!(false));
        attributes.insert("variants".into(), Value::Array(variants));
        Item {
            template_id: template_id.to_string(),
            attributes,
            quantity: 1,
        }
    }

    /// The currency accumulator item. Carries no attributes.
    pub fn currency(quantity: i64) -> Item {
        Item {
            template_id: CURRENCY_ITEM_TEMPLATE.to_string(),
            attributes: Map::new(),
            quantity,
        }
    }

    /// The shared gift container emitted by a level-reward grant.
    pub fn battle_pass_gift(loot_list: &[LootEntry]) -> Item {
        let mut attributes = Map::new();
        attributes.insert("max_level_bonus".into(), json!(0));
        attributes.insert("fromAccountId".into(), json!(""));
        attributes.insert("lootList".into(), json!(loot_list));
        attributes.insert("itemGifted".into(), json!(true));
        Item {
            template_id: BATTLE_PASS_GIFT_TEMPLATE.to_string(),
            attributes,
            quantity: 1,
        }
    }

    /// The make-good container wrapping a directly granted cosmetic.
    pub fn make_good_gift(loot_list: &[LootEntry]) -> Item {
        let mut attributes = Map::new();
        attributes.insert("fromAccountId".into(), json!(MAKE_GOOD_SENDER));
        attributes.insert("lootList".into(), json!(loot_list));
        attributes.insert("params".into(), json!({ "userMessage": MAKE_GOOD_MESSAGE }));
        attributes.insert("giftedOn".into(), json!(iso_now()));
        Item {
            template_id: MAKE_GOOD_GIFT_TEMPLATE.to_string(),
            attributes,
            quantity: 1,
        }
    }
}

impl Profile {
    /// A freshly initialized aggregate, as account creation would seed it.
    pub fn new(account_id: &str) -> Profile {
        Profile {
            account_id: account_id.to_string(),
            profiles: ProfileSet {
                athena: SubProfile::new(),
                common_core: SubProfile::new(),
            },
        }
    }
}

impl SubProfile {
    /// Ownership scan backing the idempotency guarantee: an item counts as
    /// owned when its instance key OR its templateId matches. O(items);
    /// acceptable at cosmetic-locker scale, a secondary index if that grows.
    pub fn contains(&self, template_id: &str) -> bool {
        self.items.contains_key(template_id)
            || self.items.values().any(|i| i.template_id == template_id)
    }

    pub fn new() -> SubProfile {
        SubProfile {
            items: HashMap::new(),
            stats: StatsBlock::default(),
            rvn: 0,
            command_revision: 0,
            updated: iso_now(),
        }
    }
}

impl Default for SubProfile {
    fn default() -> Self {
        SubProfile::new()
    }
}
