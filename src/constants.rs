// Central constants for progression tuning and grant limits.

/// Base XP awarded per reason before level scaling.
pub const XP_PER_KILL: f64 = 25.0;
pub const XP_PER_CHEST: f64 = 50.0;
pub const XP_PER_WIN: f64 = 175.0;

/// Additive level-scaling factors: award = base + base * level * factor.
pub const KILL_LEVEL_FACTOR: f64 = 0.10;
pub const WIN_LEVEL_FACTOR: f64 = 0.15;
pub const CHEST_LEVEL_FACTOR: f64 = 1.0;

/// Applied to the whole award after level scaling.
pub const DONATOR_XP_MULTIPLIER: f64 = 1.5;

/// Hard ceiling. At this level XP granting stops entirely (terminal state,
/// not a clamp within the final level).
pub const LEVEL_CAP: i64 = 100;

/// Early-curve thresholds, used below the rollover level of the sparse
/// curve table: required = EARLY_LEVEL_XP_BASE + EARLY_LEVEL_XP_STEP * (level - 1).
pub const EARLY_LEVEL_XP_BASE: f64 = 800.0;
pub const EARLY_LEVEL_XP_STEP: f64 = 100.0;

/// Reward-table sentinel key for currency and the item it accumulates into.
pub const CURRENCY_REWARD_KEY: &str = "Currency:MtxPurchase";
pub const CURRENCY_ITEM_TEMPLATE: &str = "Currency:MtxPurchased";

/// Gift container template ids.
pub const BATTLE_PASS_GIFT_TEMPLATE: &str = "GiftBox:gb_battlepass";
pub const MAKE_GOOD_GIFT_TEMPLATE: &str = "GiftBox:GB_MakeGood";

/// Push payload type handed to the notification dispatcher on gift delivery.
pub const GIFT_NOTIFICATION_TYPE: &str = "gift.received";

/// Sender and message attached to make-good gift containers.
pub const MAKE_GOOD_SENDER: &str = "[Administrator]";
pub const MAKE_GOOD_MESSAGE: &str = "Thanks for playing!";

/// Sub-profile the gift loot list points at for cosmetic grants.
pub const LOOT_PROFILE_ATHENA: &str = "athena";

/// Fixed allowed set of reason codes for the add-item operation.
pub const ITEM_GRANT_REASONS: &[&str] = &["MakeGood", "Compensation", "Community", "Support"];

/// Bounded retries for an optimistic commit that hits a revision conflict.
pub const COMMIT_RETRY_LIMIT: u32 = 3;
