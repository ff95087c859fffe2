//! The core progression engines: idempotent item grants, XP/leveling
//! against the threshold curve, and level-reward grants. All three are
//! plain functions over the document model so they stay testable without a
//! store; the services layer owns locking, revisions and commits.

pub mod items;
pub mod leveling;
pub mod rewards;

pub use items::{grant_item, GrantOutcome};
pub use leveling::{apply_xp, award_for, XpAward, XpOutcome, XpReason};
pub use rewards::{grant_level_rewards, RewardGrant};
