//! The two exposed operations, as full read-modify-commit cycles.
//!
//! Flow per call: resolve the account, take its lock, load a snapshot,
//! mutate the snapshot through the progression engines, bump the revision
//! ledgers of the sub-profiles actually touched (once per batch), commit
//! under the expected-revision guard, then dispatch any notification. A
//! conflicting commit reruns the whole cycle a bounded number of times.

use serde_json::json;
use tracing::{info, instrument, warn};

use crate::constants::{
    COMMIT_RETRY_LIMIT, ITEM_GRANT_REASONS, LOOT_PROFILE_ATHENA, MAKE_GOOD_GIFT_TEMPLATE,
};
use crate::database::models::Account;
use crate::error::EngineError;
use crate::model::AppState;
use crate::profile::{Item, LootEntry, Profile, ProfileChange};
use crate::progression::{apply_xp, grant_item, grant_level_rewards, GrantOutcome, XpOutcome, XpReason};
use crate::util::make_item_id;

/// Outcome of an add-xp call.
#[derive(Debug, Clone)]
pub struct AddXpReceipt {
    pub new_level: i64,
    pub leveled_up: bool,
    /// True when the account sits at the level cap; nothing was applied.
    pub capped: bool,
    pub rewards_granted: bool,
    pub profile_revision: i64,
    pub profile_command_revision: i64,
    pub profile_changes: Vec<ProfileChange>,
}

/// Outcome of an add-item call.
#[derive(Debug, Clone)]
pub enum AddItemReceipt {
    AlreadyOwned,
    Added {
        profile_revision: i64,
        profile_command_revision: i64,
        profile_changes: Vec<ProfileChange>,
    },
}

#[instrument(level = "debug", skip(state), fields(username = %username, reason = reason.as_str()))]
pub async fn add_xp(
    state: &AppState,
    username: &str,
    reason: XpReason,
) -> Result<AddXpReceipt, EngineError> {
    let account = resolve_account(state, username).await?;
    let lock = state.locks.for_account(&account.account_id).await;
    let _held = lock.lock().await;

    let mut attempt = 0;
    loop {
        let mut profile = load_profile(state, &account.account_id).await?;
        let guard = profile.revision_guard();

        let (level, xp) = {
            let attrs = &profile.profiles.athena.stats.attributes;
            (attrs.level, attrs.xp)
        };
        let award = match apply_xp(&state.catalog, level, xp, reason, account.donator) {
            XpOutcome::Capped => {
                return Ok(AddXpReceipt {
                    new_level: level,
                    leveled_up: false,
                    capped: true,
                    rewards_granted: false,
                    profile_revision: profile.profiles.athena.rvn,
                    profile_command_revision: profile.profiles.athena.command_revision,
                    profile_changes: Vec::new(),
                });
            }
            XpOutcome::Applied(award) => award,
        };

        let mut changes = Vec::new();
        {
            let attrs = &mut profile.profiles.athena.stats.attributes;
            attrs.xp = award.new_xp;
            changes.push(ProfileChange::stat_modified("xp", json!(award.new_xp)));
            if award.leveled_up {
                attrs.level = award.new_level;
                attrs.book_level += 1;
                attrs.account_level += 1;
                attrs.book_xp = 0.0;
                changes.push(ProfileChange::stat_modified("level", json!(award.new_level)));
            }
        }

        // Leveling and reward-granting are two phases of one logical
        // transaction: a single combined commit.
        let mut rewards_granted = false;
        let mut notification = None;
        if award.leveled_up {
            let grant = grant_level_rewards(&state.catalog, &mut profile.profiles, award.new_level);
            rewards_granted = grant.granted;
            notification = grant.notification;
            changes.extend(grant.changes);
            if grant.common_core_mutated {
                profile.profiles.common_core.touch();
            }
        }
        profile.profiles.athena.touch();

        match state.store.commit(guard, &profile).await {
            Ok(()) => {
                info!(
                    target: "progression.xp",
                    account_id = %account.account_id,
                    reason = reason.as_str(),
                    awarded = award.awarded,
                    leveled_up = award.leveled_up,
                    "xp applied"
                );
                if let Some(payload) = notification {
                    dispatch(state, &account.account_id, payload).await;
                }
                return Ok(AddXpReceipt {
                    new_level: award.new_level,
                    leveled_up: award.leveled_up,
                    capped: false,
                    rewards_granted,
                    profile_revision: profile.profiles.athena.rvn,
                    profile_command_revision: profile.profiles.athena.command_revision,
                    profile_changes: changes,
                });
            }
            Err(EngineError::Conflict) if attempt < COMMIT_RETRY_LIMIT => {
                attempt += 1;
                warn!(target: "progression.xp", account_id = %account.account_id, attempt, "commit conflict, retrying");
            }
            Err(e) => return Err(e),
        }
    }
}

#[instrument(level = "debug", skip(state), fields(username = %username, template_id = %template_id))]
pub async fn add_item(
    state: &AppState,
    username: &str,
    template_id: &str,
    reason: &str,
) -> Result<AddItemReceipt, EngineError> {
    if !ITEM_GRANT_REASONS.contains(&reason) {
        return Err(EngineError::Validation(format!(
            "invalid reason '{}', allowed: {}",
            reason,
            ITEM_GRANT_REASONS.join(", ")
        )));
    }

    let account = resolve_account(state, username).await?;
    let lock = state.locks.for_account(&account.account_id).await;
    let _held = lock.lock().await;

    let mut attempt = 0;
    loop {
        let mut profile = load_profile(state, &account.account_id).await?;
        let guard = profile.revision_guard();

        let item_id = match grant_item(&mut profile.profiles.athena, template_id)? {
            GrantOutcome::AlreadyOwned => return Ok(AddItemReceipt::AlreadyOwned),
            GrantOutcome::Added { item_id } => item_id,
        };

        // The granted cosmetic plus its make-good container are one batch:
        // both sub-profiles get exactly one revision bump.
        let loot_list = [LootEntry {
            item_type: template_id.to_string(),
            item_guid: item_id.clone(),
            item_profile: LOOT_PROFILE_ATHENA.to_string(),
            quantity: 1,
        }];
        let gift_id = make_item_id();
        profile
            .profiles
            .common_core
            .items
            .insert(gift_id.clone(), Item::make_good_gift(&loot_list));

        let changes = vec![
            ProfileChange::item_added(&item_id, template_id),
            ProfileChange::item_added(&gift_id, MAKE_GOOD_GIFT_TEMPLATE),
        ];

        profile.profiles.athena.touch();
        profile.profiles.common_core.touch();

        match state.store.commit(guard, &profile).await {
            Ok(()) => {
                info!(
                    target: "progression.items",
                    account_id = %account.account_id,
                    template_id = %template_id,
                    reason = %reason,
                    "item granted"
                );
                return Ok(AddItemReceipt::Added {
                    profile_revision: profile.profiles.athena.rvn,
                    profile_command_revision: profile.profiles.athena.command_revision,
                    profile_changes: changes,
                });
            }
            Err(EngineError::Conflict) if attempt < COMMIT_RETRY_LIMIT => {
                attempt += 1;
                warn!(target: "progression.items", account_id = %account.account_id, attempt, "commit conflict, retrying");
            }
            Err(e) => return Err(e),
        }
    }
}

async fn resolve_account(state: &AppState, username: &str) -> Result<Account, EngineError> {
    let username_lower = username.trim().to_lowercase();
    if username_lower.is_empty() {
        return Err(EngineError::validation("missing username"));
    }
    state
        .accounts
        .find_by_username(&username_lower)
        .await?
        .ok_or(EngineError::NotFound("account"))
}

async fn load_profile(state: &AppState, account_id: &str) -> Result<Profile, EngineError> {
    state
        .store
        .load(account_id)
        .await?
        .ok_or(EngineError::NotFound("profile"))
}

/// Post-commit hook: best-effort, failure logged and dropped.
async fn dispatch(state: &AppState, account_id: &str, payload: serde_json::Value) {
    if let Err(e) = state.notifier.notify(account_id, payload).await {
        warn!(target: "notify.outbox", account_id = %account_id, error = %e, "notification dropped");
    }
}
