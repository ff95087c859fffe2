use std::sync::Arc;

use ravenpass::catalog::{CurveTable, LevelRewards, ProgressionCatalog, RewardTable, VariantTable};
use ravenpass::constants::{BATTLE_PASS_GIFT_TEMPLATE, CURRENCY_ITEM_TEMPLATE};
use ravenpass::database::memory::{MemoryAccountDirectory, MemoryProfileStore};
use ravenpass::database::store::ProfileStore;
use ravenpass::profile::{Item, Profile, ProfileSet};
use ravenpass::progression::{grant_level_rewards, XpReason};
use ravenpass::services::notify::CapturingNotifier;
use ravenpass::services::operations;
use ravenpass::AppState;

fn rewards_at_level_two(free: Vec<(&str, i64)>, paid: Vec<(&str, i64)>) -> RewardTable {
    let to_owned = |set: Vec<(&str, i64)>| {
        set.into_iter()
            .map(|(k, q)| (k.to_string(), q))
            .collect::<Vec<_>>()
    };
    RewardTable::from_levels(vec![
        LevelRewards::default(),
        LevelRewards {
            free: to_owned(free),
            paid: to_owned(paid),
        },
    ])
}

fn catalog(rewards: RewardTable) -> ProgressionCatalog {
    ProgressionCatalog::from_parts(CurveTable::from_entries(&[(1, 100.0)]), rewards, VariantTable::empty())
}

#[test]
fn rewards_grant_once_then_no_op() {
    let catalog = catalog(rewards_at_level_two(
        vec![("AthenaCharacter:cid_100", 1)],
        Vec::new(),
    ));
    let mut profiles = Profile::new("acc-1").profiles;

    let first = grant_level_rewards(&catalog, &mut profiles, 2);
    assert!(first.granted);
    assert!(first.athena_mutated && first.common_core_mutated);
    assert!(first.notification.is_some());
    assert_eq!(first.changes.len(), 2); // cosmetic + gift box
    assert_eq!(profiles.athena.items.len(), 1);
    assert_eq!(profiles.common_core.items.len(), 1);

    // Second grant for the same level: everything already owned, so this is
    // the explicit no-op path.
    let second = grant_level_rewards(&catalog, &mut profiles, 2);
    assert!(!second.granted);
    assert!(second.changes.is_empty());
    assert!(second.notification.is_none());
    assert_eq!(profiles.athena.items.len(), 1);
    assert_eq!(profiles.common_core.items.len(), 1);
}

#[test]
fn currency_accumulates_into_a_single_item() {
    let catalog = catalog(rewards_at_level_two(
        vec![("Currency:MtxPurchase", 100)],
        Vec::new(),
    ));
    let mut profiles = Profile::new("acc-1").profiles;

    let first = grant_level_rewards(&catalog, &mut profiles, 2);
    // Currency alone still counts as a grant, but produces no gift box and
    // no notification.
    assert!(first.granted);
    assert!(!first.athena_mutated);
    assert!(first.common_core_mutated);
    assert!(first.notification.is_none());

    let second = grant_level_rewards(&catalog, &mut profiles, 2);
    assert!(second.granted);

    assert_eq!(profiles.common_core.items.len(), 1);
    let currency = &profiles.common_core.items[CURRENCY_ITEM_TEMPLATE];
    assert_eq!(currency.template_id, CURRENCY_ITEM_TEMPLATE);
    assert_eq!(currency.quantity, 200);
}

#[test]
fn paid_rewards_require_book_purchase() {
    let table = || {
        rewards_at_level_two(
            vec![("AthenaGlider:umbrella", 1)],
            vec![("AthenaCharacter:cid_017", 1)],
        )
    };

    let catalog_free = catalog(table());
    let mut profiles = Profile::new("acc-1").profiles;
    grant_level_rewards(&catalog_free, &mut profiles, 2);
    assert_eq!(profiles.athena.items.len(), 1);

    let catalog_paid = catalog(table());
    let mut profiles = Profile::new("acc-2").profiles;
    profiles.athena.stats.attributes.book_purchased = true;
    let grant = grant_level_rewards(&catalog_paid, &mut profiles, 2);
    assert_eq!(profiles.athena.items.len(), 2);

    // One shared gift container describes everything granted in this call.
    assert!(grant.granted);
    let gift = gift_box(&profiles);
    assert_eq!(gift.attributes["lootList"].as_array().unwrap().len(), 2);
}

#[test]
fn reward_cosmetics_carry_catalog_variants() {
    let variants = VariantTable::parse(
        r#"[{"id": "athenacharacter:cid_100", "variants": [{"channel": "Material", "active": "Mat1"}]}]"#,
    )
    .unwrap();
    let catalog = ProgressionCatalog::from_parts(
        CurveTable::from_entries(&[(1, 100.0)]),
        rewards_at_level_two(vec![("AthenaCharacter:cid_100", 1)], Vec::new()),
        variants,
    );
    let mut profiles = Profile::new("acc-1").profiles;
    grant_level_rewards(&catalog, &mut profiles, 2);

    let item = profiles.athena.items.values().next().unwrap();
    assert_eq!(item.attributes["variants"].as_array().unwrap().len(), 1);
    assert_eq!(item.attributes["item_seen"], false);
}

#[test]
fn level_without_table_entry_grants_nothing() {
    let catalog = catalog(RewardTable::from_levels(Vec::new()));
    let mut profiles = Profile::new("acc-1").profiles;
    let grant = grant_level_rewards(&catalog, &mut profiles, 7);
    assert!(!grant.granted);
    assert!(profiles.athena.items.is_empty());
    assert!(profiles.common_core.items.is_empty());
}

#[tokio::test]
async fn level_up_commits_rewards_atomically_and_notifies() {
    let catalog = catalog(rewards_at_level_two(
        vec![("AthenaCharacter:cid_100", 1), ("Currency:MtxPurchase", 100)],
        Vec::new(),
    ));

    let store = Arc::new(MemoryProfileStore::new());
    let accounts = Arc::new(MemoryAccountDirectory::new());
    accounts.add("PlayerOne", "acc-1", false).await;
    let mut profile = Profile::new("acc-1");
    profile.profiles.athena.stats.attributes.xp = 90.0;
    store.create(&profile).await.unwrap();
    let notifier = Arc::new(CapturingNotifier::new());
    let state = AppState::new(
        store.clone(),
        accounts,
        Arc::new(catalog),
        notifier.clone(),
        "test-key".to_string(),
    );

    // 90 + 27.5 clears the level-1 threshold of 100.
    let receipt = operations::add_xp(&state, "PlayerOne", XpReason::Kills)
        .await
        .unwrap();
    assert!(receipt.leveled_up);
    assert!(receipt.rewards_granted);
    assert_eq!(receipt.new_level, 2);
    assert_eq!(receipt.profile_revision, 1);

    let stored = store.load("acc-1").await.unwrap().unwrap();
    let attrs = &stored.profiles.athena.stats.attributes;
    assert_eq!(attrs.level, 2);
    assert_eq!(attrs.xp, 17.5);
    assert_eq!(attrs.book_level, 2);
    assert_eq!(attrs.account_level, 2);
    assert_eq!(attrs.book_xp, 0.0);
    // One combined commit: each mutated sub-profile bumped exactly once.
    assert_eq!(stored.profiles.athena.rvn, 1);
    assert_eq!(stored.profiles.common_core.rvn, 1);
    assert_eq!(stored.profiles.athena.items.len(), 1);
    // Gift box plus the currency item.
    assert_eq!(stored.profiles.common_core.items.len(), 2);
    assert_eq!(
        stored.profiles.common_core.items[CURRENCY_ITEM_TEMPLATE].quantity,
        100
    );

    let sent = notifier.take().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "acc-1");
    assert_eq!(sent[0].1["type"], "gift.received");
    assert!(sent[0].1["timestamp"].is_string());
}

fn gift_box(profiles: &ProfileSet) -> &Item {
    profiles
        .common_core
        .items
        .values()
        .find(|i| i.template_id == BATTLE_PASS_GIFT_TEMPLATE)
        .expect("gift box present")
}
