//! In-memory store and directory.
//!
//! Same contract as the Postgres implementations, backed by RwLock'd maps.
//! Integration tests run against these, and a store-less local run can too.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::Account;
use super::store::{AccountDirectory, ProfileStore};
use crate::error::EngineError;
use crate::profile::{Profile, RevisionGuard};

#[derive(Default)]
pub struct MemoryProfileStore {
    inner: RwLock<HashMap<String, Profile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn load(&self, account_id: &str) -> Result<Option<Profile>, EngineError> {
        Ok(self.inner.read().await.get(account_id).cloned())
    }

    async fn commit(&self, expected: RevisionGuard, profile: &Profile) -> Result<(), EngineError> {
        let mut map = self.inner.write().await;
        let stored = map
            .get_mut(&profile.account_id)
            .ok_or(EngineError::NotFound("profile"))?;
        if stored.revision_guard() != expected {
            return Err(EngineError::Conflict);
        }
        *stored = profile.clone();
        Ok(())
    }

    async fn create(&self, profile: &Profile) -> Result<(), EngineError> {
        self.inner
            .write()
            .await
            .entry(profile.account_id.clone())
            .or_insert_with(|| profile.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryAccountDirectory {
    by_username: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, username: &str, account_id: &str, donator: bool) {
        self.by_username.write().await.insert(
            username.to_lowercase(),
            Account {
                account_id: account_id.to_string(),
                donator,
            },
        );
    }
}

#[async_trait]
impl AccountDirectory for MemoryAccountDirectory {
    async fn find_by_username(
        &self,
        username_lower: &str,
    ) -> Result<Option<Account>, EngineError> {
        Ok(self.by_username.read().await.get(username_lower).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stale_guard_is_a_conflict_and_leaves_store_unchanged() {
        let store = MemoryProfileStore::new();
        let profile = Profile::new("acc-1");
        store.create(&profile).await.unwrap();

        // First writer wins.
        let mut first = store.load("acc-1").await.unwrap().unwrap();
        let guard = first.revision_guard();
        first.profiles.athena.touch();
        store.commit(guard, &first).await.unwrap();

        // Second writer still holds the pre-commit guard.
        let mut second = profile.clone();
        second.profiles.athena.stats.attributes.xp = 999.0;
        second.profiles.athena.touch();
        let err = store.commit(guard, &second).await.unwrap_err();
        assert!(matches!(err, EngineError::Conflict));

        let stored = store.load("acc-1").await.unwrap().unwrap();
        assert_eq!(stored.profiles.athena.rvn, first.profiles.athena.rvn);
        assert_eq!(stored.profiles.athena.stats.attributes.xp, 0.0);
    }
}
