//! Per-account mutual exclusion.
//!
//! One async mutex per account id, held for the duration of a
//! read-modify-commit cycle. Distinct accounts never contend; the
//! optimistic commit guard remains underneath as the correctness backstop.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

#[derive(Default)]
pub struct AccountLocks {
    inner: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock handle for one account, created on first use.
    pub async fn for_account(&self, account_id: &str) -> Arc<Mutex<()>> {
        // Fast path: read lock.
        if let Some(lock) = self.inner.read().await.get(account_id) {
            return lock.clone();
        }
        self.inner
            .write()
            .await
            .entry(account_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
