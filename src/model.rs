//! Shared application state handed to every request handler.

use std::sync::Arc;

use crate::catalog::ProgressionCatalog;
use crate::database::store::{AccountDirectory, ProfileStore};
use crate::services::locks::AccountLocks;
use crate::services::notify::Notifier;

pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub accounts: Arc<dyn AccountDirectory>,
    pub catalog: Arc<ProgressionCatalog>,
    pub notifier: Arc<dyn Notifier>,
    pub locks: AccountLocks,
    pub api_key: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        accounts: Arc<dyn AccountDirectory>,
        catalog: Arc<ProgressionCatalog>,
        notifier: Arc<dyn Notifier>,
        api_key: String,
    ) -> AppState {
        AppState {
            store,
            accounts,
            catalog,
            notifier,
            locks: AccountLocks::new(),
            api_key,
        }
    }
}
