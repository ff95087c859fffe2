//! Persistence seams consumed by the services layer.

use async_trait::async_trait;

use super::models::Account;
use crate::error::EngineError;
use crate::profile::{Profile, RevisionGuard};

/// Key-value access to a profile aggregate with conditional write.
///
/// `commit` is the only mutation path: it persists the whole aggregate iff
/// the stored revisions still match `expected`, and surfaces
/// `EngineError::Conflict` otherwise, leaving the stored document
/// untouched. There is deliberately no partial-write API.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load(&self, account_id: &str) -> Result<Option<Profile>, EngineError>;

    async fn commit(&self, expected: RevisionGuard, profile: &Profile) -> Result<(), EngineError>;

    /// Seeds a fresh aggregate (account provisioning path). Idempotent.
    async fn create(&self, profile: &Profile) -> Result<(), EngineError>;
}

/// Account lookup by lowercased username.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn find_by_username(&self, username_lower: &str)
        -> Result<Option<Account>, EngineError>;
}
