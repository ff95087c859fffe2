//! Postgres-backed store and directory.
//!
//! Profile aggregates live in a single JSONB column; the conditional write
//! pins both sub-profiles' stored `rvn` in the WHERE clause, so a commit
//! whose snapshot went stale updates zero rows and reports a conflict.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::instrument;

use super::models::Account;
use super::store::{AccountDirectory, ProfileStore};
use crate::error::EngineError;
use crate::profile::{Profile, RevisionGuard};

/// A type alias for the database connection pool (`Pool<Postgres>`).
pub type DbPool = Pool<Postgres>;

/// Creates the backing tables when they do not exist yet.
pub async fn init_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS accounts (
            account_id     TEXT PRIMARY KEY,
            username       TEXT NOT NULL,
            username_lower TEXT NOT NULL UNIQUE,
            donator        BOOLEAN NOT NULL DEFAULT FALSE
        )"#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS profiles (
            account_id TEXT PRIMARY KEY REFERENCES accounts(account_id),
            doc        JSONB NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

pub struct PgProfileStore {
    pool: DbPool,
}

impl PgProfileStore {
    pub fn new(pool: DbPool) -> Self {
        PgProfileStore { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    #[instrument(level = "debug", skip(self))]
    async fn load(&self, account_id: &str) -> Result<Option<Profile>, EngineError> {
        let doc: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT doc FROM profiles WHERE account_id = $1")
                .bind(account_id)
                .fetch_optional(&self.pool)
                .await?;
        match doc {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    #[instrument(level = "debug", skip(self, profile), fields(account_id = %profile.account_id))]
    async fn commit(&self, expected: RevisionGuard, profile: &Profile) -> Result<(), EngineError> {
        let doc = serde_json::to_value(profile)?;
        let res = sqlx::query(
            r#"UPDATE profiles SET doc = $2
               WHERE account_id = $1
                 AND (doc #>> '{profiles,athena,rvn}')::bigint = $3
                 AND (doc #>> '{profiles,common_core,rvn}')::bigint = $4"#,
        )
        .bind(&profile.account_id)
        .bind(doc)
        .bind(expected.athena_rvn)
        .bind(expected.common_core_rvn)
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 1 {
            Ok(())
        } else {
            Err(EngineError::Conflict)
        }
    }

    #[instrument(level = "debug", skip(self, profile), fields(account_id = %profile.account_id))]
    async fn create(&self, profile: &Profile) -> Result<(), EngineError> {
        let doc = serde_json::to_value(profile)?;
        sqlx::query(
            "INSERT INTO profiles (account_id, doc) VALUES ($1, $2) ON CONFLICT (account_id) DO NOTHING",
        )
        .bind(&profile.account_id)
        .bind(doc)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

pub struct PgAccountDirectory {
    pool: DbPool,
}

impl PgAccountDirectory {
    pub fn new(pool: DbPool) -> Self {
        PgAccountDirectory { pool }
    }
}

#[async_trait]
impl AccountDirectory for PgAccountDirectory {
    #[instrument(level = "debug", skip(self))]
    async fn find_by_username(
        &self,
        username_lower: &str,
    ) -> Result<Option<Account>, EngineError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT account_id, donator FROM accounts WHERE username_lower = $1",
        )
        .bind(username_lower)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }
}
