//! Data structures that map to database rows.

/// A resolved account: the identity the profile aggregate is keyed by,
/// plus the donator flag the XP multiplier reads.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Account {
    pub account_id: String,
    pub donator: bool,
}
