//! Error taxonomy for the engine.
//!
//! Catalog gaps (missing threshold or reward-table entry) are deliberately
//! NOT represented here: they are defined behavior handled inline by the
//! progression engines.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Bad or missing input: unknown reason code, empty identifier.
    /// Reported synchronously, no state change.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Unknown account or missing profile document.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A concurrent mutation won the commit race. The whole
    /// read-modify-commit cycle must be retried.
    #[error("profile revision conflict")]
    Conflict,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored profile document failed to (de)serialize.
    #[error("malformed profile document: {0}")]
    Document(#[from] serde_json::Error),
}

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }
}
