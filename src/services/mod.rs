//! Orchestration layer: per-account serialization, the two exposed
//! operations, and post-commit notification dispatch.

pub mod locks;
pub mod notify;
pub mod operations;
