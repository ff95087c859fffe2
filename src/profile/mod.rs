//! The versioned profile document model and its revision ledger.
//! These types mirror the documents the client synchronizes against, so
//! field names serialize exactly as the wire contract spells them.

pub mod document;
pub mod revision;

pub use document::{Item, LootEntry, Profile, ProfileSet, StatsAttributes, StatsBlock, SubProfile};
pub use revision::{ProfileChange, RevisionGuard};
