//! Revision ledger discipline.
//!
//! Every committed mutation batch bumps `rvn` and `commandRevision` in
//! lockstep, exactly once per sub-profile the batch actually touched, and
//! stamps `updated`. The expected-revision guard taken at load time is what
//! the store checks at commit time; a mismatch means a concurrent writer
//! won and the whole read-modify-commit cycle must rerun.

use serde::Serialize;

use super::document::{Profile, SubProfile};
use crate::util::iso_now;

impl SubProfile {
    /// One revision bump for a whole mutation batch, never one per item.
    pub fn touch(&mut self) {
        self.rvn += 1;
        self.command_revision += 1;
        self.updated = iso_now();
    }
}

/// Expected revisions captured when a profile is loaded. The guard pins
/// both sub-profiles even when a batch mutates only one, so racing writers
/// can never interleave half-updated aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionGuard {
    pub athena_rvn: i64,
    pub common_core_rvn: i64,
}

impl Profile {
    pub fn revision_guard(&self) -> RevisionGuard {
        RevisionGuard {
            athena_rvn: self.profiles.athena.rvn,
            common_core_rvn: self.profiles.common_core.rvn,
        }
    }
}

/// One semantic change within a committed batch, ordered, so the client can
/// apply the delta without a full resync.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "changeType")]
pub enum ProfileChange {
    #[serde(rename = "itemAdded", rename_all = "camelCase")]
    ItemAdded {
        item_id: String,
        template_id: String,
    },
    #[serde(rename = "itemQuantityChanged", rename_all = "camelCase")]
    ItemQuantityChanged { item_id: String, quantity: i64 },
    #[serde(rename = "statModified")]
    StatModified {
        name: &'static str,
        value: serde_json::Value,
    },
}

impl ProfileChange {
    pub fn item_added(item_id: &str, template_id: &str) -> ProfileChange {
        ProfileChange::ItemAdded {
            item_id: item_id.to_string(),
            template_id: template_id.to_string(),
        }
    }

    pub fn stat_modified(name: &'static str, value: impl Into<serde_json::Value>) -> ProfileChange {
        ProfileChange::StatModified {
            name,
            value: value.into(),
        }
    }
}
