//! Misc small utilities shared across modules.

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Fresh, globally-unique item instance id.
pub fn make_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time as an RFC3339 string with millisecond precision, matching
/// the timestamp format the client expects in `updated` and push payloads.
pub fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
