//! History of past recommendation and detection events.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// The kind of event a history entry records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(ascii_case_insensitive)]
pub enum HistoryKind {
    #[strum(serialize = "crop")]
    Crop,
    #[strum(serialize = "disease")]
    Disease,
}

/// A record of a past recommendation or detection, read-only on the client.
///
/// The backend sends zone-less local timestamps, hence `NaiveDateTime`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub kind: HistoryKind,
    pub result: String,
    pub timestamp: NaiveDateTime,
    pub input_details: Option<String>,
}

/// Orders entries newest first. The backend is expected to send them that
/// way, but display depends on it.
pub fn sort_newest_first(entries: &mut [HistoryEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
