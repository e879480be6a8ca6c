//! History requests.

use crate::client::{AdvisoryClient, AuthFailurePolicy};
use chrono::NaiveDateTime;
use cropmate_core::error::Result;
use cropmate_core::history::{self, HistoryEntry, HistoryKind};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryRecord {
    id: i64,
    #[serde(rename = "type")]
    kind: HistoryKind,
    result: String,
    timestamp: NaiveDateTime,
    #[serde(default)]
    input_details: Option<String>,
}

impl From<HistoryRecord> for HistoryEntry {
    fn from(record: HistoryRecord) -> Self {
        HistoryEntry {
            id: record.id,
            kind: record.kind,
            result: record.result,
            timestamp: record.timestamp,
            input_details: record.input_details,
        }
    }
}

impl AdvisoryClient {
    /// `GET /history`. Requires a token; entries are re-sorted newest first
    /// because display depends on the order.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        let builder = self.authorize(self.client.get(self.endpoint("/history")));
        let response = self.execute(builder, AuthFailurePolicy::Intercept).await?;
        let records: Vec<HistoryRecord> = Self::decode(response).await?;

        let mut entries: Vec<HistoryEntry> = records.into_iter().map(Into::into).collect();
        history::sort_newest_first(&mut entries);
        Ok(entries)
    }
}
