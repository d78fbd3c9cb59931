//! Saved meeting analyses, kept newest-first as one JSON array in a single slot.

use chrono::{SecondsFormat, Utc};
use log::{debug, warn};
use minutes_core::MeetingAnalysis;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::store::{KeyValueStoreRef, StoreError};

/// Slot holding the record list
pub const RECORDS_KEY: &str = "meeting_records";

/// A saved analysis and when it was saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(flatten)]
    pub analysis: MeetingAnalysis,
    /// ISO-8601 UTC timestamp, millisecond precision
    #[serde(rename = "savedAt")]
    pub saved_at: String,
}

/// Current time in the `savedAt` format, e.g. `2026-10-19T08:30:00.000Z`
pub fn saved_at_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Record list operations over an injected key-value store.
///
/// Each mutation is read-modify-write of the whole list. The mutex keeps
/// mutations through one `MeetingRecords` from interleaving; writers in
/// other processes sharing the same slot can still race.
#[derive(Debug)]
pub struct MeetingRecords {
    store: KeyValueStoreRef,
    write_lock: Mutex<()>,
}

impl MeetingRecords {
    pub fn new(store: KeyValueStoreRef) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// All records, newest first.
    ///
    /// A missing slot, or one that is not a JSON array, reads as empty.
    /// Elements that do not decode as a record are skipped one by one.
    pub async fn list(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let Some(raw) = self.store.get(RECORDS_KEY).await? else {
            return Ok(Vec::new());
        };
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        let values = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(values) => values,
            Err(e) => {
                warn!("Ignoring malformed record list in slot {}: {}", RECORDS_KEY, e);
                return Ok(Vec::new());
            }
        };

        let mut records = Vec::with_capacity(values.len());
        for (position, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<StoredRecord>(value) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable record at position {}: {}", position, e),
            }
        }
        Ok(records)
    }

    pub async fn get(&self, index: usize) -> Result<StoredRecord, StoreError> {
        self.list()
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| not_found(index))
    }

    /// Prepend a new record stamped with the current time
    pub async fn save(&self, analysis: MeetingAnalysis) -> Result<StoredRecord, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.list().await?;

        let record = StoredRecord {
            analysis,
            saved_at: saved_at_now(),
        };
        records.insert(0, record.clone());
        self.write(&records).await?;

        debug!("Saved record '{}' ({} total)", record.analysis.title, records.len());
        Ok(record)
    }

    /// Replace the analysis at `index`, keeping its position and `savedAt`
    pub async fn update(
        &self,
        index: usize,
        analysis: MeetingAnalysis,
    ) -> Result<StoredRecord, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.list().await?;

        let record = records.get_mut(index).ok_or_else(|| not_found(index))?;
        record.analysis = analysis;
        let updated = record.clone();
        self.write(&records).await?;

        debug!("Updated record {}", index);
        Ok(updated)
    }

    /// Remove the record at `index`; later records shift up by one
    pub async fn delete(&self, index: usize) -> Result<StoredRecord, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.list().await?;

        if index >= records.len() {
            return Err(not_found(index));
        }
        let removed = records.remove(index);
        self.write(&records).await?;

        debug!("Deleted record {} ({} left)", index, records.len());
        Ok(removed)
    }

    async fn write(&self, records: &[StoredRecord]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records)?;
        self.store.set(RECORDS_KEY, raw).await
    }
}

fn not_found(index: usize) -> StoreError {
    StoreError::NotFound(format!("no record at index {}", index))
}
