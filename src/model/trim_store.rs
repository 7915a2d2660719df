//! Per-video trim preferences on top of a key-value storage
//!
//! Every operation is fail-soft: unreadable or malformed records read as
//! absent and failed writes are dropped, so trimming keeps working without
//! persistence.

use serde::{Deserialize, Serialize};

use super::storage::KeyValueStorage;
use super::trim::TrimRange;
use super::types::VideoId;

const KEY_PREFIX: &str = "trim-";

#[derive(Serialize, Deserialize)]
struct TrimRecord {
    start: f64,
    end: f64,
}

pub fn storage_key(id: &VideoId) -> String {
    format!("{KEY_PREFIX}{id}")
}

pub struct TrimStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> TrimStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the stored range only when it satisfies the trim invariant.
    pub fn load(&self, id: &VideoId) -> Option<TrimRange> {
        let raw = match self.storage.get_item(&storage_key(id)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(video_id = %id, error = %e, "Trim storage read failed");
                return None;
            }
        };

        let record: TrimRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(video_id = %id, error = %e, "Ignoring malformed trim record");
                return None;
            }
        };

        let range = TrimRange {
            start: record.start,
            end: record.end,
        };
        if range.is_valid() {
            Some(range)
        } else {
            tracing::debug!(video_id = %id, start = range.start, end = range.end, "Ignoring invalid trim record");
            None
        }
    }

    /// Writes the range after forcing it back into the invariant.
    pub fn save(&mut self, id: &VideoId, range: TrimRange) {
        let range = range.sanitized();
        if !(range.start < range.end) {
            return;
        }
        let record = TrimRecord {
            start: range.start,
            end: range.end,
        };
        let result = serde_json::to_string(&record)
            .map_err(anyhow::Error::from)
            .and_then(|value| self.storage.set_item(&storage_key(id), &value));
        match result {
            Ok(()) => tracing::trace!(video_id = %id, start = range.start, end = range.end, "Trim saved"),
            Err(e) => tracing::debug!(video_id = %id, error = %e, "Trim storage write failed"),
        }
    }

    pub fn clear(&mut self, id: &VideoId) {
        let key = storage_key(id);
        match self.storage.get_item(&key) {
            Ok(Some(_)) => {
                if let Err(e) = self.storage.remove_item(&key) {
                    tracing::debug!(video_id = %id, error = %e, "Trim storage remove failed");
                } else {
                    tracing::trace!(video_id = %id, "Trim cleared");
                }
            }
            Ok(None) => {}
            Err(e) => tracing::debug!(video_id = %id, error = %e, "Trim storage read failed"),
        }
    }
}
