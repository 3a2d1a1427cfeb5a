//! JSON-file calendar store.
//!
//! The file maps each identity to its busy intervals:
//!
//! ```json
//! { "alice": [ { "start": "2025-03-28T10:00:00-07:00", "end": "2025-03-28T12:00:00-07:00" } ] }
//! ```
//!
//! The file is re-read on every lookup so each request sees current data.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use slot_engine::error::{EngineError, Result};
use slot_engine::{BusySource, Interval};

#[derive(Debug, Deserialize)]
struct BusyEntry {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

#[derive(Debug, Clone)]
pub struct JsonCalendarStore {
    path: PathBuf,
}

impl JsonCalendarStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> std::result::Result<HashMap<String, Vec<BusyEntry>>, String> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("failed to read {}: {e}", self.path.display()))?;
        serde_json::from_str(&raw)
            .map_err(|e| format!("failed to parse {}: {e}", self.path.display()))
    }
}

impl BusySource for JsonCalendarStore {
    fn busy_intervals(&self, identity: &str) -> Result<Vec<Interval>> {
        let unavailable = |reason: String| EngineError::CalendarStoreUnavailable {
            identity: identity.to_string(),
            reason,
        };

        let mut calendars = self.read().map_err(unavailable)?;
        let entries = calendars
            .remove(identity)
            .ok_or_else(|| unavailable("no calendar for identity".to_string()))?;

        // Inverted entries pass through; the engine drops them with a warning.
        Ok(entries
            .into_iter()
            .map(|e| Interval {
                start: e.start.with_timezone(&Utc),
                end: e.end.with_timezone(&Utc),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store_with(json: &str) -> (tempfile::NamedTempFile, JsonCalendarStore) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let store = JsonCalendarStore::new(file.path());
        (file, store)
    }

    #[test]
    fn reads_intervals_and_normalizes_to_utc() {
        let (_file, store) = store_with(
            r#"{"alice":[{"start":"2025-03-28T10:00:00-07:00","end":"2025-03-28T12:00:00-07:00"}]}"#,
        );
        let busy = store.busy_intervals("alice").unwrap();
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].start.to_rfc3339(), "2025-03-28T17:00:00+00:00");
        assert_eq!(busy[0].duration_minutes(), 120);
    }

    #[test]
    fn unknown_identity_is_unavailable() {
        let (_file, store) = store_with(r#"{"alice":[]}"#);
        let err = store.busy_intervals("bob").unwrap_err();
        assert!(matches!(err, EngineError::CalendarStoreUnavailable { .. }));
    }

    #[test]
    fn malformed_file_is_unavailable() {
        let (_file, store) = store_with("not json");
        let err = store.busy_intervals("alice").unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let store = JsonCalendarStore::new("/nonexistent/calendars.json");
        let err = store.busy_intervals("alice").unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
