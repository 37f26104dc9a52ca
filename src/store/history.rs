use tracing::{info, warn};

use crate::store::error::StoreError;
use crate::store::json_store::KeyValueStore;
use crate::store::schema::{HIGH_SCORE_KEY, HistoryEntry, RECENT_CAPACITY, RECENT_SCORES_KEY};

/// What a finished session did to the persisted history.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryUpdate {
    /// Most recent first, including the session just recorded.
    pub recent: Vec<HistoryEntry>,
    pub best_wpm: f64,
    pub previous_best: f64,
    pub is_new_record: bool,
}

/// Recent scores and the best WPM, kept on top of a string store.
///
/// Unreadable or malformed values are treated as empty history, so a corrupt
/// file never blocks a session from being recorded.
pub struct HistoryStore<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> HistoryStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn recent(&self) -> Vec<HistoryEntry> {
        let Some(raw) = self.read(RECENT_SCORES_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "discarding malformed recent scores");
                Vec::new()
            }
        }
    }

    pub fn best_wpm(&self) -> f64 {
        let Some(raw) = self.read(HIGH_SCORE_KEY) else {
            return 0.0;
        };
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => v,
            _ => {
                warn!(value = %raw.trim(), "discarding malformed high score");
                0.0
            }
        }
    }

    /// Prepends `entry` to the recent list and raises the high score if it
    /// was beaten. Write failures are logged and the update is still returned.
    pub fn record(&mut self, entry: HistoryEntry) -> HistoryUpdate {
        let previous_best = self.best_wpm();
        let is_new_record = entry.wpm > previous_best;
        let best_wpm = if is_new_record { entry.wpm } else { previous_best };

        let mut recent = self.recent();
        recent.insert(0, entry);
        recent.truncate(RECENT_CAPACITY);

        if let Err(e) = self.write(&recent, is_new_record.then_some(best_wpm)) {
            warn!(error = %e, "failed to save history");
        }
        if is_new_record {
            info!(best_wpm, previous_best, "new high score");
        }

        HistoryUpdate {
            recent,
            best_wpm,
            previous_best,
            is_new_record,
        }
    }

    pub fn into_inner(self) -> K {
        self.kv
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.kv.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "failed to read history");
                None
            }
        }
    }

    /// Recent scores go first; the high score is only raised once the entry
    /// that earned it is on record.
    fn write(&mut self, recent: &[HistoryEntry], new_best: Option<f64>) -> Result<(), StoreError> {
        let json = serde_json::to_string(recent)?;
        self.kv.set(RECENT_SCORES_KEY, &json)?;
        if let Some(best) = new_best {
            self.kv.set(HIGH_SCORE_KEY, &best.to_string())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::store::json_store::{JsonStore, MemoryStore};

    fn entry(wpm: f64, minute: u32) -> HistoryEntry {
        HistoryEntry {
            wpm,
            accuracy: 95.0,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 12, minute, 0).unwrap(),
            selected_time: 30,
        }
    }

    #[test]
    fn test_empty_store_has_no_history() {
        let store = HistoryStore::new(MemoryStore::new());
        assert!(store.recent().is_empty());
        assert_eq!(store.best_wpm(), 0.0);
    }

    #[test]
    fn test_first_session_is_a_record() {
        let mut store = HistoryStore::new(MemoryStore::new());
        let update = store.record(entry(42.0, 0));

        assert!(update.is_new_record);
        assert_eq!(update.previous_best, 0.0);
        assert_eq!(update.best_wpm, 42.0);
        assert_eq!(update.recent.len(), 1);

        let kv = store.into_inner();
        assert_eq!(kv.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("42"));
    }

    #[test]
    fn test_slower_session_keeps_high_score() {
        let mut store = HistoryStore::new(MemoryStore::new());
        store.record(entry(60.0, 0));
        let update = store.record(entry(50.0, 1));

        assert!(!update.is_new_record);
        assert_eq!(update.best_wpm, 60.0);
        assert_eq!(store.best_wpm(), 60.0);
    }

    #[test]
    fn test_equal_score_is_not_a_record() {
        let mut store = HistoryStore::new(MemoryStore::new());
        store.record(entry(60.0, 0));
        assert!(!store.record(entry(60.0, 1)).is_new_record);
    }

    #[test]
    fn test_recent_is_most_recent_first_and_capped() {
        let mut store = HistoryStore::new(MemoryStore::new());
        for i in 0..7 {
            store.record(entry(i as f64, i));
        }
        let recent = store.recent();
        assert_eq!(recent.len(), RECENT_CAPACITY);
        let wpms: Vec<f64> = recent.iter().map(|e| e.wpm).collect();
        assert_eq!(wpms, vec![6.0, 5.0, 4.0, 3.0, 2.0]);
    }

    #[test]
    fn test_malformed_values_recover_to_empty() {
        let mut kv = MemoryStore::new();
        kv.set(RECENT_SCORES_KEY, "{not json").unwrap();
        kv.set(HIGH_SCORE_KEY, "fast").unwrap();
        let mut store = HistoryStore::new(kv);

        assert!(store.recent().is_empty());
        assert_eq!(store.best_wpm(), 0.0);

        let update = store.record(entry(30.0, 0));
        assert!(update.is_new_record);
        assert_eq!(store.recent().len(), 1);
    }

    /// Store whose writes to one key always fail.
    struct FailingKey {
        inner: MemoryStore,
        key: &'static str,
    }

    impl KeyValueStore for FailingKey {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == self.key {
                return Err(StoreError::Io {
                    path: key.into(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_failed_recent_write_leaves_high_score_alone() {
        let mut store = HistoryStore::new(FailingKey {
            inner: MemoryStore::new(),
            key: RECENT_SCORES_KEY,
        });
        let update = store.record(entry(80.0, 0));

        assert!(update.is_new_record);
        assert_eq!(update.recent.len(), 1);
        assert!(store.recent().is_empty());
        assert_eq!(store.best_wpm(), 0.0);
    }

    #[test]
    fn test_failed_high_score_write_keeps_recent_entry() {
        let mut store = HistoryStore::new(FailingKey {
            inner: MemoryStore::new(),
            key: HIGH_SCORE_KEY,
        });
        store.record(entry(80.0, 0));

        assert_eq!(store.recent().len(), 1);
        assert_eq!(store.best_wpm(), 0.0);
    }

    #[test]
    fn test_history_survives_reopening_files() {
        let dir = tempfile::TempDir::new().unwrap();
        {
            let mut store = HistoryStore::new(JsonStore::with_base_dir(dir.path()).unwrap());
            store.record(entry(70.0, 0));
            store.record(entry(65.0, 1));
        }
        let store = HistoryStore::new(JsonStore::with_base_dir(dir.path()).unwrap());
        assert_eq!(store.best_wpm(), 70.0);
        assert_eq!(store.recent().len(), 2);
        assert_eq!(store.recent()[0].wpm, 65.0);
    }
}
