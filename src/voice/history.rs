//! History Ledger - bounded, newest-first record of recognition events
//!
//! Every mutation persists the full list. Persistence failures are logged and
//! do not interrupt recognition.

use std::collections::VecDeque;

use crate::domain::{HistoryEntry, clamp_history_max};
use crate::store::VoiceStorage;

pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
    max: usize,
    storage: VoiceStorage,
}

impl HistoryLedger {
    /// Empty ledger; call [`load`](Self::load) to restore the persisted state
    pub fn new(storage: VoiceStorage, max: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max: clamp_history_max(max as i64),
            storage,
        }
    }

    /// Restore entries and size from storage, trimming to the stored size
    pub async fn load(&mut self, fallback_max: usize) {
        self.max = self.storage.history_max(fallback_max).await;
        self.entries = self.storage.history().await.into();
        self.trim();
    }

    /// Entries, most recent first
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Insert at the front, evict the oldest beyond the limit, persist
    pub async fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.trim();
        self.persist().await;
    }

    /// Change the limit (clamped to `0..=50`), re-trim and persist both
    pub async fn set_max(&mut self, value: i64) -> usize {
        self.max = clamp_history_max(value);
        self.trim();
        if let Err(e) = self.storage.set_history_max(self.max as i64).await {
            tracing::warn!("Failed to persist voice history size: {}", e);
        }
        self.persist().await;
        self.max
    }

    pub async fn clear(&mut self) {
        self.entries.clear();
        self.persist().await;
    }

    fn trim(&mut self) {
        self.entries.truncate(self.max);
    }

    async fn persist(&self) {
        let items: Vec<HistoryEntry> = self.entries.iter().cloned().collect();
        if let Err(e) = self.storage.save_history(&items).await {
            tracing::warn!("Failed to persist voice history: {}", e);
        }
    }
}
