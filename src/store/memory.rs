use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{EntryStore, StoreError};
use crate::models::entry::{DateRange, MoodEntry, NewMoodEntry};

/// In-process store (for single-instance development and tests).
/// Contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryEntryStore {
    entries: Arc<RwLock<Vec<MoodEntry>>>,
    unreachable: Arc<AtomicBool>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store marked unreachable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn insert(&self, entry: NewMoodEntry) -> Result<MoodEntry, StoreError> {
        self.check_reachable()?;

        let mut entries = self.entries.write().await;
        if entries.iter().any(|e| e.id == entry.id) {
            return Err(StoreError::Rejected(format!("duplicate id {}", entry.id)));
        }

        let stored = entry.into_entry();
        entries.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<Vec<MoodEntry>, StoreError> {
        self.check_reachable()?;

        let mut found: Vec<MoodEntry> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.user_id == user_id && range.contains(e.entry_date))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.entry_date
                .cmp(&b.entry_date)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(found)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_reachable()
    }
}
