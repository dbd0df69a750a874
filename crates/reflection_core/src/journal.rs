//! crates/reflection_core/src/journal.rs
//!
//! Derived helpers over the entry store. Everything here is built
//! strictly atop `load`/`save`; the store owns the collection and this
//! type never retains entries across calls.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Entry;
use crate::ports::{Clock, EntryStore, PortResult};

/// The journal: the whole-blob entry collection plus date helpers.
///
/// The collection is kept newest first. One-entry-per-day is enforced by
/// the creation boundary via `can_create_today`, not by `add_entry`.
pub struct Journal {
    store: Arc<dyn EntryStore>,
    clock: Arc<dyn Clock>,
}

impl Journal {
    pub fn new(store: Arc<dyn EntryStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// The full collection, newest first.
    pub async fn entries(&self) -> PortResult<Vec<Entry>> {
        self.store.load().await
    }

    /// Prepends the entry and persists the new collection.
    pub async fn add_entry(&self, entry: Entry) -> PortResult<Vec<Entry>> {
        let mut entries = self.store.load().await?;
        entries.insert(0, entry);
        self.store.save(&entries).await?;
        Ok(entries)
    }

    /// Removes the entry with the given id, if present, and persists.
    pub async fn delete_entry(&self, id: Uuid) -> PortResult<Vec<Entry>> {
        let mut entries = self.store.load().await?;
        entries.retain(|entry| entry.id != id);
        self.store.save(&entries).await?;
        Ok(entries)
    }

    /// Replaces the whole collection. Used when an entry is updated in
    /// place (e.g. marked as shared).
    pub async fn replace(&self, entries: &[Entry]) -> PortResult<()> {
        self.store.save(entries).await
    }

    /// Today's entry, if one was created.
    pub async fn todays_entry(&self) -> PortResult<Option<Entry>> {
        let today = self.clock.now().date_naive();
        let entries = self.store.load().await?;
        Ok(entries.into_iter().find(|entry| entry.date == today))
    }

    /// Whether a new entry may be created today.
    pub async fn can_create_today(&self) -> PortResult<bool> {
        Ok(self.todays_entry().await?.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{entry_on, FixedClock, MemoryEntryStore};

    fn journal(store: Arc<MemoryEntryStore>) -> Journal {
        Journal::new(store, Arc::new(FixedClock::on_date(2024, 3, 2)))
    }

    #[tokio::test]
    async fn add_entry_prepends_newest_first() {
        let store = Arc::new(MemoryEntryStore::default());
        let journal = journal(store.clone());

        journal.add_entry(entry_on("2024-03-01", 6.0)).await.unwrap();
        let entries = journal.add_entry(entry_on("2024-03-02", 7.0)).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date.to_string(), "2024-03-02");
        assert_eq!(entries[1].date.to_string(), "2024-03-01");
    }

    #[tokio::test]
    async fn can_create_today_flips_with_todays_entry() {
        let store = Arc::new(MemoryEntryStore::default());
        let journal = journal(store.clone());
        assert!(journal.can_create_today().await.unwrap());

        let today = entry_on("2024-03-02", 6.0);
        let id = today.id;
        journal.add_entry(today).await.unwrap();
        assert!(!journal.can_create_today().await.unwrap());
        assert!(journal.todays_entry().await.unwrap().is_some());

        journal.delete_entry(id).await.unwrap();
        assert!(journal.can_create_today().await.unwrap());
    }

    #[tokio::test]
    async fn delete_entry_filters_by_id_only() {
        let store = Arc::new(MemoryEntryStore::default());
        let journal = journal(store.clone());

        let keep = entry_on("2024-03-01", 6.0);
        let drop = entry_on("2024-03-02", 6.0);
        let drop_id = drop.id;
        journal.add_entry(keep.clone()).await.unwrap();
        journal.add_entry(drop).await.unwrap();

        let entries = journal.delete_entry(drop_id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, keep.id);
    }

    #[tokio::test]
    async fn save_of_loaded_collection_is_byte_identical() {
        let store = Arc::new(MemoryEntryStore::default());
        let journal = journal(store.clone());
        journal.add_entry(entry_on("2024-03-01", 6.3)).await.unwrap();
        journal.add_entry(entry_on("2024-03-02", 4.9)).await.unwrap();

        let first_blob = store.raw_blob().unwrap();
        let loaded = journal.entries().await.unwrap();
        journal.replace(&loaded).await.unwrap();
        assert_eq!(store.raw_blob().unwrap(), first_blob);
    }
}
