use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use common::types::Record;

/// In-memory record store guarded by a single coarse lock.
///
/// Keeps a map of `identifier -> record`; every operation takes the lock
/// once and completes without I/O. The handle is cheap to clone, and
/// independent instances can run side by side (no process-wide singleton),
/// which keeps tests isolated.
#[derive(Clone, Default)]
pub struct RecordStore {
    inner: Arc<Mutex<HashMap<String, Record>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record at its identifier key.
    pub async fn add(&self, record: Record) {
        let mut map = self.inner.lock().await;
        map.insert(record.number.clone(), record);
    }

    /// Get a copy of the record, if present.
    pub async fn get(&self, id: &str) -> Option<Record> {
        let map = self.inner.lock().await;
        map.get(id).cloned()
    }

    /// Every record currently stored; iteration order is unspecified.
    pub async fn list(&self) -> Vec<Record> {
        let map = self.inner.lock().await;
        map.values().cloned().collect()
    }

    /// Replace the record at `id` only if one already exists there; returns
    /// whether it existed. Never inserts on miss.
    pub async fn update(&self, id: &str, record: Record) -> bool {
        let mut map = self.inner.lock().await;
        match map.get_mut(id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Remove the entry if present; returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut map = self.inner.lock().await;
        map.remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(number: &str, name: &str, age: i64) -> Record {
        Record { number: number.into(), name: name.into(), age }
    }

    #[tokio::test]
    async fn add_then_get_returns_stored_fields() {
        let store = RecordStore::new();
        store.add(record("1", "Alice", 30)).await;

        let got = store.get("1").await.unwrap();
        assert_eq!(got, record("1", "Alice", 30));
    }

    #[tokio::test]
    async fn add_overwrites_existing_identifier() {
        let store = RecordStore::new();
        store.add(record("1", "Alice", 30)).await;
        store.add(record("1", "Alicia", 31)).await;

        assert_eq!(store.list().await.len(), 1);
        assert_eq!(store.get("1").await.unwrap().name, "Alicia");
    }

    #[tokio::test]
    async fn update_on_missing_id_leaves_store_unchanged() {
        let store = RecordStore::new();
        store.add(record("1", "Alice", 30)).await;

        let found = store.update("2", record("2", "Bob", 35)).await;
        assert!(!found);
        assert_eq!(store.list().await.len(), 1);
        assert!(store.get("2").await.is_none());
    }

    #[tokio::test]
    async fn update_replaces_wholesale() {
        let store = RecordStore::new();
        store.add(record("1", "Alice", 30)).await;

        let found = store.update("1", record("1", "Updated Alice", 35)).await;
        assert!(found);
        let got = store.get("1").await.unwrap();
        assert_eq!(got.name, "Updated Alice");
        assert_eq!(got.age, 35);
    }

    #[tokio::test]
    async fn delete_then_get_is_none() {
        let store = RecordStore::new();
        store.add(record("1", "Alice", 30)).await;

        assert!(store.remove("1").await);
        assert!(store.get("1").await.is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = RecordStore::new();
        store.add(record("1", "Alice", 30)).await;

        assert!(store.remove("1").await);
        assert!(!store.remove("1").await);
        assert!(!store.remove("1").await);
        assert!(store.get("1").await.is_none());
    }

    #[tokio::test]
    async fn list_length_tracks_distinct_identifiers() {
        let store = RecordStore::new();
        store.add(record("1", "Alice", 30)).await;
        store.add(record("2", "Bob", 35)).await;
        store.add(record("3", "Carol", 40)).await;
        store.remove("2").await;

        assert_eq!(store.list().await.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_adds_lose_no_writes() {
        let store = RecordStore::new();
        let mut tasks = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.add(record(&i.to_string(), "worker", i)).await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(store.list().await.len(), 32);
    }
}
