//! JSON file event store.
//!
//! The whole list lives in a single JSON array. Each mutation rewrites the
//! file: the new array is written next to it and renamed into place, so a
//! reader sees either the old list or the new one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{EventStore, apply_create, apply_remove, apply_update};
use crate::error::PlannerResult;
use crate::event::{Event, EventDraft};

/// File name of the event list inside the data directory
pub const EVENTS_FILE: &str = "events.json";

pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store at `<data_dir>/events.json`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(EVENTS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> PlannerResult<Vec<Event>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    async fn write(&self, events: &[Event]) -> PlannerResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(events)?;
        let tmp_path = self.path.with_extension("json.tmp");

        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        Ok(())
    }

    /// Load, change and save the list while holding the write lock.
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Vec<Event>) -> PlannerResult<T> + Send,
    ) -> PlannerResult<(T, Vec<Event>)> {
        let _guard = self.write_lock.lock().await;

        let mut events = self.read().await?;
        let outcome = change(&mut events)?;
        self.write(&events).await?;

        Ok((outcome, events))
    }
}

#[async_trait]
impl EventStore for JsonFileStore {
    async fn list(&self) -> PlannerResult<Vec<Event>> {
        self.read().await
    }

    async fn create(&self, draft: EventDraft) -> PlannerResult<Vec<Event>> {
        let (created, events) = self.mutate(|events| apply_create(events, draft)).await?;
        debug!("Created event: {} ({})", created.title, created.id);
        Ok(events)
    }

    async fn update(&self, event: Event) -> PlannerResult<Vec<Event>> {
        let id = event.id.clone();
        let ((), events) = self.mutate(|events| apply_update(events, event)).await?;
        debug!("Updated event: {}", id);
        Ok(events)
    }

    async fn remove(&self, id: &str) -> PlannerResult<Vec<Event>> {
        let (removed, events) = self.mutate(|events| apply_remove(events, id)).await?;
        debug!("Deleted event: {} ({})", removed.title, removed.id);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");

        let store = JsonFileStore::in_dir(&data_dir);
        let events = store
            .create(
                EventDraft::new("Dentist", date(2024, 3, 5))
                    .with_time("14:00".parse().unwrap())
                    .with_owner("mom", "bg-indigo-400"),
            )
            .await
            .unwrap();
        let id = events[0].id.clone();
        store
            .create(EventDraft::new("Groceries", date(2024, 3, 5)))
            .await
            .unwrap();

        let reopened = JsonFileStore::in_dir(&data_dir);
        let listed = reopened.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].owner_id, "mom");
        assert_eq!(listed[1].title, "Groceries");

        let mut changed = listed[0].clone();
        changed.title = "Dentist (moved)".to_string();
        changed.date = date(2024, 3, 7);
        reopened.update(changed).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].title, "Dentist (moved)");
        assert_eq!(listed[0].date, date(2024, 3, 7));

        let remaining = store.remove(&id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(store.list().await.unwrap().iter().all(|e| e.id != id));
    }

    #[tokio::test]
    async fn test_file_is_a_plain_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        store
            .create(EventDraft::new("Gym", date(2024, 3, 6)).with_id("3"))
            .await
            .unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], "3");
        assert_eq!(value[0]["date"], "2024-03-06");
        assert!(!dir.path().join("events.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        store
            .create(EventDraft::new("Gym", date(2024, 3, 6)).with_id("3"))
            .await
            .unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        let err = store.remove("missing").await.unwrap_err();
        assert!(matches!(err, PlannerError::EventNotFound(_)));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(EVENTS_FILE), "{not json").unwrap();
        let store = JsonFileStore::in_dir(dir.path());

        assert!(matches!(
            store.list().await,
            Err(PlannerError::Serialization(_))
        ));
    }
}
