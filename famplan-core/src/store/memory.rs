//! In-memory event store.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{EventStore, apply_create, apply_remove, apply_update};
use crate::error::PlannerResult;
use crate::event::{Event, EventDraft};

/// Events held in process memory. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    events: Mutex<Vec<Event>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        MemoryStore {
            events: Mutex::new(events),
        }
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn list(&self) -> PlannerResult<Vec<Event>> {
        Ok(self.events.lock().await.clone())
    }

    async fn create(&self, draft: EventDraft) -> PlannerResult<Vec<Event>> {
        let mut events = self.events.lock().await;
        let created = apply_create(&mut events, draft)?;
        debug!("Created event in memory: {} ({})", created.title, created.id);
        Ok(events.clone())
    }

    async fn update(&self, event: Event) -> PlannerResult<Vec<Event>> {
        let mut events = self.events.lock().await;
        let id = event.id.clone();
        apply_update(&mut events, event)?;
        debug!("Updated event in memory: {}", id);
        Ok(events.clone())
    }

    async fn remove(&self, id: &str) -> PlannerResult<Vec<Event>> {
        let mut events = self.events.lock().await;
        apply_remove(&mut events, id)?;
        debug!("Deleted event in memory: {}", id);
        Ok(events.clone())
    }
}
