//! Event storage.
//!
//! Every backend implements [`EventStore`]: a flat list of events with
//! whole-list results for each mutation. Backends are picked when the
//! application is put together and used as `Box<dyn EventStore>`.
//!
//! Stores return events in creation order. Day ordering relies on a stable
//! sort, so this is what keeps two untimed events on the same day in a
//! predictable order.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use tracing::warn;

use crate::error::{PlannerError, PlannerResult};
use crate::event::{Event, EventDraft};

/// CRUD over the family's event list.
///
/// Mutations return the full updated list. Each call is all-or-nothing.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn list(&self) -> PlannerResult<Vec<Event>>;

    /// Store a new event. Drafts without an id get a generated one.
    async fn create(&self, draft: EventDraft) -> PlannerResult<Vec<Event>>;

    /// Replace the event with the same id.
    async fn update(&self, event: Event) -> PlannerResult<Vec<Event>>;

    async fn remove(&self, id: &str) -> PlannerResult<Vec<Event>>;
}

/// Fetch events for display, falling back to an empty list on failure.
///
/// Only reads degrade this way; writes must surface their errors.
pub async fn list_or_empty(store: &dyn EventStore) -> Vec<Event> {
    match store.list().await {
        Ok(events) => events,
        Err(e) => {
            warn!("Failed to fetch events, showing none: {}", e);
            Vec::new()
        }
    }
}

/// Generate a store-side event id.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// List mutations shared by the local backends
// =============================================================================

pub(crate) fn apply_create(events: &mut Vec<Event>, draft: EventDraft) -> PlannerResult<Event> {
    draft.validate()?;

    let event = draft.into_event(generate_id);
    if events.iter().any(|e| e.id == event.id) {
        return Err(PlannerError::DuplicateEvent(event.id));
    }

    events.push(event.clone());
    Ok(event)
}

pub(crate) fn apply_update(events: &mut [Event], event: Event) -> PlannerResult<()> {
    event.validate()?;

    let slot = events
        .iter_mut()
        .find(|e| e.id == event.id)
        .ok_or_else(|| PlannerError::EventNotFound(event.id.clone()))?;
    *slot = event;
    Ok(())
}

pub(crate) fn apply_remove(events: &mut Vec<Event>, id: &str) -> PlannerResult<Event> {
    let position = events
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| PlannerError::EventNotFound(id.to_string()))?;
    Ok(events.remove(position))
}
