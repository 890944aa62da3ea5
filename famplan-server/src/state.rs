use std::sync::Arc;

use anyhow::Result;
use chrono::Duration;
use famplan_core::config::PlannerConfig;
use famplan_core::roster::Roster;
use famplan_core::store::{EventStore, JsonFileStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
    pub roster: Arc<Roster>,
    pub session_timeout: Option<Duration>,
}

impl AppState {
    /// State backed by `events.json` in the configured data directory
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let store = JsonFileStore::in_dir(&config.data_path());

        Ok(AppState::new(
            Arc::new(store),
            config.roster(),
            config.session_timeout()?,
        ))
    }

    pub fn new(store: Arc<dyn EventStore>, roster: Roster, session_timeout: Option<Duration>) -> Self {
        AppState {
            store,
            roster: Arc::new(roster),
            session_timeout,
        }
    }
}
