//! Picks the event store for this run.

use anyhow::Result;
use chrono::Utc;
use famplan_core::config::{Backend, PlannerConfig};
use famplan_core::session::{Session, SessionFile};
use famplan_core::store::{EventStore, JsonFileStore};
use tracing::debug;

use crate::client::HttpStore;

/// Everything a command needs: settings, the chosen store and the login.
pub struct Planner {
    pub config: PlannerConfig,
    pub backend: Backend,
    pub store: Box<dyn EventStore>,
}

impl Planner {
    pub fn open(config: PlannerConfig, backend_override: Option<Backend>) -> Result<Self> {
        let backend = backend_override.unwrap_or(config.backend);
        let store: Box<dyn EventStore> = match backend {
            Backend::File => Box::new(JsonFileStore::in_dir(&config.data_path())),
            Backend::Http => Box::new(HttpStore::new(&config.server_url)?),
        };
        debug!("Using {:?} backend", backend);

        Ok(Planner {
            config,
            backend,
            store,
        })
    }

    pub fn session_file(&self) -> SessionFile {
        SessionFile::in_dir(&self.config.data_path())
    }

    /// The logged-in session, if any and not expired.
    pub fn session(&self) -> Result<Option<Session>> {
        Ok(self.session_file().load_active(Utc::now())?)
    }

    pub fn require_session(&self) -> Result<Session> {
        self.session()?.ok_or_else(|| {
            anyhow::anyhow!(
                "Not logged in (or the session expired).\n\n\
                Log in with:\n  \
                famplan login <passcode>"
            )
        })
    }
}
