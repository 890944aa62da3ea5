//! Login sessions.
//!
//! A session is a plain value: the member who logged in and when the login
//! stops being valid. Callers check [`Session::is_expired`] on startup and log
//! the member out themselves.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlannerResult;
use crate::roster::FamilyMember;

/// File name of the persisted session inside the data directory
pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub member: FamilyMember,
    pub started_at: DateTime<Utc>,
    /// None means the session never expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Start a session for `member`. The stored member never carries a passcode.
    pub fn start(member: &FamilyMember, now: DateTime<Utc>, timeout: Option<Duration>) -> Self {
        Session {
            member: member.public(),
            started_at: now,
            expires_at: timeout.map(|t| now + t),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| now >= expires)
    }
}

/// Session persisted as JSON between CLI invocations.
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn in_dir(data_dir: &Path) -> Self {
        SessionFile {
            path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the session if there is one that hasn't expired.
    ///
    /// An expired session is deleted.
    pub fn load_active(&self, now: DateTime<Utc>) -> PlannerResult<Option<Session>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session: Session = serde_json::from_str(&content)?;
        if session.is_expired(now) {
            debug!("Session for {} expired, removing", session.member.id);
            self.clear()?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> PlannerResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    pub fn clear(&self) -> PlannerResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
