//! famplan configuration.
//!
//! Settings come from `~/.config/famplan/config.toml` (created with every
//! option commented out on first run), overridden by `FAMPLAN_*` environment
//! variables such as `FAMPLAN_BACKEND=http`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Duration;
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::event::set_day_zone;
use crate::roster::{FamilyMember, Roster};

static DEFAULT_DATA_DIR: &str = "~/famplan";
static DEFAULT_SERVER_URL: &str = "http://localhost:3000";
static DEFAULT_BIND: &str = "0.0.0.0:3000";
static DEFAULT_SESSION_TIMEOUT: &str = "30m";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_session_timeout() -> String {
    DEFAULT_SESSION_TIMEOUT.to_string()
}

/// Where events are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// JSON file in the data directory
    #[default]
    File,
    /// A famplan server at `server_url`
    Http,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Backend::File),
            "http" | "server" => Ok(Backend::Http),
            other => Err(format!("Unknown backend '{}'. Expected file or http", other)),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// Directory holding events.json and session.json
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub backend: Backend,

    /// Base URL of the famplan server (http backend)
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Address famplan-server listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// How long a login lasts, e.g. "30m" or "12h". "off" disables expiry.
    #[serde(default = "default_session_timeout")]
    pub session_timeout: String,

    /// IANA zone stored timestamps are read in, e.g. "Asia/Seoul".
    /// Defaults to the system's local zone.
    #[serde(default)]
    pub time_zone: Option<String>,

    /// Family roster. Empty means the built-in family.
    #[serde(default)]
    pub members: Vec<FamilyMember>,
}

impl PlannerConfig {
    pub fn config_path() -> PlannerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlannerError::Config("Could not determine config directory".into()))?
            .join("famplan");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, creating a commented default on first run.
    pub fn load() -> PlannerResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from a specific file (which may be missing) plus the environment.
    pub fn load_from(path: &Path) -> PlannerResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("FAMPLAN"))
            .build()
            .map_err(|e| PlannerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlannerError::Config(e.to_string()))
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn roster(&self) -> Roster {
        if self.members.is_empty() {
            Roster::default()
        } else {
            Roster::new(self.members.clone())
        }
    }

    /// Parsed session timeout. `None` means sessions never expire.
    pub fn session_timeout(&self) -> PlannerResult<Option<Duration>> {
        let raw = self.session_timeout.trim();
        if matches!(raw, "off" | "never" | "0") {
            return Ok(None);
        }

        let parsed = humantime::parse_duration(raw).map_err(|e| {
            PlannerError::Config(format!("Invalid session_timeout '{}': {}", raw, e))
        })?;
        let timeout = Duration::from_std(parsed)
            .map_err(|e| PlannerError::Config(format!("session_timeout out of range: {}", e)))?;

        Ok(Some(timeout))
    }

    pub fn time_zone(&self) -> PlannerResult<Option<Tz>> {
        let Some(raw) = self.time_zone.as_deref() else {
            return Ok(None);
        };

        raw.trim()
            .parse::<Tz>()
            .map(Some)
            .map_err(|e| PlannerError::Config(format!("Invalid time_zone '{}': {}", raw, e)))
    }

    /// Make the configured zone the one calendar days are read in.
    pub fn apply_time_zone(&self) -> PlannerResult<()> {
        if let Some(zone) = self.time_zone()? {
            set_day_zone(zone);
        }
        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlannerResult<()> {
        let contents = format!(
            "\
# famplan configuration

# Where events.json and the login session live:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Event backend: \"file\" (local JSON) or \"http\" (a famplan server)
# backend = \"file\"
# server_url = \"{DEFAULT_SERVER_URL}\"

# Address for famplan-server:
# bind = \"{DEFAULT_BIND}\"

# How long a login lasts (\"off\" to never expire):
# session_timeout = \"{DEFAULT_SESSION_TIMEOUT}\"

# Zone for reading stored timestamps and for \"today\" (defaults to the system zone):
# time_zone = \"Asia/Seoul\"

# Family members (defaults to the built-in family when omitted):
# [[members]]
# id = \"mom\"
# name = \"Mom\"
# avatar = \"👩\"
# color = \"bg-indigo-400\"
# passcode = \"222\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlannerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlannerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
