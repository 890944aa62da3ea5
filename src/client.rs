//! HTTP client for communicating with famplan-server
//!
//! [`HttpStore`] is the `EventStore` used with `backend = "http"`, so the
//! CLI works the same against a shared server as against a local file.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use famplan_core::roster::FamilyMember;
use famplan_core::session::Session;
use famplan_core::store::EventStore;
use famplan_core::{Event, EventDraft, PlannerError, PlannerResult};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Event store backed by a famplan-server
pub struct HttpStore {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    member_id: Option<&'a str>,
    passcode: &'a str,
}

impl HttpStore {
    pub fn new(base_url: &str) -> PlannerResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(remote_error)?;

        Ok(HttpStore {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn events_url(&self) -> String {
        format!("{}/api/events", self.base_url)
    }

    fn event_url(&self, id: &str) -> String {
        format!("{}/api/events/{}", self.base_url, id)
    }

    /// POST /api/login
    pub async fn login(&self, member_id: Option<&str>, passcode: &str) -> PlannerResult<Session> {
        let resp = self
            .http
            .post(format!("{}/api/login", self.base_url))
            .json(&LoginRequest {
                member_id,
                passcode,
            })
            .send()
            .await
            .map_err(remote_error)?;

        decode(resp, None).await
    }

    /// GET /api/members
    pub async fn members(&self) -> PlannerResult<Vec<FamilyMember>> {
        let resp = self
            .http
            .get(self.members_url())
            .send()
            .await
            .map_err(remote_error)?;

        decode(resp, None).await
    }

    fn members_url(&self) -> String {
        format!("{}/api/members", self.base_url)
    }
}

#[async_trait]
impl EventStore for HttpStore {
    /// GET /api/events
    async fn list(&self) -> PlannerResult<Vec<Event>> {
        let resp = self
            .http
            .get(self.events_url())
            .send()
            .await
            .map_err(remote_error)?;

        decode(resp, None).await
    }

    /// POST /api/events
    async fn create(&self, draft: EventDraft) -> PlannerResult<Vec<Event>> {
        let resp = self
            .http
            .post(self.events_url())
            .json(&draft)
            .send()
            .await
            .map_err(remote_error)?;

        decode(resp, draft.id.as_deref()).await
    }

    /// PUT /api/events/:id
    async fn update(&self, event: Event) -> PlannerResult<Vec<Event>> {
        let resp = self
            .http
            .put(self.event_url(&event.id))
            .json(&event)
            .send()
            .await
            .map_err(remote_error)?;

        decode(resp, Some(&event.id)).await
    }

    /// DELETE /api/events/:id
    async fn remove(&self, id: &str) -> PlannerResult<Vec<Event>> {
        let resp = self
            .http
            .delete(self.event_url(id))
            .send()
            .await
            .map_err(remote_error)?;

        decode(resp, Some(id)).await
    }
}

fn remote_error(err: reqwest::Error) -> PlannerError {
    PlannerError::Remote(err.to_string())
}

/// Decode a successful response, or turn the server's error back into the
/// matching `PlannerError`. `id` names the event the request was about.
async fn decode<T: DeserializeOwned>(resp: Response, id: Option<&str>) -> PlannerResult<T> {
    let status = resp.status();
    if status.is_success() {
        return resp.json().await.map_err(remote_error);
    }

    let message = match resp.json::<ErrorResponse>().await {
        Ok(err) => err.error,
        Err(_) => status.to_string(),
    };

    Err(error_for_status(status, message, id))
}

fn error_for_status(status: StatusCode, message: String, id: Option<&str>) -> PlannerError {
    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => PlannerError::EventNotFound(id.to_string()),
        (StatusCode::CONFLICT, Some(id)) => PlannerError::DuplicateEvent(id.to_string()),
        (StatusCode::BAD_REQUEST, _) => PlannerError::InvalidEvent(message),
        (StatusCode::UNAUTHORIZED, _) => PlannerError::InvalidPasscode,
        _ => PlannerError::Remote(format!("{} ({})", message, status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let store = HttpStore::new("http://localhost:3000/").unwrap();
        assert_eq!(store.events_url(), "http://localhost:3000/api/events");
        assert_eq!(store.event_url("42"), "http://localhost:3000/api/events/42");
        assert_eq!(store.members_url(), "http://localhost:3000/api/members");
    }

    #[test]
    fn test_error_for_status() {
        assert!(matches!(
            error_for_status(StatusCode::NOT_FOUND, "gone".into(), Some("7")),
            PlannerError::EventNotFound(id) if id == "7"
        ));
        assert!(matches!(
            error_for_status(StatusCode::UNAUTHORIZED, "no".into(), None),
            PlannerError::InvalidPasscode
        ));
        assert!(matches!(
            error_for_status(StatusCode::INTERNAL_SERVER_ERROR, "disk full".into(), None),
            PlannerError::Remote(msg) if msg.contains("disk full")
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_remote_error() {
        // Port 9 (discard) is not served by anything in the test environment
        let store = HttpStore::new("http://127.0.0.1:9").unwrap();
        assert!(matches!(store.list().await, Err(PlannerError::Remote(_))));
    }
}
