pub mod auth;
pub mod events;
pub mod months;

use axum::{
    Json, Router,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use famplan_core::PlannerError;
use serde::Serialize;
use tracing::error;

use crate::state::AppState;

/// All API routes, with state applied
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(events::router())
        .merge(months::router())
        .merge(auth::router())
        .with_state(state)
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert anyhow errors to HTTP responses
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError {
            status: StatusCode::BAD_REQUEST,
            error: anyhow::anyhow!(message.into()),
        }
    }
}

/// `Json` body extractor whose rejections use the API's error format
/// (400 with `{ "error": ... }`) instead of axum's plain-text 4xx.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(AppError::bad_request(rejection.body_text())),
        }
    }
}

/// Status code for errors coming out of famplan-core
fn status_for(err: &anyhow::Error) -> StatusCode {
    match err.downcast_ref::<PlannerError>() {
        Some(PlannerError::EventNotFound(_)) => StatusCode::NOT_FOUND,
        Some(PlannerError::DuplicateEvent(_)) => StatusCode::CONFLICT,
        Some(PlannerError::InvalidEvent(_) | PlannerError::InvalidTime(_)) => {
            StatusCode::BAD_REQUEST
        }
        Some(PlannerError::InvalidPasscode | PlannerError::SessionExpired) => {
            StatusCode::UNAUTHORIZED
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("Request failed: {:#}", self.error);
        }

        let body = Json(ErrorResponse {
            error: self.error.to_string(),
        });
        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let error = err.into();
        AppError {
            status: status_for(&error),
            error,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use chrono::Duration;
    use famplan_core::roster::Roster;
    use famplan_core::store::MemoryStore;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::router;
    use crate::state::AppState;

    pub fn app() -> Router {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            Roster::default(),
            Some(Duration::minutes(30)),
        );
        router(state)
    }

    /// Send a request and decode the JSON response body
    pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, value)
    }
}
