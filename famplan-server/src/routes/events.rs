//! Event endpoints
//!
//! Every mutation answers with the full updated event list.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use famplan_core::{Event, EventDraft};

use crate::routes::{ApiJson, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/{id}", put(update_event).delete(delete_event))
}

/// GET /api/events - List all events
async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// POST /api/events - Create a new event
async fn create_event(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<EventDraft>,
) -> Result<(StatusCode, Json<Vec<Event>>), AppError> {
    let events = state.store.create(draft).await?;
    Ok((StatusCode::CREATED, Json(events)))
}

/// PUT /api/events/:id - Replace an event
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(mut event): ApiJson<Event>,
) -> Result<Json<Vec<Event>>, AppError> {
    // The path names the event; a mismatched body id is ignored
    event.id = id;
    Ok(Json(state.store.update(event).await?))
}

/// DELETE /api/events/:id - Remove an event
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.store.remove(&id).await?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{app, send};

    #[tokio::test]
    async fn test_create_list_update_delete() {
        let app = app();

        let (status, body) = send(&app, "GET", "/api/events", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = send(
            &app,
            "POST",
            "/api/events",
            Some(json!({
                "title": "Dentist",
                "date": "2024-03-05",
                "time": "14:00",
                "ownerId": "mom",
                "color": "bg-indigo-400"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body[0]["id"].as_str().unwrap().to_string();
        assert!(!id.is_empty());

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/events/{id}"),
            Some(json!({
                "id": "ignored",
                "title": "Dentist (moved)",
                "date": "2024-03-07",
                "ownerId": "mom",
                "color": "bg-indigo-400"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], id.as_str());
        assert_eq!(body[0]["title"], "Dentist (moved)");
        assert!(body[0].get("time").is_none());

        let (status, body) = send(&app, "DELETE", &format!("/api/events/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let app = app();

        let (status, body) = send(&app, "DELETE", "/api/events/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("missing"));
    }

    #[tokio::test]
    async fn test_duplicate_client_id_conflicts() {
        let app = app();
        let draft = json!({ "id": "1733000000000", "title": "Gym", "date": "2024-03-06" });

        let (status, _) = send(&app, "POST", "/api/events", Some(draft.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(&app, "POST", "/api/events", Some(draft)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_blank_title_is_bad_request() {
        let app = app();

        let (status, _) = send(
            &app,
            "POST",
            "/api/events",
            Some(json!({ "title": "  ", "date": "2024-03-06" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request_with_json_error() {
        let app = app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/events",
            Some(json!({ "title": "Gym", "date": "2024-03-06", "time": "25:00" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = send(
            &app,
            "PUT",
            "/api/events/1",
            Some(json!({ "id": "1", "title": "Gym", "date": "March 6th" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}
