//! Month view endpoint

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use famplan_core::build_month_view;
use famplan_core::event::today;
use famplan_core::store::list_or_empty;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/months/{month}", get(month_view))
}

#[derive(Deserialize)]
pub struct MonthQuery {
    /// YYYY-MM-DD, defaults to today in the configured zone
    pub today: Option<String>,
}

/// Parse "YYYY-MM" into the first day of that month
fn parse_month(month: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()
}

/// GET /api/months/:yyyy-mm - Month grid with each day's events
async fn month_view(
    State(state): State<AppState>,
    Path(month): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Value>, AppError> {
    let anchor = parse_month(&month)
        .ok_or_else(|| AppError::bad_request(format!("Invalid month '{month}'. Expected YYYY-MM")))?;

    let today = match query.today.as_deref() {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request(format!("Invalid date '{s}'. Expected YYYY-MM-DD")))?,
        None => today(),
    };

    let events = list_or_empty(state.store.as_ref()).await;
    let view = build_month_view(anchor, today, &events);

    // The view borrows from `events`, so serialize before they go out of scope
    Ok(Json(serde_json::to_value(&view)?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::parse_month;
    use crate::routes::test_support::{app, send};

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month("2024-02").map(|d| d.to_string()),
            Some("2024-02-01".to_string())
        );
        assert!(parse_month("2024-13").is_none());
        assert!(parse_month("march").is_none());
    }

    #[tokio::test]
    async fn test_march_view() {
        let app = app();
        for event in [
            json!({ "id": "1", "date": "2024-03-05", "time": "14:00", "title": "Dentist" }),
            json!({ "id": "2", "date": "2024-03-05", "title": "Groceries" }),
            json!({ "id": "3", "date": "2024-03-06", "time": "08:00", "title": "Gym" }),
        ] {
            let (status, _) = send(&app, "POST", "/api/events", Some(event)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, "GET", "/api/months/2024-03?today=2024-03-05", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["monthAnchor"], "2024-03-01");

        let cells = body["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 5 + 31);
        assert!(cells[..5].iter().all(|c| c["day"].is_null()));

        let fifth = &cells[5 + 4];
        assert_eq!(fifth["day"]["isToday"], true);
        assert_eq!(fifth["events"][0]["title"], "Dentist");
        assert_eq!(fifth["events"][1]["title"], "Groceries");
        assert_eq!(cells[5 + 5]["events"][0]["title"], "Gym");
    }

    #[tokio::test]
    async fn test_invalid_month_is_bad_request() {
        let app = app();

        let (status, body) = send(&app, "GET", "/api/months/2024-99", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("2024-99"));
    }
}
