//! Login endpoints

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use famplan_core::roster::FamilyMember;
use famplan_core::session::Session;

use crate::routes::{ApiJson, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/members", get(list_members))
}

/// Request body for logging in
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub member_id: Option<String>,
    pub passcode: String,
}

/// POST /api/login - Check a passcode and start a session
async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<Session>, AppError> {
    let member = match req.member_id.as_deref() {
        Some(id) => state.roster.login_as(id, &req.passcode)?,
        None => state.roster.login(&req.passcode)?,
    };

    info!("{} logged in", member.id);
    Ok(Json(Session::start(member, Utc::now(), state.session_timeout)))
}

/// GET /api/members - Family roster without passcodes
async fn list_members(State(state): State<AppState>) -> Json<Vec<FamilyMember>> {
    Json(state.roster.members().iter().map(FamilyMember::public).collect())
}
