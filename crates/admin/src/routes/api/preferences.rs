//! User preferences API handlers.

use axum::{Json, Router, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{middleware::RequireAuth, models::session_keys, state::AppState};

/// Build the preferences router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/preferences/sidebar", post(save_sidebar))
}

/// Request for saving the sidebar state.
#[derive(Debug, Deserialize)]
pub struct SidebarRequest {
    pub collapsed: bool,
}

/// Response for preference updates.
#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub success: bool,
}

/// Remember whether the sidebar is collapsed for this session.
///
/// # Errors
///
/// Returns 500 if the session store fails.
pub async fn save_sidebar(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Json(body): Json<SidebarRequest>,
) -> Result<Json<PreferencesResponse>, StatusCode> {
    match session
        .insert(session_keys::SIDEBAR_COLLAPSED, body.collapsed)
        .await
    {
        Ok(()) => Ok(Json(PreferencesResponse { success: true })),
        Err(e) => {
            tracing::error!("Failed to save sidebar preference: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
