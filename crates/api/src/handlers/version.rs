use axum::extract::State;
use axum::Json;

use crate::response::VersionResponse;
use crate::state::AppState;

/// GET /api/v1/version
pub async fn get_version(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: state.config.version.clone(),
    })
}
