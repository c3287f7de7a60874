use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::server::AppState;
use crate::server::response::{ApiError, ApiResponse};

/// Distinct values for the script list's filter dropdowns.
pub async fn filter_options(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let options = state.store.filter_options()?;

    Ok::<_, ApiError>(Json(ApiResponse::success(options)))
}
