use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::server::AppState;
use crate::server::response::{ApiError, ApiResponse};

pub async fn list_users(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let users = state.store.list_users()?;

    Ok::<_, ApiError>(Json(ApiResponse::success(users)))
}
