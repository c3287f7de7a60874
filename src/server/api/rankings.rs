use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};

use crate::scoring::top_ranked;
use crate::server::AppState;
use crate::server::dto::RankingParams;
use crate::server::extract::QueryParams;
use crate::server::response::{ApiError, ApiResponse};

pub async fn list_rankings(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<RankingParams>,
) -> impl IntoResponse {
    let limit = state.config.rankings.resolve(params.limit);
    let ranked = top_ranked(state.store.as_ref(), limit)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(ranked)))
}
