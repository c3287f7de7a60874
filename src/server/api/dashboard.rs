use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::TrendParams;
use crate::server::extract::QueryParams;
use crate::server::response::{ApiError, ApiResponse};
use crate::types::{ScriptGrouping, TrendPeriod, non_blank};

pub async fn kpi(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let kpi = state.store.kpi()?;

    Ok::<_, ApiError>(Json(ApiResponse::success(kpi)))
}

pub async fn status_distribution(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let buckets = state.store.count_scripts_by(ScriptGrouping::Status)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(buckets)))
}

pub async fn source_distribution(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let buckets = state.store.count_scripts_by(ScriptGrouping::SourceType)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(buckets)))
}

pub async fn team_distribution(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let teams = state.store.team_distribution()?;

    Ok::<_, ApiError>(Json(ApiResponse::success(teams)))
}

pub async fn score_trend(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<TrendParams>,
) -> impl IntoResponse {
    let period = non_blank(params.period)
        .map(|p| TrendPeriod::parse(&p))
        .transpose()?
        .unwrap_or_default();
    let trend = state.store.score_trend(period)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(trend)))
}
