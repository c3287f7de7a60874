use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::scoring;
use crate::server::AppState;
use crate::server::dto::{CreateRatingRequest, ListRatingsParams, UpdateRatingRequest};
use crate::server::extract::{JsonBody, PathParam, QueryParams};
use crate::server::response::{ApiError, ApiResponse, PageResponse, StoreOptionExt};

pub async fn list_ratings(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ListRatingsParams>,
) -> impl IntoResponse {
    let query = params.into_query(&state.config.listing)?;
    let page = state.store.list_ratings(&query)?;

    Ok::<_, ApiError>(Json(PageResponse::from(page)))
}

pub async fn create_rating(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateRatingRequest>,
) -> impl IntoResponse {
    let rating = scoring::create_rating(state.store.as_ref(), req.into())?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(rating))))
}

pub async fn get_rating(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> impl IntoResponse {
    let rating = state
        .store
        .get_rating(id)?
        .or_not_found("rating not found")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(rating)))
}

pub async fn update_rating(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<UpdateRatingRequest>,
) -> impl IntoResponse {
    let rating = scoring::update_rating(state.store.as_ref(), id, &req.into())?;

    Ok::<_, ApiError>(Json(ApiResponse::success(rating)))
}

pub async fn lock_rating(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> impl IntoResponse {
    let rating = scoring::lock_rating(state.store.as_ref(), id)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(rating)))
}
