use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::scoring::scripts;
use crate::server::AppState;
use crate::server::dto::{CreateScriptResponse, ListScriptsParams};
use crate::server::extract::{JsonBody, PathParam, QueryParams};
use crate::server::response::{ApiError, ApiResponse, PageResponse};
use crate::types::{NewScript, ScriptPatch};

pub async fn list_scripts(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ListScriptsParams>,
) -> impl IntoResponse {
    let query = params.into_query(&state.config.listing)?;
    let page = state.store.list_scripts(&query)?;

    Ok::<_, ApiError>(Json(PageResponse::from(page)))
}

pub async fn create_script(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<NewScript>,
) -> impl IntoResponse {
    let script = scripts::create_script(state.store.as_ref(), req)?;

    Ok::<_, ApiError>((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreateScriptResponse {
            code: script.code.clone(),
            script,
        })),
    ))
}

pub async fn get_script(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
) -> impl IntoResponse {
    let detail = scripts::get_script_detail(state.store.as_ref(), &id)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(detail)))
}

pub async fn update_script(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
    JsonBody(patch): JsonBody<ScriptPatch>,
) -> impl IntoResponse {
    let script = scripts::update_script(state.store.as_ref(), &id, &patch)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(script)))
}

pub async fn delete_script(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
) -> impl IntoResponse {
    scripts::delete_script(state.store.as_ref(), &id)?;

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}

pub async fn refresh_script(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<String>,
) -> impl IntoResponse {
    let script = scripts::refresh_script(state.store.as_ref(), &id)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(script)))
}
