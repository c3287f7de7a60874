mod dashboard;
mod options;
mod rankings;
mod ratings;
mod scripts;
mod users;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::server::AppState;

pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Scripts
        .route(
            "/scripts",
            get(scripts::list_scripts).post(scripts::create_script),
        )
        .route(
            "/scripts/{id}",
            get(scripts::get_script)
                .patch(scripts::update_script)
                .put(scripts::update_script)
                .delete(scripts::delete_script),
        )
        .route("/scripts/{id}/refresh", post(scripts::refresh_script))
        // Ratings
        .route(
            "/ratings",
            get(ratings::list_ratings).post(ratings::create_rating),
        )
        .route(
            "/ratings/{id}",
            get(ratings::get_rating)
                .patch(ratings::update_rating)
                .put(ratings::update_rating),
        )
        .route("/ratings/{id}/lock", post(ratings::lock_rating))
        // Read-only views
        .route("/rankings", get(rankings::list_rankings))
        .route("/users", get(users::list_users))
        .route("/options", get(options::filter_options))
        // Dashboard
        .route("/dashboard/kpi", get(dashboard::kpi))
        .route(
            "/dashboard/status-distribution",
            get(dashboard::status_distribution),
        )
        .route(
            "/dashboard/source-distribution",
            get(dashboard::source_distribution),
        )
        .route(
            "/dashboard/team-distribution",
            get(dashboard::team_distribution),
        )
        .route("/dashboard/score-trend", get(dashboard::score_trend))
}
