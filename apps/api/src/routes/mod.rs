pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/screenings", post(handlers::handle_screen))
        .route("/api/v1/screenings/score", post(handlers::handle_score))
        .route(
            "/api/v1/screenings/sample-job-description",
            get(handlers::handle_sample_job_description),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
