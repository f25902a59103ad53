pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::resume::handlers as resume;
use crate::state::AppState;

const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/resume/upload",
            post(resume::handle_upload_resume).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/resume/parse", post(resume::handle_parse_resume))
        // Jobs API
        .route("/api/jobs", get(jobs::handle_list_jobs))
        .route("/api/jobs/match", post(jobs::handle_match_jobs))
        .route("/api/jobs/parse-filter", post(jobs::handle_parse_filter))
        .with_state(state)
}
