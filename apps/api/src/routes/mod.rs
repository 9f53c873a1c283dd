pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::leaders::handlers as leaders;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/enhance_resume", post(resume::handle_enhance_resume))
        .route("/build_resume", post(resume::handle_build_resume))
        // Leaders API
        .route("/api/leaders", get(leaders::handle_list_leaders))
        .route("/api/leaders/:leader_id", get(leaders::handle_get_leader))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
