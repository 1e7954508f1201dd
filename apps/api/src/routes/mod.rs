pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resume/preview", post(handlers::handle_preview))
        .route("/api/v1/resume/docx", post(handlers::handle_download_docx))
        .route("/api/v1/resume/pdf", post(handlers::handle_download_pdf))
        .with_state(state)
}
