use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_size as usize;

    Router::new()
        // Employees
        .route("/employees", get(handlers::list_employees))
        .route(
            "/employees",
            post(handlers::create_employee).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/employees/:id", get(handlers::get_employee))
        .route(
            "/employees/:id",
            put(handlers::update_employee).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/employees/:id", delete(handlers::delete_employee))
        // Stored photos
        .route("/uploads/:filename", get(handlers::serve_photo))
        // Internal
        .route("/_internal/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
