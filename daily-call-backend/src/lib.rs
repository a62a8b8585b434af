// src/lib.rs
pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod repository;
pub mod service;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use types::ApiResponse;

use crate::api::handlers::daily_call_handler::{daily_call_router, health_handler};
use crate::api::AppState;
use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

/// ミドルウェア込みのルーター
pub fn app_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(daily_call_router(app_state))
        // 後に追加したレイヤーが外側。inject_request_context が先に走る
        .layer(middleware::from_fn(logging::logging_middleware))
        .layer(middleware::from_fn(logging::inject_request_context))
        .layer(TraceLayer::new_for_http())
}
