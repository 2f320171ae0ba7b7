//! Router assembly
//!
//! Combines the form routes and the health check under one permissive
//! CORS policy. Shared state is one pool handle, the notifier, and the
//! school identity — nothing else crosses requests.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderName, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::form_routes::form_routes;
use crate::config::SchoolInfo;
use crate::db::DbPool;
use crate::notify::Notifier;

/// Shared per-process state.
pub struct AppState {
    pub pool: DbPool,
    pub notifier: Arc<Notifier>,
    pub school: SchoolInfo,
}

/// Build the combined router with all endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::POST,
            Method::GET,
            Method::OPTIONS,
            Method::DELETE,
            Method::PUT,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .max_age(Duration::from_secs(86400));

    Router::new()
        .merge(health_routes())
        .merge(form_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    (StatusCode::OK, Json(response))
}
