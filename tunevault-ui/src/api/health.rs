//! Health check endpoint (no auth)

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::AppState;

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "module": "tunevault-ui",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
