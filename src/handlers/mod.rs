pub mod pricing;
pub mod tiers;

use axum::{response::Json, routing::get, routing::post, Router};
use serde_json::{json, Value};

use crate::AppState;

/// Assembles the versioned API routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/discount-tiers", get(tiers::list_discount_tiers))
        .route("/pricing/preview", post(pricing::preview_document))
}

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "rebar-pricing-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
