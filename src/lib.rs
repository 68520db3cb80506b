//! Rebar Pricing API Library
//!
//! Pricing automation for a rebar sales catalog: weight-tiered discount
//! recalculation on quotations and sales orders, plus one-directional
//! kg -> PCS selling-price synchronization. The computation core is
//! exposed both as document save hooks for embedding hosts and as a
//! small HTTP surface (tier listing, pricing preview).
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod catalogs;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod hooks;
pub mod models;
pub mod notifications;
pub mod services;

use axum::{routing::get, Router};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub tier_service: services::TierService,
    pub pricing_service: services::WeightPricingService,
}

/// Common response wrapper.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Builds the application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", handlers::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
