//! Router configuration for the HTTP API.
//!
//! This module sets up all routes and middleware (CORS, security headers,
//! request tracing) and creates the axum router ready for serving.

use axum::{
    http::{
        header::{self, HeaderName},
        HeaderValue, Method,
    },
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers;
use super::state::AppState;

/// CORS for the dashboard origin; falls back to any origin if the configured
/// value is not a valid header.
fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    match origin.parse::<HeaderValue>() {
        Ok(value) => cors.allow_origin(value),
        Err(e) => {
            warn!("Invalid CORS_ORIGIN {origin:?} ({e}), allowing any origin");
            cors.allow_origin(Any)
        },
    }
}

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/apod", get(handlers::get_apod))
        .route("/apod/date/{date}", get(handlers::get_apod_by_date))
        .route("/apod/range", get(handlers::get_apod_range))
        .route("/mars-photos", get(handlers::get_mars_photos))
        .route("/neo", get(handlers::get_neo))
        .route("/neo/summary", get(handlers::get_neo_summary))
        .route("/epic", get(handlers::get_epic))
        .route("/nasa-videos", get(handlers::get_nasa_videos))
        .route("/nasa-photos", get(handlers::get_nasa_photos))
        .route("/nasa-photos/random", get(handlers::get_random_nasa_photo));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("cross-origin-resource-policy"),
            HeaderValue::from_static("cross-origin"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origin))
        .with_state(state)
}
