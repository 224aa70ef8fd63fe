//! HTTP surface over the predictor.
//!
//! | Method | Path             | Response                                  |
//! |--------|------------------|-------------------------------------------|
//! | GET    | `/health`        | `{status, version}`                       |
//! | GET    | `/api/locations` | `{locations, no_locations}`               |
//! | POST   | `/api/predict`   | `{estimated_price_lakh}` or `{error, status}` |

pub mod error;
pub mod handlers;
pub mod types;

pub use error::{ApiError, ApiResult, UNAVAILABLE_MESSAGE};

use crate::predictor::LazyPredictor;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: LazyPredictor,
}

impl AppState {
    pub fn new(predictor: LazyPredictor) -> Self {
        Self { predictor }
    }
}

/// Create the router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/locations", get(handlers::locations))
        .route("/api/predict", post(handlers::predict))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
