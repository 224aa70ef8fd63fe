//! Route handlers

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{
    HealthResponse, LocationsResponse, PredictInput, PredictRequest, PredictResponse,
};
use crate::api::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Known locations for the input form.
pub async fn locations(State(state): State<AppState>) -> Json<LocationsResponse> {
    let locations = state.predictor.get_async().await.locations().to_vec();
    Json(LocationsResponse {
        no_locations: locations.is_empty(),
        locations,
    })
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().starts_with("application/json"))
        .unwrap_or(false)
}

/// Accepts a JSON body or an url-encoded form with the same fields.
pub async fn predict(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<PredictResponse>> {
    let request: PredictRequest = if is_json(&headers) {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::Validation(format!("invalid JSON body: {e}")))?
    } else {
        serde_urlencoded::from_bytes(&body)
            .map_err(|e| ApiError::Validation(format!("invalid form body: {e}")))?
    };
    let input = PredictInput::try_from(request)?;

    let price = state
        .predictor
        .get_async()
        .await
        .estimate(&input.location, input.sqft, input.bath, input.bhk)?;
    tracing::debug!(
        location = %input.location,
        sqft = input.sqft,
        bath = input.bath,
        bhk = input.bhk,
        price,
        "estimate"
    );

    Ok(Json(PredictResponse {
        estimated_price_lakh: price,
    }))
}
