//! Error handling

use crate::predictor::Unavailable;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub const UNAVAILABLE_MESSAGE: &str = "Prediction unavailable (model or columns missing).";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// The request body is malformed or a field does not parse.
    Validation(String),

    /// The predictor cannot answer.
    Unavailable(Unavailable),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            ApiError::Unavailable(reason) => {
                tracing::warn!("Prediction unavailable: {}", reason);
                (StatusCode::INTERNAL_SERVER_ERROR, UNAVAILABLE_MESSAGE)
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<Unavailable> for ApiError {
    fn from(err: Unavailable) -> Self {
        ApiError::Unavailable(err)
    }
}
