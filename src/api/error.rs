use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// API error types
#[derive(Debug)]
pub enum ApiError {
    ValidationError(String),
    PlayerNotFound,
    RoomNotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::PlayerNotFound => (StatusCode::NOT_FOUND, "Player not found".to_string()),
            ApiError::RoomNotFound => (StatusCode::NOT_FOUND, "Room not found".to_string()),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

/// Rejects NaN and infinities before they reach the world
pub(crate) fn require_finite(name: &str, value: f64) -> Result<f64, ApiError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ApiError::ValidationError(format!("{} must be a finite number", name)))
    }
}

/// Radius must be finite and non-negative; `None` falls back to `default`
pub(crate) fn resolve_radius(radius: Option<f64>, default: f64) -> Result<f64, ApiError> {
    match radius {
        None => Ok(default),
        Some(r) if r.is_finite() && r >= 0.0 => Ok(r),
        Some(r) => Err(ApiError::ValidationError(format!(
            "radius must be a non-negative number, got {}",
            r
        ))),
    }
}
