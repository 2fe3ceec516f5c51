//! Simulator error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error responses of the simulated device
#[derive(Debug)]
pub enum SimError {
    /// 401: token missing, unknown or revoked
    InvalidToken,
    /// 400: PIN verification without an open pairing window
    NoPairingWindow,
    /// 403: submitted PIN does not match the one on screen
    WrongPin,
    /// 400: action name not recognized on this route
    UnknownAction(String),
    /// 503: injected probe failure
    Unavailable,
}

/// Standard error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for SimError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            SimError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "invalid client token".to_string(),
            ),
            SimError::NoPairingWindow => (
                StatusCode::BAD_REQUEST,
                "no_pairing_window",
                "no pairing request is active".to_string(),
            ),
            SimError::WrongPin => (
                StatusCode::FORBIDDEN,
                "wrong_pin",
                "PIN does not match".to_string(),
            ),
            SimError::UnknownAction(action) => (
                StatusCode::BAD_REQUEST,
                "unknown_action",
                format!("unknown action: {action}"),
            ),
            SimError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "unavailable",
                "device is not ready".to_string(),
            ),
        };

        tracing::debug!(error = error_type, %message, "request rejected");

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
