//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! Not-found and conflict are deliberately distinct kinds so that callers
//! can branch on "doesn't exist" versus "exists but unavailable".

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2101,
///     "message": "ride 7 is no longer pending",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category       | HTTP Status               |
/// |-----------|----------------|---------------------------|
/// | 1000–1999 | Validation     | 400 Bad Request           |
/// | 2000–2099 | Not Found      | 404 Not Found             |
/// | 2100–2199 | State Conflict | 409 Conflict              |
/// | 3000–3999 | Storage        | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request validation failed; the caller's fault, never retried.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Ride with the given ID was not found.
    #[error("ride not found: {0}")]
    RideNotFound(i64),

    /// Driver with the given ID was not found.
    #[error("driver not found: {0}")]
    DriverNotFound(i64),

    /// Hotel with the given ID was not found.
    #[error("hotel not found: {0}")]
    HotelNotFound(i64),

    /// Restaurant with the given ID was not found.
    #[error("restaurant not found: {0}")]
    RestaurantNotFound(i64),

    /// Ride exists but is no longer pending, so it cannot be claimed
    /// (and, symmetrically, a non-accepted ride cannot be completed).
    #[error("ride {0} is no longer pending")]
    RideNotPending(i64),

    /// Hotel exists but has no rooms left to sell.
    #[error("no rooms available at hotel {0}")]
    NoRoomsAvailable(i64),

    /// Opaque storage layer failure; retries are the caller's concern.
    #[error("storage error: {0}")]
    Storage(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::RideNotFound(_) => 2001,
            Self::DriverNotFound(_) => 2002,
            Self::HotelNotFound(_) => 2003,
            Self::RestaurantNotFound(_) => 2004,
            Self::RideNotPending(_) => 2101,
            Self::NoRoomsAvailable(_) => 2102,
            Self::Storage(_) => 3001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::RideNotFound(_)
            | Self::DriverNotFound(_)
            | Self::HotelNotFound(_)
            | Self::RestaurantNotFound(_) => StatusCode::NOT_FOUND,
            Self::RideNotPending(_) | Self::NoRoomsAvailable(_) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal server error");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_conflict_are_distinct() {
        assert_eq!(
            GatewayError::RideNotFound(1).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::RideNotPending(1).status_code(),
            StatusCode::CONFLICT
        );
        assert_ne!(
            GatewayError::RideNotFound(1).error_code(),
            GatewayError::RideNotPending(1).error_code()
        );
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let err = GatewayError::Validation("pickup is required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1001);
    }

    #[test]
    fn storage_maps_to_internal_error() {
        let err = GatewayError::Storage("connection reset".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn sold_out_message_names_the_hotel() {
        let err = GatewayError::NoRoomsAvailable(9);
        assert!(err.to_string().contains('9'));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}
