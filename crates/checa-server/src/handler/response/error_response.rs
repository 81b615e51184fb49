use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// HTTP error response body.
///
/// Every error the server returns serializes to the same two-field shape:
/// `error` carries a short client-safe message and `details` optionally
/// narrows it down. The status code travels in the HTTP status line only.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// Client-safe error message
    pub error: Cow<'a, str>,
    /// Optional additional detail, e.g. which field or resource failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "The request could not be processed due to invalid data",
        StatusCode::BAD_REQUEST,
    );
    pub const CONFLICT: Self = Self::new(
        "The request conflicts with the current state of the resource",
        StatusCode::CONFLICT,
    );
    pub const FORBIDDEN: Self = Self::new(
        "You don't have permission to access this resource",
        StatusCode::FORBIDDEN,
    );
    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "An internal server error occurred. Please try again later",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const MALFORMED_AUTH_TOKEN: Self = Self::new(
        "The authentication token format is invalid",
        StatusCode::UNAUTHORIZED,
    );
    pub const MISSING_AUTH_TOKEN: Self = Self::new(
        "Authentication is required to access this resource",
        StatusCode::UNAUTHORIZED,
    );
    pub const NOT_FOUND: Self = Self::new(
        "The requested resource was not found",
        StatusCode::NOT_FOUND,
    );
    pub const UNAUTHORIZED: Self = Self::new(
        "Invalid or expired authentication credentials",
        StatusCode::UNAUTHORIZED,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(error: &'a str, status: StatusCode) -> Self {
        Self {
            error: Cow::Borrowed(error),
            details: None,
            status,
        }
    }

    /// Replaces the client-facing message.
    pub fn with_error(mut self, error: impl Into<Cow<'a, str>>) -> Self {
        self.error = error.into();
        self
    }

    /// Attaches details to the error response.
    /// If details already exist, they are merged with a separator.
    pub fn with_details(mut self, details: impl Into<Cow<'a, str>>) -> Self {
        let new_details = details.into();
        self.details = Some(match self.details {
            Some(existing) => Cow::Owned(format!("{existing}; {new_details}")),
            None => new_details,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_details() {
        let response = ErrorResponse::NOT_FOUND
            .with_details("booking")
            .with_details("document");

        assert_eq!(response.details.as_deref(), Some("booking; document"));
    }

    #[test]
    fn serializes_error_and_details_only() {
        let response = ErrorResponse::BAD_REQUEST.with_details("reason must not be empty");
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("error").is_some());
        assert_eq!(json["details"], "reason must not be empty");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn omits_absent_details() {
        let json = serde_json::to_value(ErrorResponse::FORBIDDEN).unwrap();
        assert!(json.get("details").is_none());
    }
}
