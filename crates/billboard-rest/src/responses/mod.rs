//! API response types.
//!
//! Every body has the shape `{ "code", "message", "data" }`. The body `code`
//! is a business code; the HTTP status is carried separately and defaults
//! to 200.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use billboard_core::{BillboardError, PageEnvelope};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Default message of a successful response.
pub const SUCCESS_MESSAGE: &str = "Success";

const fn default_status() -> u16 {
    200
}

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip, default = "default_status")]
    http_status: u16,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response.
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(data),
            http_status: default_status(),
        }
    }

    /// Replaces the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Replaces the body code, leaving the HTTP status alone.
    #[must_use]
    pub const fn with_code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    /// Replaces the HTTP status, leaving the body code alone.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.http_status = status.as_u16();
        self
    }

    /// Returns the HTTP status this response renders with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T> ApiResponse<PageEnvelope<T>> {
    /// Wraps a page of results.
    pub fn paginated(page: PageEnvelope<T>) -> Self {
        Self::success(page)
    }
}

impl ApiResponse<()> {
    /// Creates a failure response without data.
    ///
    /// The HTTP status follows `code` when it is a valid status, else 400.
    pub fn failed(message: impl Into<String>, code: u16) -> Self {
        let status = StatusCode::from_u16(code)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_REQUEST);

        Self {
            code,
            message: message.into(),
            data: None,
            http_status: status.as_u16(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub BillboardError);

impl From<BillboardError> for AppError {
    fn from(err: BillboardError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.0.status_code();
        if code >= 500 {
            error!(error = %self.0, kind = self.0.error_code(), "Request failed");
        }

        ApiResponse::failed(self.0.to_string(), code).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Helper to wrap a page of results.
pub fn paginated<T: Serialize>(page: PageEnvelope<T>) -> ApiResult<PageEnvelope<T>> {
    Ok(ApiResponse::paginated(page))
}
