//! OAuth login error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::types::OAuthErrorResponse;

/// Failures surfaced by the login handlers
#[derive(Debug, Error)]
pub enum OAuthError {
    /// Provider redirected back with an error, or the code is missing
    #[error("{0}")]
    BadRequest(String),

    /// Token endpoint answered with a non-success status
    #[error("Token endpoint returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Token endpoint could not be reached or read
    #[error("Token endpoint request failed: {0}")]
    UpstreamTransport(#[from] reqwest::Error),

    /// Exchange succeeded but the response is unusable
    #[error("{0}")]
    InternalError(String),
}

impl OAuthError {
    pub fn provider_error(error: &str) -> Self {
        Self::BadRequest(format!("OAuth error: {}", error))
    }

    pub fn invalid_query(detail: impl std::fmt::Display) -> Self {
        Self::BadRequest(format!("Invalid callback query: {}", detail))
    }

    pub fn missing_code() -> Self {
        Self::BadRequest("Missing code in callback".to_string())
    }

    pub fn missing_id_token() -> Self {
        Self::InternalError("No id_token returned".to_string())
    }

    /// Get corresponding HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            OAuthError::BadRequest(_) => StatusCode::BAD_REQUEST,
            OAuthError::UpstreamStatus { .. } | OAuthError::UpstreamTransport(_) => {
                StatusCode::BAD_GATEWAY
            }
            OAuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            OAuthError::BadRequest(_) => "bad_request",
            OAuthError::UpstreamStatus { .. } | OAuthError::UpstreamTransport(_) => "upstream_error",
            OAuthError::InternalError(_) => "internal_error",
        }
    }
}

impl IntoResponse for OAuthError {
    fn into_response(self) -> Response {
        let body = OAuthErrorResponse::new(self.error_type(), self.to_string());
        (self.status_code(), Json(body)).into_response()
    }
}
