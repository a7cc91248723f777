//! HTTP error responses.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{debug, warn};

use crate::mbta::{MbtaError, MbtaErrorKind};

/// JSON body returned for every error.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,

    /// Machine-readable error kind, e.g. `validation_error`
    pub kind: &'static str,

    /// Status code returned by the MBTA API, if the error came from it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,

    /// Raw `x-ratelimit-reset` value from the MBTA API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_reset: Option<String>,

    /// The reset as an RFC 3339 timestamp, when it holds epoch seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_reset_at: Option<String>,
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The request itself was malformed
    Validation { message: String },
    /// The upstream call failed
    Upstream(MbtaError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream(e) => match e.kind() {
                MbtaErrorKind::RateLimitExceeded => StatusCode::SERVICE_UNAVAILABLE,
                MbtaErrorKind::Transport if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
                MbtaErrorKind::ApiError | MbtaErrorKind::Transport | MbtaErrorKind::Decode => {
                    StatusCode::BAD_GATEWAY
                }
                MbtaErrorKind::InvalidUri => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::Upstream(e) => e.kind().as_str(),
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            AppError::Validation { message } => ErrorResponse {
                error: message.clone(),
                kind: self.kind(),
                upstream_status: None,
                rate_limit_reset: None,
                rate_limit_reset_at: None,
            },
            AppError::Upstream(e) => ErrorResponse {
                error: e.to_string(),
                kind: self.kind(),
                upstream_status: e.status(),
                rate_limit_reset: e.rate_limit_reset().map(str::to_string),
                rate_limit_reset_at: e.rate_limit_reset_at().map(|at| at.to_rfc3339()),
            },
        }
    }
}

impl From<MbtaError> for AppError {
    fn from(e: MbtaError) -> Self {
        AppError::Upstream(e)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();

        if status.is_server_error() {
            warn!(%status, kind = body.kind, "{}", body.error);
        } else {
            debug!(%status, kind = body.kind, "{}", body.error);
        }

        (status, Json(body)).into_response()
    }
}
