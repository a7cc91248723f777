//! MBTA client error types.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::HeaderMap;

/// Response header carrying the epoch second at which the rate limit resets.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Errors from the MBTA HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum MbtaError {
    /// API returned a non-success status code other than 429
    #[error("{status} - {reason}")]
    Api { status: u16, reason: String },

    /// API returned 429 Too Many Requests
    #[error("MBTA rate limit exceeded. Resets at: {}.", .reset.as_deref().unwrap_or("unknown"))]
    RateLimitExceeded {
        status: u16,
        reason: String,
        /// Raw `x-ratelimit-reset` header value, if sent
        reset: Option<String>,
    },

    /// HTTP request failed (network error, timeout, etc.)
    ///
    /// Carries no request URL, since the URL holds the API key.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Response body was not the expected JSON:API document
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Request URI could not be built
    #[error("invalid request URI: {0}")]
    InvalidUri(#[from] url::ParseError),
}

/// Discriminant of [`MbtaError`], exposed to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MbtaErrorKind {
    ApiError,
    RateLimitExceeded,
    Transport,
    Decode,
    InvalidUri,
}

impl MbtaErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MbtaErrorKind::ApiError => "api_error",
            MbtaErrorKind::RateLimitExceeded => "rate_limit_exceeded",
            MbtaErrorKind::Transport => "transport",
            MbtaErrorKind::Decode => "decode",
            MbtaErrorKind::InvalidUri => "invalid_uri",
        }
    }
}

impl From<reqwest::Error> for MbtaError {
    fn from(e: reqwest::Error) -> Self {
        MbtaError::Http(e.without_url())
    }
}

impl MbtaError {
    /// Classify a failed response by its status and headers.
    ///
    /// 429 becomes [`MbtaError::RateLimitExceeded`]; every other status
    /// becomes [`MbtaError::Api`]. The reason is the registered phrase for
    /// the status code, not the phrase the upstream sent, so unregistered
    /// codes read "Unknown".
    pub fn from_response_parts(status: StatusCode, headers: &HeaderMap) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown").to_string();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let reset = headers
                .get(RATE_LIMIT_RESET_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            return MbtaError::RateLimitExceeded {
                status: status.as_u16(),
                reason,
                reset,
            };
        }

        MbtaError::Api {
            status: status.as_u16(),
            reason,
        }
    }

    pub fn kind(&self) -> MbtaErrorKind {
        match self {
            MbtaError::Api { .. } => MbtaErrorKind::ApiError,
            MbtaError::RateLimitExceeded { .. } => MbtaErrorKind::RateLimitExceeded,
            MbtaError::Http(_) => MbtaErrorKind::Transport,
            MbtaError::Json { .. } => MbtaErrorKind::Decode,
            MbtaError::InvalidUri(_) => MbtaErrorKind::InvalidUri,
        }
    }

    /// Upstream status code, for errors that came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            MbtaError::Api { status, .. } | MbtaError::RateLimitExceeded { status, .. } => {
                Some(*status)
            }
            MbtaError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw rate limit reset value, if this is a rate limit error.
    pub fn rate_limit_reset(&self) -> Option<&str> {
        match self {
            MbtaError::RateLimitExceeded { reset, .. } => reset.as_deref(),
            _ => None,
        }
    }

    /// Rate limit reset as a timestamp, when the header holds epoch seconds.
    pub fn rate_limit_reset_at(&self) -> Option<DateTime<Utc>> {
        let secs = self.rate_limit_reset()?.trim().parse::<i64>().ok()?;
        DateTime::from_timestamp(secs, 0)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, MbtaError::Http(e) if e.is_timeout())
    }
}
