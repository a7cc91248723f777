//! MBTA v3 API client.
//!
//! This module is the single point of contact with the upstream
//! [MBTA v3 API](https://api-v3.mbta.com/docs/swagger/index.html).
//!
//! Key characteristics of the upstream:
//! - Responses are JSON:API documents; only the top-level `data` is used
//! - Route types are filtered by GTFS code (`1` for heavy rail)
//! - Rate limiting is signalled with a 429 and an `x-ratelimit-reset`
//!   header holding the reset time in epoch seconds

mod client;
mod error;
mod types;

pub use client::{DEFAULT_BASE_URL, MbtaClient, MbtaConfig, QueryParams, QueryValue, join};
pub use error::{MbtaError, MbtaErrorKind, RATE_LIMIT_RESET_HEADER};
pub use types::{
    JsonApiDocument, Route, RouteAttributes, RouteType, Stop, StopAttributes, UnknownRouteType,
};
