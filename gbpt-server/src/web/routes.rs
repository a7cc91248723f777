//! Application router.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::modules::{MODULES, combine_routers};

use super::state::AppState;

/// Prefix every module endpoint is mounted under.
pub const API_PREFIX: &str = "/v1";

/// Create the application router.
///
/// Mounts the routers of every registered module under [`API_PREFIX`].
pub fn create_router(state: AppState) -> Router {
    let api = combine_routers(MODULES)
        .into_iter()
        .fold(Router::<AppState>::new(), |api, router| api.merge(router));

    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}
