//! Web layer: shared state, the assembled router, and HTTP error mapping.

mod error;
mod routes;
mod state;

pub use error::{AppError, ErrorResponse};
pub use routes::{API_PREFIX, create_router};
pub use state::AppState;
