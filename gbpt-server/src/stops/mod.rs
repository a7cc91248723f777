//! `/stops`: stops, optionally filtered by line.

mod routes;

pub use routes::{StopSummary, StopsQuery, router};

use crate::modules::Routers;

/// Routers exposed by this module.
pub fn get_routers() -> Routers {
    router().into()
}
