//! `/lines`: transit lines, optionally filtered by route type.

mod routes;

pub use routes::{Line, LinesQuery, router};

use crate::modules::Routers;

/// Routers exposed by this module.
pub fn get_routers() -> Routers {
    router().into()
}
