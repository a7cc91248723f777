//! Registry of feature modules and the routers they contribute.
//!
//! Every feature module that serves HTTP endpoints exposes a `get_routers`
//! function. The modules are listed in [`MODULES`]; at startup
//! [`combine_routers`] calls each factory and flattens the results into the
//! sequence of routers mounted under the API prefix.

use axum::Router;
use tracing::debug;

use crate::web::AppState;

/// A router-producing factory.
pub type RouterFactory = fn() -> Routers;

/// The routers contributed by one module: a single router or several.
pub enum Routers {
    One(Router<AppState>),
    Many(Vec<Router<AppState>>),
}

impl Routers {
    pub fn into_vec(self) -> Vec<Router<AppState>> {
        match self {
            Routers::One(router) => vec![router],
            Routers::Many(routers) => routers,
        }
    }
}

impl From<Router<AppState>> for Routers {
    fn from(router: Router<AppState>) -> Self {
        Routers::One(router)
    }
}

impl From<Vec<Router<AppState>>> for Routers {
    fn from(routers: Vec<Router<AppState>>) -> Self {
        Routers::Many(routers)
    }
}

/// A feature module of the application.
#[derive(Debug, Clone, Copy)]
pub struct ApiModule {
    pub name: &'static str,
    pub get_routers: Option<RouterFactory>,
}

impl ApiModule {
    pub const fn new(name: &'static str, get_routers: RouterFactory) -> Self {
        Self {
            name,
            get_routers: Some(get_routers),
        }
    }

    /// A module that serves no endpoints.
    pub const fn without_routers(name: &'static str) -> Self {
        Self {
            name,
            get_routers: None,
        }
    }
}

/// Every module in the application.
pub const MODULES: &[ApiModule] = &[
    ApiModule::new("lines", crate::lines::get_routers),
    ApiModule::without_routers("mbta"),
    ApiModule::new("stops", crate::stops::get_routers),
];

/// Modules sorted by name. The sort is stable, so equal names keep their
/// listed order.
pub fn ordered(modules: &[ApiModule]) -> Vec<&ApiModule> {
    let mut ordered: Vec<&ApiModule> = modules.iter().collect();
    ordered.sort_by_key(|m| m.name);
    ordered
}

/// Collect the routers of `modules` into one flat sequence.
///
/// Modules are visited in name order so the result does not depend on how
/// the list was written. Modules without a factory are skipped.
pub fn combine_routers(modules: &[ApiModule]) -> Vec<Router<AppState>> {
    let mut result = Vec::new();
    for module in ordered(modules) {
        let Some(get_routers) = module.get_routers else {
            debug!(module = module.name, "module exposes no routers, skipping");
            continue;
        };

        let routers = get_routers().into_vec();
        debug!(module = module.name, count = routers.len(), "collected routers");
        result.extend(routers);
    }

    result
}

#[cfg(test)]
mod tests {
    use axum::routing::get;

    use super::*;

    fn single() -> Routers {
        Routers::from(Router::<AppState>::new().route("/a", get(|| async { "a" })))
    }

    fn pair() -> Routers {
        Routers::Many(vec![
            Router::new().route("/b", get(|| async { "b" })),
            Router::new().route("/c", get(|| async { "c" })),
        ])
    }

    fn empty() -> Routers {
        Routers::Many(Vec::new())
    }

    #[test]
    fn visits_modules_in_name_order() {
        let modules = [
            ApiModule::new("stops", single),
            ApiModule::without_routers("mbta"),
            ApiModule::new("lines", pair),
        ];
        let names: Vec<&str> = ordered(&modules).iter().map(|m| m.name).collect();
        assert_eq!(names, ["lines", "mbta", "stops"]);
    }

    #[test]
    fn flattens_single_and_multiple() {
        let modules = [ApiModule::new("one", single), ApiModule::new("two", pair)];
        assert_eq!(combine_routers(&modules).len(), 3);
    }

    #[test]
    fn skips_modules_without_factory() {
        let modules = [
            ApiModule::without_routers("core"),
            ApiModule::new("one", single),
            ApiModule::without_routers("zzz"),
        ];
        assert_eq!(combine_routers(&modules).len(), 1);
    }

    #[test]
    fn empty_factory_contributes_nothing() {
        let modules = [ApiModule::new("empty", empty)];
        assert!(combine_routers(&modules).is_empty());
        assert!(combine_routers(&[]).is_empty());
    }

    #[test]
    fn registry_contains_endpoint_modules() {
        let names: Vec<&str> = MODULES.iter().map(|m| m.name).collect();
        assert!(names.contains(&"lines"));
        assert!(names.contains(&"stops"));
        assert_eq!(combine_routers(MODULES).len(), 2);
    }

    #[test]
    fn registry_names_are_unique() {
        let mut names: Vec<&str> = MODULES.iter().map(|m| m.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MODULES.len());
    }
}
