//! `GET /lines` handler.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::mbta::{Route, RouteType};
use crate::web::{AppError, AppState};

/// Query string for `GET /lines`.
#[derive(Debug, Default, Deserialize)]
pub struct LinesQuery {
    /// Restrict to one route type, e.g. `heavy_rail`
    #[serde(rename = "type")]
    pub route_type: Option<RouteType>,
}

/// A line in the `GET /lines` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub id: String,
    pub name: String,
}

impl Line {
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id.clone(),
            name: route.attributes.long_name.clone(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/lines", get(list_lines))
}

/// List lines, preserving upstream order.
async fn list_lines(
    State(state): State<AppState>,
    query: Result<Query<LinesQuery>, QueryRejection>,
) -> Result<Json<Vec<Line>>, AppError> {
    let Query(query) = query?;

    let types: Vec<RouteType> = query.route_type.into_iter().collect();
    let routes = state.mbta.list_routes(&types).await?;

    Ok(Json(routes.iter().map(Line::from_route).collect()))
}
