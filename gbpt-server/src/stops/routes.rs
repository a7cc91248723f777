//! `GET /stops` handler.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::mbta::Stop;
use crate::web::{AppError, AppState};

/// Query string for `GET /stops`.
#[derive(Debug, Default, Deserialize)]
pub struct StopsQuery {
    /// Route id to filter by, e.g. `Red`
    pub line: Option<String>,
}

/// A stop in the `GET /stops` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopSummary {
    pub id: String,
}

impl StopSummary {
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            id: stop.id.clone(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/stops", get(list_stops))
}

/// List stops, preserving upstream order. An empty `line` is ignored.
async fn list_stops(
    State(state): State<AppState>,
    query: Result<Query<StopsQuery>, QueryRejection>,
) -> Result<Json<Vec<StopSummary>>, AppError> {
    let Query(query) = query?;

    let lines: Vec<String> = query.line.into_iter().filter(|l| !l.is_empty()).collect();
    let stops = state.mbta.list_stops(&lines).await?;

    Ok(Json(stops.iter().map(StopSummary::from_stop).collect()))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn summary_keeps_only_id() {
        let stop: Stop = serde_json::from_value(serde_json::json!({
            "id": "place-alfcl",
            "attributes": {"name": "Alewife", "latitude": 42.395428, "longitude": -71.142483},
            "type": "stop"
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(StopSummary::from_stop(&stop)).unwrap(),
            serde_json::json!({"id": "place-alfcl"})
        );
    }

    proptest! {
        #[test]
        fn reshaping_preserves_order(ids in prop::collection::vec("[a-z0-9-]{1,20}", 0..16)) {
            let stops: Vec<Stop> = ids
                .iter()
                .map(|id| Stop {
                    id: id.clone(),
                    attributes: None,
                    links: None,
                    relationships: None,
                })
                .collect();

            let summaries: Vec<String> = stops
                .iter()
                .map(StopSummary::from_stop)
                .map(|s| s.id)
                .collect();

            prop_assert_eq!(summaries, ids);
        }
    }
}
