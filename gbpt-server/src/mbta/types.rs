//! MBTA v3 API response types.
//!
//! The API speaks JSON:API: every list endpoint wraps its resources in a
//! top-level `data` array. Only the fields this service reads are required;
//! the rest of each resource is kept as optional metadata.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A JSON:API document. Only `data` is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonApiDocument<T> {
    pub data: Vec<T>,
}

/// A route (transit line) resource from `GET /routes`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Route {
    pub id: String,
    pub attributes: RouteAttributes,
    #[serde(default)]
    pub links: Option<serde_json::Value>,
    #[serde(default)]
    pub relationships: Option<serde_json::Value>,
}

/// Attributes of a [`Route`].
///
/// Metadata the service does not surface is read leniently: a value of an
/// unexpected type becomes `None` instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteAttributes {
    /// Human-readable name, e.g. "Red Line"
    pub long_name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub short_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text_color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub direction_names: Option<Vec<Option<String>>>,
    #[serde(default, deserialize_with = "lenient")]
    pub direction_destinations: Option<Vec<Option<String>>>,
    #[serde(default, deserialize_with = "lenient")]
    pub fare_class: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sort_order: Option<i64>,
    /// GTFS route type code (see [`RouteType::code`])
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub route_type: Option<u8>,
}

/// A stop resource from `GET /stops`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stop {
    pub id: String,
    #[serde(default)]
    pub attributes: Option<StopAttributes>,
    #[serde(default)]
    pub links: Option<serde_json::Value>,
    #[serde(default)]
    pub relationships: Option<serde_json::Value>,
}

/// Attributes of a [`Stop`]. Read leniently, like [`RouteAttributes`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StopAttributes {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub at_street: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub on_street: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub municipality: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub longitude: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub location_type: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub platform_code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub platform_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub vehicle_type: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub wheelchair_boarding: Option<i64>,
}

/// Deserialize an optional field, mapping a type mismatch to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Route categories accepted as a filter.
///
/// Serialized by name (`heavy_rail`) on the inbound API and by GTFS code
/// on the upstream query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    /// Subway or metro: any underground rail system within a metropolitan area.
    HeavyRail,
}

/// Name and GTFS code for every [`RouteType`].
const ROUTE_TYPES: &[(RouteType, &str, u8)] = &[(RouteType::HeavyRail, "heavy_rail", 1)];

impl RouteType {
    /// All known route types.
    pub fn all() -> impl Iterator<Item = RouteType> {
        ROUTE_TYPES.iter().map(|(t, _, _)| *t)
    }

    /// GTFS numeric code used by the upstream API.
    pub fn code(self) -> u8 {
        ROUTE_TYPES
            .iter()
            .find(|(t, _, _)| *t == self)
            .map(|(_, _, code)| *code)
            .unwrap_or_default()
    }

    /// Look up a route type by its GTFS code.
    pub fn from_code(code: u8) -> Option<Self> {
        ROUTE_TYPES
            .iter()
            .find(|(_, _, c)| *c == code)
            .map(|(t, _, _)| *t)
    }

    /// Inbound filter name, e.g. `heavy_rail`.
    pub fn as_str(self) -> &'static str {
        ROUTE_TYPES
            .iter()
            .find(|(t, _, _)| *t == self)
            .map(|(_, name, _)| *name)
            .unwrap_or_default()
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown route type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route type: {0}")]
pub struct UnknownRouteType(pub String);

impl FromStr for RouteType {
    type Err = UnknownRouteType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ROUTE_TYPES
            .iter()
            .find(|(_, name, _)| *name == s)
            .map(|(t, _, _)| *t)
            .ok_or_else(|| UnknownRouteType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_LINE: &str = r#"{
        "attributes": {
            "color": "DA291C",
            "description": "Rapid Transit",
            "direction_destinations": ["Ashmont/Braintree", "Alewife"],
            "direction_names": ["South", "North"],
            "fare_class": "Rapid Transit",
            "long_name": "Red Line",
            "short_name": "",
            "sort_order": 10010,
            "text_color": "FFFFFF",
            "type": 1
        },
        "id": "Red",
        "links": {"self": "/routes/Red"},
        "relationships": {"line": {"data": {"id": "line-Red", "type": "line"}}},
        "type": "route"
    }"#;

    const CHINATOWN_NODE: &str = r#"{
        "attributes": {
            "address": null,
            "at_street": null,
            "description": "Chinatown - Bottom of stairs between landing and lobby",
            "latitude": null,
            "location_type": 3,
            "longitude": null,
            "municipality": "Boston",
            "name": "Chinatown",
            "on_street": null,
            "platform_code": null,
            "platform_name": null,
            "vehicle_type": null,
            "wheelchair_boarding": 1
        },
        "id": "node-chncl-fhlower-lobby",
        "links": {"self": "/stops/node-chncl-fhlower-lobby"},
        "relationships": {"parent_station": {"data": {"id": "place-chncl", "type": "stop"}}},
        "type": "stop"
    }"#;

    #[test]
    fn parse_full_route() {
        let route: Route = serde_json::from_str(RED_LINE).unwrap();
        assert_eq!(route.id, "Red");
        assert_eq!(route.attributes.long_name, "Red Line");
        assert_eq!(route.attributes.route_type, Some(1));
        assert_eq!(route.attributes.sort_order, Some(10010));
        assert_eq!(
            route.attributes.direction_names,
            Some(vec![Some("South".into()), Some("North".into())])
        );
    }

    #[test]
    fn parse_minimal_route() {
        let route: Route =
            serde_json::from_str(r#"{"id": "Red", "attributes": {"long_name": "Red Line"}}"#)
                .unwrap();
        assert_eq!(route.attributes.long_name, "Red Line");
        assert_eq!(route.attributes.color, None);
        assert_eq!(route.links, None);
    }

    #[test]
    fn route_without_long_name_is_rejected() {
        let result: Result<Route, _> =
            serde_json::from_str(r#"{"id": "Red", "attributes": {"color": "DA291C"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn parse_stop_with_nulls() {
        let stop: Stop = serde_json::from_str(CHINATOWN_NODE).unwrap();
        assert_eq!(stop.id, "node-chncl-fhlower-lobby");
        let attrs = stop.attributes.unwrap();
        assert_eq!(attrs.name.as_deref(), Some("Chinatown"));
        assert_eq!(attrs.latitude, None);
        assert_eq!(attrs.location_type, Some(3));
    }

    #[test]
    fn mistyped_route_metadata_is_dropped() {
        let route: Route = serde_json::from_str(
            r#"{"id": "Red", "attributes": {
                "long_name": "Red Line",
                "sort_order": "first",
                "type": "subway",
                "color": 12,
                "direction_names": "South"
            }}"#,
        )
        .unwrap();
        assert_eq!(route.attributes.long_name, "Red Line");
        assert_eq!(route.attributes.sort_order, None);
        assert_eq!(route.attributes.route_type, None);
        assert_eq!(route.attributes.color, None);
        assert_eq!(route.attributes.direction_names, None);
    }

    #[test]
    fn mistyped_stop_metadata_is_dropped() {
        let stop: Stop = serde_json::from_str(
            r#"{"id": "place-alfcl", "attributes": {
                "name": "Alewife",
                "latitude": "42.39",
                "wheelchair_boarding": true
            }}"#,
        )
        .unwrap();
        let attrs = stop.attributes.unwrap();
        assert_eq!(attrs.name.as_deref(), Some("Alewife"));
        assert_eq!(attrs.latitude, None);
        assert_eq!(attrs.wheelchair_boarding, None);
    }

    #[test]
    fn parse_bare_stop() {
        let stop: Stop = serde_json::from_str(r#"{"id": "place-alfcl"}"#).unwrap();
        assert_eq!(stop.id, "place-alfcl");
        assert!(stop.attributes.is_none());
    }

    #[test]
    fn document_ignores_other_members() {
        let doc: JsonApiDocument<Stop> =
            serde_json::from_str(r#"{"data": [], "jsonapi": {"version": "1.0"}}"#).unwrap();
        assert!(doc.data.is_empty());
    }

    #[test]
    fn route_type_codes() {
        assert_eq!(RouteType::HeavyRail.code(), 1);
        assert_eq!(RouteType::from_code(1), Some(RouteType::HeavyRail));
        assert_eq!(RouteType::from_code(3), None);
        for t in RouteType::all() {
            assert_eq!(RouteType::from_code(t.code()), Some(t));
            assert_eq!(t.as_str().parse::<RouteType>(), Ok(t));
        }
    }

    #[test]
    fn route_type_names() {
        assert_eq!("heavy_rail".parse(), Ok(RouteType::HeavyRail));
        assert_eq!(
            "HEAVY_RAIL".parse::<RouteType>(),
            Err(UnknownRouteType("HEAVY_RAIL".into()))
        );
        assert_eq!(RouteType::HeavyRail.to_string(), "heavy_rail");

        let t: RouteType = serde_json::from_str(r#""heavy_rail""#).unwrap();
        assert_eq!(t, RouteType::HeavyRail);
        assert!(serde_json::from_str::<RouteType>(r#""light_rail""#).is_err());
    }
}
