//! MBTA v3 HTTP client.
//!
//! All query-string construction goes through [`MbtaClient::create_uri`] so
//! every endpoint shares the same serialization: multi-valued filters are
//! comma-joined, route types are sent by GTFS code, absent filters are
//! dropped, and the API key is appended whenever one is configured.

use std::time::Duration;

use reqwest::header::{ACCEPT_ENCODING, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::error::MbtaError;
use super::types::{JsonApiDocument, Route, RouteType, Stop};

/// Default base URL for the MBTA v3 API.
pub const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// JSON:API media type sent as the request content type.
const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Query parameter carrying the API key.
const API_KEY_PARAM: &str = "api_key";

/// Query parameters in insertion order. `None` values are skipped.
pub type QueryParams<'a> = Vec<(&'a str, Option<String>)>;

/// Configuration for the MBTA client.
#[derive(Debug, Clone)]
pub struct MbtaConfig {
    /// API key; requests are sent without one when `None`
    pub api_key: Option<String>,
    /// Base URL for the API (defaults to production MBTA)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for MbtaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl MbtaConfig {
    /// Create a config for the production API with no key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key. An empty key counts as no key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = (!key.is_empty()).then_some(key);
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// A value that can be placed in an MBTA filter parameter.
pub trait QueryValue {
    fn query_value(&self) -> String;
}

impl QueryValue for RouteType {
    fn query_value(&self) -> String {
        self.code().to_string()
    }
}

impl QueryValue for str {
    fn query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for String {
    fn query_value(&self) -> String {
        self.clone()
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn query_value(&self) -> String {
        (**self).query_value()
    }
}

/// Join filter values with `delim`, or `None` when there are none.
pub fn join<T: QueryValue>(items: &[T], delim: &str) -> Option<String> {
    if items.is_empty() {
        return None;
    }

    let parts: Vec<String> = items.iter().map(QueryValue::query_value).collect();
    Some(parts.join(delim))
}

/// MBTA v3 API client.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl MbtaClient {
    /// Create a new MBTA client with the given configuration.
    pub fn new(config: MbtaConfig) -> Result<Self, MbtaError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_API_MEDIA_TYPE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: Url::parse(&config.base_url)?,
            api_key: config.api_key.filter(|k| !k.is_empty()),
        })
    }

    /// `GET /routes`, optionally filtered by route type.
    pub async fn list_routes(&self, types: &[RouteType]) -> Result<Vec<Route>, MbtaError> {
        let params = vec![("type", join(types, ","))];

        let document: JsonApiDocument<Route> =
            self.make_request(Method::GET, "routes", params).await?;

        Ok(document.data)
    }

    /// `GET /stops`, optionally filtered by route id.
    pub async fn list_stops<S: AsRef<str>>(
        &self,
        route_ids: &[S],
    ) -> Result<Vec<Stop>, MbtaError> {
        let ids: Vec<&str> = route_ids.iter().map(AsRef::as_ref).collect();
        let params = vec![("route", join(&ids, ","))];

        let document: JsonApiDocument<Stop> =
            self.make_request(Method::GET, "stops", params).await?;

        Ok(document.data)
    }

    /// Build the full URI for `resource`.
    ///
    /// The resource is resolved against the base URL with standard URL-join
    /// rules. Parameters without a value are dropped; when nothing remains
    /// the URI carries no query string at all.
    pub fn create_uri(&self, resource: &str, params: &QueryParams<'_>) -> Result<Url, MbtaError> {
        let mut uri = self.base_url.join(resource)?;

        let mut pairs: Vec<(&str, &str)> = params
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (*key, v)))
            .collect();
        if let Some(key) = &self.api_key {
            pairs.push((API_KEY_PARAM, key.as_str()));
        }

        if !pairs.is_empty() {
            uri.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(uri)
    }

    /// Send a request and decode its JSON body.
    ///
    /// Non-success responses are classified into [`MbtaError`] and never
    /// decoded.
    #[instrument(skip(self, params))]
    async fn make_request<T: DeserializeOwned>(
        &self,
        method: Method,
        resource: &str,
        params: QueryParams<'_>,
    ) -> Result<T, MbtaError> {
        let uri = self.create_uri(resource, &params)?;
        debug!(method = method.as_str(), uri = %redact(&uri), "calling MBTA");

        let response = self.http.request(method, uri).send().await?;
        let status = response.status();

        if !status.is_success() {
            let err = MbtaError::from_response_parts(status, response.headers());
            debug!(status = status.as_u16(), error = %err, "MBTA request failed");
            return Err(err);
        }

        let headers = response.headers().clone();
        let body = response.text().await?;
        debug!(
            status = status.as_u16(),
            headers = ?headers,
            body = %truncate(&body),
            "MBTA response"
        );

        decode(status, &body)
    }
}

fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, MbtaError> {
    serde_json::from_str(body).map_err(|e| MbtaError::Json {
        message: format!("{e} (status {})", status.as_u16()),
        body: Some(truncate(body)),
    })
}

/// First 500 characters of a response body.
fn truncate(body: &str) -> String {
    body.chars().take(500).collect()
}

/// URI with the API key hidden, for logging.
fn redact(uri: &Url) -> Url {
    let mut redacted = uri.clone();
    let pairs: Vec<(String, String)> = uri
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == API_KEY_PARAM { "***".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();

    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted
}
