// API client module: a small blocking HTTP client that reads the facility
// occupancy API. Two read-only endpoints are used: the operator's location
// list and the current reading for one location.

use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Failure reaching the API or making sense of what it returned.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure (DNS, connect, TLS, reading the body).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// The response body was not the JSON we asked for.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("API returned HTML instead of JSON. Check if the URL is correct.")]
    Html,
    #[error("invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),
}

/// A physical facility. Extra fields in the payload are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: String,
    pub name: String,
}

/// Snapshot of how busy a location is right now.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyReading {
    #[serde(default, deserialize_with = "count_or_zero")]
    pub current: u32,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub percentage_used: f64,
}

/// `null` reads as 0, and a whole-number float such as `40.0` is a count.
fn count_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = match Option::<f64>::deserialize(deserializer)? {
        Some(value) => value,
        None => return Ok(0),
    };
    if value.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
        return Err(D::Error::custom(format!(
            "invalid visitor count {value}, expected a whole number >= 0"
        )));
    }
    Ok(value as u32)
}

fn number_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Anything that can produce a fresh occupancy reading. The monitor loop
/// talks to this instead of the concrete client.
pub trait OccupancySource {
    fn fetch_occupancy(&self, location_id: &str) -> Result<OccupancyReading, ApiError>;
}

/// Blocking client bound to one API host and one operator.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    operator_id: String,
}

impl ApiClient {
    /// Build a client for `base_url`. A trailing slash is dropped so paths
    /// can be appended verbatim.
    pub fn new(base_url: &str, operator_id: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder().default_headers(headers).build()?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            operator_id: operator_id.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the location listing for the configured operator.
    pub fn locations_url(&self) -> String {
        format!(
            "{}/api/v1/locations?operator={}",
            self.base_url, self.operator_id
        )
    }

    /// List every location of the operator, in API order.
    pub fn fetch_locations(&self) -> Result<Vec<Location>, ApiError> {
        self.get_json(&self.locations_url())
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("GET {}", url);
        let res = self.client.get(url).send()?;
        let status = res.status();
        if !status.is_success() {
            warn!("GET {} returned {}", url, status);
        }
        let body = res.text()?;
        Ok(parse_body(&body)?)
    }
}

impl OccupancySource for ApiClient {
    fn fetch_occupancy(&self, location_id: &str) -> Result<OccupancyReading, ApiError> {
        let url = format!("{}/api/v1/locations/{}/current", self.base_url, location_id);
        self.get_json(&url)
    }
}

/// Decode a response body, refusing HTML error pages before JSON is tried.
pub fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, FormatError> {
    let trimmed = body.trim();
    if trimmed.starts_with("<!DOCTYPE") || trimmed.starts_with("<html") {
        return Err(FormatError::Html);
    }
    Ok(serde_json::from_str(trimmed)?)
}
