use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Request, Response};
use serde_json::Value;

use super::{parse_block_response, parse_count_table, BlockLocator, StatsSource};
use crate::{error::LookupError, geodesy::Coordinate, types::{BlockId, BlockParts, GeoType}};

const USER_AGENT: &str = concat!("censusradius/", env!("CARGO_PKG_VERSION"));

/// FCC Area API: point -> census block.
pub const GEOCODER_URL: &str = "https://geo.fcc.gov/api/census/block/find";

/// 2020 decennial redistricting (PL 94-171) dataset.
pub const STATS_URL: &str = "https://api.census.gov/data/2020/dec/pl";

/// Blocking client for the geocoding and statistics services.
#[derive(Debug, Clone)]
pub struct CensusClient {
    http: Client,
    geocoder_url: String,
    stats_url: String,
}

impl CensusClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self { http, geocoder_url: GEOCODER_URL.into(), stats_url: STATS_URL.into() })
    }

    /// Point the client at other endpoints (mirrors, another dataset year).
    pub fn with_endpoints(mut self, geocoder_url: impl Into<String>, stats_url: impl Into<String>) -> Self {
        self.geocoder_url = geocoder_url.into();
        self.stats_url = stats_url.into();
        self
    }

    /// Geocoding request for `point`, built but not sent.
    pub(crate) fn locate_request(&self, point: Coordinate) -> reqwest::Result<Request> {
        let params = [
            ("latitude", point.lat.to_string()),
            ("longitude", point.lon.to_string()),
            ("format", "json".to_string()),
        ];
        self.http.get(&self.geocoder_url).query(&params).build()
    }

    /// Statistics request for one block, built but not sent. `key` is attached only when given.
    pub(crate) fn stats_request(&self, block: &BlockParts<'_>, attribute: &str, api_key: Option<&str>) -> reqwest::Result<Request> {
        let within = [GeoType::State, GeoType::County, GeoType::Tract]
            .map(|ty| format!("{}:{}", ty.to_str(), block.get(ty)))
            .join(" ");

        let mut params = vec![
            ("get", attribute.to_string()),
            ("for", format!("{}:{}", GeoType::Block.to_str(), block.block)),
            ("in", within),
        ];
        if let Some(key) = api_key { params.push(("key", key.to_string())) }

        self.http.get(&self.stats_url).query(&params).build()
    }

    /// Send `request` and decode the JSON body, classifying failures.
    fn execute_json(&self, request: reqwest::Result<Request>) -> Result<Value, LookupError> {
        let request = request.map_err(|e| LookupError::Network(format!("build request: {e}")))?;
        let resp = self.http.execute(request)
            .map_err(|e| LookupError::Network(e.to_string()))?;
        json_body(resp)
    }

    /// Call a Census API `endpoint` with arbitrary query `params`, attaching `key` when given.
    /// e.g. `client.call_api(STATS_URL, &[("get", "NAME"), ("for", "state:*")], None)`
    pub fn call_api(&self, endpoint: &str, params: &[(&str, &str)], api_key: Option<&str>) -> Result<Value> {
        let mut query: Vec<(&str, &str)> = params.to_vec();
        if let Some(key) = api_key { query.push(("key", key)) }

        let resp = self.http.get(endpoint).query(&query).send()
            .with_context(|| format!("GET {endpoint}"))?
            .error_for_status()
            .with_context(|| format!("GET {endpoint} returned error status"))?;

        resp.json().with_context(|| format!("decode JSON from {endpoint}"))
    }
}

/// Map a response onto its JSON body, or a status/parse error.
fn json_body(resp: Response) -> Result<Value, LookupError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(LookupError::Status { status: status.as_u16(), url: resp.url().to_string() });
    }
    let text = resp.text().map_err(|e| LookupError::Network(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| LookupError::Parse(format!("invalid JSON: {e}")))
}

impl BlockLocator for CensusClient {
    fn locate(&self, point: Coordinate) -> Result<BlockId, LookupError> {
        parse_block_response(&self.execute_json(self.locate_request(point))?)
    }
}

impl StatsSource for CensusClient {
    fn query_attribute(&self, block: &BlockParts<'_>, attribute: &str, api_key: Option<&str>) -> Result<u64, LookupError> {
        parse_count_table(&self.execute_json(self.stats_request(block, attribute, api_key))?)
    }
}
