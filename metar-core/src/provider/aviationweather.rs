use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{Metar, Taf},
    station::{self, StationCode},
};

use super::ReportSource;

pub const DEFAULT_BASE_URL: &str = "https://aviationweather.gov";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Product {
    Metar,
    Taf,
}

impl Product {
    fn path(self) -> &'static str {
        match self {
            Product::Metar => "metar",
            Product::Taf => "taf",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Product::Metar => "METAR",
            Product::Taf => "TAF",
        }
    }
}

/// Client for the aviationweather.gov data API.
#[derive(Debug, Clone)]
pub struct AviationWeatherProvider {
    base_url: String,
    http: Client,
}

impl AviationWeatherProvider {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    fn endpoint(&self, product: Product) -> String {
        format!("{}/api/data/{}", self.base_url, product.path())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        product: Product,
        stations: &[StationCode],
    ) -> Result<Vec<T>, FetchError> {
        if stations.is_empty() {
            return Err(FetchError::NoStations);
        }

        let url = self.endpoint(product);
        let ids = station::join(stations);
        debug!(%url, %ids, "requesting {}", product.label());

        let res = self
            .http
            .get(&url)
            .query(&[("ids", ids.as_str()), ("format", "json")])
            .send()
            .await
            .map_err(|source| FetchError::Transport { kind: product.label(), source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Transport { kind: product.label(), source })?;

        debug!(%status, bytes = body.len(), "received {} response", product.label());

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        parse_reports(product, &body, stations)
    }
}

#[async_trait]
impl ReportSource for AviationWeatherProvider {
    async fn metars(&self, stations: &[StationCode]) -> Result<Vec<Metar>, FetchError> {
        self.fetch(Product::Metar, stations).await
    }

    async fn tafs(&self, stations: &[StationCode]) -> Result<Vec<Taf>, FetchError> {
        self.fetch(Product::Taf, stations).await
    }
}

/// Decode a JSON array of reports. The API answers unknown stations with an
/// empty body (204) or `[]`; both count as "not found".
fn parse_reports<T: DeserializeOwned>(
    product: Product,
    body: &str,
    stations: &[StationCode],
) -> Result<Vec<T>, FetchError> {
    let reports: Vec<T> = if body.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(body)
            .map_err(|source| FetchError::Parse { kind: product.label(), source })?
    };

    if reports.is_empty() {
        let stations = match stations {
            [single] => single.to_string(),
            _ => "the requested airports".to_string(),
        };
        return Err(FetchError::NotFound { kind: product.label(), stations });
    }

    Ok(reports)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
