//! HTTP access to the Star Wars API and response-shape parsing

use crate::domain::{EntityKind, ResourceDetail, ResourceSummary};
use crate::error::{HolonetError, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api/";

/// Source of collection and single-resource data
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch_collection(&self, kind: EntityKind) -> Result<Vec<ResourceSummary>>;

    /// Fetches one resource by the opaque URL a summary carried
    async fn fetch_detail(&self, url: &str) -> Result<ResourceDetail>;
}

/// `ResourceFetcher` backed by plain GET requests
#[derive(Debug, Clone)]
pub struct SwapiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl SwapiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn collection_url(&self, kind: EntityKind) -> Result<Url> {
        self.base_url
            .join(kind.config().collection_path)
            .map_err(|e| HolonetError::ConfigError(format!("Invalid collection URL: {}", e)))
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HolonetError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ResourceFetcher for SwapiClient {
    async fn fetch_collection(&self, kind: EntityKind) -> Result<Vec<ResourceSummary>> {
        let url = self.collection_url(kind)?;
        let body = self.get_json(url.as_str()).await?;
        parse_collection(body)
    }

    async fn fetch_detail(&self, url: &str) -> Result<ResourceDetail> {
        let body = self.get_json(url).await?;
        parse_detail(body)
    }
}

/// Parses and validates a base URL, ensuring a trailing slash so that
/// collection paths join beneath it.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| HolonetError::ConfigError(format!("Invalid base URL '{}': {}", raw, e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(HolonetError::ConfigError(format!(
            "Base URL must use http or https: {}",
            raw
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Extracts the `results` array of a collection response.
///
/// Entries that are not JSON objects are skipped.
pub fn parse_collection(body: Value) -> Result<Vec<ResourceSummary>> {
    let results = match body {
        Value::Object(mut map) => map.remove("results"),
        _ => None,
    };
    match results {
        Some(Value::Array(items)) => {
            let total = items.len();
            let summaries: Vec<ResourceSummary> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(fields) => Some(ResourceSummary::new(fields)),
                    _ => None,
                })
                .collect();
            if summaries.len() < total {
                warn!(skipped = total - summaries.len(), "Skipped non-object collection entries");
            }
            Ok(summaries)
        }
        _ => Err(HolonetError::UnexpectedShape(
            "collection response has no `results` array".to_string(),
        )),
    }
}

/// Extracts `result.properties` from a single-resource response
pub fn parse_detail(body: Value) -> Result<ResourceDetail> {
    let properties = body
        .get("result")
        .and_then(|result| result.get("properties"))
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| {
            HolonetError::UnexpectedShape(
                "detail response has no `result.properties` object".to_string(),
            )
        })?;
    Ok(ResourceDetail::new(properties))
}
