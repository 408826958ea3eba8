//! Square API client
//!
//! Implements `CatalogSource` over the Square REST API. Catalog search is
//! cursor-paginated; pages are concatenated before returning.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::upstream::{CatalogObject, CatalogSource, RawLocation, UpstreamError};

/// API version pinned on every request
const SQUARE_VERSION: &str = "2024-10-17";

// == Square Client ==
#[derive(Clone)]
pub struct SquareClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl SquareClient {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    /// Creates a client for the configured Square environment.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.square_environment.base_url(),
            config.square_access_token.clone(),
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.access_token)
            .header("Square-Version", SQUARE_VERSION)
    }

    async fn search_page(&self, cursor: Option<String>) -> Result<SearchCatalogPage, UpstreamError> {
        let body = SearchCatalogRequest {
            object_types: vec!["ITEM"],
            include_related_objects: true,
            cursor,
        };
        let response = self
            .authorized(self.http.post(format!("{}/v2/catalog/search", self.base_url)))
            .json(&body)
            .send()
            .await?;

        Ok(ensure_success(response).await?.json().await?)
    }
}

#[async_trait]
impl CatalogSource for SquareClient {
    async fn list_locations(&self) -> Result<Vec<RawLocation>, UpstreamError> {
        let response = self
            .authorized(self.http.get(format!("{}/v2/locations", self.base_url)))
            .send()
            .await?;

        let body: ListLocationsResponse = ensure_success(response).await?.json().await?;
        Ok(body.locations.unwrap_or_default())
    }

    async fn fetch_catalog(&self) -> Result<Vec<CatalogObject>, UpstreamError> {
        let mut objects = Vec::new();
        let mut related = Vec::new();
        let mut cursor = None;
        let mut pages = 0usize;

        loop {
            let page = self.search_page(cursor).await?;
            pages += 1;
            objects.extend(page.objects.unwrap_or_default());
            related.extend(page.related_objects.unwrap_or_default());

            cursor = page.cursor.filter(|c| !c.is_empty());
            if cursor.is_none() {
                break;
            }
        }

        debug!(
            "Fetched catalog: {} objects, {} related objects over {} pages",
            objects.len(),
            related.len(),
            pages
        );

        objects.extend(related);
        Ok(CatalogObject::decode_all(objects))
    }
}

impl std::fmt::Debug for SquareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SquareClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

async fn ensure_success(response: Response) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(UpstreamError::Status {
        status: status.as_u16(),
        body,
    })
}

// == Wire Types ==
#[derive(Debug, Serialize)]
struct SearchCatalogRequest {
    object_types: Vec<&'static str>,
    include_related_objects: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchCatalogPage {
    #[serde(default)]
    objects: Option<Vec<Value>>,
    #[serde(default)]
    related_objects: Option<Vec<Value>>,
    #[serde(default)]
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListLocationsResponse {
    #[serde(default)]
    locations: Option<Vec<RawLocation>>,
}
