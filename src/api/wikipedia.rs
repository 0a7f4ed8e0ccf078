use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, header};
use serde::Deserialize;

use crate::api::{LookupError, PageSummary, SummarySource};
use crate::config::AppConfig;

/// Client for the Wikipedia REST page summary endpoint.
#[derive(Clone)]
pub struct WikipediaClient {
    http: Client,
    base_url: String,
}

impl WikipediaClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent())
            .timeout(config.http_timeout())
            .build()
            .context("unable to create HTTP client for Wikipedia")?;

        Ok(Self {
            http,
            base_url: config.wikipedia_url().to_string(),
        })
    }

    pub fn summary_url(&self, title: &str) -> String {
        format!("{}/page/summary/{}", self.base_url, urlencoding::encode(title))
    }

    pub async fn page_summary(&self, title: &str) -> Result<PageSummary, LookupError> {
        let response = self.http.get(self.summary_url(title)).send().await?;
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body: SummaryResponse = response
            .json()
            .await
            .map_err(|err| LookupError::Parse(err.to_string()))?;

        Ok(body.into())
    }
}

#[async_trait]
impl SummarySource for WikipediaClient {
    async fn page_summary(&self, title: &str) -> Result<PageSummary, LookupError> {
        WikipediaClient::page_summary(self, title).await
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SummaryResponse {
    thumbnail: Option<Thumbnail>,
    extract: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Thumbnail {
    source: Option<String>,
}

impl From<SummaryResponse> for PageSummary {
    fn from(response: SummaryResponse) -> Self {
        Self {
            thumbnail: response
                .thumbnail
                .and_then(|thumb| thumb.source)
                .filter(|source| !source.trim().is_empty()),
            extract: response
                .extract
                .filter(|extract| !extract.trim().is_empty()),
        }
    }
}
