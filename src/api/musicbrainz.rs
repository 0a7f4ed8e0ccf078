use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode, Url, header};
use serde::Deserialize;
use thiserror::Error;

use crate::api::query::build_filter_query;
use crate::api::{LookupError, PrimarySource, RelationSource, SearchRequest};
use crate::config::AppConfig;
use crate::models::{BandRecord, BandStatus, RelationLink};

const TERM_SEARCH_LIMIT: &str = "50";
const FILTER_SEARCH_LIMIT: &str = "25";
const MAX_GENRE_TAGS: usize = 3;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Please enter a band name")]
    EmptyQuery,
    #[error("MusicBrainz returned {0}")]
    Upstream(u16),
    #[error("Unexpected response from MusicBrainz (content type '{0}')")]
    UpstreamFormat(String),
    #[error("Failed to parse MusicBrainz response: {0}")]
    UpstreamParse(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct MusicBrainzClient {
    http: Client,
    base_url: String,
    profile_url: String,
}

impl MusicBrainzClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(config.user_agent())
                .context("invalid user agent header value")?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            "X-Client-Id",
            header::HeaderValue::from_str(config.client_id())
                .context("invalid client identifier header value")?,
        );

        Url::parse(config.musicbrainz_url()).with_context(|| {
            format!("invalid MusicBrainz base url: {}", config.musicbrainz_url())
        })?;

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent())
            .timeout(config.http_timeout())
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .context("unable to construct http client")?;

        Ok(Self {
            http,
            base_url: config.musicbrainz_url().to_string(),
            profile_url: config.profile_url().to_string(),
        })
    }

    /// Name search used by the search box.
    pub async fn search_by_term(&self, term: &str) -> Result<Vec<BandRecord>, SearchError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        self.run_search(&format!("artist:{term}"), TERM_SEARCH_LIMIT).await
    }

    /// Search with a query assembled by [`build_filter_query`].
    pub async fn search_by_filters(&self, query: &str) -> Result<Vec<BandRecord>, SearchError> {
        self.run_search(query, FILTER_SEARCH_LIMIT).await
    }

    pub async fn artist_relations(&self, artist_id: &str) -> Result<Vec<RelationLink>, LookupError> {
        let url = Url::parse_with_params(
            &format!("{}/artist/{artist_id}", self.base_url),
            [("inc", "url-rels"), ("fmt", "json")],
        )
        .map_err(|err| LookupError::Parse(err.to_string()))?;

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body: ArtistLookupResponse = response
            .json()
            .await
            .map_err(|err| LookupError::Parse(err.to_string()))?;

        Ok(relation_links(body.relations.unwrap_or_default()))
    }

    async fn run_search(&self, query: &str, limit: &str) -> Result<Vec<BandRecord>, SearchError> {
        let url = Url::parse_with_params(
            &format!("{}/artist", self.base_url),
            [("query", query), ("fmt", "json"), ("limit", limit)],
        )
        .map_err(|err| SearchError::UpstreamParse(err.to_string()))?;

        debug!("MusicBrainz search: {query} (limit {limit})");
        let response = self.http.get(url).send().await?;
        check_status(response.status())?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await?;

        parse_search_response(&content_type, &body, &self.profile_url)
    }
}

#[async_trait]
impl PrimarySource for MusicBrainzClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<BandRecord>, SearchError> {
        match request {
            SearchRequest::Term(term) => self.search_by_term(term).await,
            SearchRequest::Popular(filters) => {
                let query = build_filter_query(filters.genre(), filters.country());
                self.search_by_filters(&query).await
            }
        }
    }
}

#[async_trait]
impl RelationSource for MusicBrainzClient {
    async fn artist_relations(&self, artist_id: &str) -> Result<Vec<RelationLink>, LookupError> {
        MusicBrainzClient::artist_relations(self, artist_id).await
    }
}

fn check_status(status: StatusCode) -> Result<(), SearchError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(SearchError::Upstream(status.as_u16()))
    }
}

/// Classifies and normalizes a search response body.
pub fn parse_search_response(
    content_type: &str,
    body: &str,
    profile_base: &str,
) -> Result<Vec<BandRecord>, SearchError> {
    if !content_type.contains("application/json") {
        return Err(SearchError::UpstreamFormat(content_type.to_string()));
    }

    let parsed: ArtistSearchResponse =
        serde_json::from_str(body).map_err(|err| SearchError::UpstreamParse(err.to_string()))?;

    Ok(parsed
        .artists
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| normalize_artist(item, profile_base))
        .collect())
}

/// Total over any payload shape; only a blank name rejects the entry.
fn normalize_artist(item: ArtistItem, profile_base: &str) -> Option<BandRecord> {
    let name = item.name.trim();
    if name.is_empty() {
        return None;
    }

    let country = non_empty(item.country)
        .or_else(|| item.area.and_then(|area| non_empty(area.name)))
        .unwrap_or_else(|| "Unknown".to_string());

    let tags = item
        .tags
        .unwrap_or_default()
        .into_iter()
        .filter_map(|tag| non_empty(tag.name))
        .take(MAX_GENRE_TAGS)
        .collect::<Vec<_>>();
    let genre = if tags.is_empty() {
        non_empty(item.kind).unwrap_or_else(|| "Unknown".to_string())
    } else {
        tags.join(", ")
    };

    let ended = item
        .life_span
        .and_then(|span| span.ended)
        .unwrap_or(false);

    Some(BandRecord {
        profile_link: format!("{profile_base}/{}", item.id),
        id: item.id,
        name: name.to_string(),
        country,
        genre,
        status: BandStatus::from_ended(ended),
        image: None,
        description: None,
        relations: relation_links(item.relations.unwrap_or_default()),
    })
}

fn relation_links(items: Vec<RelationItem>) -> Vec<RelationLink> {
    items
        .into_iter()
        .filter_map(|item| {
            let kind = non_empty(item.kind)?;
            let url = item.url.and_then(|url| non_empty(url.resource))?;
            Some(RelationLink { kind, url })
        })
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ArtistSearchResponse {
    artists: Option<Vec<ArtistItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ArtistLookupResponse {
    relations: Option<Vec<RelationItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ArtistItem {
    id: String,
    name: String,
    country: Option<String>,
    area: Option<AreaItem>,
    #[serde(rename = "type")]
    kind: Option<String>,
    tags: Option<Vec<TagItem>>,
    #[serde(rename = "life-span")]
    life_span: Option<LifeSpan>,
    relations: Option<Vec<RelationItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AreaItem {
    name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TagItem {
    name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LifeSpan {
    ended: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RelationItem {
    #[serde(rename = "type")]
    kind: Option<String>,
    url: Option<UrlResource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UrlResource {
    resource: Option<String>,
}
