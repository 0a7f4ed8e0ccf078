use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, header};
use serde::Deserialize;

use crate::api::{LookupError, SitelinkSource};
use crate::config::AppConfig;

const ENGLISH_WIKI: &str = "enwiki";

#[derive(Clone)]
pub struct WikidataClient {
    http: Client,
    base_url: String,
}

impl WikidataClient {
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
            .context("unable to create HTTP client for Wikidata")?;

        Ok(Self {
            http,
            base_url: config.wikidata_url().to_string(),
        })
    }

    pub async fn wikipedia_title(&self, entity_id: &str) -> Result<Option<String>, LookupError> {
        let url = format!("{}/{}.json", self.base_url, urlencoding::encode(entity_id));
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body: EntityDataResponse = response
            .json()
            .await
            .map_err(|err| LookupError::Parse(err.to_string()))?;

        Ok(english_title(body, entity_id))
    }
}

#[async_trait]
impl SitelinkSource for WikidataClient {
    async fn wikipedia_title(&self, entity_id: &str) -> Result<Option<String>, LookupError> {
        WikidataClient::wikipedia_title(self, entity_id).await
    }
}

// Redirected entities come back keyed by their new id.
fn english_title(mut body: EntityDataResponse, entity_id: &str) -> Option<String> {
    let entity = match body.entities.remove(entity_id) {
        Some(entity) => entity,
        None => body.entities.into_values().next()?,
    };

    entity
        .sitelinks
        .get(ENGLISH_WIKI)
        .map(|link| link.title.trim().to_string())
        .filter(|title| !title.is_empty())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct EntityDataResponse {
    entities: HashMap<String, Entity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Entity {
    sitelinks: HashMap<String, Sitelink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Sitelink {
    title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(value: serde_json::Value) -> EntityDataResponse {
        serde_json::from_value(value).expect("fixture parses")
    }

    #[test]
    fn reads_the_english_sitelink() {
        let response = body(serde_json::json!({
            "entities": {
                "Q309870": {
                    "id": "Q309870",
                    "sitelinks": {
                        "dewiki": {"site": "dewiki", "title": "Opeth"},
                        "enwiki": {"site": "enwiki", "title": "Opeth"}
                    }
                }
            }
        }));
        assert_eq!(english_title(response, "Q309870").as_deref(), Some("Opeth"));
    }

    #[test]
    fn follows_a_redirected_entity() {
        let response = body(serde_json::json!({
            "entities": {"Q2": {"sitelinks": {"enwiki": {"title": "Earth"}}}}
        }));
        assert_eq!(english_title(response, "Q1").as_deref(), Some("Earth"));
    }

    #[test]
    fn missing_english_article_yields_none() {
        let response = body(serde_json::json!({
            "entities": {"Q5": {"sitelinks": {"svwiki": {"title": "Något"}}}}
        }));
        assert_eq!(english_title(response, "Q5"), None);
    }
}
