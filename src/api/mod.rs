pub mod musicbrainz;
pub mod query;
pub mod wikidata;
pub mod wikipedia;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{BandRecord, FilterSelection, RelationLink};

pub use musicbrainz::SearchError;

/// Failure of a single secondary lookup. Never escapes the enrichment batch.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("failed to parse response: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub thumbnail: Option<String>,
    pub extract: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    Term(String),
    Popular(FilterSelection),
}

#[async_trait]
pub trait PrimarySource: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<BandRecord>, SearchError>;
}

#[async_trait]
pub trait RelationSource: Send + Sync {
    async fn artist_relations(&self, artist_id: &str) -> Result<Vec<RelationLink>, LookupError>;
}

#[async_trait]
pub trait SummarySource: Send + Sync {
    async fn page_summary(&self, title: &str) -> Result<PageSummary, LookupError>;
}

/// Maps a Wikidata entity to the title of its English Wikipedia article, if any.
#[async_trait]
pub trait SitelinkSource: Send + Sync {
    async fn wikipedia_title(&self, entity_id: &str) -> Result<Option<String>, LookupError>;
}
