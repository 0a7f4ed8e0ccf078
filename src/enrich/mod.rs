//! Fills in images and biographies for a batch of band records.
//!
//! Every record in a batch is resolved concurrently on the calling task and
//! the batch completes at a single join point. A record whose resolution
//! fails or runs past the deadline simply comes back unenriched, so the
//! output always has the same length and order as the input.

pub mod links;

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::debug;
use thiserror::Error;
use tokio::time::{Instant, timeout_at};

use crate::api::{LookupError, RelationSource, SitelinkSource, SummarySource};
use crate::models::BandRecord;

use links::{LinkTarget, biography_target};

const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum EnrichmentFailure {
    #[error("no Wikipedia or Wikidata relation")]
    NoBiographyLink,
    #[error("relation lookup failed: {0}")]
    Lookup(#[source] LookupError),
    #[error("Wikidata lookup failed: {0}")]
    Sitelink(#[source] LookupError),
    #[error("no English Wikipedia article for {0}")]
    NoSitelink(String),
    #[error("summary lookup failed: {0}")]
    Summary(#[source] LookupError),
    #[error("timed out")]
    TimedOut,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichedFields {
    pub image: Option<String>,
    pub description: Option<String>,
}

impl EnrichedFields {
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.description.is_none()
    }

    /// Only fields that resolved are written; the rest of the record is untouched.
    pub fn apply_to(self, band: &mut BandRecord) {
        if let Some(image) = self.image {
            band.image = Some(image);
        }
        if let Some(description) = self.description {
            band.description = Some(description);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnrichedBatch {
    pub bands: Vec<BandRecord>,
    pub enriched: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct EnrichmentResolver {
    relations: Arc<dyn RelationSource>,
    summaries: Arc<dyn SummarySource>,
    sitelinks: Arc<dyn SitelinkSource>,
    batch_timeout: Duration,
    record_timeout: Option<Duration>,
}

impl EnrichmentResolver {
    pub fn new(
        relations: Arc<dyn RelationSource>,
        summaries: Arc<dyn SummarySource>,
        sitelinks: Arc<dyn SitelinkSource>,
    ) -> Self {
        Self {
            relations,
            summaries,
            sitelinks,
            batch_timeout: DEFAULT_BATCH_TIMEOUT,
            record_timeout: None,
        }
    }

    pub fn with_batch_timeout(mut self, timeout: Duration) -> Self {
        self.batch_timeout = timeout;
        self
    }

    pub fn with_record_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.record_timeout = timeout;
        self
    }

    pub async fn enrich(&self, bands: Vec<BandRecord>) -> EnrichedBatch {
        let deadline = Instant::now().checked_add(self.batch_timeout);

        let outcomes = join_all(
            bands
                .iter()
                .map(|band| self.resolve_before(band, deadline)),
        )
        .await;

        let mut batch = EnrichedBatch {
            bands: Vec::with_capacity(bands.len()),
            enriched: 0,
            failed: 0,
        };

        for (mut band, outcome) in bands.into_iter().zip(outcomes) {
            match outcome {
                Ok(fields) => {
                    if !fields.is_empty() {
                        batch.enriched += 1;
                    }
                    fields.apply_to(&mut band);
                }
                Err(failure) => {
                    debug!("No enrichment for {}: {failure}", band.name);
                    batch.failed += 1;
                }
            }
            batch.bands.push(band);
        }

        batch
    }

    // A deadline too far out to represent leaves that bound off entirely.
    async fn resolve_before(
        &self,
        band: &BandRecord,
        deadline: Option<Instant>,
    ) -> Result<EnrichedFields, EnrichmentFailure> {
        let record_deadline = self
            .record_timeout
            .and_then(|timeout| Instant::now().checked_add(timeout));
        let limit = match (deadline, record_deadline) {
            (Some(batch), Some(record)) => Some(batch.min(record)),
            (batch, record) => batch.or(record),
        };

        match limit {
            Some(limit) => timeout_at(limit, self.resolve(band))
                .await
                .unwrap_or(Err(EnrichmentFailure::TimedOut)),
            None => self.resolve(band).await,
        }
    }

    pub async fn resolve(&self, band: &BandRecord) -> Result<EnrichedFields, EnrichmentFailure> {
        let target = match biography_target(&band.relations) {
            Some(target) => target,
            None => self.discover_target(band).await?,
        };

        let title = match target {
            LinkTarget::WikipediaTitle(title) => title,
            LinkTarget::WikidataEntity(entity) => self
                .sitelinks
                .wikipedia_title(&entity)
                .await
                .map_err(EnrichmentFailure::Sitelink)?
                .ok_or(EnrichmentFailure::NoSitelink(entity))?,
        };

        let summary = self
            .summaries
            .page_summary(&title)
            .await
            .map_err(EnrichmentFailure::Summary)?;

        Ok(EnrichedFields {
            image: summary.thumbnail,
            description: summary.extract,
        })
    }

    async fn discover_target(&self, band: &BandRecord) -> Result<LinkTarget, EnrichmentFailure> {
        if band.id.is_empty() {
            return Err(EnrichmentFailure::NoBiographyLink);
        }

        let relations = self
            .relations
            .artist_relations(&band.id)
            .await
            .map_err(EnrichmentFailure::Lookup)?;

        biography_target(&relations).ok_or(EnrichmentFailure::NoBiographyLink)
    }
}
