use std::sync::Arc;

use log::{debug, info};

use crate::api::{PrimarySource, SearchError, SearchRequest};
use crate::enrich::EnrichmentResolver;
use crate::store::{BandStore, Generation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    Published { count: usize, enriched: usize },
    Stale,
}

/// Search, enrich, then publish to the store under the caller's generation.
#[derive(Clone)]
pub struct SearchPipeline {
    primary: Arc<dyn PrimarySource>,
    resolver: EnrichmentResolver,
    store: BandStore,
}

impl SearchPipeline {
    pub fn new(primary: Arc<dyn PrimarySource>, resolver: EnrichmentResolver, store: BandStore) -> Self {
        Self {
            primary,
            resolver,
            store,
        }
    }

    pub fn store(&self) -> &BandStore {
        &self.store
    }

    /// Primary failures abort the batch before anything is published.
    pub async fn execute(
        &self,
        generation: Generation,
        request: &SearchRequest,
    ) -> Result<PipelineOutcome, SearchError> {
        let primary = self.primary.search(request).await?;
        debug!(
            "generation {}: {} primary results",
            generation.value(),
            primary.len()
        );

        let batch = self.resolver.enrich(primary).await;
        let count = batch.bands.len();

        if self.store.replace(generation, batch.bands) {
            info!(
                "Loaded {count} bands ({} enriched, {} without details)",
                batch.enriched, batch.failed
            );
            Ok(PipelineOutcome::Published {
                count,
                enriched: batch.enriched,
            })
        } else {
            debug!("discarding stale batch for generation {}", generation.value());
            Ok(PipelineOutcome::Stale)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::api::{LookupError, PageSummary, RelationSource, SitelinkSource, SummarySource};
    use crate::models::{BandRecord, BandStatus, FilterSelection, RelationLink};

    #[derive(Default)]
    struct FakePrimary {
        results: HashMap<String, Vec<BandRecord>>,
        gated: Option<(String, Arc<Notify>)>,
        failure: Option<u16>,
    }

    #[async_trait]
    impl PrimarySource for FakePrimary {
        async fn search(&self, request: &SearchRequest) -> Result<Vec<BandRecord>, SearchError> {
            let key = match request {
                SearchRequest::Term(term) if term.trim().is_empty() => {
                    return Err(SearchError::EmptyQuery);
                }
                SearchRequest::Term(term) => term.clone(),
                SearchRequest::Popular(_) => "popular".to_string(),
            };
            if let Some(status) = self.failure {
                return Err(SearchError::Upstream(status));
            }
            if let Some((gated, notify)) = &self.gated {
                if *gated == key {
                    notify.notified().await;
                }
            }
            Ok(self.results.get(&key).cloned().unwrap_or_default())
        }
    }

    struct FailingRelations;

    #[async_trait]
    impl RelationSource for FailingRelations {
        async fn artist_relations(&self, _artist_id: &str) -> Result<Vec<RelationLink>, LookupError> {
            Err(LookupError::Status(503))
        }
    }

    struct NoSummaries;

    #[async_trait]
    impl SummarySource for NoSummaries {
        async fn page_summary(&self, _title: &str) -> Result<PageSummary, LookupError> {
            Err(LookupError::Status(404))
        }
    }

    struct NoSitelinks;

    #[async_trait]
    impl SitelinkSource for NoSitelinks {
        async fn wikipedia_title(&self, _entity_id: &str) -> Result<Option<String>, LookupError> {
            Ok(None)
        }
    }

    fn pipeline(primary: FakePrimary) -> SearchPipeline {
        let resolver = EnrichmentResolver::new(
            Arc::new(FailingRelations),
            Arc::new(NoSummaries),
            Arc::new(NoSitelinks),
        );
        SearchPipeline::new(Arc::new(primary), resolver, BandStore::new())
    }

    fn band(id: &str, name: &str, status: BandStatus) -> BandRecord {
        BandRecord {
            id: id.to_string(),
            name: name.to_string(),
            status,
            ..BandRecord::default()
        }
    }

    #[tokio::test]
    async fn failing_lookup_still_publishes_the_primary_record() {
        let primary = FakePrimary {
            results: HashMap::from([(
                "Metallica".to_string(),
                vec![band("65f4f0c5", "Metallica", BandStatus::Active)],
            )]),
            ..FakePrimary::default()
        };
        let pipeline = pipeline(primary);
        let generation = pipeline.store().issue();

        let outcome = pipeline
            .execute(generation, &SearchRequest::Term("Metallica".to_string()))
            .await
            .expect("search succeeds");

        assert_eq!(outcome, PipelineOutcome::Published { count: 1, enriched: 0 });
        let current = pipeline.store().current();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].name, "Metallica");
        assert_eq!(current[0].status, BandStatus::Active);
        assert_eq!(current[0].image, None);
        assert_eq!(current[0].description, None);
    }

    #[tokio::test]
    async fn zero_results_publish_an_empty_collection() {
        let pipeline = pipeline(FakePrimary::default());
        let generation = pipeline.store().issue();

        let outcome = pipeline
            .execute(generation, &SearchRequest::Popular(FilterSelection::default()))
            .await
            .expect("search succeeds");

        assert_eq!(outcome, PipelineOutcome::Published { count: 0, enriched: 0 });
        assert!(pipeline.store().current().is_empty());
        assert_eq!(pipeline.store().published(), Some(generation));
    }

    #[tokio::test]
    async fn primary_failure_leaves_the_store_alone() {
        let pipeline = pipeline(FakePrimary {
            failure: Some(503),
            ..FakePrimary::default()
        });
        let first = pipeline.store().issue();
        assert!(pipeline.store().replace(first, vec![band("k", "Kreator", BandStatus::Active)]));

        let generation = pipeline.store().issue();
        let result = pipeline
            .execute(generation, &SearchRequest::Term("Sodom".to_string()))
            .await;

        assert!(matches!(result, Err(SearchError::Upstream(503))));
        assert_eq!(pipeline.store().current()[0].name, "Kreator");
    }

    #[tokio::test]
    async fn stale_batch_does_not_overwrite_a_newer_one() {
        let gate = Arc::new(Notify::new());
        let primary = FakePrimary {
            results: HashMap::from([
                ("X".to_string(), vec![band("x", "X band", BandStatus::Active)]),
                ("Y".to_string(), vec![band("y", "Y band", BandStatus::SplitUp)]),
            ]),
            gated: Some(("X".to_string(), gate.clone())),
            ..FakePrimary::default()
        };
        let pipeline = pipeline(primary);

        let batch_a = pipeline.store().issue();
        let batch_b = pipeline.store().issue();
        let request_a = SearchRequest::Term("X".to_string());
        let request_b = SearchRequest::Term("Y".to_string());

        let (outcome_a, outcome_b) = tokio::join!(pipeline.execute(batch_a, &request_a), async {
            let outcome = pipeline.execute(batch_b, &request_b).await;
            gate.notify_one();
            outcome
        });

        assert_eq!(
            outcome_b.expect("B succeeds"),
            PipelineOutcome::Published { count: 1, enriched: 0 }
        );
        assert_eq!(outcome_a.expect("A succeeds"), PipelineOutcome::Stale);
        assert_eq!(pipeline.store().current()[0].name, "Y band");
        assert_eq!(pipeline.store().published(), Some(batch_b));
    }
}
