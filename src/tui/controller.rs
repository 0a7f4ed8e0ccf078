use log::debug;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task;

use crate::api::{SearchError, SearchRequest};
use crate::app::AppMessage;
use crate::models::FilterSelection;
use crate::pipeline::{PipelineOutcome, SearchPipeline};
use crate::store::{BandStore, Generation};

#[derive(Clone)]
pub struct AppController {
    pipeline: SearchPipeline,
    message_tx: UnboundedSender<AppMessage>,
}

impl AppController {
    pub fn new(pipeline: SearchPipeline, message_tx: UnboundedSender<AppMessage>) -> Self {
        Self {
            pipeline,
            message_tx,
        }
    }

    pub fn store(&self) -> &BandStore {
        self.pipeline.store()
    }

    /// A blank term is reported back without touching the network or the store.
    pub fn search_bands(&self, term: &str) -> Option<Generation> {
        let term = term.trim();
        if term.is_empty() {
            let _ = self
                .message_tx
                .send(AppMessage::SearchFailed {
                    generation: None,
                    reason: SearchError::EmptyQuery.to_string(),
                });
            return None;
        }

        Some(self.spawn_batch(SearchRequest::Term(term.to_string())))
    }

    pub fn load_popular(&self, filters: FilterSelection) -> Generation {
        self.spawn_batch(SearchRequest::Popular(filters))
    }

    // The generation is issued before the task starts so a later action always supersedes it.
    fn spawn_batch(&self, request: SearchRequest) -> Generation {
        let generation = self.pipeline.store().issue();
        let pipeline = self.pipeline.clone();
        let tx = self.message_tx.clone();

        task::spawn(async move {
            match pipeline.execute(generation, &request).await {
                Ok(PipelineOutcome::Published { count, enriched }) => {
                    let _ = tx.send(AppMessage::BandsLoaded {
                        generation,
                        count,
                        enriched,
                    });
                }
                Ok(PipelineOutcome::Stale) => {}
                Err(err) if pipeline.store().is_current(generation) => {
                    let _ = tx.send(AppMessage::SearchFailed {
                        generation: Some(generation),
                        reason: failure_message(&request, &err),
                    });
                }
                Err(err) => {
                    debug!("ignoring failure of superseded batch: {err}");
                }
            }
        });

        generation
    }
}

fn failure_message(request: &SearchRequest, err: &SearchError) -> String {
    match (request, err) {
        (SearchRequest::Popular(_), SearchError::Network(_)) => {
            "Error loading bands. Please try searching manually.".to_string()
        }
        (SearchRequest::Term(_), SearchError::Network(_)) => {
            "Network error. The request could not be completed.".to_string()
        }
        (_, err) => err.to_string(),
    }
}
