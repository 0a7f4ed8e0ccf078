mod api;
mod app;
mod config;
mod enrich;
mod filter;
mod logging;
mod models;
mod pipeline;
mod render;
mod store;
mod tui;

use std::sync::Arc;

use anyhow::Result;

use crate::api::musicbrainz::MusicBrainzClient;
use crate::api::wikidata::WikidataClient;
use crate::api::wikipedia::WikipediaClient;
use crate::enrich::EnrichmentResolver;
use crate::pipeline::SearchPipeline;
use crate::store::BandStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::AppConfig::load()?;

    let (msg_tx, msg_rx) = tokio::sync::mpsc::unbounded_channel();
    logging::ChannelLogger::new(config.log_level(), msg_tx.clone()).install()?;

    let musicbrainz = Arc::new(MusicBrainzClient::new(&config)?);
    let resolver = EnrichmentResolver::new(
        musicbrainz.clone(),
        Arc::new(WikipediaClient::new(&config)?),
        Arc::new(WikidataClient::new(&config)?),
    )
    .with_batch_timeout(config.batch_timeout())
    .with_record_timeout(config.record_timeout());

    let pipeline = SearchPipeline::new(musicbrainz, resolver, BandStore::new());
    let controller = tui::AppController::new(pipeline, msg_tx);

    let app = tui::App::new(controller, msg_rx);
    tui::run(app).await
}
