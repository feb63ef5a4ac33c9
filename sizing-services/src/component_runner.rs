//! Search-then-extract workflow for a single component

use std::sync::Arc;

use futures::{stream, StreamExt, TryStreamExt};
use sizing_core::{DataSourceRecord, SizingResult};
use sizing_research::{ReasoningClient, SearchClient};
use tracing::{info, instrument};

use crate::extraction::ComponentExtractionWorker;

/// Runs the search and the concurrent per-citation extractions for one component
#[derive(Clone)]
pub struct ComponentResearchRunner {
    search: Arc<dyn SearchClient>,
    worker: ComponentExtractionWorker,
    /// Concurrent extractions per run; `None` runs every citation at once
    concurrency: Option<usize>,
}

impl ComponentResearchRunner {
    pub fn new(search: Arc<dyn SearchClient>, reasoning: Arc<dyn ReasoningClient>) -> Self {
        Self {
            search,
            worker: ComponentExtractionWorker::new(reasoning),
            concurrency: None,
        }
    }

    pub fn with_concurrency(mut self, limit: Option<usize>) -> Self {
        self.concurrency = limit.filter(|l| *l > 0);
        self
    }

    /// Search with the component name verbatim, then extract one record per
    /// citation concurrently.
    ///
    /// Records come back in completion order. Zero citations yield an empty
    /// list. The first failed extraction aborts the run; extractions still in
    /// flight are dropped with it.
    #[instrument(skip(self))]
    pub async fn run(&self, component: &str) -> SizingResult<Vec<DataSourceRecord>> {
        info!("Running semantic search for component: {}", component);
        let answer = self.search.answer(component).await?;
        let total = answer.citations.len();
        info!("Retrieved {} citations", total);

        if total == 0 {
            return Ok(Vec::new());
        }

        let limit = self.concurrency.unwrap_or(total).min(total);
        let records: Vec<DataSourceRecord> = stream::iter(answer.citations)
            .map(|citation| self.worker.extract(citation, component))
            .buffer_unordered(limit)
            .try_collect()
            .await?;

        info!("Extraction complete: {} records", records.len());
        Ok(records)
    }
}
