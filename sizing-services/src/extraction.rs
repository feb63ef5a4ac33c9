//! Per-citation data point extraction

use std::sync::Arc;

use sizing_core::{Citation, DataSourceRecord, SizingResult};
use sizing_research::{parse_json_reply, PromptTemplate, ReasoningClient, SynthesisReply};
use tracing::{debug, instrument};

/// Turns one search citation into a [`DataSourceRecord`] for a component
#[derive(Clone)]
pub struct ComponentExtractionWorker {
    reasoning: Arc<dyn ReasoningClient>,
}

impl ComponentExtractionWorker {
    pub fn new(reasoning: Arc<dyn ReasoningClient>) -> Self {
        Self { reasoning }
    }

    /// Synthesize a data point from the citation text.
    ///
    /// A synthesis reply that is not a JSON object carrying `DATA_POINT` and
    /// `DATA_SOURCE_OVERVIEW` fails with `MalformedReply`.
    #[instrument(skip(self, citation), fields(url = ?citation.url))]
    pub async fn extract(&self, citation: Citation, component: &str) -> SizingResult<DataSourceRecord> {
        let prompt = PromptTemplate::ExaSynthesis {
            text: citation.text_or_empty(),
            component,
        }
        .render();

        let reply = self.reasoning.complete(&prompt, true).await?;
        let synthesis: SynthesisReply = parse_json_reply(&reply, "synthesis reply")?;
        debug!("Extracted data point {:?}", synthesis.data_point);

        Ok(merge_record(component, citation, synthesis))
    }
}

/// Component, then citation metadata, then synthesis reply; later sources win.
/// A reply key sent as `null` still overrides the citation.
fn merge_record(component: &str, citation: Citation, reply: SynthesisReply) -> DataSourceRecord {
    DataSourceRecord {
        component: reply.component.unwrap_or_else(|| component.to_string()),
        source_name: reply.source_name.unwrap_or(citation.title),
        source_link: reply.source_link.unwrap_or(citation.url),
        source_text: reply.source_text.unwrap_or(citation.text),
        data_point: reply.data_point,
        overview: reply.overview,
    }
}
