//! Market sizing research service
//!
//! Exposes the workflow actions: clarifying questions, formula brainstorming,
//! formula decomposition, LLM-only data source suggestions, and the
//! search-backed datasource batch.

use std::sync::Arc;

use sizing_core::{BatchResult, Component, SizingResult};
use sizing_research::{
    parse_json_reply, DatasourcePlan, DecomposedFormula, ExaClient, FormulaBrainstorm,
    OpenAIClient, PromptTemplate, ReasoningClient, SearchClient, SizingConfig,
};
use tracing::{info, instrument, warn};

use crate::batch::BatchOrchestrator;
use crate::component_runner::ComponentResearchRunner;

/// Service for market sizing research
pub struct SizingResearchService {
    reasoning: Arc<dyn ReasoningClient>,
    orchestrator: BatchOrchestrator,
}

impl SizingResearchService {
    /// Create the service with OpenAI and Exa clients built from `config`
    pub fn new(config: &SizingConfig) -> SizingResult<Self> {
        config.validate()?;
        let reasoning: Arc<dyn ReasoningClient> = Arc::new(OpenAIClient::new(&config.llm)?);
        let search: Arc<dyn SearchClient> = Arc::new(ExaClient::new(&config.search)?);

        Ok(Self::with_clients(
            reasoning,
            search,
            config.extraction_concurrency,
        ))
    }

    pub fn with_clients(
        reasoning: Arc<dyn ReasoningClient>,
        search: Arc<dyn SearchClient>,
        extraction_concurrency: Option<usize>,
    ) -> Self {
        let runner = ComponentResearchRunner::new(search, reasoning.clone())
            .with_concurrency(extraction_concurrency);

        Self {
            reasoning,
            orchestrator: BatchOrchestrator::new(runner),
        }
    }

    /// Clarifying questions for a market description, as free text
    #[instrument(skip(self))]
    pub async fn clarify(&self, market_description: &str) -> SizingResult<String> {
        let prompt = PromptTemplate::ClarifyingQuestions { market_description }.render();
        self.reasoning.complete(&prompt, false).await
    }

    /// Full brainstorm reply: steps, formulas and clarifications
    #[instrument(skip(self))]
    pub async fn brainstorm_full(&self, market_description: &str) -> SizingResult<FormulaBrainstorm> {
        let prompt = PromptTemplate::FormulaBrainstorm { market_description }.render();
        let reply = self.reasoning.complete(&prompt, true).await?;
        parse_json_reply(&reply, "brainstorm reply")
    }

    /// Candidate market sizing formulas for a market description
    pub async fn brainstorm(&self, market_description: &str) -> SizingResult<Vec<String>> {
        let brainstorm = self.brainstorm_full(market_description).await?;
        info!("Brainstormed {} formulas", brainstorm.formulas.len());
        Ok(brainstorm.formulas)
    }

    /// Component names of a formula, in reply order with duplicates kept
    #[instrument(skip(self))]
    pub async fn decompose(&self, formula: &str) -> SizingResult<Vec<Component>> {
        let prompt = PromptTemplate::DecomposeFormula { formula }.render();
        let reply = self.reasoning.complete(&prompt, true).await?;
        let decomposed: DecomposedFormula = parse_json_reply(&reply, "decomposition")?;

        match decomposed.component_names() {
            Some(components) => {
                info!("Decomposed into {} components", components.len());
                Ok(components)
            }
            None => {
                warn!(
                    "Unexpected components format in response: {:?}",
                    decomposed.components
                );
                Ok(Vec::new())
            }
        }
    }

    /// Data source suggestions for every component of a formula, from the model alone
    #[instrument(skip(self))]
    pub async fn find_data_for_formula(&self, formula: &str) -> SizingResult<DatasourcePlan> {
        let prompt = PromptTemplate::Datasource { formula }.render();
        let reply = self.reasoning.complete(&prompt, true).await?;
        parse_json_reply(&reply, "datasource plan")
    }

    /// Search-backed data points for every component
    pub async fn datasource(&self, components: &[Component]) -> BatchResult {
        self.orchestrator.run_all(components).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeReasoning, FakeSearch};

    fn service(reasoning: FakeReasoning) -> SizingResearchService {
        SizingResearchService::with_clients(Arc::new(reasoning), Arc::new(FakeSearch::new()), None)
    }

    #[tokio::test]
    async fn test_clarify_is_free_text() {
        let service = service(FakeReasoning::new(|prompt, expect_json| {
            assert!(!expect_json);
            assert!(prompt.contains("scooter"));
            Ok("1. Which cities count as mid-size?".to_string())
        }));

        let questions = service.clarify("scooter rentals").await.unwrap();
        assert!(questions.starts_with("1."));
    }

    #[tokio::test]
    async fn test_brainstorm_returns_formulas() {
        let service = service(FakeReasoning::new(|_, expect_json| {
            assert!(expect_json);
            Ok(r#"{"steps": "1. Count cities", "formula": ["TAM = cities * riders"], "clarifications": ["Which cities?"]}"#
                .to_string())
        }));

        let full = service.brainstorm_full("scooter rentals").await.unwrap();
        assert_eq!(full.steps, "1. Count cities");
        assert_eq!(full.clarifications, vec!["Which cities?"]);
        assert_eq!(
            service.brainstorm("scooter rentals").await.unwrap(),
            vec!["TAM = cities * riders"]
        );
    }

    #[tokio::test]
    async fn test_brainstorm_without_formula_key() {
        let service = service(FakeReasoning::new(|_, _| Ok(r#"{"steps": "none"}"#.to_string())));
        assert!(service.brainstorm("x").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_decompose_wrong_shape_is_empty() {
        let service = service(FakeReasoning::new(|_, _| {
            Ok(r#"{"components": {"a": 1}}"#.to_string())
        }));
        assert!(service.decompose("a * b").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_decompose_malformed_reply_fails() {
        let service = service(FakeReasoning::new(|_, _| Ok("a, b".to_string())));
        let err = service.decompose("a * b").await.unwrap_err();
        assert_eq!(err.kind(), "malformed_reply");
    }

    #[tokio::test]
    async fn test_find_data_for_formula() {
        let service = service(FakeReasoning::new(|prompt, _| {
            assert!(prompt.contains("a * b"));
            Ok(r#"{"components": [{"component": "a", "data_sources": []}]}"#.to_string())
        }));

        let plan = service.find_data_for_formula("a * b").await.unwrap();
        assert_eq!(plan.components.len(), 1);
        assert_eq!(plan.components[0].component, "a");
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let service = service(FakeReasoning::new(|_, _| {
            Err(sizing_core::SizingError::upstream("OpenAI API error: 500"))
        }));
        assert_eq!(service.brainstorm("x").await.unwrap_err().kind(), "upstream");
    }
}
