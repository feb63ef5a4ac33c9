//! Sequential research over a list of components with per-component failure isolation

use sizing_core::{BatchResult, Component};
use tracing::{error, info, instrument};

use crate::component_runner::ComponentResearchRunner;

/// Runs every component's workflow one after another
#[derive(Clone)]
pub struct BatchOrchestrator {
    runner: ComponentResearchRunner,
}

impl BatchOrchestrator {
    pub fn new(runner: ComponentResearchRunner) -> Self {
        Self { runner }
    }

    /// Research each component in input order.
    ///
    /// A component whose workflow fails is logged and recorded as `None`;
    /// the remaining components still run.
    #[instrument(skip(self, components), fields(count = components.len()))]
    pub async fn run_all(&self, components: &[Component]) -> BatchResult {
        info!("Components: {:?}", components);
        let mut results = BatchResult::with_capacity(components.len());

        for component in components {
            info!("Processing component '{}'", component);
            match self.runner.run(component).await {
                Ok(records) => {
                    info!(
                        "Completed workflow for component '{}' ({} records)",
                        component,
                        records.len()
                    );
                    results.record_success(component.clone(), records);
                }
                Err(e) => {
                    error!(
                        kind = e.kind(),
                        "Failed workflow for component '{}': {}", component, e
                    );
                    results.record_failure(component.clone());
                }
            }
        }

        info!(
            "Workflows complete for {} components ({} failed)",
            results.len(),
            results.failed_count()
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::test_support::{citation, FakeReasoning, FakeSearch};

    fn orchestrator(search: FakeSearch) -> BatchOrchestrator {
        BatchOrchestrator::new(ComponentResearchRunner::new(
            Arc::new(search),
            Arc::new(FakeReasoning::synthesis()),
        ))
    }

    fn components(names: &[&str]) -> Vec<Component> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_keys_follow_input_order() {
        let search = FakeSearch::new()
            .with_citations("b", vec![citation("B", "https://b.example", "b")])
            .with_citations("a", vec![citation("A", "https://a.example", "a")]);
        let batch = orchestrator(search).run_all(&components(&["b", "c", "a"])).await;

        let keys: Vec<_> = batch.components().cloned().collect();
        assert_eq!(keys, vec!["b", "c", "a"]);
        assert_eq!(batch.get("c"), Some(&Some(vec![])));
        assert_eq!(batch.failed_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_is_isolated() {
        let search = FakeSearch::new()
            .with_citations("Number of cities", vec![citation("Census", "https://census.gov", "312")])
            .with_citations(
                "Scooter adoption rate",
                vec![
                    citation("Survey", "https://survey.example", "4%"),
                    citation("Broken", "https://broken.example", "BROKEN"),
                ],
            )
            .with_citations("Population per city", vec![citation("Pop", "https://pop.example", "250k")]);

        let batch = orchestrator(search)
            .run_all(&components(&[
                "Number of cities",
                "Scooter adoption rate",
                "Population per city",
            ]))
            .await;

        assert_eq!(batch.len(), 3);
        assert!(batch.is_failed("Scooter adoption rate"));
        assert_eq!(batch.failed_count(), 1);
        for ok in ["Number of cities", "Population per city"] {
            let records = batch.get(ok).unwrap().as_ref().unwrap();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].component, ok);
        }
    }

    #[tokio::test]
    async fn test_duplicate_components_last_run_wins() {
        let search = Arc::new(
            FakeSearch::new()
                .with_citations("a", vec![citation("A", "https://a.example", "a")])
                .failing_after("a", 1),
        );
        let orchestrator = BatchOrchestrator::new(ComponentResearchRunner::new(
            search.clone(),
            Arc::new(FakeReasoning::synthesis()),
        ));

        let batch = orchestrator.run_all(&components(&["a", "b", "a"])).await;

        assert_eq!(search.queries(), vec!["a", "b", "a"]);
        let keys: Vec<_> = batch.components().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert!(batch.is_failed("a"));
        assert_eq!(batch.get("b"), Some(&Some(vec![])));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let batch = orchestrator(FakeSearch::new()).run_all(&[]).await;
        assert!(batch.is_empty());
    }
}
