//! Market sizing research services
//!
//! This crate runs the multi-stage research workflow: per-citation
//! extraction, the concurrent per-component runner, and the sequential
//! batch orchestrator that isolates component failures.

pub mod batch;
pub mod component_runner;
pub mod extraction;
pub mod research_service;

#[cfg(test)]
mod test_support;

pub use batch::BatchOrchestrator;
pub use component_runner::ComponentResearchRunner;
pub use extraction::ComponentExtractionWorker;
pub use research_service::SizingResearchService;
