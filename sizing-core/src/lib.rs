//! Core types for market sizing research
//!
//! This crate defines the data structures shared across the workspace:
//! formula components, search citations, synthesized data source records
//! and the per-component batch aggregation.

pub mod error;
pub mod record;
pub mod batch;

pub use batch::{BatchResult, ComponentResult};
pub use error::{SizingError, SizingResult};
pub use record::{Citation, Component, DataPoint, DataSourceRecord};
