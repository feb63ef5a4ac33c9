//! Per-component aggregation of a datasource batch

use indexmap::IndexMap;
use serde::Serialize;

use crate::record::{Component, DataSourceRecord};

/// Records for one component, or `None` when its workflow failed
pub type ComponentResult = Option<Vec<DataSourceRecord>>;

/// Mapping from component to its result, in input order.
///
/// A repeated component keeps the position of its first occurrence and the
/// value of its last run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct BatchResult {
    entries: IndexMap<Component, ComponentResult>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    pub fn record_success(&mut self, component: impl Into<Component>, records: Vec<DataSourceRecord>) {
        self.entries.insert(component.into(), Some(records));
    }

    pub fn record_failure(&mut self, component: impl Into<Component>) {
        self.entries.insert(component.into(), None);
    }

    pub fn get(&self, component: &str) -> Option<&ComponentResult> {
        self.entries.get(component)
    }

    /// True when the component was processed and its workflow failed
    pub fn is_failed(&self, component: &str) -> bool {
        matches!(self.entries.get(component), Some(None))
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Component, &ComponentResult)> {
        self.entries.iter()
    }

    pub fn failed_count(&self) -> usize {
        self.entries.values().filter(|r| r.is_none()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
