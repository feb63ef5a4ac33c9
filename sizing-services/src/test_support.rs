//! In-memory collaborators for exercising the workflow without network access

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sizing_core::{Citation, SizingError, SizingResult};
use sizing_research::{ReasoningClient, SearchAnswer, SearchClient};

type Respond = Box<dyn Fn(&str, bool) -> SizingResult<String> + Send + Sync>;
type Delay = Box<dyn Fn(&str) -> Duration + Send + Sync>;

/// Reasoning client answering from a closure, tracking concurrent calls
pub struct FakeReasoning {
    respond: Respond,
    delay: Delay,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeReasoning {
    pub fn new(respond: impl Fn(&str, bool) -> SizingResult<String> + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            delay: Box::new(|_| Duration::ZERO),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Synthesis replies: `BROKEN` in the citation text yields a non-JSON reply
    pub fn synthesis() -> Self {
        Self::new(|prompt, _| {
            if prompt.contains("BROKEN") {
                return Ok("I could not find a number".to_string());
            }
            Ok(r#"{"DATA_POINT": 312, "DATA_SOURCE_OVERVIEW": "City counts"}"#.to_string())
        })
    }

    pub fn with_delay(mut self, delay: impl Fn(&str) -> Duration + Send + Sync + 'static) -> Self {
        self.delay = Box::new(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReasoningClient for FakeReasoning {
    async fn complete(&self, prompt: &str, expect_json: bool) -> SizingResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = (self.delay)(prompt);
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let reply = (self.respond)(prompt, expect_json)?;
        if expect_json && serde_json::from_str::<serde_json::Value>(&reply).is_err() {
            return Err(SizingError::malformed("Reply is not valid JSON"));
        }
        Ok(reply)
    }
}

/// Search client with canned citations per query
#[derive(Default)]
pub struct FakeSearch {
    citations: HashMap<String, Vec<Citation>>,
    failing: HashSet<String>,
    /// Query → number of calls that succeed before every later call fails
    failing_after: HashMap<String, usize>,
    queries: std::sync::Mutex<Vec<String>>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_citations(mut self, query: &str, citations: Vec<Citation>) -> Self {
        self.citations.insert(query.to_string(), citations);
        self
    }

    pub fn failing(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    pub fn failing_after(mut self, query: &str, successes: usize) -> Self {
        self.failing_after.insert(query.to_string(), successes);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchClient for FakeSearch {
    async fn answer(&self, query: &str) -> SizingResult<SearchAnswer> {
        let seen = match self.queries.lock() {
            Ok(mut queries) => {
                let seen = queries.iter().filter(|q| q.as_str() == query).count();
                queries.push(query.to_string());
                seen
            }
            Err(_) => 0,
        };
        let exhausted = self
            .failing_after
            .get(query)
            .is_some_and(|successes| seen >= *successes);
        if self.failing.contains(query) || exhausted {
            return Err(SizingError::upstream(format!("Exa API error (500): {}", query)));
        }
        Ok(SearchAnswer {
            text: format!("answer for {}", query),
            citations: self.citations.get(query).cloned().unwrap_or_default(),
        })
    }
}

pub fn citation(title: &str, url: &str, text: &str) -> Citation {
    Citation {
        title: Some(title.to_string()),
        url: Some(url.to_string()),
        text: Some(text.to_string()),
    }
}
