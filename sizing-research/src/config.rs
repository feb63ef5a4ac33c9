//! Provider configuration
//!
//! Credentials and endpoints are collected once into [`SizingConfig`] and
//! handed to each client constructor.

use std::env;

use sizing_core::{SizingError, SizingResult};
use url::Url;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_EXA_BASE_URL: &str = "https://api.exa.ai";

/// Connection settings for one outbound collaborator
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the provider API
    pub endpoint: String,
    pub api_key: String,
    /// Model identifier, for providers that take one
    pub model: Option<String>,
}

impl ProviderConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Endpoint without a trailing slash, so paths can be appended
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    fn validate(&self, name: &str) -> SizingResult<()> {
        Url::parse(&self.endpoint).map_err(|e| {
            SizingError::config(format!("{} endpoint '{}' is not a valid URL: {}", name, self.endpoint, e))
        })?;
        if self.api_key.trim().is_empty() {
            return Err(SizingError::config(format!("{} API key is empty", name)));
        }
        Ok(())
    }
}

/// Full configuration for the research workflow
#[derive(Debug, Clone)]
pub struct SizingConfig {
    /// Chat completion provider
    pub llm: ProviderConfig,
    /// Semantic search / answer provider
    pub search: ProviderConfig,
    /// Cap on concurrent extractions per component; `None` runs one worker per citation
    pub extraction_concurrency: Option<usize>,
}

impl SizingConfig {
    /// Load configuration from environment variables.
    ///
    /// Requires `OPENAI_API_KEY` and `EXA_API_KEY`. `OPENAI_BASE_URL`,
    /// `OPENAI_MODEL`, `EXA_BASE_URL` and `SIZING_EXTRACTION_CONCURRENCY`
    /// are optional.
    pub fn from_env() -> SizingResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> SizingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| SizingError::config(format!("{} environment variable not set", key)))
        };

        let llm = ProviderConfig::new(
            lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            require("OPENAI_API_KEY")?,
        )
        .with_model(lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()));

        let search = ProviderConfig::new(
            lookup("EXA_BASE_URL").unwrap_or_else(|| DEFAULT_EXA_BASE_URL.to_string()),
            require("EXA_API_KEY")?,
        );

        let extraction_concurrency = match lookup("SIZING_EXTRACTION_CONCURRENCY") {
            None => None,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(0) | Err(_) => {
                    return Err(SizingError::config(format!(
                        "SIZING_EXTRACTION_CONCURRENCY must be a positive integer, got '{}'",
                        raw
                    )))
                }
                Ok(limit) => Some(limit),
            },
        };

        let config = Self {
            llm,
            search,
            extraction_concurrency,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SizingResult<()> {
        self.llm.validate("LLM")?;
        self.search.validate("Search")
    }
}
