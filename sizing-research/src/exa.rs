use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use sizing_core::{Citation, SizingError, SizingResult};
use tracing::{debug, instrument};

use crate::config::ProviderConfig;
use crate::provider::{SearchAnswer, SearchClient};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct ExaClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaAnswerRequest {
    pub query: String,
    pub stream: bool,
    /// Include the full page text of every citation
    pub text: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaAnswerResponse {
    /// Plain string, or an object when the request carried an output schema
    #[serde(default)]
    pub answer: serde_json::Value,
    #[serde(default)]
    pub citations: Vec<ExaCitation>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaCitation {
    #[serde(default)]
    pub id: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub published_date: Option<String>,
    pub author: Option<String>,
    pub text: Option<String>,
}

impl From<ExaCitation> for Citation {
    fn from(citation: ExaCitation) -> Self {
        Citation {
            title: citation.title,
            url: citation.url,
            text: citation.text,
        }
    }
}

impl From<ExaAnswerResponse> for SearchAnswer {
    fn from(response: ExaAnswerResponse) -> Self {
        let text = match response.answer {
            serde_json::Value::String(text) => text,
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        };

        SearchAnswer {
            text,
            citations: response.citations.into_iter().map(Citation::from).collect(),
        }
    }
}

impl ExaClient {
    pub fn new(config: &ProviderConfig) -> SizingResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SizingError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            api_key: config.api_key.clone(),
        })
    }

    #[instrument(skip(self))]
    pub async fn raw_answer(&self, request: &ExaAnswerRequest) -> SizingResult<ExaAnswerResponse> {
        let url = format!("{}/answer", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| SizingError::upstream(format!("Exa API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| SizingError::upstream(format!("Failed to read Exa response: {}", e)))
    }
}

fn status_error(status: StatusCode, body: &str) -> SizingError {
    SizingError::upstream(format!("Exa API error ({}): {}", status, body))
}

#[async_trait]
impl SearchClient for ExaClient {
    async fn answer(&self, query: &str) -> SizingResult<SearchAnswer> {
        let request = ExaAnswerRequest {
            query: query.to_string(),
            stream: false,
            text: true,
            model: None,
        };

        let response = self.raw_answer(&request).await?;
        debug!(
            "Exa answer for '{}': {} citations (request {:?})",
            query,
            response.citations.len(),
            response.request_id
        );

        Ok(response.into())
    }
}
