//! Seams between the research workflow and its outbound collaborators

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sizing_core::{Citation, SizingError, SizingResult};

/// Chat completion provider
#[async_trait]
pub trait ReasoningClient: Send + Sync {
    /// Send one prompt and return the raw reply text.
    ///
    /// With `expect_json` the provider is constrained to a single JSON object
    /// and a reply that does not parse fails with `MalformedReply`.
    async fn complete(&self, prompt: &str, expect_json: bool) -> SizingResult<String>;
}

/// Answer returned by a search provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchAnswer {
    pub text: String,
    /// Provider order is preserved
    pub citations: Vec<Citation>,
}

/// Semantic search / answer provider
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn answer(&self, query: &str) -> SizingResult<SearchAnswer>;
}

/// Parse a JSON-mode reply into its typed shape
pub fn parse_json_reply<T: DeserializeOwned>(reply: &str, what: &str) -> SizingResult<T> {
    let json_str = extract_json(reply)?;
    serde_json::from_str(&json_str)
        .map_err(|e| SizingError::malformed(format!("Failed to parse {}: {}", what, e)))
}

/// Pull the JSON object out of a reply, tolerating markdown code fences.
///
/// A reply that already parses as a JSON object is returned whole.
pub fn extract_json(content: &str) -> SizingResult<String> {
    let trimmed = content.trim();
    if let Ok(serde_json::Value::Object(_)) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return Ok(trimmed.to_string());
    }

    if let Some(start) = content.find("```json") {
        let start = start + 7;
        if let Some(end) = content[start..].find("```") {
            return Ok(content[start..start + end].trim().to_string());
        }
    }

    if let Some(start) = content.find('{') {
        if let Some(end) = content.rfind('}') {
            if end > start {
                return Ok(content[start..=end].to_string());
            }
        }
    }

    Err(SizingError::malformed("No JSON object found in reply"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Reply {
        components: Vec<String>,
    }

    #[test]
    fn test_extract_json_variants() {
        assert_eq!(extract_json("{\"a\": 1}").unwrap(), "{\"a\": 1}");
        assert_eq!(
            extract_json("Here you go:\n```json\n{\"a\": 1}\n```").unwrap(),
            "{\"a\": 1}"
        );
        assert_eq!(extract_json("prefix {\"a\": {\"b\": 2}} suffix").unwrap(), "{\"a\": {\"b\": 2}}");
        assert!(extract_json("no json here").is_err());
        assert!(extract_json("} backwards {").is_err());
    }

    #[test]
    fn test_extract_json_keeps_fence_inside_string_value() {
        let body = r#"{"DATA_POINT": 5, "DATA_SOURCE_OVERVIEW": "Table given as ```json {\"x\": 1} ``` in the page"}"#;
        assert_eq!(extract_json(body).unwrap(), body);
        assert_eq!(extract_json(&format!("  {}\n", body)).unwrap(), body);

        let reply: serde_json::Value = parse_json_reply(body, "synthesis reply").unwrap();
        assert_eq!(reply["DATA_POINT"], 5);
    }

    #[test]
    fn test_parse_json_reply() {
        let reply: Reply = parse_json_reply("{\"components\": [\"a\", \"b\"]}", "components").unwrap();
        assert_eq!(reply.components, vec!["a", "b"]);

        let err = parse_json_reply::<Reply>("{\"formula\": []}", "components").unwrap_err();
        assert_eq!(err.kind(), "malformed_reply");
    }
}
