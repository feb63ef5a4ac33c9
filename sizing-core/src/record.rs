//! Search citations and the data source records synthesized from them

use serde::{Deserialize, Serialize};

/// Name of one data input of a market sizing formula.
///
/// Used both as the search query and as the key of a [`crate::BatchResult`].
/// Uniqueness is not enforced.
pub type Component = String;

/// One search result returned by the search provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub title: Option<String>,
    pub url: Option<String>,
    /// Full page text (requested from the provider alongside the answer)
    pub text: Option<String>,
}

impl Citation {
    /// Text handed to the synthesis prompt; absent text renders as empty
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Extracted data point: providers answer with either a bare number or a
/// descriptive string ("12.5%", "approx. 4 million")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataPoint {
    Number(serde_json::Number),
    Text(String),
}

impl DataPoint {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataPoint::Number(n) => n.as_f64(),
            DataPoint::Text(_) => None,
        }
    }
}

impl From<f64> for DataPoint {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(DataPoint::Number)
            .unwrap_or_else(|| DataPoint::Text(value.to_string()))
    }
}

impl From<i64> for DataPoint {
    fn from(value: i64) -> Self {
        DataPoint::Number(value.into())
    }
}

impl From<&str> for DataPoint {
    fn from(value: &str) -> Self {
        DataPoint::Text(value.to_string())
    }
}

/// Synthesized evidence for one (component, citation) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceRecord {
    pub component: Component,
    #[serde(rename = "DATA_SOURCE_NAME")]
    pub source_name: Option<String>,
    #[serde(rename = "DATA_SOURCE_LINK")]
    pub source_link: Option<String>,
    #[serde(rename = "DATA_SOURCE_TEXT")]
    pub source_text: Option<String>,
    #[serde(rename = "DATA_POINT")]
    pub data_point: DataPoint,
    #[serde(rename = "DATA_SOURCE_OVERVIEW")]
    pub overview: String,
}
