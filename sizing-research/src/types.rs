//! Reply shapes of the JSON-mode prompt templates

use serde::{Deserialize, Serialize};
use sizing_core::DataPoint;

/// Reply to `formula_brainstorm_prompt`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormulaBrainstorm {
    /// Numbered overview of the sizing steps
    #[serde(default)]
    pub steps: String,
    #[serde(default, rename = "formula")]
    pub formulas: Vec<String>,
    #[serde(default)]
    pub clarifications: Vec<String>,
}

/// Reply to `decompose_formula_prompt`.
///
/// `components` is kept untyped so a reply with the wrong shape can be
/// reported and treated as empty rather than failing the call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecomposedFormula {
    #[serde(default)]
    pub components: Option<serde_json::Value>,
}

impl DecomposedFormula {
    /// Component names in reply order; `None` when the reply is not a list of strings
    pub fn component_names(&self) -> Option<Vec<String>> {
        match &self.components {
            None => Some(Vec::new()),
            Some(value) => serde_json::from_value(value.clone()).ok(),
        }
    }
}

/// Reply to `datasource_prompt`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasourcePlan {
    #[serde(default)]
    pub components: Vec<ComponentSources>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSources {
    pub component: String,
    #[serde(default)]
    pub data_sources: Vec<SuggestedSource>,
}

/// A source suggested from model knowledge alone, without search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedSource {
    #[serde(rename = "DATA_COMPONENT", default)]
    pub component: Option<String>,
    #[serde(rename = "DATA_SOURCE_NAME", default)]
    pub source_name: Option<String>,
    #[serde(rename = "DATA_SOURCE_LINK", default)]
    pub source_link: Option<String>,
    #[serde(rename = "DATA_SOURCE_OVERVIEW", default)]
    pub overview: Option<String>,
    #[serde(rename = "DATA_POINT", default)]
    pub data_point: Option<DataPoint>,
}

/// Reply to `exa_synthesis_prompt`.
///
/// `DATA_POINT` and `DATA_SOURCE_OVERVIEW` are required. The remaining keys
/// are optional and, when present, override the citation metadata; an
/// explicit `null` overrides too, as `Some(None)`.
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisReply {
    #[serde(rename = "DATA_POINT")]
    pub data_point: DataPoint,
    #[serde(rename = "DATA_SOURCE_OVERVIEW")]
    pub overview: String,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(rename = "DATA_SOURCE_NAME", default, deserialize_with = "present")]
    pub source_name: Option<Option<String>>,
    #[serde(rename = "DATA_SOURCE_LINK", default, deserialize_with = "present")]
    pub source_link: Option<Option<String>>,
    #[serde(rename = "DATA_SOURCE_TEXT", default, deserialize_with = "present")]
    pub source_text: Option<Option<String>>,
}

/// Distinguishes a key sent as `null` from a missing key
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
