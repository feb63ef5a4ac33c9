//! Prompt templates for the market sizing workflow
//!
//! Every template is a variant of [`PromptTemplate`] carrying exactly the
//! arguments it needs. [`PromptTemplateRegistry::render`] is the by-name route
//! used at string boundaries: it resolves the name, checks the argument set,
//! then renders through the typed variant.

use std::collections::BTreeMap;

use sizing_core::{SizingError, SizingResult};

/// System instruction sent with every reasoning request
pub const SYSTEM_MESSAGE: &str = "You are a structured market-sizing assistant. \
You design clear market sizing models, break them down into the data inputs they need, \
and point to data sources or proxies when direct figures are unavailable. \
Always answer in a structured, decomposed format.";

/// Named arguments for by-name rendering
pub type PromptArgs<'a> = BTreeMap<&'a str, &'a str>;

/// Closed set of prompt templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate<'a> {
    /// Free-text reply
    ClarifyingQuestions { market_description: &'a str },
    /// JSON reply: `{steps, formula: [..], clarifications: [..]}`
    FormulaBrainstorm { market_description: &'a str },
    /// JSON reply: `{components: [{component, data_sources: [..]}]}`
    Datasource { formula: &'a str },
    /// JSON reply: `{DATA_POINT, DATA_SOURCE_OVERVIEW}`
    ExaSynthesis { text: &'a str, component: &'a str },
    /// JSON reply: `{components: [..]}`
    DecomposeFormula { formula: &'a str },
}

/// (name, required arguments) for every template, in registry order
const TEMPLATES: [(&str, &[&str]); 5] = [
    ("clarifying_questions_prompt", &["market_description"]),
    ("formula_brainstorm_prompt", &["market_description"]),
    ("datasource_prompt", &["formula"]),
    ("exa_synthesis_prompt", &["text", "component"]),
    ("decompose_formula_prompt", &["formula"]),
];

impl<'a> PromptTemplate<'a> {
    pub fn name(&self) -> &'static str {
        match self {
            PromptTemplate::ClarifyingQuestions { .. } => "clarifying_questions_prompt",
            PromptTemplate::FormulaBrainstorm { .. } => "formula_brainstorm_prompt",
            PromptTemplate::Datasource { .. } => "datasource_prompt",
            PromptTemplate::ExaSynthesis { .. } => "exa_synthesis_prompt",
            PromptTemplate::DecomposeFormula { .. } => "decompose_formula_prompt",
        }
    }

    /// Whether the reply must be requested in JSON mode
    pub fn expects_json(&self) -> bool {
        !matches!(self, PromptTemplate::ClarifyingQuestions { .. })
    }

    /// Resolve a template by name, requiring exactly its named arguments
    pub fn from_args(name: &str, args: &PromptArgs<'a>) -> SizingResult<Self> {
        let required = PromptTemplateRegistry::required_args(name).ok_or_else(|| {
            SizingError::unknown_template(name, PromptTemplateRegistry::names().collect())
        })?;

        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|key| !args.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(SizingError::template_argument(format!(
                "'{}' is missing required argument(s): {}",
                name,
                missing.join(", ")
            )));
        }

        let unexpected: Vec<&str> = args
            .keys()
            .copied()
            .filter(|key| !required.iter().any(|r| r == key))
            .collect();
        if !unexpected.is_empty() {
            return Err(SizingError::template_argument(format!(
                "'{}' got unexpected argument(s): {}",
                name,
                unexpected.join(", ")
            )));
        }

        let arg = |key: &str| args[key];
        let template = match name {
            "clarifying_questions_prompt" => PromptTemplate::ClarifyingQuestions {
                market_description: arg("market_description"),
            },
            "formula_brainstorm_prompt" => PromptTemplate::FormulaBrainstorm {
                market_description: arg("market_description"),
            },
            "datasource_prompt" => PromptTemplate::Datasource {
                formula: arg("formula"),
            },
            "exa_synthesis_prompt" => PromptTemplate::ExaSynthesis {
                text: arg("text"),
                component: arg("component"),
            },
            "decompose_formula_prompt" => PromptTemplate::DecomposeFormula {
                formula: arg("formula"),
            },
            other => {
                return Err(SizingError::internal(format!(
                    "template '{}' registered without a variant",
                    other
                )))
            }
        };

        Ok(template)
    }

    pub fn render(&self) -> String {
        match *self {
            PromptTemplate::ClarifyingQuestions { market_description } => format!(
                r#"I want to size the market for: {market_description}.

Before building a sizing formula, list the clarifying questions whose answers would give the context a good formula needs.

Each question should map directly to an input of the formula."#
            ),
            PromptTemplate::FormulaBrainstorm { market_description } => format!(
                r#"I want to size the market for: {market_description}.

Respond with a JSON object containing these fields:

steps: string - a numbered overview of the sizing steps.
formula: list of strings - market sizing formulas written as strings, without explicit adoption or penetration rates.
clarifications: list of strings - clarifying questions worth considering for the formulas."#
            ),
            PromptTemplate::Datasource { formula } => format!(
                r#"This is the formula I want to use for market modeling:

{formula}

Break the formula into its components and, for each component, suggest several sources where its data point can be found.

Respond with a JSON object containing these fields:

components: list of component_data objects
component_data objects:
  -- component: name of the component
  -- data_sources: list of data source objects with fields:
       -- DATA_COMPONENT: component name
       -- DATA_SOURCE_NAME: name of the data source
       -- DATA_SOURCE_LINK: link to the data source
       -- DATA_SOURCE_OVERVIEW: short description or preview of the data source
       -- DATA_POINT: numeric value for the component"#
            ),
            PromptTemplate::ExaSynthesis { text, component } => format!(
                r#"The following text comes from a data source:
{text}

Extract a numeric data point for {component}.
Then summarize the text as briefly as possible.

Respond with a JSON object with this structure:

DATA_POINT: numeric data point for the component
DATA_SOURCE_OVERVIEW: a short summary giving an overview of the information in the text."#
            ),
            PromptTemplate::DecomposeFormula { formula } => format!(
                r#"I have a market size formula: {formula}

Decompose the formula into each individual component or data input.

Respond with a JSON object containing this field:

components: list of strings, each string being the name of one component."#
            ),
        }
    }
}

/// By-name access to the closed template set
pub struct PromptTemplateRegistry;

impl PromptTemplateRegistry {
    /// Recognized template names, in registry order
    pub fn names() -> impl Iterator<Item = &'static str> {
        TEMPLATES.iter().map(|(name, _)| *name)
    }

    pub fn required_args(name: &str) -> Option<&'static [&'static str]> {
        TEMPLATES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, args)| *args)
    }

    /// Render `name` with exactly its required named arguments.
    ///
    /// Fails with `UnknownTemplate` for an unrecognized name and with
    /// `TemplateArgument` when an argument is missing or unexpected.
    pub fn render(name: &str, args: &PromptArgs<'_>) -> SizingResult<String> {
        PromptTemplate::from_args(name, args).map(|template| template.render())
    }
}
