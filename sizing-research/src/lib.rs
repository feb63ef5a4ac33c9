//! Outbound adapters for market sizing research
//!
//! This crate holds the prompt templates, the OpenAI chat completion client
//! used for reasoning and extraction, and the Exa answer client used for
//! semantic search.

pub mod config;
pub mod exa;
pub mod openai;
pub mod prompts;
pub mod provider;
pub mod types;

pub use config::{ProviderConfig, SizingConfig};
pub use exa::{ExaAnswerRequest, ExaAnswerResponse, ExaCitation, ExaClient};
pub use openai::OpenAIClient;
pub use prompts::{PromptArgs, PromptTemplate, PromptTemplateRegistry, SYSTEM_MESSAGE};
pub use provider::{extract_json, parse_json_reply, ReasoningClient, SearchAnswer, SearchClient};
pub use types::{
    ComponentSources, DatasourcePlan, DecomposedFormula, FormulaBrainstorm, SuggestedSource,
    SynthesisReply,
};
