//! Error types for the market sizing workflow

use thiserror::Error;

/// Workspace-wide error type
#[derive(Error, Debug)]
pub enum SizingError {
    #[error("Unknown prompt name '{name}'. Valid options: {valid:?}")]
    UnknownTemplate {
        name: String,
        valid: Vec<&'static str>,
    },

    #[error("Template argument error: {0}")]
    TemplateArgument(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SizingError {
    pub fn unknown_template(name: impl Into<String>, valid: Vec<&'static str>) -> Self {
        SizingError::UnknownTemplate {
            name: name.into(),
            valid,
        }
    }

    pub fn template_argument(msg: impl Into<String>) -> Self {
        SizingError::TemplateArgument(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        SizingError::Upstream(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        SizingError::MalformedReply(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        SizingError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        SizingError::Internal(msg.into())
    }

    /// Stable identifier used in logs and HTTP error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            SizingError::UnknownTemplate { .. } => "unknown_template",
            SizingError::TemplateArgument(_) => "template_argument",
            SizingError::Upstream(_) => "upstream",
            SizingError::MalformedReply(_) => "malformed_reply",
            SizingError::Config(_) => "config",
            SizingError::Internal(_) => "internal",
        }
    }

    /// Whether the failure originated at an outbound collaborator
    pub fn is_upstream(&self) -> bool {
        matches!(self, SizingError::Upstream(_) | SizingError::MalformedReply(_))
    }
}

/// Result type alias for sizing operations
pub type SizingResult<T> = Result<T, SizingError>;
