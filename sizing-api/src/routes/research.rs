//! Research action endpoint
//!
//! A single route dispatching on the `action` query parameter:
//! `brainstorm`, `decompose`, `clarify` and `datasource`.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sizing_core::{BatchResult, SizingError};
use tracing::{error, info};

use crate::AppState;

/// Create research routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/research", get(research_action).post(research_action))
}

/// A validated request for one workflow action
#[derive(Debug, Clone, PartialEq)]
pub enum ResearchAction {
    Brainstorm { market_description: String },
    Decompose { formula: String },
    Clarify { market_description: String },
    Datasource { components: Vec<String> },
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct FormulasResponse {
    formulas: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ComponentsResponse {
    components: Vec<String>,
}

#[derive(Debug, Serialize)]
struct QuestionsResponse {
    questions: String,
}

#[derive(Debug, Serialize)]
struct DatasourcesResponse {
    datasources: BatchResult,
}

#[derive(Debug, Deserialize)]
struct DatasourceBody {
    components: Option<serde_json::Value>,
}

/// Validate the query parameters and body for an action.
///
/// Errors are the client-facing messages returned with `400 Bad Request`.
pub fn parse_action(params: &HashMap<String, String>, body: &[u8]) -> Result<ResearchAction, String> {
    let action = params
        .get("action")
        .filter(|a| !a.is_empty())
        .ok_or_else(|| "Missing required query parameter: action".to_string())?;

    let required = |key: &str, action: &str| {
        params
            .get(key)
            .filter(|v| !v.is_empty())
            .cloned()
            .ok_or_else(|| format!("Missing '{}' for {} action", key, action))
    };

    match action.as_str() {
        "brainstorm" => Ok(ResearchAction::Brainstorm {
            market_description: required("market_description", "brainstorm")?,
        }),
        "decompose" => Ok(ResearchAction::Decompose {
            formula: required("formula", "decompose")?,
        }),
        "clarify" => Ok(ResearchAction::Clarify {
            market_description: required("market_description", "clarify")?,
        }),
        "datasource" => {
            let body: DatasourceBody = if body.is_empty() {
                DatasourceBody { components: None }
            } else {
                serde_json::from_slice(body).map_err(|_| "Invalid JSON in request body".to_string())?
            };

            let components = body
                .components
                .and_then(|value| serde_json::from_value::<Vec<String>>(value).ok())
                .ok_or_else(|| "'components' must be a list in the request body".to_string())?;

            Ok(ResearchAction::Datasource { components })
        }
        other => Err(format!("Unknown action: {}", other)),
    }
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message,
            kind: None,
        }),
    )
        .into_response()
}

fn failure(e: SizingError) -> Response {
    let status = if e.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
            kind: Some(e.kind()),
        }),
    )
        .into_response()
}

/// Run one workflow action
async fn research_action(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let action = match parse_action(&params, &body) {
        Ok(action) => action,
        Err(message) => return bad_request(message),
    };

    // Check if research service is available
    let service = match &state.research_service {
        Some(service) => service,
        None => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: "Research service not available. Check OPENAI_API_KEY and EXA_API_KEY environment variables.".to_string(),
                    kind: Some("config"),
                }),
            )
                .into_response();
        }
    };

    info!("Handling research action: {:?}", action);

    match action {
        ResearchAction::Brainstorm { market_description } => {
            match service.brainstorm(&market_description).await {
                Ok(formulas) => Json(FormulasResponse { formulas }).into_response(),
                Err(e) => {
                    error!("Brainstorm failed: {}", e);
                    failure(e)
                }
            }
        }
        ResearchAction::Decompose { formula } => match service.decompose(&formula).await {
            Ok(components) => Json(ComponentsResponse { components }).into_response(),
            Err(e) => {
                error!("Decompose failed: {}", e);
                failure(e)
            }
        },
        ResearchAction::Clarify { market_description } => {
            match service.clarify(&market_description).await {
                Ok(questions) => Json(QuestionsResponse { questions }).into_response(),
                Err(e) => {
                    error!("Clarify failed: {}", e);
                    failure(e)
                }
            }
        }
        ResearchAction::Datasource { components } => {
            let datasources = service.datasource(&components).await;
            Json(DatasourcesResponse { datasources }).into_response()
        }
    }
}
