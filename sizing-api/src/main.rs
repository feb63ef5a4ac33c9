//! Market Sizing Research API Server
//!
//! HTTP entry point for the brainstorm, decompose, clarify and datasource
//! actions of the research workflow.

mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use sizing_research::SizingConfig;
use sizing_services::SizingResearchService;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Research service (optional - requires OPENAI_API_KEY and EXA_API_KEY)
    pub research_service: Option<Arc<SizingResearchService>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sizing_api=debug")),
        )
        .init();

    info!("Starting Market Sizing Research API");

    let research_service = match SizingConfig::from_env().and_then(|config| {
        info!(
            "Research providers: LLM at {} ({}), search at {}",
            config.llm.endpoint,
            config.llm.model.as_deref().unwrap_or("default model"),
            config.search.endpoint
        );
        SizingResearchService::new(&config)
    }) {
        Ok(service) => {
            info!("Research service initialized successfully");
            Some(Arc::new(service))
        }
        Err(e) => {
            info!(
                "Research service not available: {}. Set OPENAI_API_KEY and EXA_API_KEY to enable.",
                e
            );
            None
        }
    };

    let app = routes::router(AppState { research_service });

    // Start server
    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
