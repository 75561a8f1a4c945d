mod config;
mod errors;
mod extraction;
mod fields;
mod models;
mod parsing;
mod report;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::fields::SkillSet;
use crate::parsing::ResumeParser;
use crate::report::{ReportRenderer, TemplateLocator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Parser API v{}", env!("CARGO_PKG_VERSION"));

    // Skill vocabulary (built-in unless SKILLS_FILE is set)
    let skills = match &config.skills_file {
        Some(path) => {
            let skills = SkillSet::from_file(path)?;
            info!("Loaded {} skills from {}", skills.len(), path.display());
            skills
        }
        None => SkillSet::default(),
    };
    let parser = ResumeParser::new(Arc::new(skills));

    // Template candidates are probed on every render, never cached
    let locator = TemplateLocator::standard(&config.template_name, config.template_path.clone());
    for candidate in locator.candidates() {
        info!("Template candidate: {}", candidate.display());
    }
    let renderer = Arc::new(ReportRenderer::new(locator));

    let state = AppState {
        config: config.clone(),
        parser,
        renderer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
