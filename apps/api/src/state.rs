use std::sync::Arc;

use crate::config::Config;
use crate::parsing::ResumeParser;
use crate::report::ReportRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Holds the injected skill vocabulary.
    pub parser: ResumeParser,
    pub renderer: Arc<ReportRenderer>,
}
