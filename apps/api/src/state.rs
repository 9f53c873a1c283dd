use std::sync::Arc;

use crate::config::Config;
use crate::leaders::resolver::LeaderResolver;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; every request works on its own data.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text model. Default: `GeminiClient`.
    pub llm: Arc<dyn TextGenerator>,
    pub leaders: LeaderResolver,
    pub config: Config,
}
