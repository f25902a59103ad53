use std::sync::Arc;

use crate::config::Config;
use crate::jobs::source::JobSource;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Sample catalog or Adzuna, fixed at startup.
    pub jobs: Arc<dyn JobSource>,
    pub config: Config,
}
